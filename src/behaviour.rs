use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::error::{BehaviourError, Result};
use crate::hypothesis::Hypothesis;
use crate::interfaces::{RotateArrayFn, RotateFn, Symbol};
use crate::variable::{total_size, Variable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum BehaviourType {
    General,
    StandardStrainBased,
    StandardFiniteStrain,
    CohesiveZoneModel,
}

impl BehaviourType {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(BehaviourType::General),
            1 => Some(BehaviourType::StandardStrainBased),
            2 => Some(BehaviourType::StandardFiniteStrain),
            3 => Some(BehaviourType::CohesiveZoneModel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum Kinematic {
    Undefined,
    SmallStrain,
    CohesiveZone,
    FiniteStrainFCauchy,
    FiniteStrainEtoPk1,
}

impl Kinematic {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Kinematic::Undefined),
            1 => Some(Kinematic::SmallStrain),
            2 => Some(Kinematic::CohesiveZone),
            3 => Some(Kinematic::FiniteStrainFCauchy),
            4 => Some(Kinematic::FiniteStrainEtoPk1),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Symmetry {
    Isotropic,
    Orthotropic,
}

/// Availability of the routines rotating one kind of field between the global
/// frame and the material frame.
#[derive(Clone, Default)]
pub enum RotationCapability {
    #[default]
    Unavailable,
    Available {
        /// Rotates one integration point.
        single: RotateFn,
        /// Rotates an array of integration points with one matrix.
        batched: RotateArrayFn,
    },
}

impl RotationCapability {
    pub fn is_available(&self) -> bool {
        matches!(self, RotationCapability::Available { .. })
    }
}

impl fmt::Debug for RotationCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationCapability::Unavailable => f.write_str("Unavailable"),
            RotationCapability::Available { .. } => f.write_str("Available"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BehaviourInitializeFunction {
    pub function: Symbol,
    pub inputs: Vec<Variable>,
}

#[derive(Debug, Clone)]
pub struct BehaviourPostProcessing {
    pub function: Symbol,
    pub outputs: Vec<Variable>,
}

/// Description of a behaviour exported by a library, for one modelling
/// hypothesis. Built once by [`crate::load::load`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Behaviour {
    pub(crate) library: String,
    pub(crate) behaviour: String,
    pub(crate) function: String,
    pub(crate) hypothesis: Hypothesis,
    pub(crate) symbol: Symbol,
    pub(crate) tfel_version: String,
    pub(crate) unit_system: String,
    pub(crate) source: String,
    pub(crate) behaviour_type: BehaviourType,
    pub(crate) kinematic: Kinematic,
    pub(crate) symmetry: Symmetry,
    pub(crate) gradients: Vec<Variable>,
    pub(crate) thermodynamic_forces: Vec<Variable>,
    pub(crate) material_properties: Vec<Variable>,
    pub(crate) internal_state_variables: Vec<Variable>,
    pub(crate) external_state_variables: Vec<Variable>,
    pub(crate) parameters: Vec<String>,
    pub(crate) integer_parameters: Vec<String>,
    pub(crate) unsigned_short_parameters: Vec<String>,
    pub(crate) tangent_operator_blocks: Vec<(Variable, Variable)>,
    pub(crate) computes_stored_energy: bool,
    pub(crate) computes_dissipated_energy: bool,
    pub(crate) options: Vec<f64>,
    pub(crate) rotate_gradients: RotationCapability,
    pub(crate) rotate_thermodynamic_forces: RotationCapability,
    pub(crate) rotate_tangent_operator_blocks: RotationCapability,
    pub(crate) initialize_functions: BTreeMap<String, BehaviourInitializeFunction>,
    pub(crate) post_processings: BTreeMap<String, BehaviourPostProcessing>,
}

impl Behaviour {
    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn behaviour(&self) -> &str {
        &self.behaviour
    }

    /// Name of the integration routine, `<behaviour>_<hypothesis>`.
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn hypothesis(&self) -> Hypothesis {
        self.hypothesis
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn tfel_version(&self) -> &str {
        &self.tfel_version
    }

    pub fn unit_system(&self) -> &str {
        &self.unit_system
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn behaviour_type(&self) -> BehaviourType {
        self.behaviour_type
    }

    pub fn kinematic(&self) -> Kinematic {
        self.kinematic
    }

    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    pub fn gradients(&self) -> &[Variable] {
        &self.gradients
    }

    pub fn thermodynamic_forces(&self) -> &[Variable] {
        &self.thermodynamic_forces
    }

    pub fn material_properties(&self) -> &[Variable] {
        &self.material_properties
    }

    pub fn internal_state_variables(&self) -> &[Variable] {
        &self.internal_state_variables
    }

    pub fn external_state_variables(&self) -> &[Variable] {
        &self.external_state_variables
    }

    /// Names of the real parameters.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn integer_parameters(&self) -> &[String] {
        &self.integer_parameters
    }

    pub fn unsigned_short_parameters(&self) -> &[String] {
        &self.unsigned_short_parameters
    }

    pub fn tangent_operator_blocks(&self) -> &[(Variable, Variable)] {
        &self.tangent_operator_blocks
    }

    pub fn computes_stored_energy(&self) -> bool {
        self.computes_stored_energy
    }

    pub fn computes_dissipated_energy(&self) -> bool {
        self.computes_dissipated_energy
    }

    /// Stress measure and tangent operator codes of finite strain behaviours,
    /// empty for the other behaviours.
    pub fn options(&self) -> &[f64] {
        &self.options
    }

    pub fn rotate_gradients_capability(&self) -> &RotationCapability {
        &self.rotate_gradients
    }

    pub fn rotate_thermodynamic_forces_capability(&self) -> &RotationCapability {
        &self.rotate_thermodynamic_forces
    }

    pub fn rotate_tangent_operator_blocks_capability(&self) -> &RotationCapability {
        &self.rotate_tangent_operator_blocks
    }

    pub fn initialize_functions(&self) -> &BTreeMap<String, BehaviourInitializeFunction> {
        &self.initialize_functions
    }

    pub fn post_processings(&self) -> &BTreeMap<String, BehaviourPostProcessing> {
        &self.post_processings
    }

    pub fn gradients_size(&self) -> usize {
        total_size(&self.gradients, self.hypothesis)
    }

    pub fn thermodynamic_forces_size(&self) -> usize {
        total_size(&self.thermodynamic_forces, self.hypothesis)
    }

    pub fn tangent_operator_size(&self) -> usize {
        tangent_operator_size(self)
    }

    pub fn initialize_function_variables_size(&self, name: &str) -> Result<usize> {
        let f = self
            .initialize_functions
            .get(name)
            .ok_or_else(|| BehaviourError::UnknownFunction {
                operation: "initialize_function_variables_size",
                what: "initialize function",
                name: name.to_string(),
            })?;
        Ok(total_size(&f.inputs, self.hypothesis))
    }

    /// Zero-initialised array holding the inputs of an initialize function.
    pub fn allocate_initialize_function_variables(&self, name: &str) -> Result<Vec<f64>> {
        Ok(vec![0.0; self.initialize_function_variables_size(name)?])
    }

    pub fn post_processing_variables_size(&self, name: &str) -> Result<usize> {
        let p = self
            .post_processings
            .get(name)
            .ok_or_else(|| BehaviourError::UnknownFunction {
                operation: "post_processing_variables_size",
                what: "post-processing",
                name: name.to_string(),
            })?;
        Ok(total_size(&p.outputs, self.hypothesis))
    }

    /// Zero-initialised array holding the outputs of a post-processing.
    pub fn allocate_post_processing_variables(&self, name: &str) -> Result<Vec<f64>> {
        Ok(vec![0.0; self.post_processing_variables_size(name)?])
    }
}

/// Number of values of the tangent operator of one integration point.
pub fn tangent_operator_size(behaviour: &Behaviour) -> usize {
    behaviour
        .tangent_operator_blocks
        .iter()
        .map(|(num, den)| num.size(behaviour.hypothesis) * den.size(behaviour.hypothesis))
        .sum()
}
