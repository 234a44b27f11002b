//! In-memory behaviour library.
//!
//! [`BehaviourRegistry`] implements [`BehaviourResolver`] on top of metadata
//! registered at runtime. It is used to plug behaviours implemented in Rust
//! into the loader and to describe libraries in tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use strum::IntoEnumIterator;

use crate::behaviour::RotationCapability;
use crate::error::{BehaviourError, Result};
use crate::finite_strain::{StressMeasure, TangentOperator};
use crate::hypothesis::Hypothesis;
use crate::interfaces::{BehaviourResolver, ParameterType, ParameterValue, RotateArrayFn, RotateFn, Symbol};
use crate::stress_strain::{standard_rotations, standard_tangent_operator_rotations, Direction};
use crate::variable::{find_variable, Variable, VariableType};
use crate::BEHAVIOUR_API_VERSION;

/// Rotation routines of one kind of field.
#[derive(Clone)]
pub enum RotationRoutines {
    Exported { single: RotateFn, batched: RotateArrayFn },
    /// Routines of [`crate::stress_strain`], built from the declared variables.
    Standard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl Bounds {
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }
}

/// An initialize function or a post-processing.
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    pub symbol: Symbol,
    pub names: Vec<String>,
    pub types: Vec<i32>,
}

impl FunctionMetadata {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            names: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, code: i32) -> Self {
        self.names.push(name.into());
        self.types.push(code);
        self
    }
}

/// Everything a library exports about one behaviour. The same metadata is
/// used for every supported hypothesis.
#[derive(Clone)]
pub struct BehaviourMetadata {
    pub symbol: Symbol,
    pub hypotheses: Vec<Hypothesis>,
    pub material_knowledge_type: u32,
    pub api_version: u32,
    pub tfel_version: String,
    pub unit_system: String,
    pub source: String,
    pub behaviour_type: i32,
    pub kinematic: i32,
    pub symmetry: i32,
    pub elastic_stiffness_symmetry: i32,
    pub gradients_names: Vec<String>,
    pub gradients_types: Vec<i32>,
    pub thermodynamic_forces_names: Vec<String>,
    pub thermodynamic_forces_types: Vec<i32>,
    pub material_properties_names: Vec<String>,
    pub requires_stiffness_tensor: bool,
    pub requires_thermal_expansion_coefficient_tensor: bool,
    pub internal_state_variables_names: Vec<String>,
    pub internal_state_variables_types: Vec<i32>,
    pub temperature_removed_from_external_state_variables: bool,
    pub external_state_variables_names: Vec<String>,
    /// `None` for libraries exporting the names only.
    pub external_state_variables_types: Option<Vec<i32>>,
    pub tangent_operator_blocks: Vec<(String, String)>,
    pub computes_stored_energy: bool,
    pub computes_dissipated_energy: bool,
    pub parameters_names: Vec<String>,
    pub parameters_types: Vec<i32>,
    pub parameters_default_values: HashMap<String, ParameterValue>,
    pub bounds: HashMap<String, Bounds>,
    pub physical_bounds: HashMap<String, Bounds>,
    pub initialize_functions: BTreeMap<String, FunctionMetadata>,
    pub post_processings: BTreeMap<String, FunctionMetadata>,
    pub rotate_gradients: Option<RotationRoutines>,
    pub rotate_thermodynamic_forces: HashMap<Option<StressMeasure>, RotationRoutines>,
    pub rotate_tangent_operator_blocks: HashMap<Option<TangentOperator>, RotationRoutines>,
}

impl BehaviourMetadata {
    /// General behaviour without any variable, available for all hypotheses.
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            hypotheses: Hypothesis::iter().collect(),
            material_knowledge_type: 1,
            api_version: BEHAVIOUR_API_VERSION,
            tfel_version: String::new(),
            unit_system: String::new(),
            source: String::new(),
            behaviour_type: 0,
            kinematic: 0,
            symmetry: 0,
            elastic_stiffness_symmetry: 0,
            gradients_names: Vec::new(),
            gradients_types: Vec::new(),
            thermodynamic_forces_names: Vec::new(),
            thermodynamic_forces_types: Vec::new(),
            material_properties_names: Vec::new(),
            requires_stiffness_tensor: false,
            requires_thermal_expansion_coefficient_tensor: false,
            internal_state_variables_names: Vec::new(),
            internal_state_variables_types: Vec::new(),
            temperature_removed_from_external_state_variables: true,
            external_state_variables_names: Vec::new(),
            external_state_variables_types: Some(Vec::new()),
            tangent_operator_blocks: Vec::new(),
            computes_stored_energy: false,
            computes_dissipated_energy: false,
            parameters_names: Vec::new(),
            parameters_types: Vec::new(),
            parameters_default_values: HashMap::new(),
            bounds: HashMap::new(),
            physical_bounds: HashMap::new(),
            initialize_functions: BTreeMap::new(),
            post_processings: BTreeMap::new(),
            rotate_gradients: None,
            rotate_thermodynamic_forces: HashMap::new(),
            rotate_tangent_operator_blocks: HashMap::new(),
        }
    }

    fn standard(symbol: Symbol, behaviour_type: i32, kinematic: i32, gradient: Variable, force: Variable) -> Self {
        let mut m = Self::new(symbol);
        m.behaviour_type = behaviour_type;
        m.kinematic = kinematic;
        m.tangent_operator_blocks.push((force.name.clone(), gradient.name.clone()));
        m.with_gradient(gradient.name, gradient.type_code)
            .with_thermodynamic_force(force.name, force.type_code)
    }

    /// Strain based behaviour under the small strain kinematic.
    pub fn small_strain(symbol: Symbol) -> Self {
        Self::standard(
            symbol,
            1,
            1,
            Variable::new("Strain", VariableType::Stensor, 1),
            Variable::new("Stress", VariableType::Stensor, 1),
        )
    }

    /// Finite strain behaviour under the F-Cauchy kinematic.
    pub fn finite_strain(symbol: Symbol) -> Self {
        Self::standard(
            symbol,
            2,
            3,
            Variable::new("DeformationGradient", VariableType::Tensor, 3),
            Variable::new("Stress", VariableType::Stensor, 1),
        )
    }

    pub fn cohesive_zone(symbol: Symbol) -> Self {
        Self::standard(
            symbol,
            3,
            2,
            Variable::new("OpeningDisplacement", VariableType::Vector, 2),
            Variable::new("CohesiveForce", VariableType::Vector, 2),
        )
    }

    pub fn with_hypotheses(mut self, hypotheses: impl IntoIterator<Item = Hypothesis>) -> Self {
        self.hypotheses = hypotheses.into_iter().collect();
        self
    }

    pub fn with_gradient(mut self, name: impl Into<String>, code: i32) -> Self {
        self.gradients_names.push(name.into());
        self.gradients_types.push(code);
        self
    }

    pub fn with_thermodynamic_force(mut self, name: impl Into<String>, code: i32) -> Self {
        self.thermodynamic_forces_names.push(name.into());
        self.thermodynamic_forces_types.push(code);
        self
    }

    pub fn with_material_property(mut self, name: impl Into<String>) -> Self {
        self.material_properties_names.push(name.into());
        self
    }

    pub fn with_internal_state_variable(mut self, name: impl Into<String>, code: i32) -> Self {
        self.internal_state_variables_names.push(name.into());
        self.internal_state_variables_types.push(code);
        self
    }

    /// Appends an external state variable. Ignored types are dropped for
    /// libraries exporting the names only.
    pub fn with_external_state_variable(mut self, name: impl Into<String>, code: i32) -> Self {
        self.external_state_variables_names.push(name.into());
        if let Some(types) = self.external_state_variables_types.as_mut() {
            types.push(code);
        }
        self
    }

    pub fn with_tangent_operator_block(mut self, numerator: impl Into<String>, denominator: impl Into<String>) -> Self {
        self.tangent_operator_blocks.push((numerator.into(), denominator.into()));
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, default_value: impl Into<ParameterValue>) -> Self {
        let name = name.into();
        let value = default_value.into();
        self.parameters_names.push(name.clone());
        self.parameters_types.push(value.parameter_type().code());
        self.parameters_default_values.insert(name, value);
        self
    }

    pub fn with_bounds(mut self, variable: impl Into<String>, bounds: Bounds) -> Self {
        self.bounds.insert(variable.into(), bounds);
        self
    }

    pub fn with_physical_bounds(mut self, variable: impl Into<String>, bounds: Bounds) -> Self {
        self.physical_bounds.insert(variable.into(), bounds);
        self
    }

    pub fn with_initialize_function(mut self, name: impl Into<String>, function: FunctionMetadata) -> Self {
        self.initialize_functions.insert(name.into(), function);
        self
    }

    pub fn with_post_processing(mut self, name: impl Into<String>, function: FunctionMetadata) -> Self {
        self.post_processings.insert(name.into(), function);
        self
    }

    /// Declares the behaviour orthotropic, rotated by the routines of
    /// [`crate::stress_strain`].
    pub fn with_standard_rotations(mut self) -> Self {
        self.symmetry = 1;
        self.rotate_gradients = Some(RotationRoutines::Standard);
        self.rotate_thermodynamic_forces.insert(None, RotationRoutines::Standard);
        self.rotate_tangent_operator_blocks.insert(None, RotationRoutines::Standard);
        self
    }

    pub fn with_gradients_rotation(mut self, routines: RotationRoutines) -> Self {
        self.rotate_gradients = Some(routines);
        self
    }

    /// Routines used for the given stress measure. Routines registered with
    /// `None` are used when nothing more specific is registered.
    pub fn with_thermodynamic_forces_rotation(
        mut self,
        stress_measure: Option<StressMeasure>,
        routines: RotationRoutines,
    ) -> Self {
        self.rotate_thermodynamic_forces.insert(stress_measure, routines);
        self
    }

    pub fn with_tangent_operator_blocks_rotation(
        mut self,
        tangent_operator: Option<TangentOperator>,
        routines: RotationRoutines,
    ) -> Self {
        self.rotate_tangent_operator_blocks.insert(tangent_operator, routines);
        self
    }

    fn declared(names: &[String], types: &[i32]) -> Vec<Variable> {
        names
            .iter()
            .zip(types)
            .filter_map(|(name, &code)| {
                VariableType::from_code(code).map(|kind| Variable::new(name.clone(), kind, code))
            })
            .collect()
    }

    fn external_state_variables(&self) -> Vec<Variable> {
        let mut esvs = Vec::new();
        if self.temperature_removed_from_external_state_variables {
            esvs.push(Variable::scalar("Temperature"));
        }
        match &self.external_state_variables_types {
            Some(types) => esvs.extend(Self::declared(&self.external_state_variables_names, types)),
            None => esvs.extend(self.external_state_variables_names.iter().map(Variable::scalar)),
        }
        esvs
    }

    fn thermodynamic_forces(&self, stress_measure: Option<StressMeasure>) -> Vec<Variable> {
        let mut forces = Self::declared(&self.thermodynamic_forces_names, &self.thermodynamic_forces_types);
        if let (Some(force), Some(first)) = (stress_measure.and_then(|s| s.thermodynamic_force()), forces.first_mut()) {
            *first = force;
        }
        forces
    }

    fn tangent_operator_block_variables(
        &self,
        tangent_operator: Option<TangentOperator>,
    ) -> Result<Vec<(Variable, Variable)>> {
        let numerators: Vec<Variable> =
            Self::declared(&self.thermodynamic_forces_names, &self.thermodynamic_forces_types)
                .into_iter()
                .chain(Self::declared(
                    &self.internal_state_variables_names,
                    &self.internal_state_variables_types,
                ))
                .collect();
        let denominators: Vec<Variable> = Self::declared(&self.gradients_names, &self.gradients_types)
            .into_iter()
            .chain(self.external_state_variables())
            .collect();
        let find = |variables: &[Variable], name: &str| {
            find_variable(variables, name)
                .cloned()
                .ok_or_else(|| BehaviourError::Library(format!("no variable named '{}'", name)))
        };
        let mut blocks = self
            .tangent_operator_blocks
            .iter()
            .map(|(num, den)| -> Result<(Variable, Variable)> {
                Ok((find(&numerators, num)?, find(&denominators, den)?))
            })
            .collect::<Result<Vec<_>>>()?;
        if let (Some(block), Some(first)) = (tangent_operator.and_then(|t| t.block()), blocks.first_mut()) {
            *first = block;
        }
        Ok(blocks)
    }
}

type ParameterKey = (String, String, Hypothesis, String);

/// Behaviours registered by (library, behaviour) names.
#[derive(Default)]
pub struct BehaviourRegistry {
    behaviours: HashMap<(String, String), BehaviourMetadata>,
    parameter_values: RwLock<HashMap<ParameterKey, ParameterValue>>,
}

impl BehaviourRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a behaviour, replacing any behaviour with the same names.
    pub fn register(&mut self, library: impl Into<String>, behaviour: impl Into<String>, metadata: BehaviourMetadata) {
        let key = (library.into(), behaviour.into());
        tracing::debug!(library = %key.0, behaviour = %key.1, "behaviour registered");
        self.behaviours.insert(key, metadata);
    }

    pub fn with_behaviour(
        mut self,
        library: impl Into<String>,
        behaviour: impl Into<String>,
        metadata: BehaviourMetadata,
    ) -> Self {
        self.register(library, behaviour, metadata);
        self
    }

    pub fn contains(&self, library: &str, behaviour: &str) -> bool {
        self.behaviours.contains_key(&(library.to_string(), behaviour.to_string()))
    }

    fn metadata(&self, library: &str, behaviour: &str) -> Result<&BehaviourMetadata> {
        self.behaviours
            .get(&(library.to_string(), behaviour.to_string()))
            .ok_or_else(|| {
                BehaviourError::Library(format!(
                    "behaviour '{}' not found in library '{}'",
                    behaviour, library
                ))
            })
    }

    fn metadata_for(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<&BehaviourMetadata> {
        let m = self.metadata(library, behaviour)?;
        if !m.hypotheses.contains(&hypothesis) {
            return Err(BehaviourError::Library(format!(
                "behaviour '{}' in library '{}' is not available for the '{}' modelling hypothesis",
                behaviour, library, hypothesis
            )));
        }
        Ok(m)
    }

    fn function<'m>(
        map: &'m BTreeMap<String, FunctionMetadata>,
        what: &str,
        library: &str,
        behaviour: &str,
        name: &str,
    ) -> Result<&'m FunctionMetadata> {
        map.get(name).ok_or_else(|| {
            BehaviourError::Library(format!(
                "no {} named '{}' for behaviour '{}' in library '{}'",
                what, name, behaviour, library
            ))
        })
    }

    fn parameter_type(m: &BehaviourMetadata, library: &str, behaviour: &str, name: &str) -> Result<ParameterType> {
        let code = m
            .parameters_names
            .iter()
            .position(|n| n == name)
            .and_then(|i| m.parameters_types.get(i).copied())
            .ok_or_else(|| {
                BehaviourError::Library(format!(
                    "no parameter named '{}' for behaviour '{}' in library '{}'",
                    name, behaviour, library
                ))
            })?;
        ParameterType::from_code(code).ok_or_else(|| {
            BehaviourError::Library(format!("unsupported type ({}) for parameter '{}'", code, name))
        })
    }

    /// Current value of a parameter: the last value set, or its default value.
    pub fn parameter_value(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        name: &str,
    ) -> Result<ParameterValue> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        let parameter_type = Self::parameter_type(m, library, behaviour, name)?;
        let key = (library.to_string(), behaviour.to_string(), hypothesis, name.to_string());
        let values = self
            .parameter_values
            .read()
            .map_err(|_| BehaviourError::Internal("poisoned parameter values".to_string()))?;
        match values.get(&key) {
            Some(v) => Ok(*v),
            None => self.parameter_default_value(library, behaviour, hypothesis, name, parameter_type),
        }
    }

    fn rotation(
        routines: Option<&RotationRoutines>,
        what: &str,
        library: &str,
        behaviour: &str,
        standard: impl FnOnce() -> Result<RotationCapability>,
    ) -> Result<(RotateFn, RotateArrayFn)> {
        let capability = match routines {
            Some(RotationRoutines::Exported { single, batched }) => {
                return Ok((single.clone(), batched.clone()));
            }
            Some(RotationRoutines::Standard) => standard()?,
            None => {
                return Err(BehaviourError::Library(format!(
                    "behaviour '{}' in library '{}' does not export the rotation of its {}",
                    behaviour, library, what
                )))
            }
        };
        match capability {
            RotationCapability::Available { single, batched } => Ok((single, batched)),
            RotationCapability::Unavailable => Err(BehaviourError::Internal(format!("no rotation built for {}", what))),
        }
    }

    fn gradients_rotation(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<(RotateFn, RotateArrayFn)> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        Self::rotation(m.rotate_gradients.as_ref(), "gradients", library, behaviour, || {
            let gradients = BehaviourMetadata::declared(&m.gradients_names, &m.gradients_types);
            Ok(standard_rotations(gradients, hypothesis, Direction::GlobalToMaterial))
        })
    }

    fn thermodynamic_forces_rotation(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        stress_measure: Option<StressMeasure>,
    ) -> Result<(RotateFn, RotateArrayFn)> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        let routines = m
            .rotate_thermodynamic_forces
            .get(&stress_measure)
            .or_else(|| m.rotate_thermodynamic_forces.get(&None));
        Self::rotation(routines, "thermodynamic forces", library, behaviour, || {
            Ok(standard_rotations(
                m.thermodynamic_forces(stress_measure),
                hypothesis,
                Direction::MaterialToGlobal,
            ))
        })
    }

    fn tangent_operator_blocks_rotation(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        tangent_operator: Option<TangentOperator>,
    ) -> Result<(RotateFn, RotateArrayFn)> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        let routines = m
            .rotate_tangent_operator_blocks
            .get(&tangent_operator)
            .or_else(|| m.rotate_tangent_operator_blocks.get(&None));
        Self::rotation(routines, "tangent operator blocks", library, behaviour, || {
            Ok(standard_tangent_operator_rotations(
                m.tangent_operator_block_variables(tangent_operator)?,
                hypothesis,
                Direction::MaterialToGlobal,
            ))
        })
    }

    fn bound(
        map: &HashMap<String, Bounds>,
        what: &str,
        library: &str,
        behaviour: &str,
        variable: &str,
        select: fn(&Bounds) -> Option<f64>,
    ) -> Result<f64> {
        map.get(variable).and_then(select).ok_or_else(|| {
            BehaviourError::Library(format!(
                "no {} defined for variable '{}' of behaviour '{}' in library '{}'",
                what, variable, behaviour, library
            ))
        })
    }
}

impl BehaviourResolver for BehaviourRegistry {
    fn behaviour(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Symbol> {
        Ok(self.metadata_for(library, behaviour, hypothesis)?.symbol.clone())
    }

    fn material_knowledge_type(&self, library: &str, behaviour: &str) -> Result<u32> {
        Ok(self.metadata(library, behaviour)?.material_knowledge_type)
    }

    fn api_version(&self, library: &str, behaviour: &str) -> Result<u32> {
        Ok(self.metadata(library, behaviour)?.api_version)
    }

    fn tfel_version(&self, library: &str, behaviour: &str) -> Result<String> {
        Ok(self.metadata(library, behaviour)?.tfel_version.clone())
    }

    fn unit_system(&self, library: &str, behaviour: &str) -> Result<String> {
        Ok(self.metadata(library, behaviour)?.unit_system.clone())
    }

    fn source(&self, library: &str, behaviour: &str) -> Result<String> {
        Ok(self.metadata(library, behaviour)?.source.clone())
    }

    fn behaviour_type(&self, library: &str, behaviour: &str) -> Result<i32> {
        Ok(self.metadata(library, behaviour)?.behaviour_type)
    }

    fn behaviour_kinematic(&self, library: &str, behaviour: &str) -> Result<i32> {
        Ok(self.metadata(library, behaviour)?.kinematic)
    }

    fn behaviour_symmetry(&self, library: &str, behaviour: &str) -> Result<i32> {
        Ok(self.metadata(library, behaviour)?.symmetry)
    }

    fn elastic_stiffness_symmetry(&self, library: &str, behaviour: &str) -> Result<i32> {
        Ok(self.metadata(library, behaviour)?.elastic_stiffness_symmetry)
    }

    fn gradients_names(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Vec<String>> {
        Ok(self.metadata_for(library, behaviour, hypothesis)?.gradients_names.clone())
    }

    fn gradients_types(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Vec<i32>> {
        Ok(self.metadata_for(library, behaviour, hypothesis)?.gradients_types.clone())
    }

    fn thermodynamic_forces_names(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<String>> {
        Ok(self
            .metadata_for(library, behaviour, hypothesis)?
            .thermodynamic_forces_names
            .clone())
    }

    fn thermodynamic_forces_types(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Vec<i32>> {
        Ok(self
            .metadata_for(library, behaviour, hypothesis)?
            .thermodynamic_forces_types
            .clone())
    }

    fn material_properties_names(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Vec<String>> {
        Ok(self
            .metadata_for(library, behaviour, hypothesis)?
            .material_properties_names
            .clone())
    }

    fn requires_stiffness_tensor(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<bool> {
        Ok(self.metadata_for(library, behaviour, hypothesis)?.requires_stiffness_tensor)
    }

    fn requires_thermal_expansion_coefficient_tensor(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<bool> {
        Ok(self
            .metadata_for(library, behaviour, hypothesis)?
            .requires_thermal_expansion_coefficient_tensor)
    }

    fn internal_state_variables_names(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<String>> {
        Ok(self
            .metadata_for(library, behaviour, hypothesis)?
            .internal_state_variables_names
            .clone())
    }

    fn internal_state_variables_types(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<i32>> {
        Ok(self
            .metadata_for(library, behaviour, hypothesis)?
            .internal_state_variables_types
            .clone())
    }

    fn has_temperature_been_removed_from_external_state_variables(
        &self,
        library: &str,
        behaviour: &str,
    ) -> Result<bool> {
        Ok(self
            .metadata(library, behaviour)?
            .temperature_removed_from_external_state_variables)
    }

    fn has_external_state_variables_types(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<bool> {
        Ok(self
            .metadata_for(library, behaviour, hypothesis)?
            .external_state_variables_types
            .is_some())
    }

    fn external_state_variables_names(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<String>> {
        Ok(self
            .metadata_for(library, behaviour, hypothesis)?
            .external_state_variables_names
            .clone())
    }

    fn external_state_variables_types(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<i32>> {
        self.metadata_for(library, behaviour, hypothesis)?
            .external_state_variables_types
            .clone()
            .ok_or_else(|| {
                BehaviourError::Library(format!(
                    "behaviour '{}' in library '{}' does not export the types of its external state variables",
                    behaviour, library
                ))
            })
    }

    fn tangent_operator_blocks_names(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<(String, String)>> {
        Ok(self
            .metadata_for(library, behaviour, hypothesis)?
            .tangent_operator_blocks
            .clone())
    }

    fn computes_stored_energy(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<bool> {
        Ok(self.metadata_for(library, behaviour, hypothesis)?.computes_stored_energy)
    }

    fn computes_dissipated_energy(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<bool> {
        Ok(self.metadata_for(library, behaviour, hypothesis)?.computes_dissipated_energy)
    }

    fn parameters_names(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Vec<String>> {
        Ok(self.metadata_for(library, behaviour, hypothesis)?.parameters_names.clone())
    }

    fn parameters_types(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Vec<i32>> {
        Ok(self.metadata_for(library, behaviour, hypothesis)?.parameters_types.clone())
    }

    fn initialize_functions(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Vec<String>> {
        Ok(self
            .metadata_for(library, behaviour, hypothesis)?
            .initialize_functions
            .keys()
            .cloned()
            .collect())
    }

    fn initialize_function(
        &self,
        library: &str,
        behaviour: &str,
        function: &str,
        hypothesis: Hypothesis,
    ) -> Result<Symbol> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        let f = Self::function(&m.initialize_functions, "initialize function", library, behaviour, function)?;
        Ok(f.symbol.clone())
    }

    fn initialize_function_inputs_names(
        &self,
        library: &str,
        behaviour: &str,
        function: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<String>> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        let f = Self::function(&m.initialize_functions, "initialize function", library, behaviour, function)?;
        Ok(f.names.clone())
    }

    fn initialize_function_inputs_types(
        &self,
        library: &str,
        behaviour: &str,
        function: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<i32>> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        let f = Self::function(&m.initialize_functions, "initialize function", library, behaviour, function)?;
        Ok(f.types.clone())
    }

    fn post_processings(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Vec<String>> {
        Ok(self
            .metadata_for(library, behaviour, hypothesis)?
            .post_processings
            .keys()
            .cloned()
            .collect())
    }

    fn post_processing(
        &self,
        library: &str,
        behaviour: &str,
        function: &str,
        hypothesis: Hypothesis,
    ) -> Result<Symbol> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        let f = Self::function(&m.post_processings, "post-processing", library, behaviour, function)?;
        Ok(f.symbol.clone())
    }

    fn post_processing_outputs_names(
        &self,
        library: &str,
        behaviour: &str,
        function: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<String>> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        let f = Self::function(&m.post_processings, "post-processing", library, behaviour, function)?;
        Ok(f.names.clone())
    }

    fn post_processing_outputs_types(
        &self,
        library: &str,
        behaviour: &str,
        function: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<i32>> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        let f = Self::function(&m.post_processings, "post-processing", library, behaviour, function)?;
        Ok(f.types.clone())
    }

    fn rotate_gradients_function(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<RotateFn> {
        Ok(self.gradients_rotation(library, behaviour, hypothesis)?.0)
    }

    fn rotate_array_of_gradients_function(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<RotateArrayFn> {
        Ok(self.gradients_rotation(library, behaviour, hypothesis)?.1)
    }

    fn rotate_thermodynamic_forces_function(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        stress_measure: Option<StressMeasure>,
    ) -> Result<RotateFn> {
        Ok(self
            .thermodynamic_forces_rotation(library, behaviour, hypothesis, stress_measure)?
            .0)
    }

    fn rotate_array_of_thermodynamic_forces_function(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        stress_measure: Option<StressMeasure>,
    ) -> Result<RotateArrayFn> {
        Ok(self
            .thermodynamic_forces_rotation(library, behaviour, hypothesis, stress_measure)?
            .1)
    }

    fn rotate_tangent_operator_blocks_function(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        tangent_operator: Option<TangentOperator>,
    ) -> Result<RotateFn> {
        Ok(self
            .tangent_operator_blocks_rotation(library, behaviour, hypothesis, tangent_operator)?
            .0)
    }

    fn rotate_array_of_tangent_operator_blocks_function(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        tangent_operator: Option<TangentOperator>,
    ) -> Result<RotateArrayFn> {
        Ok(self
            .tangent_operator_blocks_rotation(library, behaviour, hypothesis, tangent_operator)?
            .1)
    }

    fn set_parameter(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        name: &str,
        value: ParameterValue,
    ) -> Result<()> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        let expected = Self::parameter_type(m, library, behaviour, name)?;
        if value.parameter_type() != expected {
            return Err(BehaviourError::InvalidParameterValue {
                operation: "set_parameter",
                reason: format!(
                    "parameter '{}' of behaviour '{}' is of type {}, not {}",
                    name,
                    behaviour,
                    expected,
                    value.parameter_type()
                ),
            });
        }
        tracing::debug!(library, behaviour, %hypothesis, parameter = name, ?value, "parameter set");
        self.parameter_values
            .write()
            .map_err(|_| BehaviourError::Internal("poisoned parameter values".to_string()))?
            .insert(
                (library.to_string(), behaviour.to_string(), hypothesis, name.to_string()),
                value,
            );
        Ok(())
    }

    fn parameter_default_value(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        name: &str,
        parameter_type: ParameterType,
    ) -> Result<ParameterValue> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        let declared = Self::parameter_type(m, library, behaviour, name)?;
        if declared != parameter_type {
            return Err(BehaviourError::InvalidParameterValue {
                operation: "parameter_default_value",
                reason: format!(
                    "parameter '{}' of behaviour '{}' is of type {}, not {}",
                    name, behaviour, declared, parameter_type
                ),
            });
        }
        m.parameters_default_values.get(name).copied().ok_or_else(|| {
            BehaviourError::Library(format!(
                "no default value for parameter '{}' of behaviour '{}' in library '{}'",
                name, behaviour, library
            ))
        })
    }

    fn has_lower_bound(&self, library: &str, behaviour: &str, hypothesis: Hypothesis, variable: &str) -> Result<bool> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        Ok(m.bounds.get(variable).map_or(false, |b| b.lower.is_some()))
    }

    fn has_upper_bound(&self, library: &str, behaviour: &str, hypothesis: Hypothesis, variable: &str) -> Result<bool> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        Ok(m.bounds.get(variable).map_or(false, |b| b.upper.is_some()))
    }

    fn lower_bound(&self, library: &str, behaviour: &str, hypothesis: Hypothesis, variable: &str) -> Result<f64> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        Self::bound(&m.bounds, "lower bound", library, behaviour, variable, |b| b.lower)
    }

    fn upper_bound(&self, library: &str, behaviour: &str, hypothesis: Hypothesis, variable: &str) -> Result<f64> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        Self::bound(&m.bounds, "upper bound", library, behaviour, variable, |b| b.upper)
    }

    fn has_lower_physical_bound(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        variable: &str,
    ) -> Result<bool> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        Ok(m.physical_bounds.get(variable).map_or(false, |b| b.lower.is_some()))
    }

    fn has_upper_physical_bound(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        variable: &str,
    ) -> Result<bool> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        Ok(m.physical_bounds.get(variable).map_or(false, |b| b.upper.is_some()))
    }

    fn lower_physical_bound(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        variable: &str,
    ) -> Result<f64> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        Self::bound(&m.physical_bounds, "lower physical bound", library, behaviour, variable, |b| b.lower)
    }

    fn upper_physical_bound(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        variable: &str,
    ) -> Result<f64> {
        let m = self.metadata_for(library, behaviour, hypothesis)?;
        Self::bound(&m.physical_bounds, "upper physical bound", library, behaviour, variable, |b| b.upper)
    }
}
