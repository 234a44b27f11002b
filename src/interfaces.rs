use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::error::{BehaviourError, Result};
use crate::finite_strain::{StressMeasure, TangentOperator};
use crate::hypothesis::Hypothesis;

/// Rotates the values of one integration point: `(destination, source, matrix)`.
pub type RotateFn = Arc<dyn Fn(&mut [f64], &[f64], &[f64; 9]) + Send + Sync>;

/// Rotates the values of `n` integration points with one shared matrix:
/// `(destination, source, matrix, n)`.
pub type RotateArrayFn = Arc<dyn Fn(&mut [f64], &[f64], &[f64; 9], usize) + Send + Sync>;

/// Opaque handle on a routine resolved by a library resolver.
///
/// The behaviour layer never calls these routines itself; callers recover
/// the concrete callable with [`Symbol::downcast_ref`].
#[derive(Clone)]
pub struct Symbol {
    name: String,
    function: Arc<dyn Any + Send + Sync>,
}

impl Symbol {
    pub fn new<F: Any + Send + Sync>(name: impl Into<String>, function: F) -> Self {
        Self {
            name: name.into(),
            function: Arc::new(function),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn downcast_ref<F: Any>(&self) -> Option<&F> {
        self.function.downcast_ref::<F>()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol").field("name", &self.name).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum ParameterType {
    Real,
    Integer,
    UnsignedShort,
}

impl ParameterType {
    /// 0 real, 1 integer, 2 unsigned short.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ParameterType::Real),
            1 => Some(ParameterType::Integer),
            2 => Some(ParameterType::UnsignedShort),
            _ => None,
        }
    }

    pub const fn code(&self) -> i32 {
        match self {
            ParameterType::Real => 0,
            ParameterType::Integer => 1,
            ParameterType::UnsignedShort => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParameterValue {
    Real(f64),
    Integer(i32),
    UnsignedShort(u16),
}

impl ParameterValue {
    pub const fn parameter_type(&self) -> ParameterType {
        match self {
            ParameterValue::Real(_) => ParameterType::Real,
            ParameterValue::Integer(_) => ParameterType::Integer,
            ParameterValue::UnsignedShort(_) => ParameterType::UnsignedShort,
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Real(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<u16> for ParameterValue {
    fn from(value: u16) -> Self {
        ParameterValue::UnsignedShort(value)
    }
}

/// Scalar types a parameter can have.
pub trait ParameterScalar: Sized + Copy + Into<ParameterValue> {
    const TYPE: ParameterType;
    fn from_value(value: ParameterValue) -> Option<Self>;
}

impl ParameterScalar for f64 {
    const TYPE: ParameterType = ParameterType::Real;
    fn from_value(value: ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::Real(v) => Some(v),
            _ => None,
        }
    }
}

impl ParameterScalar for i32 {
    const TYPE: ParameterType = ParameterType::Integer;
    fn from_value(value: ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::Integer(v) => Some(v),
            _ => None,
        }
    }
}

impl ParameterScalar for u16 {
    const TYPE: ParameterType = ParameterType::UnsignedShort;
    fn from_value(value: ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::UnsignedShort(v) => Some(v),
            _ => None,
        }
    }
}

/// Source of the metadata and of the routines exported by behaviour libraries.
///
/// Queries are keyed by library and behaviour names and, where the exported
/// data depends on it, by the modelling hypothesis. Implementations are
/// responsible for loading the libraries and resolving symbols; the values
/// they return are taken as they are.
pub trait BehaviourResolver {
    /// Integration routine of the behaviour for the given hypothesis.
    fn behaviour(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Symbol>;

    /// Kind of material knowledge exported by the entry point (1 for behaviours).
    fn material_knowledge_type(&self, library: &str, behaviour: &str) -> Result<u32>;

    fn api_version(&self, library: &str, behaviour: &str) -> Result<u32>;

    fn tfel_version(&self, _library: &str, _behaviour: &str) -> Result<String> {
        Ok(String::new())
    }

    fn unit_system(&self, _library: &str, _behaviour: &str) -> Result<String> {
        Ok(String::new())
    }

    fn source(&self, _library: &str, _behaviour: &str) -> Result<String> {
        Ok(String::new())
    }

    /// 0 general, 1 strain based, 2 finite strain, 3 cohesive zone model.
    fn behaviour_type(&self, library: &str, behaviour: &str) -> Result<i32>;

    /// 0 undefined, 1 small strain, 2 cohesive zone, 3 finite strain (F-Cauchy),
    /// 4 finite strain (eto-pk1).
    fn behaviour_kinematic(&self, library: &str, behaviour: &str) -> Result<i32>;

    /// 0 isotropic, 1 orthotropic.
    fn behaviour_symmetry(&self, library: &str, behaviour: &str) -> Result<i32>;

    fn elastic_stiffness_symmetry(&self, library: &str, behaviour: &str) -> Result<i32>;

    fn gradients_names(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Vec<String>>;
    fn gradients_types(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Vec<i32>>;

    fn thermodynamic_forces_names(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<String>>;
    fn thermodynamic_forces_types(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<i32>>;

    fn material_properties_names(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<String>>;

    fn requires_stiffness_tensor(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<bool>;

    fn requires_thermal_expansion_coefficient_tensor(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<bool>;

    fn internal_state_variables_names(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<String>>;
    fn internal_state_variables_types(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<i32>>;

    fn has_temperature_been_removed_from_external_state_variables(
        &self,
        library: &str,
        behaviour: &str,
    ) -> Result<bool>;

    /// Libraries generated by older versions only export the names of the
    /// external state variables, which are then all scalars.
    fn has_external_state_variables_types(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<bool>;
    fn external_state_variables_names(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<String>>;
    fn external_state_variables_types(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<i32>>;

    /// Pairs of (numerator, denominator) names.
    fn tangent_operator_blocks_names(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<(String, String)>>;

    fn computes_stored_energy(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<bool>;
    fn computes_dissipated_energy(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<bool>;

    fn parameters_names(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Vec<String>>;
    fn parameters_types(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Vec<i32>>;

    fn initialize_functions(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Vec<String>>;
    fn initialize_function(
        &self,
        library: &str,
        behaviour: &str,
        function: &str,
        hypothesis: Hypothesis,
    ) -> Result<Symbol>;
    fn initialize_function_inputs_names(
        &self,
        library: &str,
        behaviour: &str,
        function: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<String>>;
    fn initialize_function_inputs_types(
        &self,
        library: &str,
        behaviour: &str,
        function: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<i32>>;

    fn post_processings(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<Vec<String>>;
    fn post_processing(
        &self,
        library: &str,
        behaviour: &str,
        function: &str,
        hypothesis: Hypothesis,
    ) -> Result<Symbol>;
    fn post_processing_outputs_names(
        &self,
        library: &str,
        behaviour: &str,
        function: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<String>>;
    fn post_processing_outputs_types(
        &self,
        library: &str,
        behaviour: &str,
        function: &str,
        hypothesis: Hypothesis,
    ) -> Result<Vec<i32>>;

    fn rotate_gradients_function(&self, library: &str, behaviour: &str, hypothesis: Hypothesis) -> Result<RotateFn>;
    fn rotate_array_of_gradients_function(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
    ) -> Result<RotateArrayFn>;

    /// `stress_measure` is given when the behaviour is loaded with finite
    /// strain options.
    fn rotate_thermodynamic_forces_function(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        stress_measure: Option<StressMeasure>,
    ) -> Result<RotateFn>;
    fn rotate_array_of_thermodynamic_forces_function(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        stress_measure: Option<StressMeasure>,
    ) -> Result<RotateArrayFn>;

    fn rotate_tangent_operator_blocks_function(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        tangent_operator: Option<TangentOperator>,
    ) -> Result<RotateFn>;
    fn rotate_array_of_tangent_operator_blocks_function(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        tangent_operator: Option<TangentOperator>,
    ) -> Result<RotateArrayFn>;

    fn set_parameter(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        name: &str,
        value: ParameterValue,
    ) -> Result<()>;

    fn parameter_default_value(
        &self,
        library: &str,
        behaviour: &str,
        hypothesis: Hypothesis,
        name: &str,
        parameter_type: ParameterType,
    ) -> Result<ParameterValue>;

    fn has_lower_bound(
        &self,
        _library: &str,
        _behaviour: &str,
        _hypothesis: Hypothesis,
        _variable: &str,
    ) -> Result<bool> {
        Ok(false)
    }
    fn has_upper_bound(
        &self,
        _library: &str,
        _behaviour: &str,
        _hypothesis: Hypothesis,
        _variable: &str,
    ) -> Result<bool> {
        Ok(false)
    }
    fn lower_bound(&self, library: &str, behaviour: &str, _hypothesis: Hypothesis, variable: &str) -> Result<f64> {
        Err(no_bound("lower bound", library, behaviour, variable))
    }
    fn upper_bound(&self, library: &str, behaviour: &str, _hypothesis: Hypothesis, variable: &str) -> Result<f64> {
        Err(no_bound("upper bound", library, behaviour, variable))
    }

    fn has_lower_physical_bound(
        &self,
        _library: &str,
        _behaviour: &str,
        _hypothesis: Hypothesis,
        _variable: &str,
    ) -> Result<bool> {
        Ok(false)
    }
    fn has_upper_physical_bound(
        &self,
        _library: &str,
        _behaviour: &str,
        _hypothesis: Hypothesis,
        _variable: &str,
    ) -> Result<bool> {
        Ok(false)
    }
    fn lower_physical_bound(
        &self,
        library: &str,
        behaviour: &str,
        _hypothesis: Hypothesis,
        variable: &str,
    ) -> Result<f64> {
        Err(no_bound("lower physical bound", library, behaviour, variable))
    }
    fn upper_physical_bound(
        &self,
        library: &str,
        behaviour: &str,
        _hypothesis: Hypothesis,
        variable: &str,
    ) -> Result<f64> {
        Err(no_bound("upper physical bound", library, behaviour, variable))
    }
}

fn no_bound(what: &str, library: &str, behaviour: &str, variable: &str) -> BehaviourError {
    BehaviourError::Library(format!(
        "no {} defined for variable '{}' of behaviour '{}' in library '{}'",
        what, variable, behaviour, library
    ))
}
