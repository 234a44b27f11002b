//! Descriptors of mechanical behaviours exported by behaviour libraries and
//! rotation of the values exchanged with them between the global frame and
//! the material frame.
//!
//! A [`Behaviour`] is built by [`load`] (or [`load_with_options`] for finite
//! strain behaviours) from the metadata returned by a [`BehaviourResolver`].
//! Orthotropic behaviours carry the rotation routines used by
//! [`rotate_gradients`], [`rotate_thermodynamic_forces`] and
//! [`rotate_tangent_operator_blocks`].

pub mod behaviour;
pub mod error;
pub mod finite_strain;
pub mod hypothesis;
pub mod interfaces;
pub mod load;
pub mod parameters;
pub mod registry;
pub mod rotate;
pub mod rotation_matrix;
pub mod stress_strain;
pub mod variable;

/// Version of the interface between behaviour libraries and this crate.
pub const BEHAVIOUR_API_VERSION: u32 = 1;

pub use behaviour::{
    tangent_operator_size, Behaviour, BehaviourInitializeFunction, BehaviourPostProcessing, BehaviourType, Kinematic,
    RotationCapability, Symmetry,
};
pub use error::{BehaviourError, LoadErrorKind, Result};
pub use finite_strain::{FiniteStrainBehaviourOptions, StressMeasure, TangentOperator};
pub use hypothesis::Hypothesis;
pub use interfaces::{
    BehaviourResolver, ParameterScalar, ParameterType, ParameterValue, RotateArrayFn, RotateFn, Symbol,
};
pub use load::{is_standard_finite_strain_behaviour, load, load_with_options};
pub use parameters::{
    has_bounds, has_lower_bound, has_lower_physical_bound, has_physical_bounds, has_upper_bound,
    has_upper_physical_bound, lower_bound, lower_physical_bound, parameter_default_value, set_parameter,
    upper_bound, upper_physical_bound,
};
pub use registry::{BehaviourMetadata, BehaviourRegistry, Bounds, FunctionMetadata, RotationRoutines};
pub use rotate::{
    rotate_gradients, rotate_gradients_in_place, rotate_tangent_operator_blocks,
    rotate_tangent_operator_blocks_in_place, rotate_thermodynamic_forces, rotate_thermodynamic_forces_in_place,
    Rotation,
};
pub use rotation_matrix::{
    build_rotation_matrix_2d, build_rotation_matrix_3d, MaterialAxis, RotationMatrix2D, RotationMatrix3D,
};
pub use variable::{
    contains_variable, find_variable, size_of, total_size, variable_offset, Variable, VariableType,
};
