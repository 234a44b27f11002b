//! Error types of the behaviour layer.
//!
//! Every fallible operation returns `Result<T>`. Errors are raised where they
//! are detected and never recovered locally.

use thiserror::Error;

use crate::hypothesis::Hypothesis;

/// Reason why a behaviour descriptor could not be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadErrorKind {
    #[error("the entry point is not a behaviour")]
    InvalidEntryPointKind,

    #[error(
        "unmatched API version\n- the behaviour uses API version {found}\n- this library uses API version {expected}"
    )]
    UnsupportedApiVersion { found: u32, expected: u32 },

    #[error("unsupported behaviour type ({0})")]
    InvalidBehaviourType(i32),

    #[error("{0}")]
    InvalidKinematic(String),

    #[error("invalid type code {code} for variable '{name}'")]
    InvalidVariableType { name: String, code: i32 },

    #[error("{0}")]
    InconsistentVariableContract(String),

    #[error("multiple definition for tangent operator block {{{0},{1}}}")]
    AmbiguousTangentOperatorBlock(String, String),

    #[error("tangent operator block {{{0},{1}}} is invalid")]
    MissingTangentOperatorBlock(String, String),

    #[error("unsupported parameter type ({code}) for parameter '{name}'")]
    UnsupportedParameterType { name: String, code: i32 },

    #[error(
        "this version of the load function shall not be called for finite strain behaviour: you shall specify finite strain options"
    )]
    FiniteStrainOptionsRequired,

    #[error("this method shall only be called for finite strain behaviour")]
    NotAFiniteStrainBehaviour,

    #[error("internal error ({0})")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum BehaviourError {
    /// The descriptor builder rejected the metadata of a behaviour.
    #[error("load: {kind}.\nError while trying to load behaviour '{behaviour}' in library '{library}'")]
    Load {
        library: String,
        behaviour: String,
        kind: LoadErrorKind,
    },

    #[error(
        "{operation}: no function performing the rotation of the {field} defined for behaviour '{behaviour}' in library '{library}'"
    )]
    MissingRotationCapability {
        operation: &'static str,
        library: String,
        behaviour: String,
        field: &'static str,
    },

    #[error("{operation}: no values given for the {what} of behaviour '{behaviour}' in library '{library}'")]
    EmptyArray {
        operation: &'static str,
        library: String,
        behaviour: String,
        what: &'static str,
    },

    #[error("{operation}: {reason} (behaviour '{behaviour}' in library '{library}')")]
    MisshapedArray {
        operation: &'static str,
        library: String,
        behaviour: String,
        reason: String,
    },

    #[error(
        "{operation}: the number of integration points for the {field} does not match the number of integration points for the rotation matrices ({field_points} vs {rotation_points}) (behaviour '{behaviour}' in library '{library}')"
    )]
    PointCountMismatch {
        operation: &'static str,
        library: String,
        behaviour: String,
        field: &'static str,
        field_points: usize,
        rotation_points: usize,
    },

    #[error(
        "{operation}: a {dimension}D rotation matrix can't be used in '{hypothesis}' (behaviour '{behaviour}' in library '{library}')"
    )]
    InvalidHypothesisForRotationDimension {
        operation: &'static str,
        library: String,
        behaviour: String,
        dimension: usize,
        hypothesis: Hypothesis,
    },

    #[error("invalid material axis: {0}")]
    InvalidMaterialAxis(String),

    #[error("invalid modelling hypothesis '{0}'")]
    InvalidHypothesis(String),

    #[error("{operation}: no variable named '{name}'")]
    UnknownVariable {
        operation: &'static str,
        name: String,
    },

    #[error("{operation}: no {what} named '{name}'")]
    UnknownFunction {
        operation: &'static str,
        what: &'static str,
        name: String,
    },

    #[error("{operation}: {reason}")]
    InvalidParameterValue {
        operation: &'static str,
        reason: String,
    },

    /// Failure reported by the library resolver.
    #[error("{0}")]
    Library(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience alias for `Result<T, BehaviourError>`.
pub type Result<T> = std::result::Result<T, BehaviourError>;
