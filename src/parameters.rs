//! Parameters and bounds of a loaded behaviour.
//!
//! Parameter values are owned by the library resolver, not by the
//! [`Behaviour`] descriptor: changing a value affects every descriptor built
//! from the same (library, behaviour, hypothesis).

use crate::behaviour::Behaviour;
use crate::error::{BehaviourError, Result};
use crate::interfaces::{BehaviourResolver, ParameterScalar};

pub fn set_parameter<R, T>(resolver: &R, behaviour: &Behaviour, name: &str, value: T) -> Result<()>
where
    R: BehaviourResolver + ?Sized,
    T: ParameterScalar,
{
    resolver.set_parameter(
        behaviour.library(),
        behaviour.behaviour(),
        behaviour.hypothesis(),
        name,
        value.into(),
    )
}

/// Default value of a parameter, e.g. `parameter_default_value::<_, f64>(..)`.
pub fn parameter_default_value<R, T>(resolver: &R, behaviour: &Behaviour, name: &str) -> Result<T>
where
    R: BehaviourResolver + ?Sized,
    T: ParameterScalar,
{
    let value = resolver.parameter_default_value(
        behaviour.library(),
        behaviour.behaviour(),
        behaviour.hypothesis(),
        name,
        T::TYPE,
    )?;
    T::from_value(value).ok_or_else(|| BehaviourError::InvalidParameterValue {
        operation: "parameter_default_value",
        reason: format!(
            "parameter '{}' of behaviour '{}' is not of type {}",
            name,
            behaviour.behaviour(),
            T::TYPE
        ),
    })
}

pub fn has_bounds<R: BehaviourResolver + ?Sized>(resolver: &R, behaviour: &Behaviour, variable: &str) -> Result<bool> {
    Ok(has_lower_bound(resolver, behaviour, variable)? || has_upper_bound(resolver, behaviour, variable)?)
}

pub fn has_lower_bound<R: BehaviourResolver + ?Sized>(
    resolver: &R,
    behaviour: &Behaviour,
    variable: &str,
) -> Result<bool> {
    resolver.has_lower_bound(behaviour.library(), behaviour.behaviour(), behaviour.hypothesis(), variable)
}

pub fn has_upper_bound<R: BehaviourResolver + ?Sized>(
    resolver: &R,
    behaviour: &Behaviour,
    variable: &str,
) -> Result<bool> {
    resolver.has_upper_bound(behaviour.library(), behaviour.behaviour(), behaviour.hypothesis(), variable)
}

pub fn lower_bound<R: BehaviourResolver + ?Sized>(resolver: &R, behaviour: &Behaviour, variable: &str) -> Result<f64> {
    resolver.lower_bound(behaviour.library(), behaviour.behaviour(), behaviour.hypothesis(), variable)
}

pub fn upper_bound<R: BehaviourResolver + ?Sized>(resolver: &R, behaviour: &Behaviour, variable: &str) -> Result<f64> {
    resolver.upper_bound(behaviour.library(), behaviour.behaviour(), behaviour.hypothesis(), variable)
}

pub fn has_physical_bounds<R: BehaviourResolver + ?Sized>(
    resolver: &R,
    behaviour: &Behaviour,
    variable: &str,
) -> Result<bool> {
    Ok(has_lower_physical_bound(resolver, behaviour, variable)?
        || has_upper_physical_bound(resolver, behaviour, variable)?)
}

pub fn has_lower_physical_bound<R: BehaviourResolver + ?Sized>(
    resolver: &R,
    behaviour: &Behaviour,
    variable: &str,
) -> Result<bool> {
    resolver.has_lower_physical_bound(behaviour.library(), behaviour.behaviour(), behaviour.hypothesis(), variable)
}

pub fn has_upper_physical_bound<R: BehaviourResolver + ?Sized>(
    resolver: &R,
    behaviour: &Behaviour,
    variable: &str,
) -> Result<bool> {
    resolver.has_upper_physical_bound(behaviour.library(), behaviour.behaviour(), behaviour.hypothesis(), variable)
}

pub fn lower_physical_bound<R: BehaviourResolver + ?Sized>(
    resolver: &R,
    behaviour: &Behaviour,
    variable: &str,
) -> Result<f64> {
    resolver.lower_physical_bound(behaviour.library(), behaviour.behaviour(), behaviour.hypothesis(), variable)
}

pub fn upper_physical_bound<R: BehaviourResolver + ?Sized>(
    resolver: &R,
    behaviour: &Behaviour,
    variable: &str,
) -> Result<f64> {
    resolver.upper_physical_bound(behaviour.library(), behaviour.behaviour(), behaviour.hypothesis(), variable)
}
