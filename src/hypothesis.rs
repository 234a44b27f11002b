use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{BehaviourError, Result};

/// Modelling hypothesis. It fixes the space dimension and hence the number of
/// components of every vector and tensor exchanged with a behaviour.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum Hypothesis {
    AxisymmetricalGeneralisedPlaneStrain,
    AxisymmetricalGeneralisedPlaneStress,
    Axisymmetrical,
    PlaneStress,
    PlaneStrain,
    GeneralisedPlaneStrain,
    Tridimensional,
}

impl Hypothesis {
    pub const fn space_dimension(&self) -> usize {
        match self {
            Hypothesis::AxisymmetricalGeneralisedPlaneStrain
            | Hypothesis::AxisymmetricalGeneralisedPlaneStress => 1,
            Hypothesis::Axisymmetrical
            | Hypothesis::PlaneStress
            | Hypothesis::PlaneStrain
            | Hypothesis::GeneralisedPlaneStrain => 2,
            Hypothesis::Tridimensional => 3,
        }
    }

    /// Number of components of a symmetric tensor.
    pub const fn stensor_size(&self) -> usize {
        match self.space_dimension() {
            1 => 3,
            2 => 4,
            _ => 6,
        }
    }

    /// Number of components of an unsymmetric tensor.
    pub const fn tensor_size(&self) -> usize {
        match self.space_dimension() {
            1 => 3,
            2 => 5,
            _ => 9,
        }
    }

    /// The two hypotheses for which the eto-pk1 kinematic is defined.
    pub const fn is_axisymmetrical_generalised(&self) -> bool {
        matches!(
            self,
            Hypothesis::AxisymmetricalGeneralisedPlaneStrain
                | Hypothesis::AxisymmetricalGeneralisedPlaneStress
        )
    }

    pub fn parse(name: &str) -> Result<Self> {
        Hypothesis::from_str(name).map_err(|_| BehaviourError::InvalidHypothesis(name.to_string()))
    }
}
