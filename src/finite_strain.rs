use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{BehaviourError, Result};
use crate::variable::{Variable, VariableType};

/// Stress measure returned by a finite strain behaviour.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum StressMeasure {
    #[default]
    #[strum(serialize = "CAUCHY")]
    #[serde(rename = "CAUCHY")]
    Cauchy,
    /// Second Piola-Kirchhoff stress.
    PK2,
    /// First Piola-Kirchhoff stress.
    PK1,
}

/// Tangent operator returned by a finite strain behaviour.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[allow(non_camel_case_types)]
pub enum TangentOperator {
    /// Derivative of the Cauchy stress with respect to the deformation gradient.
    #[default]
    DSIG_DF,
    /// Derivative of the second Piola-Kirchhoff stress with respect to the
    /// Green-Lagrange strain.
    DS_DEGL,
    /// Derivative of the first Piola-Kirchhoff stress with respect to the
    /// deformation gradient.
    DPK1_DF,
    /// Derivative of the Kirchhoff stress with respect to the spatial
    /// increment of the deformation gradient.
    DTAU_DDF,
}

impl StressMeasure {
    pub const fn code(&self) -> i32 {
        match self {
            StressMeasure::Cauchy => 0,
            StressMeasure::PK2 => 1,
            StressMeasure::PK1 => 2,
        }
    }
}

impl StressMeasure {
    /// Thermodynamic force replacing the Cauchy stress, if any.
    pub fn thermodynamic_force(&self) -> Option<Variable> {
        match self {
            StressMeasure::Cauchy => None,
            StressMeasure::PK2 => Some(Variable::new("SecondPiolaKirchhoffStress", VariableType::Stensor, 1)),
            StressMeasure::PK1 => Some(Variable::new("FirstPiolaKirchhoffStress", VariableType::Tensor, 3)),
        }
    }
}

impl TangentOperator {
    pub const fn code(&self) -> i32 {
        match self {
            TangentOperator::DSIG_DF => 0,
            TangentOperator::DS_DEGL => 1,
            TangentOperator::DPK1_DF => 2,
            TangentOperator::DTAU_DDF => 3,
        }
    }

    /// First tangent operator block, if it differs from the one exported by
    /// the behaviour.
    pub fn block(&self) -> Option<(Variable, Variable)> {
        match self {
            TangentOperator::DSIG_DF => None,
            TangentOperator::DS_DEGL => Some((
                Variable::new("SecondPiolaKirchhoffStress", VariableType::Stensor, 1),
                Variable::new("GreenLagrangeStrain", VariableType::Stensor, 1),
            )),
            TangentOperator::DPK1_DF => Some((
                Variable::new("FirstPiolaKirchhoffStress", VariableType::Tensor, 3),
                Variable::new("DeformationGradient", VariableType::Tensor, 3),
            )),
            // the type code 3 is the one exported for this block
            TangentOperator::DTAU_DDF => Some((
                Variable::new("KirchhoffStress", VariableType::Stensor, 3),
                Variable::new("SpatialIncrementOfTheDeformationGradient", VariableType::Tensor, 3),
            )),
        }
    }
}

/// Options selecting the stress measure and the tangent operator of a finite
/// strain behaviour. Only used when the behaviour is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FiniteStrainBehaviourOptions {
    pub stress_measure: StressMeasure,
    pub tangent_operator: TangentOperator,
}

impl FiniteStrainBehaviourOptions {
    pub fn new(stress_measure: StressMeasure, tangent_operator: TangentOperator) -> Self {
        Self {
            stress_measure,
            tangent_operator,
        }
    }

    /// Decodes options given as integer codes, as stored in the options
    /// vector of a behaviour.
    pub fn from_codes(stress_measure: i32, tangent_operator: i32) -> Result<Self> {
        let stress_measure = match stress_measure {
            0 => StressMeasure::Cauchy,
            1 => StressMeasure::PK2,
            2 => StressMeasure::PK1,
            c => {
                return Err(BehaviourError::Internal(format!(
                    "unsupported stress measure ({})",
                    c
                )))
            }
        };
        let tangent_operator = match tangent_operator {
            0 => TangentOperator::DSIG_DF,
            1 => TangentOperator::DS_DEGL,
            2 => TangentOperator::DPK1_DF,
            3 => TangentOperator::DTAU_DDF,
            c => {
                return Err(BehaviourError::Internal(format!(
                    "unsupported tangent operator ({})",
                    c
                )))
            }
        };
        Ok(Self::new(stress_measure, tangent_operator))
    }
}
