use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::error::{BehaviourError, Result};
use crate::hypothesis::Hypothesis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum VariableType {
    Scalar,
    Vector,
    Stensor,
    Tensor,
}

impl VariableType {
    /// Decodes the type identifier exported by a behaviour:
    /// 0 scalar, 1 symmetric tensor, 2 vector, 3 unsymmetric tensor.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(VariableType::Scalar),
            1 => Some(VariableType::Stensor),
            2 => Some(VariableType::Vector),
            3 => Some(VariableType::Tensor),
            _ => None,
        }
    }

    pub const fn code(&self) -> i32 {
        match self {
            VariableType::Scalar => 0,
            VariableType::Stensor => 1,
            VariableType::Vector => 2,
            VariableType::Tensor => 3,
        }
    }
}

/// A named quantity exchanged with a behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub kind: VariableType,
    /// Type identifier as exported by the behaviour.
    pub type_code: i32,
}

impl Variable {
    pub fn new(name: impl Into<String>, kind: VariableType, type_code: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            type_code,
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, VariableType::Scalar, VariableType::Scalar.code())
    }

    pub fn size(&self, hypothesis: Hypothesis) -> usize {
        size_of(self.kind, hypothesis)
    }
}

pub fn size_of(kind: VariableType, hypothesis: Hypothesis) -> usize {
    match kind {
        VariableType::Scalar => 1,
        VariableType::Vector => hypothesis.space_dimension(),
        VariableType::Stensor => hypothesis.stensor_size(),
        VariableType::Tensor => hypothesis.tensor_size(),
    }
}

/// Number of values needed to store all the variables of the list.
pub fn total_size(variables: &[Variable], hypothesis: Hypothesis) -> usize {
    variables.iter().map(|v| v.size(hypothesis)).sum()
}

pub fn find_variable<'a>(variables: &'a [Variable], name: &str) -> Option<&'a Variable> {
    variables.iter().find(|v| v.name == name)
}

pub fn contains_variable(variables: &[Variable], name: &str) -> bool {
    find_variable(variables, name).is_some()
}

/// Position of the first value of the variable `name` in an array storing
/// all the variables of the list.
pub fn variable_offset(variables: &[Variable], name: &str, hypothesis: Hypothesis) -> Result<usize> {
    let mut offset = 0;
    for v in variables {
        if v.name == name {
            return Ok(offset);
        }
        offset += v.size(hypothesis);
    }
    Err(BehaviourError::UnknownVariable {
        operation: "variable_offset",
        name: name.to_string(),
    })
}
