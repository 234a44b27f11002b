//! Rotation of gradients, thermodynamic forces and tangent operator blocks
//! between the global frame and the material frame.
//!
//! Gradients are rotated from the global frame to the material frame,
//! thermodynamic forces and tangent operator blocks from the material frame
//! back to the global frame. The actual change of basis is performed by the
//! routines exported by the behaviour; this module checks the inputs and
//! dispatches either one call for all integration points (shared rotation)
//! or one call per integration point.
//!
//! All checks are done before the first call, so a failing call leaves the
//! destination untouched.

use crate::behaviour::{tangent_operator_size, Behaviour, RotationCapability};
use crate::error::{BehaviourError, Result};
use crate::hypothesis::Hypothesis;
use crate::rotation_matrix::{
    build_rotation_matrix_2d, build_rotation_matrix_3d, RotationMatrix2D, RotationMatrix3D,
};
use crate::variable::total_size;

/// Rotation(s) to apply to a field.
#[derive(Debug, Clone, Copy)]
pub enum Rotation<'a> {
    /// Row-major 3x3 matrices: either one matrix shared by all the
    /// integration points or one matrix per integration point.
    Matrices(&'a [f64]),
    Plane(&'a RotationMatrix2D),
    Space(&'a RotationMatrix3D),
}

impl<'a> From<&'a [f64]> for Rotation<'a> {
    fn from(r: &'a [f64]) -> Self {
        Rotation::Matrices(r)
    }
}

impl<'a> From<&'a Vec<f64>> for Rotation<'a> {
    fn from(r: &'a Vec<f64>) -> Self {
        Rotation::Matrices(r.as_slice())
    }
}

impl<'a> From<&'a [f64; 9]> for Rotation<'a> {
    fn from(r: &'a [f64; 9]) -> Self {
        Rotation::Matrices(r.as_slice())
    }
}

impl<'a> From<&'a RotationMatrix2D> for Rotation<'a> {
    fn from(r: &'a RotationMatrix2D) -> Self {
        Rotation::Plane(r)
    }
}

impl<'a> From<&'a RotationMatrix3D> for Rotation<'a> {
    fn from(r: &'a RotationMatrix3D) -> Self {
        Rotation::Space(r)
    }
}

/// Everything a rotation call needs once the field has been identified.
struct Field<'b> {
    operation: &'static str,
    name: &'static str,
    library: &'b str,
    behaviour: &'b str,
    stride: usize,
    capability: &'b RotationCapability,
}

impl<'b> Field<'b> {
    fn new(
        behaviour: &'b Behaviour,
        operation: &'static str,
        name: &'static str,
        stride: usize,
        capability: &'b RotationCapability,
    ) -> Self {
        Self {
            operation,
            name,
            library: behaviour.library(),
            behaviour: behaviour.behaviour(),
            stride,
            capability,
        }
    }

    fn empty(&self, what: &'static str) -> BehaviourError {
        BehaviourError::EmptyArray {
            operation: self.operation,
            library: self.library.to_string(),
            behaviour: self.behaviour.to_string(),
            what,
        }
    }

    fn misshaped(&self, reason: String) -> BehaviourError {
        BehaviourError::MisshapedArray {
            operation: self.operation,
            library: self.library.to_string(),
            behaviour: self.behaviour.to_string(),
            reason,
        }
    }

    /// Checks the field arrays and returns the number of integration points.
    fn number_of_integration_points(&self, destination: &[f64], source: &[f64]) -> Result<usize> {
        if source.is_empty() {
            return Err(self.empty(self.name));
        }
        if self.stride == 0 {
            return Err(self.misshaped(format!("the behaviour does not declare any {}", self.name)));
        }
        if source.len() % self.stride != 0 {
            return Err(self.misshaped(format!(
                "invalid array size ({}), not a multiple of the size of the {} ({})",
                source.len(),
                self.name,
                self.stride
            )));
        }
        if destination.len() != source.len() {
            return Err(self.misshaped(format!(
                "unmatched array sizes ({} vs {})",
                destination.len(),
                source.len()
            )));
        }
        Ok(source.len() / self.stride)
    }

    fn point_count_mismatch(&self, field_points: usize, rotation_points: usize) -> BehaviourError {
        BehaviourError::PointCountMismatch {
            operation: self.operation,
            library: self.library.to_string(),
            behaviour: self.behaviour.to_string(),
            field: self.name,
            field_points,
            rotation_points,
        }
    }

    fn check_dimension(&self, hypothesis: Hypothesis, dimension: usize) -> Result<()> {
        if hypothesis.space_dimension() != dimension {
            return Err(BehaviourError::InvalidHypothesisForRotationDimension {
                operation: self.operation,
                library: self.library.to_string(),
                behaviour: self.behaviour.to_string(),
                dimension,
                hypothesis,
            });
        }
        Ok(())
    }

    fn rotate(
        &self,
        hypothesis: Hypothesis,
        destination: &mut [f64],
        source: &[f64],
        rotation: Rotation,
    ) -> Result<()> {
        let n = self.number_of_integration_points(destination, source)?;
        let (single, batched) = match self.capability {
            RotationCapability::Available { single, batched } => (single, batched),
            RotationCapability::Unavailable => {
                return Err(BehaviourError::MissingRotationCapability {
                    operation: self.operation,
                    library: self.library.to_string(),
                    behaviour: self.behaviour.to_string(),
                    field: self.name,
                })
            }
        };
        let stride = self.stride;
        let per_point = |destination: &mut [f64], matrix: &dyn Fn(usize) -> [f64; 9]| {
            tracing::trace!(operation = self.operation, points = n, "rotation per integration point");
            for (ip, (d, s)) in destination
                .chunks_exact_mut(stride)
                .zip(source.chunks_exact(stride))
                .enumerate()
            {
                single(d, s, &matrix(ip));
            }
        };
        let shared = |destination: &mut [f64], m: [f64; 9]| {
            tracing::trace!(operation = self.operation, points = n, "shared rotation");
            batched(destination, source, &m, n);
        };
        match rotation {
            Rotation::Matrices(r) => {
                if r.is_empty() {
                    return Err(self.empty("rotation matrices"));
                }
                if r.len() % 9 != 0 {
                    return Err(self.misshaped(format!(
                        "invalid size for the rotation matrix array ({})",
                        r.len()
                    )));
                }
                let k = r.len() / 9;
                if k == 1 {
                    shared(destination, std::array::from_fn(|i| r[i]));
                } else if k == n {
                    per_point(destination, &|ip| std::array::from_fn(|i| r[9 * ip + i]));
                } else {
                    return Err(self.point_count_mismatch(n, k));
                }
            }
            Rotation::Plane(r) => {
                self.check_dimension(hypothesis, 2)?;
                if r.a.is_shared() {
                    shared(destination, build_rotation_matrix_2d(r.a.at(0)));
                } else if r.a.number_of_frames() == n {
                    per_point(destination, &|ip| build_rotation_matrix_2d(r.a.at(ip)));
                } else {
                    return Err(self.point_count_mismatch(n, r.a.number_of_frames()));
                }
            }
            Rotation::Space(r) => {
                self.check_dimension(hypothesis, 3)?;
                for axis in [&r.a1, &r.a2] {
                    if !axis.is_shared() && axis.number_of_frames() != n {
                        return Err(self.point_count_mismatch(n, axis.number_of_frames()));
                    }
                }
                if r.is_shared() {
                    shared(destination, build_rotation_matrix_3d(r.a1.at(0), r.a2.at(0)));
                } else {
                    per_point(destination, &|ip| build_rotation_matrix_3d(r.a1.at(ip), r.a2.at(ip)));
                }
            }
        }
        Ok(())
    }

    fn rotate_in_place(&self, hypothesis: Hypothesis, values: &mut [f64], rotation: Rotation) -> Result<()> {
        let source = values.to_vec();
        self.rotate(hypothesis, values, &source, rotation)
    }
}

fn gradients(behaviour: &Behaviour) -> Field<'_> {
    Field::new(
        behaviour,
        "rotate_gradients",
        "gradients",
        total_size(behaviour.gradients(), behaviour.hypothesis()),
        behaviour.rotate_gradients_capability(),
    )
}

fn thermodynamic_forces(behaviour: &Behaviour) -> Field<'_> {
    Field::new(
        behaviour,
        "rotate_thermodynamic_forces",
        "thermodynamic forces",
        total_size(behaviour.thermodynamic_forces(), behaviour.hypothesis()),
        behaviour.rotate_thermodynamic_forces_capability(),
    )
}

fn tangent_operator_blocks(behaviour: &Behaviour) -> Field<'_> {
    Field::new(
        behaviour,
        "rotate_tangent_operator_blocks",
        "tangent operator blocks",
        tangent_operator_size(behaviour),
        behaviour.rotate_tangent_operator_blocks_capability(),
    )
}

/// Rotates gradients from the global frame (`source`) to the material frame
/// (`destination`).
pub fn rotate_gradients<'r>(
    behaviour: &Behaviour,
    destination: &mut [f64],
    source: &[f64],
    rotation: impl Into<Rotation<'r>>,
) -> Result<()> {
    gradients(behaviour).rotate(behaviour.hypothesis(), destination, source, rotation.into())
}

pub fn rotate_gradients_in_place<'r>(
    behaviour: &Behaviour,
    values: &mut [f64],
    rotation: impl Into<Rotation<'r>>,
) -> Result<()> {
    gradients(behaviour).rotate_in_place(behaviour.hypothesis(), values, rotation.into())
}

/// Rotates thermodynamic forces from the material frame (`source`) to the
/// global frame (`destination`).
pub fn rotate_thermodynamic_forces<'r>(
    behaviour: &Behaviour,
    destination: &mut [f64],
    source: &[f64],
    rotation: impl Into<Rotation<'r>>,
) -> Result<()> {
    thermodynamic_forces(behaviour).rotate(behaviour.hypothesis(), destination, source, rotation.into())
}

pub fn rotate_thermodynamic_forces_in_place<'r>(
    behaviour: &Behaviour,
    values: &mut [f64],
    rotation: impl Into<Rotation<'r>>,
) -> Result<()> {
    thermodynamic_forces(behaviour).rotate_in_place(behaviour.hypothesis(), values, rotation.into())
}

/// Rotates tangent operator blocks from the material frame (`source`) to the
/// global frame (`destination`).
pub fn rotate_tangent_operator_blocks<'r>(
    behaviour: &Behaviour,
    destination: &mut [f64],
    source: &[f64],
    rotation: impl Into<Rotation<'r>>,
) -> Result<()> {
    tangent_operator_blocks(behaviour).rotate(behaviour.hypothesis(), destination, source, rotation.into())
}

pub fn rotate_tangent_operator_blocks_in_place<'r>(
    behaviour: &Behaviour,
    values: &mut [f64],
    rotation: impl Into<Rotation<'r>>,
) -> Result<()> {
    tangent_operator_blocks(behaviour).rotate_in_place(behaviour.hypothesis(), values, rotation.into())
}
