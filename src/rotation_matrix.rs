//! Compact descriptions of the material frame and construction of the
//! associated rotation matrices.
//!
//! Rotation matrices are stored row-major. Row `i` holds the `i`-th material
//! axis expressed in the global frame, so that `R · v_global = v_material`.

use nalgebra::{Vector2, Vector3};

use crate::error::{BehaviourError, Result};

/// One material axis, either shared by all integration points or given for
/// each integration point (`N` values per point).
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialAxis<const N: usize> {
    values: Vec<f64>,
}

impl<const N: usize> MaterialAxis<N> {
    pub fn shared(axis: [f64; N]) -> Self {
        Self {
            values: axis.to_vec(),
        }
    }

    /// Builds an axis from a flat array of `N` values per integration point.
    /// A single `N`-vector is shared by all points.
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() || values.len() % N != 0 {
            return Err(BehaviourError::InvalidMaterialAxis(format!(
                "invalid number of values ({}), expected a non-zero multiple of {}",
                values.len(),
                N
            )));
        }
        Ok(Self { values })
    }

    pub fn is_shared(&self) -> bool {
        self.values.len() == N
    }

    pub fn number_of_frames(&self) -> usize {
        self.values.len() / N
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Axis at integration point `ip`. Shared axes ignore `ip`.
    pub fn at(&self, ip: usize) -> [f64; N] {
        let offset = if self.is_shared() { 0 } else { ip * N };
        std::array::from_fn(|k| self.values[offset + k])
    }
}

/// Material frame of a 2D hypothesis, defined by its first in-plane axis.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationMatrix2D {
    pub a: MaterialAxis<2>,
}

impl RotationMatrix2D {
    pub fn new(a: MaterialAxis<2>) -> Self {
        Self { a }
    }

    pub fn shared(a: [f64; 2]) -> Self {
        Self::new(MaterialAxis::shared(a))
    }
}

/// Material frame of a 3D hypothesis, defined by two axes.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationMatrix3D {
    pub a1: MaterialAxis<3>,
    pub a2: MaterialAxis<3>,
}

impl RotationMatrix3D {
    pub fn new(a1: MaterialAxis<3>, a2: MaterialAxis<3>) -> Self {
        Self { a1, a2 }
    }

    pub fn shared(a1: [f64; 3], a2: [f64; 3]) -> Self {
        Self::new(MaterialAxis::shared(a1), MaterialAxis::shared(a2))
    }

    pub fn is_shared(&self) -> bool {
        self.a1.is_shared() && self.a2.is_shared()
    }
}

fn from_rows(n1: &Vector3<f64>, n2: &Vector3<f64>, n3: &Vector3<f64>) -> [f64; 9] {
    [
        n1.x, n1.y, n1.z, //
        n2.x, n2.y, n2.z, //
        n3.x, n3.y, n3.z,
    ]
}

/// Rotation in the plane: the out-of-plane axis is left unchanged.
pub fn build_rotation_matrix_2d(a: [f64; 2]) -> [f64; 9] {
    let a = Vector2::from(a).normalize();
    let n1 = Vector3::new(a.x, a.y, 0.0);
    let n2 = Vector3::new(-a.y, a.x, 0.0);
    let n3 = Vector3::z();
    from_rows(&n1, &n2, &n3)
}

pub fn build_rotation_matrix_3d(a1: [f64; 3], a2: [f64; 3]) -> [f64; 9] {
    let n1 = Vector3::from(a1).normalize();
    let n3 = n1.cross(&Vector3::from(a2)).normalize();
    let n2 = n3.cross(&n1);
    debug_assert!((n1.cross(&n2) - n3).norm() < 1e-10);
    from_rows(&n1, &n2, &n3)
}
