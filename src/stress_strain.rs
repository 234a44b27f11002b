//! Reference change of basis for the values exchanged with a behaviour.
//!
//! Symmetric tensors are stored with the sqrt(2) convention on off-diagonal
//! terms, in the order `xx yy zz xy xz yz` (truncated to `xx yy zz xy` in 2D
//! and to the diagonal in 1D). Unsymmetric tensors are stored in the order
//! `xx yy zz xy yx xz zx yz zy` (truncated likewise). Tangent operator blocks
//! are stored row-major.
//!
//! These routines can be used as the rotation routines of behaviours that do
//! not export their own, see [`standard_rotations`].

use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};
use std::sync::Arc;

use nalgebra::{DMatrix, DVector, Matrix3, Vector3};

use crate::behaviour::RotationCapability;
use crate::hypothesis::Hypothesis;
use crate::variable::{size_of, total_size, Variable, VariableType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `v_material = R · v_global`, used for gradients.
    GlobalToMaterial,
    /// `v_global = Rᵀ · v_material`, used for thermodynamic forces and
    /// tangent operator blocks.
    MaterialToGlobal,
}

fn rotation(matrix: &[f64; 9], direction: Direction) -> Matrix3<f64> {
    let r = Matrix3::from_row_slice(matrix);
    match direction {
        Direction::GlobalToMaterial => r,
        Direction::MaterialToGlobal => r.transpose(),
    }
}

pub fn stensor_to_matrix(values: &[f64]) -> Matrix3<f64> {
    let mut m = Matrix3::from_diagonal(&Vector3::new(values[0], values[1], values[2]));
    if values.len() > 3 {
        m[(0, 1)] = FRAC_1_SQRT_2 * values[3];
        m[(1, 0)] = m[(0, 1)];
    }
    if values.len() > 4 {
        m[(0, 2)] = FRAC_1_SQRT_2 * values[4];
        m[(2, 0)] = m[(0, 2)];
        m[(1, 2)] = FRAC_1_SQRT_2 * values[5];
        m[(2, 1)] = m[(1, 2)];
    }
    m
}

/// Writes the `values.len()` first components of the symmetric part of `m`.
pub fn matrix_to_stensor(m: &Matrix3<f64>, values: &mut [f64]) {
    values[0] = m[(0, 0)];
    values[1] = m[(1, 1)];
    values[2] = m[(2, 2)];
    if values.len() > 3 {
        values[3] = 0.5 * SQRT_2 * (m[(0, 1)] + m[(1, 0)]);
    }
    if values.len() > 4 {
        values[4] = 0.5 * SQRT_2 * (m[(0, 2)] + m[(2, 0)]);
        values[5] = 0.5 * SQRT_2 * (m[(1, 2)] + m[(2, 1)]);
    }
}

const TENSOR_INDICES: [(usize, usize); 9] = [
    (0, 0),
    (1, 1),
    (2, 2),
    (0, 1),
    (1, 0),
    (0, 2),
    (2, 0),
    (1, 2),
    (2, 1),
];

pub fn tensor_to_matrix(values: &[f64]) -> Matrix3<f64> {
    let mut m = Matrix3::zeros();
    for (v, &ij) in values.iter().zip(TENSOR_INDICES.iter()) {
        m[ij] = *v;
    }
    m
}

pub fn matrix_to_tensor(m: &Matrix3<f64>, values: &mut [f64]) {
    for (v, &ij) in values.iter_mut().zip(TENSOR_INDICES.iter()) {
        *v = m[ij];
    }
}

fn rotate_components(kind: VariableType, r: &Matrix3<f64>, source: &[f64], destination: &mut [f64]) {
    match kind {
        VariableType::Scalar => destination[0] = source[0],
        VariableType::Vector => {
            let mut v = Vector3::zeros();
            for (k, s) in source.iter().enumerate() {
                v[k] = *s;
            }
            let rv = r * v;
            for (k, d) in destination.iter_mut().enumerate() {
                *d = rv[k];
            }
        }
        VariableType::Stensor => {
            let t = stensor_to_matrix(source);
            matrix_to_stensor(&(r * t * r.transpose()), destination)
        }
        VariableType::Tensor => {
            let t = tensor_to_matrix(source);
            matrix_to_tensor(&(r * t * r.transpose()), destination)
        }
    }
}

/// Linear map acting on the components of a variable of the given kind.
pub fn change_of_basis_matrix(kind: VariableType, hypothesis: Hypothesis, r: &Matrix3<f64>) -> DMatrix<f64> {
    let n = size_of(kind, hypothesis);
    let mut q = DMatrix::zeros(n, n);
    let mut e = vec![0.0; n];
    let mut column = vec![0.0; n];
    for j in 0..n {
        e.fill(0.0);
        e[j] = 1.0;
        rotate_components(kind, r, &e, &mut column);
        q.set_column(j, &DVector::from_column_slice(&column));
    }
    q
}

/// Block diagonal map acting on an array storing all the given variables.
fn variables_change_of_basis(variables: &[Variable], hypothesis: Hypothesis, r: &Matrix3<f64>) -> DMatrix<f64> {
    let n = total_size(variables, hypothesis);
    let mut q = DMatrix::zeros(n, n);
    let mut o = 0;
    for v in variables {
        let s = v.size(hypothesis);
        q.view_mut((o, o), (s, s))
            .copy_from(&change_of_basis_matrix(v.kind, hypothesis, r));
        o += s;
    }
    q
}

fn apply(q: &DMatrix<f64>, destination: &mut [f64], source: &[f64]) {
    let rotated = q * DVector::from_column_slice(source);
    destination.copy_from_slice(rotated.as_slice());
}

/// Rotates the values of one integration point storing the given variables.
pub fn rotate_variables(
    destination: &mut [f64],
    source: &[f64],
    variables: &[Variable],
    hypothesis: Hypothesis,
    matrix: &[f64; 9],
    direction: Direction,
) {
    let q = variables_change_of_basis(variables, hypothesis, &rotation(matrix, direction));
    apply(&q, destination, source);
}

struct BlockMaps {
    numerator: DMatrix<f64>,
    denominator: DMatrix<f64>,
}

fn block_maps(
    blocks: &[(Variable, Variable)],
    hypothesis: Hypothesis,
    matrix: &[f64; 9],
    direction: Direction,
) -> Vec<BlockMaps> {
    let r = rotation(matrix, direction);
    let rt = r.transpose();
    blocks
        .iter()
        .map(|(num, den)| BlockMaps {
            numerator: change_of_basis_matrix(num.kind, hypothesis, &r),
            // derivative with respect to values expressed in the other frame
            denominator: change_of_basis_matrix(den.kind, hypothesis, &rt),
        })
        .collect()
}

fn apply_blocks(maps: &[BlockMaps], destination: &mut [f64], source: &[f64]) {
    let mut o = 0;
    for m in maps {
        let (rows, cols) = (m.numerator.nrows(), m.denominator.nrows());
        let k = DMatrix::from_row_slice(rows, cols, &source[o..o + rows * cols]);
        let rotated = &m.numerator * k * &m.denominator;
        for i in 0..rows {
            for j in 0..cols {
                destination[o + i * cols + j] = rotated[(i, j)];
            }
        }
        o += rows * cols;
    }
}

/// Rotates the tangent operator of one integration point.
pub fn rotate_tangent_operator_blocks(
    destination: &mut [f64],
    source: &[f64],
    blocks: &[(Variable, Variable)],
    hypothesis: Hypothesis,
    matrix: &[f64; 9],
    direction: Direction,
) {
    let maps = block_maps(blocks, hypothesis, matrix, direction);
    apply_blocks(&maps, destination, source);
}

/// Rotation routines for an array storing the given variables at each
/// integration point.
pub fn standard_rotations(
    variables: Vec<Variable>,
    hypothesis: Hypothesis,
    direction: Direction,
) -> RotationCapability {
    let variables = Arc::new(variables);
    let stride = total_size(&variables, hypothesis);
    let v = Arc::clone(&variables);
    RotationCapability::Available {
        single: Arc::new(move |destination: &mut [f64], source: &[f64], matrix: &[f64; 9]| {
            rotate_variables(destination, source, &v, hypothesis, matrix, direction)
        }),
        batched: Arc::new(move |destination: &mut [f64], source: &[f64], matrix: &[f64; 9], n: usize| {
            let q = variables_change_of_basis(&variables, hypothesis, &rotation(matrix, direction));
            for (d, s) in destination[..n * stride]
                .chunks_exact_mut(stride)
                .zip(source[..n * stride].chunks_exact(stride))
            {
                apply(&q, d, s);
            }
        }),
    }
}

/// Rotation routines for an array storing the given tangent operator blocks
/// at each integration point.
pub fn standard_tangent_operator_rotations(
    blocks: Vec<(Variable, Variable)>,
    hypothesis: Hypothesis,
    direction: Direction,
) -> RotationCapability {
    let blocks = Arc::new(blocks);
    let stride: usize = blocks
        .iter()
        .map(|(num, den)| num.size(hypothesis) * den.size(hypothesis))
        .sum();
    let b = Arc::clone(&blocks);
    RotationCapability::Available {
        single: Arc::new(move |destination: &mut [f64], source: &[f64], matrix: &[f64; 9]| {
            rotate_tangent_operator_blocks(destination, source, &b, hypothesis, matrix, direction)
        }),
        batched: Arc::new(move |destination: &mut [f64], source: &[f64], matrix: &[f64; 9], n: usize| {
            let maps = block_maps(&blocks, hypothesis, matrix, direction);
            for (d, s) in destination[..n * stride]
                .chunks_exact_mut(stride)
                .zip(source[..n * stride].chunks_exact(stride))
            {
                apply_blocks(&maps, d, s);
            }
        }),
    }
}
