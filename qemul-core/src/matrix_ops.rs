//! Dense complex matrix helpers
//!
//! This module provides the small set of linear-algebra utilities every
//! other component relies on:
//! - Shape and finiteness checks
//! - Approximate comparison in the relative Frobenius-norm sense
//! - Hermiticity and unitarity checks
//! - Sorted Hermitian eigendecomposition and the operator square root
//!
//! # Example
//!
//! ```rust
//! use qemul_core::matrix_ops::{is_hermitian, is_unitary, APPROX_PRECISION};
//! use qemul_core::{c64, CMatrix};
//!
//! let h = 1.0 / 2.0_f64.sqrt();
//! let entries = [c64(h, 0.0), c64(h, 0.0), c64(h, 0.0), c64(-h, 0.0)];
//! let hadamard = CMatrix::from_row_slice(2, 2, &entries);
//!
//! assert!(is_unitary(&hadamard, APPROX_PRECISION));
//! assert!(is_hermitian(&hadamard, APPROX_PRECISION));
//! ```

use crate::error::{PhysicalError, Result, StructuralError};
use nalgebra::{DMatrix, DVector, SymmetricEigen};
use num_complex::Complex64;

/// Dense complex matrix
pub type CMatrix = DMatrix<Complex64>;

/// Dense complex column vector
pub type CVector = DVector<Complex64>;

/// Nominal epsilon for eigenvalue sign, trace and purity checks
pub const EPSILON: f64 = 1e-15;

/// Relative precision for approximate matrix equality
pub const APPROX_PRECISION: f64 = 1e-12;

/// Shorthand for `Complex64::new`
#[inline]
pub fn c64(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// [`EPSILON`] scaled by the matrix dimension
///
/// Round-off in traces and eigenvalues grows roughly linearly with `n`.
#[inline]
pub fn scaled_epsilon(n: usize) -> f64 {
    EPSILON * n.max(1) as f64
}

/// Create an `n × n` identity matrix
pub fn identity_matrix(n: usize) -> CMatrix {
    CMatrix::identity(n, n)
}

/// Fail unless the matrix is square
pub fn check_square(matrix: &CMatrix) -> Result<()> {
    if matrix.nrows() != matrix.ncols() {
        return Err(StructuralError::NotSquare {
            rows: matrix.nrows(),
            cols: matrix.ncols(),
        }
        .into());
    }
    Ok(())
}

/// Fail if any entry is NaN or infinite
pub fn check_finite(matrix: &CMatrix) -> Result<()> {
    if matrix.iter().all(|z| z.re.is_finite() && z.im.is_finite()) {
        Ok(())
    } else {
        Err(PhysicalError::NonFinite.into())
    }
}

/// Trace of a square matrix
pub fn matrix_trace(matrix: &CMatrix) -> Complex64 {
    matrix.trace()
}

/// Approximate equality: `‖a − b‖ ≤ precision · min(‖a‖, ‖b‖)`
///
/// Matrices of different shape are never equal.
pub fn is_approx(a: &CMatrix, b: &CMatrix, precision: f64) -> bool {
    if a.shape() != b.shape() {
        return false;
    }
    let diff = (a - b).norm_squared();
    diff <= precision * precision * a.norm_squared().min(b.norm_squared())
}

/// Check if a matrix is Hermitian (A ≈ A†)
pub fn is_hermitian(matrix: &CMatrix, precision: f64) -> bool {
    matrix.is_square() && is_approx(matrix, &matrix.adjoint(), precision)
}

/// Check if a matrix is unitary (U·U† ≈ I)
pub fn is_unitary(matrix: &CMatrix, precision: f64) -> bool {
    if !matrix.is_square() {
        return false;
    }
    let product = matrix * matrix.adjoint();
    is_approx(&identity_matrix(matrix.nrows()), &product, precision)
}

/// Eigendecomposition of a Hermitian matrix
///
/// Returns real eigenvalues in ascending order and the matching
/// orthonormal eigenvectors as columns. Only the lower triangle is read,
/// so callers must check Hermiticity first.
pub fn hermitian_eigen(matrix: &CMatrix) -> Result<(DVector<f64>, CMatrix)> {
    check_square(matrix)?;
    check_finite(matrix)?;

    let n = matrix.nrows();
    if n == 0 {
        return Ok((DVector::zeros(0), CMatrix::zeros(0, 0)));
    }

    let eigen = SymmetricEigen::new(matrix.clone());

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

    let values = DVector::from_iterator(n, order.iter().map(|&k| eigen.eigenvalues[k]));
    let vectors = CMatrix::from_fn(n, n, |row, col| eigen.eigenvectors[(row, order[col])]);

    Ok((values, vectors))
}

/// Principal square root of a positive semi-definite Hermitian operator
///
/// Computed as V·diag(√λ)·V†. Eigenvalues slightly below zero from
/// round-off are clamped to zero.
pub fn operator_sqrt(matrix: &CMatrix) -> Result<CMatrix> {
    let (values, vectors) = hermitian_eigen(matrix)?;
    let n = values.len();
    let roots = CMatrix::from_fn(n, n, |i, j| {
        if i == j {
            c64(values[i].max(0.0).sqrt(), 0.0)
        } else {
            c64(0.0, 0.0)
        }
    });
    Ok(&vectors * roots * vectors.adjoint())
}

/// Normalize a vector to unit Euclidean norm
pub fn normalized(vector: &CVector) -> Result<CVector> {
    let norm = vector.norm();
    if norm == 0.0 || !norm.is_finite() {
        return Err(StructuralError::ZeroVector.into());
    }
    Ok(vector.map(|z| z / norm))
}

/// Outer product |v⟩⟨v|
pub fn outer_product(vector: &CVector) -> CMatrix {
    vector * vector.adjoint()
}

/// Hermitian part (A + A†)/2
///
/// Removes the anti-Hermitian round-off left by products such as U·ρ·U†.
pub fn hermitian_part(matrix: &CMatrix) -> CMatrix {
    (matrix + matrix.adjoint()) * c64(0.5, 0.0)
}

/// Normalize every column of a square matrix
pub fn normalize_columns(matrix: &CMatrix) -> Result<CMatrix> {
    let mut result = matrix.clone();
    for mut column in result.column_iter_mut() {
        let norm = column.norm();
        if norm == 0.0 {
            return Err(StructuralError::ZeroVector.into());
        }
        column.apply(|z| *z /= norm);
    }
    Ok(result)
}
