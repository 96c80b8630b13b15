//! Kronecker (tensor) products and subsystem embedding
//!
//! [`product`] is the plain matrix tensor product. [`expand`] lifts an
//! operator declared on one subsystem into the operator space of the whole
//! composite system by tensoring it with identities on every other subsystem:
//!
//! ```text
//! expand(A, 1, [2, 3, 2]) = I₂ ⊗ A ⊗ I₂
//! ```
//!
//! The factor order matches the basis ordering of [`crate::HilbertSpace`]
//! (last subsystem varies fastest).

use crate::error::{Result, StructuralError};
use crate::matrix_ops::{c64, identity_matrix, CMatrix};

/// Compute the Kronecker product A ⊗ B
///
/// For A (m×n) and B (p×q) the result is (mp)×(nq) with
/// `result[i·p + k, j·q + l] = A[i, j] · B[k, l]`.
pub fn product(a: &CMatrix, b: &CMatrix) -> CMatrix {
    let (p, q) = b.shape();
    let mut result = CMatrix::zeros(a.nrows() * p, a.ncols() * q);

    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            let a_ij = a[(i, j)];
            for k in 0..p {
                for l in 0..q {
                    result[(i * p + k, j * q + l)] = a_ij * b[(k, l)];
                }
            }
        }
    }

    result
}

/// Embed an operator acting on subsystem `index` into the full space `dimensions`
///
/// Starts from the 1×1 matrix `[1]` and multiplies in `local` at position
/// `index` and the identity of the matching size everywhere else.
///
/// # Errors
/// Returns [`StructuralError::SubsystemOutOfRange`] if `index` is not a valid
/// subsystem and [`StructuralError::DimensionMismatch`] if `local` is not
/// square of size `dimensions[index]`.
pub fn expand(local: &CMatrix, index: usize, dimensions: &[usize]) -> Result<CMatrix> {
    let target = *dimensions
        .get(index)
        .ok_or(StructuralError::SubsystemOutOfRange {
            index,
            rank: dimensions.len(),
        })?;
    if local.nrows() != target || local.ncols() != target {
        return Err(StructuralError::DimensionMismatch {
            expected: target,
            actual: local.nrows().max(local.ncols()),
        }
        .into());
    }

    let mut result = CMatrix::from_element(1, 1, c64(1.0, 0.0));
    for (i, &dim) in dimensions.iter().enumerate() {
        result = if i == index {
            product(&result, local)
        } else {
            product(&result, &identity_matrix(dim))
        };
    }
    Ok(result)
}

/// Kronecker product of a sequence of matrices, left to right
///
/// An empty sequence yields the 1×1 identity.
pub fn product_all<'a, I>(factors: I) -> CMatrix
where
    I: IntoIterator<Item = &'a CMatrix>,
{
    factors
        .into_iter()
        .fold(CMatrix::from_element(1, 1, c64(1.0, 0.0)), |acc, m| {
            product(&acc, m)
        })
}
