//! Lifting gates into a composite space
//!
//! A gate covering subsystems `first..first + span` is embedded by merging
//! those subsystems into a single factor and then applying
//! [`kronecker::expand`], which places identities on every other subsystem.

use crate::standard::Gate;
use qemul_core::error::{Result, StructuralError};
use qemul_core::kronecker;
use qemul_core::matrix_ops::check_square;
use qemul_core::{CMatrix, HilbertSpace};
use qemul_state::UnitaryTransformation;
use tracing::trace;

/// Embed a matrix acting on `span` consecutive subsystems starting at `first`
///
/// # Errors
/// - [`StructuralError::EmbeddingOutOfRange`] if the range exceeds the space
/// - [`StructuralError::NotSquare`] or [`StructuralError::DimensionMismatch`]
///   if `local` does not match the product of the covered dimensions
pub fn embed_matrix(
    local: &CMatrix,
    first: usize,
    span: usize,
    space: &HilbertSpace,
) -> Result<CMatrix> {
    let rank = space.rank();
    if span == 0 || first + span > rank {
        return Err(StructuralError::EmbeddingOutOfRange { first, span, rank }.into());
    }
    check_square(local)?;

    let dims = space.dimensions();
    let covered: usize = dims[first..first + span].iter().product();
    if local.nrows() != covered {
        return Err(StructuralError::DimensionMismatch {
            expected: covered,
            actual: local.nrows(),
        }
        .into());
    }

    let mut collapsed = Vec::with_capacity(rank - span + 1);
    collapsed.extend_from_slice(&dims[..first]);
    collapsed.push(covered);
    collapsed.extend_from_slice(&dims[first + span..]);

    trace!(first, span, space = %space, "embedding operator");
    kronecker::expand(local, first, &collapsed)
}

/// Embed `gate` on the subsystems starting at `first`
///
/// The covered subsystems must have exactly the dimensions the gate expects.
pub fn embed(gate: &Gate, first: usize, space: &HilbertSpace) -> Result<CMatrix> {
    let expected = gate.dimensions();
    let span = expected.len();
    if first + span > space.rank() {
        return Err(StructuralError::EmbeddingOutOfRange {
            first,
            span,
            rank: space.rank(),
        }
        .into());
    }

    for (offset, &dim) in expected.iter().enumerate() {
        let actual = space.dimension(first + offset)?;
        if actual != dim {
            return Err(StructuralError::DimensionMismatch {
                expected: dim,
                actual,
            }
            .into());
        }
    }

    embed_matrix(&gate.matrix(), first, span, space)
}

/// Build the unitary transformation applying `gate` at `first` within `space`
pub fn transform_on(
    gate: &Gate,
    first: usize,
    space: &HilbertSpace,
) -> Result<UnitaryTransformation> {
    UnitaryTransformation::new(embed(gate, first, space)?, space.clone())
}
