//! Unitary evolution of density matrices
//!
//! A [`UnitaryTransformation`] pairs a unitary matrix U with the
//! [`HilbertSpace`] it is declared on and evolves states as ρ → U·ρ·U†.
//!
//! # Example
//!
//! ```rust
//! use qemul_core::{c64, CMatrix, HilbertSpace};
//! use qemul_state::{QuantumState, UnitaryTransformation};
//!
//! let space = HilbertSpace::single(2).unwrap();
//! let zero = c64(0.0, 0.0);
//! let one = c64(1.0, 0.0);
//! let not = CMatrix::from_row_slice(2, 2, &[zero, one, one, zero]);
//! let gate = UnitaryTransformation::new(not, space.clone()).unwrap();
//!
//! let mut state = QuantumState::basis_state(space, &[0]).unwrap();
//! gate.apply_to(&mut state).unwrap();
//! assert!((state.density_matrix()[(1, 1)].re - 1.0).abs() < 1e-12);
//! ```

use crate::state::QuantumState;
use qemul_core::error::{PhysicalError, Result, StructuralError};
use qemul_core::matrix_ops::{check_square, is_unitary, normalize_columns, APPROX_PRECISION};
use qemul_core::{CMatrix, HilbertSpace};
use tracing::trace;

/// Unitary operator bound to the space it acts on
#[derive(Debug, Clone, PartialEq)]
pub struct UnitaryTransformation {
    /// Unitary matrix U (D × D)
    matrix: CMatrix,

    /// Space U is declared on
    space: HilbertSpace,
}

impl UnitaryTransformation {
    /// Create a transformation from a unitary matrix
    ///
    /// # Errors
    /// - Structural: `matrix` not square, or its size differs from the space
    ///   total dimension
    /// - Physical: `matrix` is not unitary
    pub fn new(matrix: CMatrix, space: HilbertSpace) -> Result<Self> {
        check_square(&matrix)?;
        if !is_unitary(&matrix, APPROX_PRECISION) {
            return Err(PhysicalError::NotUnitary.into());
        }
        Self::bind(matrix, space)
    }

    /// Create the change-of-basis transformation U = old⁻¹ · new
    ///
    /// Columns of both matrices are basis vectors and are normalized first.
    ///
    /// # Errors
    /// - Structural: either matrix not square, sizes differ, a zero column,
    ///   singular old basis, or size differs from the space total dimension
    /// - Physical: the resulting matrix is not unitary (bases not orthogonal)
    pub fn from_bases(
        old_basis: &CMatrix,
        new_basis: &CMatrix,
        space: HilbertSpace,
    ) -> Result<Self> {
        check_square(old_basis)?;
        check_square(new_basis)?;
        if old_basis.ncols() != new_basis.ncols() {
            return Err(StructuralError::BasisSizeMismatch {
                old: old_basis.ncols(),
                new: new_basis.ncols(),
            }
            .into());
        }

        let old = normalize_columns(old_basis)?;
        let new = normalize_columns(new_basis)?;
        let inverse = old.try_inverse().ok_or(StructuralError::SingularBasis)?;

        let matrix = inverse * new;
        if !is_unitary(&matrix, APPROX_PRECISION) {
            return Err(PhysicalError::NotUnitary.into());
        }
        Self::bind(matrix, space)
    }

    fn bind(matrix: CMatrix, space: HilbertSpace) -> Result<Self> {
        if space.total_dimension() != matrix.ncols() {
            return Err(StructuralError::DimensionMismatch {
                expected: space.total_dimension(),
                actual: matrix.ncols(),
            }
            .into());
        }
        Ok(Self { matrix, space })
    }

    /// Unitary matrix U
    #[inline]
    pub fn matrix(&self) -> &CMatrix {
        &self.matrix
    }

    /// Space the transformation acts on
    #[inline]
    pub fn space(&self) -> &HilbertSpace {
        &self.space
    }

    /// The inverse transformation U†
    pub fn adjoint(&self) -> UnitaryTransformation {
        Self {
            matrix: self.matrix.adjoint(),
            space: self.space.clone(),
        }
    }

    /// Evolve `state` in place: ρ → U·ρ·U†
    ///
    /// Returns the same state so applications can be chained;
    /// `a.apply_to(b.apply_to(&mut s)?)?` applies `b` first, then `a`.
    ///
    /// # Errors
    /// Fails with [`StructuralError::SpaceMismatch`] unless the state space is
    /// structurally equal to this transformation's space (same subsystem
    /// dimensions in the same order). On any failure the state is unchanged.
    ///
    /// The evolved matrix is re-symmetrized and rescaled to unit trace before
    /// it is stored, so long chains of applications do not accumulate drift.
    pub fn apply_to<'s>(&self, state: &'s mut QuantumState) -> Result<&'s mut QuantumState> {
        if state.space() != &self.space {
            return Err(StructuralError::SpaceMismatch {
                expected: self.space.dimensions().to_vec(),
                actual: state.space().dimensions().to_vec(),
            }
            .into());
        }

        let evolved = &self.matrix * state.density_matrix() * self.matrix.adjoint();
        state.set_matrix_normalized(evolved)?;
        trace!(space = %self.space, "applied unitary transformation");
        Ok(state)
    }
}
