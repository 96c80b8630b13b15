//! Density-matrix representation of (possibly mixed) quantum states
//!
//! A [`QuantumState`] pairs a density matrix ρ with the [`HilbertSpace`] it
//! lives in, together with the eigendecomposition that proves ρ is a valid
//! state:
//!
//! - ρ is Hermitian
//! - every eigenvalue of ρ is ≥ 0 (up to round-off)
//! - Tr(ρ) = 1
//! - ρ is `D × D` where `D` is the total dimension of the space
//!
//! These invariants are checked on construction and on every mutation, and
//! the eigenvalues/eigenvectors are refreshed eagerly each time.
//!
//! # Example
//!
//! ```rust
//! use qemul_core::{c64, CVector, HilbertSpace};
//! use qemul_state::QuantumState;
//!
//! // |+⟩ = (|0⟩ + |1⟩)/√2, given unnormalized
//! let plus = CVector::from_vec(vec![c64(1.0, 0.0), c64(1.0, 0.0)]);
//! let state = QuantumState::from_vector(&plus, HilbertSpace::single(2).unwrap()).unwrap();
//! assert!(state.is_pure());
//! ```

use nalgebra::DVector;
use qemul_core::error::{PhysicalError, Result, StructuralError};
use qemul_core::kronecker;
use qemul_core::matrix_ops::{
    check_finite, check_square, hermitian_eigen, hermitian_part, is_approx, is_hermitian,
    matrix_trace, normalized, outer_product, scaled_epsilon, APPROX_PRECISION,
};
use qemul_core::{c64, CMatrix, CVector, Complex64, HilbertSpace};
use std::fmt;
use tracing::{debug, trace};

/// Quantum state described by a density matrix on a composite space
#[derive(Clone)]
pub struct QuantumState {
    /// Density matrix ρ (D × D)
    density: CMatrix,

    /// Space the state lives in
    space: HilbertSpace,

    /// Eigenvalues of ρ in ascending order
    eigenvalues: DVector<f64>,

    /// Eigenvectors of ρ as columns, matching `eigenvalues`
    eigenvectors: CMatrix,
}

impl QuantumState {
    /// Create a state from a density matrix or a column vector
    ///
    /// A matrix with a single column is treated as a (possibly unnormalized)
    /// state vector |ψ⟩: it is normalized and promoted to ρ = |ψ⟩⟨ψ|.
    /// Any other matrix must already be a valid density matrix.
    ///
    /// # Errors
    /// - Structural: non-square matrix, empty space, size ≠ space dimension
    /// - Physical: not Hermitian, negative eigenvalue, trace ≠ 1
    pub fn new(matrix: CMatrix, space: HilbertSpace) -> Result<Self> {
        let density = if matrix.ncols() == 1 {
            let vector = CVector::from_iterator(matrix.nrows(), matrix.iter().copied());
            outer_product(&normalized(&vector)?)
        } else {
            matrix
        };

        let (eigenvalues, eigenvectors) = Self::validate(&density, &space)?;
        trace!(space = %space, "constructed quantum state");

        Ok(Self {
            density,
            space,
            eigenvalues,
            eigenvectors,
        })
    }

    /// Create a pure state ρ = |ψ⟩⟨ψ| from a state vector
    ///
    /// The vector does not need to be normalized.
    pub fn from_vector(vector: &CVector, space: HilbertSpace) -> Result<Self> {
        Self::new(outer_product(&normalized(vector)?), space)
    }

    /// Create the computational basis state |b₁,…,bₙ⟩⟨b₁,…,bₙ|
    pub fn basis_state(space: HilbertSpace, labels: &[usize]) -> Result<Self> {
        let vector = space.basis_vector(labels)?;
        Self::from_vector(&vector, space)
    }

    /// Create the maximally mixed state I/D
    pub fn maximally_mixed(space: HilbertSpace) -> Result<Self> {
        let dim = space.total_dimension();
        if dim == 0 {
            return Err(StructuralError::EmptySpace.into());
        }
        let matrix = CMatrix::identity(dim, dim).map(|z| z / dim as f64);
        Self::new(matrix, space)
    }

    /// Run the full validity pipeline, returning the eigendecomposition
    fn validate(matrix: &CMatrix, space: &HilbertSpace) -> Result<(DVector<f64>, CMatrix)> {
        let result = Self::check_density_matrix(matrix, space);
        if let Err(err) = &result {
            debug!(error = %err, space = %space, "rejected density matrix");
        }
        result
    }

    fn check_density_matrix(
        matrix: &CMatrix,
        space: &HilbertSpace,
    ) -> Result<(DVector<f64>, CMatrix)> {
        check_square(matrix)?;
        if space.is_empty() {
            return Err(StructuralError::EmptySpace.into());
        }
        if matrix.nrows() != space.total_dimension() {
            return Err(StructuralError::DimensionMismatch {
                expected: space.total_dimension(),
                actual: matrix.nrows(),
            }
            .into());
        }
        check_finite(matrix)?;
        if !is_hermitian(matrix, APPROX_PRECISION) {
            return Err(PhysicalError::NotHermitian.into());
        }

        let (eigenvalues, eigenvectors) = hermitian_eigen(matrix)?;
        let tolerance = scaled_epsilon(matrix.nrows());

        if let Some(&value) = eigenvalues.iter().find(|&&v| v < -tolerance) {
            return Err(PhysicalError::NegativeEigenvalue { value }.into());
        }

        let trace = matrix_trace(matrix);
        if (trace - c64(1.0, 0.0)).norm() > tolerance {
            return Err(PhysicalError::TraceNotUnity { trace: trace.re }.into());
        }

        Ok((eigenvalues, eigenvectors))
    }

    /// Density matrix ρ
    #[inline]
    pub fn density_matrix(&self) -> &CMatrix {
        &self.density
    }

    /// Eigenvalues of ρ in ascending order
    #[inline]
    pub fn eigenvalues(&self) -> &DVector<f64> {
        &self.eigenvalues
    }

    /// Eigenvectors of ρ as columns, in the order of [`Self::eigenvalues`]
    #[inline]
    pub fn eigenvectors(&self) -> &CMatrix {
        &self.eigenvectors
    }

    /// Space the state lives in
    #[inline]
    pub fn space(&self) -> &HilbertSpace {
        &self.space
    }

    /// Total dimension of the state space
    #[inline]
    pub fn dimension(&self) -> usize {
        self.space.total_dimension()
    }

    /// Tr(ρ), real part
    pub fn trace(&self) -> f64 {
        matrix_trace(&self.density).re
    }

    /// Purity Tr(ρ²): 1 for pure states, 1/D for the maximally mixed state
    pub fn purity(&self) -> f64 {
        let dim = self.density.nrows();
        let mut sum = Complex64::new(0.0, 0.0);
        for i in 0..dim {
            for j in 0..dim {
                sum += self.density[(i, j)] * self.density[(j, i)];
            }
        }
        sum.re
    }

    /// True iff Tr(ρ²) = 1 within tolerance
    pub fn is_pure(&self) -> bool {
        let square = &self.density * &self.density;
        (matrix_trace(&square) - c64(1.0, 0.0)).norm() < scaled_epsilon(self.density.nrows())
    }

    /// Replace ρ after re-running the full validity pipeline
    ///
    /// Only unitary evolution and measurement collapse mutate a state. On
    /// failure the state is left untouched.
    pub(crate) fn set_matrix(&mut self, matrix: CMatrix) -> Result<()> {
        let (eigenvalues, eigenvectors) = Self::validate(&matrix, &self.space)?;
        self.density = matrix;
        self.eigenvalues = eigenvalues;
        self.eigenvectors = eigenvectors;
        Ok(())
    }

    /// Replace ρ with the Hermitian part of `matrix` rescaled to unit trace
    ///
    /// Used after evolution and collapse, where the exact result is a density
    /// matrix and only round-off separates `matrix` from it.
    pub(crate) fn set_matrix_normalized(&mut self, matrix: CMatrix) -> Result<()> {
        let mut matrix = hermitian_part(&matrix);
        let trace = matrix_trace(&matrix).re;
        if trace.is_finite() && trace > 0.0 {
            matrix /= c64(trace, 0.0);
        }
        self.set_matrix(matrix)
    }

    /// Tensor product `first ⊗ second`
    ///
    /// Neither operand is modified.
    pub fn tensor(first: &QuantumState, second: &QuantumState) -> Result<QuantumState> {
        Self::new(
            kronecker::product(&first.density, &second.density),
            HilbertSpace::tensor(&first.space, &second.space)?,
        )
    }

    /// Trace out subsystem `subsystem`, returning the reduced state
    ///
    /// ρ'[i, j] = Σₘ ρ[(i, m), (j, m)] where `m` runs over the basis of the
    /// traced subsystem and `(·, m)` re-inserts it at its flat-index position.
    ///
    /// # Errors
    /// Fails for an out-of-range subsystem or when the state has a single
    /// subsystem (nothing would remain).
    pub fn partial_trace(&self, subsystem: usize) -> Result<QuantumState> {
        let traced_dim = self.space.dimension(subsystem)?;
        let stride = self.space.stride(subsystem)?;
        let reduced_space = self.space.without_subsystem(subsystem)?;
        if reduced_space.is_empty() {
            return Err(StructuralError::EmptySpace.into());
        }

        // Re-insert basis label `m` of the traced subsystem into reduced index `r`
        let lift = |r: usize, m: usize| (r / stride * traced_dim + m) * stride + r % stride;

        let n = reduced_space.total_dimension();
        let reduced = CMatrix::from_fn(n, n, |i, j| {
            (0..traced_dim)
                .map(|m| self.density[(lift(i, m), lift(j, m))])
                .sum()
        });

        Self::new(reduced, reduced_space)
    }
}

impl PartialEq for QuantumState {
    /// Same space and approximately equal density matrices
    fn eq(&self, other: &Self) -> bool {
        self.space == other.space && is_approx(&self.density, &other.density, APPROX_PRECISION)
    }
}

impl fmt::Debug for QuantumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QuantumState {{ space: {}, dim: {}, purity: {:.4} }}",
            self.space,
            self.dimension(),
            self.purity()
        )
    }
}
