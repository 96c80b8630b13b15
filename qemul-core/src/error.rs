//! Error types for qemul
//!
//! Failures fall into three kinds:
//! - [`StructuralError`]: malformed input (bad dimensions, indices, shapes)
//! - [`PhysicalError`]: input that is well-formed but violates the quantum
//!   formalism (non-Hermitian density matrix, non-unitary evolution, ...)
//! - [`QuantumError::MeasurementInvalid`]: a measurement was used while its
//!   operator set is not a valid POVM

use thiserror::Error;

/// Malformed input detected at construction or call time
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StructuralError {
    /// A subsystem was declared with dimension zero
    #[error("Dimension cannot be zero")]
    ZeroDimension,

    /// The operation needs a space with at least one subsystem
    #[error("Space has no subsystems and cannot be used here")]
    EmptySpace,

    /// Subsystem index outside `0..rank`
    #[error("Subsystem index {index} out of range for space of rank {rank}")]
    SubsystemOutOfRange { index: usize, rank: usize },

    /// Flat basis index outside `0..total`
    #[error("Index {index} must be between 0 and space dimension {total}")]
    IndexOutOfRange { index: usize, total: usize },

    /// Basis tuple does not have one entry per subsystem
    #[error("Basis tuple has {actual} entries, space rank is {expected}")]
    TupleLengthMismatch { expected: usize, actual: usize },

    /// Basis tuple entry exceeds its subsystem dimension
    #[error("Basis label {value} out of range for subsystem {subsystem} of dimension {dimension}")]
    BasisLabelOutOfRange {
        subsystem: usize,
        value: usize,
        dimension: usize,
    },

    /// Matrix is not square
    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Matrix size does not match the dimension it is used with
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Two spaces that must be identical are factored differently
    #[error("Space mismatch: expected {expected:?}, got {actual:?}")]
    SpaceMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Old and new basis matrices have different sizes
    #[error("Basis matrices must be the same size, got {old} and {new}")]
    BasisSizeMismatch { old: usize, new: usize },

    /// Different number of operators and outcome labels
    #[error("Number of labels ({labels}) must be the same as operators ({operators})")]
    LabelCountMismatch { operators: usize, labels: usize },

    /// The old basis matrix cannot be inverted
    #[error("Old basis matrix is singular")]
    SingularBasis,

    /// A zero vector (or zero basis column) cannot be normalized
    #[error("Cannot normalize a zero vector")]
    ZeroVector,

    /// Product of the subsystem dimensions does not fit in `usize`
    #[error("Total dimension of {dimensions:?} overflows")]
    DimensionOverflow { dimensions: Vec<usize> },

    /// A multi-subsystem embedding runs past the last subsystem
    #[error("Embedding of {span} subsystems starting at {first} exceeds space of rank {rank}")]
    EmbeddingOutOfRange {
        first: usize,
        span: usize,
        rank: usize,
    },
}

/// Input that violates the physical constraints of the formalism
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicalError {
    /// Density matrix is not self-adjoint
    #[error("Matrix should be self-adjoint")]
    NotHermitian,

    /// Density matrix has an eigenvalue below the tolerance
    #[error("Not a density matrix: negative eigenvalue {value:e}")]
    NegativeEigenvalue { value: f64 },

    /// Density matrix trace differs from one
    #[error("Matrix should have trace equal to 1, got {trace}")]
    TraceNotUnity { trace: f64 },

    /// Evolution operator does not satisfy U·U† = I
    #[error("Matrix must be unitary (U·U† = I)")]
    NotUnitary,

    /// Every outcome has probability within round-off of zero
    #[error("No measurement outcome has positive probability")]
    NoPossibleOutcome,

    /// Matrix contains NaN or infinite entries
    #[error("Matrix contains non-finite entries")]
    NonFinite,
}

/// Errors that can occur in qemul operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuantumError {
    /// Bad input shape, index, or dimension
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// Physically invalid state or operator
    #[error(transparent)]
    Physical(#[from] PhysicalError),

    /// Measurement used while its operator set is not valid
    #[error("Measurement is not valid: {reason}")]
    MeasurementInvalid { reason: String },
}

/// Result type for qemul operations
pub type Result<T> = std::result::Result<T, QuantumError>;

impl QuantumError {
    /// Create a measurement-invalid error from the recorded reason
    pub fn measurement_invalid(reason: impl Into<String>) -> Self {
        Self::MeasurementInvalid {
            reason: reason.into(),
        }
    }

    /// True for [`QuantumError::Structural`]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }

    /// True for [`QuantumError::Physical`]
    pub fn is_physical(&self) -> bool {
        matches!(self, Self::Physical(_))
    }

    /// True for [`QuantumError::MeasurementInvalid`]
    pub fn is_measurement_invalid(&self) -> bool {
        matches!(self, Self::MeasurementInvalid { .. })
    }
}
