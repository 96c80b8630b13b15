//! Core types for the qemul quantum emulator
//!
//! This crate provides the dimension bookkeeping and linear algebra shared by
//! every other qemul crate:
//! - [`HilbertSpace`]: composite space with mixed-radix basis indexing
//! - [`kronecker`]: tensor products and single-subsystem embedding
//! - [`matrix_ops`]: Hermitian/unitary checks, eigendecomposition, operator square root
//! - [`QuantumError`]: structural, physical-validity, and measurement errors
//!
//! # Example
//! ```
//! use qemul_core::{kronecker, HilbertSpace};
//! use qemul_core::matrix_ops::identity_matrix;
//!
//! let space = HilbertSpace::new(vec![2, 3]).unwrap();
//! let lifted = kronecker::expand(&identity_matrix(3), 1, space.dimensions()).unwrap();
//! assert_eq!(lifted.nrows(), space.total_dimension());
//! ```

pub mod error;
pub mod kronecker;
pub mod matrix_ops;
pub mod space;

// Re-exports for convenience
pub use error::{PhysicalError, QuantumError, Result, StructuralError};
pub use matrix_ops::{c64, CMatrix, CVector};
pub use num_complex::Complex64;
pub use space::HilbertSpace;
