//! qemul: finite-dimensional quantum system emulator
//!
//! This crate re-exports the building blocks and adds a small session type
//! that prepares a register of qubits and measures it.
//!
//! - `qemul-core`: composite spaces, Kronecker embedding, errors and tolerances
//! - `qemul-state`: density-matrix states, unitary evolution, POVM measurement
//! - `qemul-gates`: standard gate matrices and their embedding
//!
//! # Example
//!
//! ```
//! use qemul::{Emulator, EmulatorConfig, Preparation};
//!
//! let config = EmulatorConfig::new()
//!     .with_qubits(3)
//!     .with_preparation(Preparation::Ghz)
//!     .with_seed(42);
//!
//! let mut emulator = Emulator::new(config).unwrap();
//! let outcomes = emulator.measure(&[0, 1, 2]).unwrap();
//!
//! // GHZ outcomes are perfectly correlated
//! assert!(outcomes.iter().all(|o| o == &outcomes[0]));
//! ```

pub mod config;
pub mod emulator;
pub mod error;

pub use config::{EmulatorConfig, Preparation};
pub use emulator::Emulator;
pub use error::{EmulatorError, Result};

pub use qemul_core::{HilbertSpace, QuantumError};
pub use qemul_gates::{transform_on, Gate};
pub use qemul_state::{Measurement, QuantumState, Target, UnitaryTransformation};
