//! Quantum states, unitary evolution and generalized measurement
//!
//! This crate builds on the composite spaces and matrix helpers of
//! `qemul-core`:
//!
//! - [`QuantumState`]: a validated density matrix bound to a [`HilbertSpace`]
//! - [`UnitaryTransformation`]: evolution ρ → U·ρ·U†
//! - [`Measurement`]: POVM measurement with probabilistic collapse
//!
//! # Example
//!
//! ```
//! use qemul_core::HilbertSpace;
//! use qemul_state::{rng::seeded_rng, Measurement, QuantumState, Target};
//!
//! let space = HilbertSpace::qubits(2).unwrap();
//! let mut state = QuantumState::basis_state(space.clone(), &[1, 0]).unwrap();
//!
//! let measurement = Measurement::projective(&space);
//! let mut rng = seeded_rng(Some(7));
//! let outcome = measurement.perform_on(&mut state, Target::Whole, &mut rng).unwrap();
//! assert_eq!(outcome, "|1,0><1,0|");
//! ```
//!
//! [`HilbertSpace`]: qemul_core::HilbertSpace

pub mod measurement;
pub mod rng;
pub mod state;
pub mod transform;

pub use measurement::{Measurement, MeasurementIssue, Target};
pub use state::QuantumState;
pub use transform::UnitaryTransformation;
