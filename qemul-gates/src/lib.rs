//! Standard quantum gates for qemul
//!
//! Gate matrices live in [`matrices`], the [`Gate`] enum names them, and
//! [`embed`] lifts a gate acting on a few consecutive subsystems into the
//! full composite space.
//!
//! # Example
//!
//! ```
//! use qemul_core::HilbertSpace;
//! use qemul_gates::{transform_on, Gate};
//! use qemul_state::QuantumState;
//!
//! let space = HilbertSpace::qubits(2).unwrap();
//! let mut state = QuantumState::basis_state(space.clone(), &[0, 0]).unwrap();
//!
//! transform_on(&Gate::Hadamard, 0, &space).unwrap().apply_to(&mut state).unwrap();
//! transform_on(&Gate::Cnot, 0, &space).unwrap().apply_to(&mut state).unwrap();
//!
//! // Bell state (|00⟩ + |11⟩)/√2
//! assert!((state.density_matrix()[(0, 3)].re - 0.5).abs() < 1e-12);
//! ```

pub mod embed;
pub mod matrices;
pub mod standard;

pub use embed::{embed, embed_matrix, transform_on};
pub use standard::Gate;
