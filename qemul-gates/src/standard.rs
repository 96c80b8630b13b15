//! Named gates

use crate::matrices;
use qemul_core::CMatrix;
use std::fmt;

/// Standard gate acting on one or more consecutive subsystems
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// Hadamard
    Hadamard,
    /// Pauli-X (NOT)
    PauliX,
    /// Pauli-Y
    PauliY,
    /// Pauli-Z
    PauliZ,
    /// Phase shift by the given angle in radians
    PhaseShift(f64),
    /// Exchange of two qubits
    Swap,
    /// Controlled NOT, control first
    Cnot,
    /// Doubly-controlled NOT, controls first
    Toffoli,
    /// Controlled version of another gate, control first
    Controlled(Box<Gate>),
    /// Identity on a single subsystem of the given dimension
    Identity(usize),
}

impl Gate {
    /// Short display name
    pub fn name(&self) -> String {
        match self {
            Gate::Hadamard => "H".to_string(),
            Gate::PauliX => "X".to_string(),
            Gate::PauliY => "Y".to_string(),
            Gate::PauliZ => "Z".to_string(),
            Gate::PhaseShift(phi) => format!("P({:.4})", phi),
            Gate::Swap => "SWAP".to_string(),
            Gate::Cnot => "CNOT".to_string(),
            Gate::Toffoli => "CCNOT".to_string(),
            Gate::Controlled(inner) => format!("C-{}", inner.name()),
            Gate::Identity(dim) => format!("I{}", dim),
        }
    }

    /// Dimensions of the subsystems the gate acts on, in order
    pub fn dimensions(&self) -> Vec<usize> {
        match self {
            Gate::Hadamard | Gate::PauliX | Gate::PauliY | Gate::PauliZ | Gate::PhaseShift(_) => {
                vec![2]
            }
            Gate::Swap | Gate::Cnot => vec![2, 2],
            Gate::Toffoli => vec![2, 2, 2],
            Gate::Controlled(inner) => {
                let mut dims = vec![2];
                dims.extend(inner.dimensions());
                dims
            }
            Gate::Identity(dim) => vec![*dim],
        }
    }

    /// Number of consecutive subsystems the gate covers
    #[inline]
    pub fn span(&self) -> usize {
        self.dimensions().len()
    }

    /// Unitary matrix of the gate on its own subsystems
    pub fn matrix(&self) -> CMatrix {
        match self {
            Gate::Hadamard => matrices::hadamard(),
            Gate::PauliX => matrices::pauli_x(),
            Gate::PauliY => matrices::pauli_y(),
            Gate::PauliZ => matrices::pauli_z(),
            Gate::PhaseShift(phi) => matrices::phase_shift(*phi),
            Gate::Swap => matrices::swap(),
            Gate::Cnot => matrices::cnot(),
            Gate::Toffoli => matrices::toffoli(),
            Gate::Controlled(inner) => matrices::controlled(&inner.matrix()),
            Gate::Identity(dim) => matrices::identity(*dim),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
