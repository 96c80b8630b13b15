//! Emulator configuration

use crate::error::{EmulatorError, Result};

/// Entangled or product state prepared from |0…0⟩
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preparation {
    /// (|0…0⟩ + |1…1⟩)/√2: Hadamard on qubit 0, then a CNOT chain
    #[default]
    Ghz,

    /// ((|0⟩ + |1⟩)/√2)^⊗n: Hadamard on every qubit
    UniformSuperposition,
}

/// Configuration for an emulator session
#[derive(Debug, Clone, PartialEq)]
pub struct EmulatorConfig {
    /// Number of qubit subsystems
    ///
    /// Must be at least 1.
    ///
    /// Default: 3
    pub qubits: usize,

    /// State prepared after initialization to |0…0⟩
    ///
    /// Default: [`Preparation::Ghz`]
    pub preparation: Preparation,

    /// Random number generator seed for reproducible measurement outcomes
    ///
    /// If None, seeds from system entropy.
    ///
    /// Default: None (random)
    pub seed: Option<u64>,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            qubits: 3,
            preparation: Preparation::Ghz,
            seed: None,
        }
    }
}

impl EmulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of qubits
    pub fn with_qubits(mut self, qubits: usize) -> Self {
        self.qubits = qubits;
        self
    }

    /// Set the prepared state
    pub fn with_preparation(mut self, preparation: Preparation) -> Self {
        self.preparation = preparation;
        self
    }

    /// Set the random seed for deterministic measurement outcomes
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.qubits == 0 {
            return Err(EmulatorError::InvalidConfig(
                "qubits must be >= 1, got 0".to_string(),
            ));
        }
        Ok(())
    }
}
