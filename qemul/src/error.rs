//! Error types for emulator sessions

use qemul_core::QuantumError;
use thiserror::Error;

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Errors that can occur while running a session
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EmulatorError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failure inside state preparation, evolution or measurement
    #[error(transparent)]
    Quantum(#[from] QuantumError),
}
