//! Non-interactive emulator session
//!
//! A session owns one state over `n` qubits. It is initialized to |0…0⟩,
//! prepared according to the configuration, and then measured subsystem by
//! subsystem in the computational basis. Every measurement collapses the
//! state, so later outcomes are conditioned on earlier ones.

use crate::config::{EmulatorConfig, Preparation};
use crate::error::Result;
use qemul_core::HilbertSpace;
use qemul_gates::{transform_on, Gate};
use qemul_state::rng::seeded_rng;
use qemul_state::{Measurement, QuantumState, Target};
use rand::rngs::StdRng;
use std::collections::HashMap;
use tracing::{debug, info};

/// Emulator session over a register of qubits
#[derive(Debug)]
pub struct Emulator {
    config: EmulatorConfig,
    state: QuantumState,
    measurement: Measurement,
    rng: StdRng,
}

impl Emulator {
    /// Create a session and prepare the configured state
    ///
    /// # Errors
    /// Fails if the configuration is invalid.
    pub fn new(config: EmulatorConfig) -> Result<Self> {
        config.validate()?;

        let space = HilbertSpace::qubits(config.qubits)?;
        let mut state = QuantumState::basis_state(space.clone(), &vec![0; config.qubits])?;
        Self::prepare(&mut state, config.preparation)?;

        info!(
            qubits = config.qubits,
            preparation = ?config.preparation,
            "prepared emulator state"
        );

        Ok(Self {
            measurement: Measurement::projective(&HilbertSpace::single(2)?),
            rng: seeded_rng(config.seed),
            config,
            state,
        })
    }

    fn prepare(state: &mut QuantumState, preparation: Preparation) -> Result<()> {
        let space = state.space().clone();
        match preparation {
            Preparation::Ghz => {
                transform_on(&Gate::Hadamard, 0, &space)?.apply_to(state)?;
                for control in 0..space.rank().saturating_sub(1) {
                    transform_on(&Gate::Cnot, control, &space)?.apply_to(state)?;
                }
            }
            Preparation::UniformSuperposition => {
                for qubit in 0..space.rank() {
                    transform_on(&Gate::Hadamard, qubit, &space)?.apply_to(state)?;
                }
            }
        }
        Ok(())
    }

    /// Measure each listed subsystem in turn, returning the outcome labels in order
    ///
    /// Outcomes are `"|0><0|"` or `"|1><1|"`. A subsystem may be listed more
    /// than once; repeated measurements return the same outcome.
    ///
    /// # Errors
    /// Fails for a subsystem index outside the register. Outcomes of
    /// subsystems listed earlier have already been applied to the state.
    pub fn measure(&mut self, subsystems: &[usize]) -> Result<Vec<String>> {
        let mut outcomes = Vec::with_capacity(subsystems.len());
        for &subsystem in subsystems {
            let outcome = self.measurement.perform_on(
                &mut self.state,
                Target::Subsystem(subsystem),
                &mut self.rng,
            )?;
            debug!(subsystem, outcome = %outcome, "measured subsystem");
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Outcome probabilities for measuring `subsystem` now, keyed by label
    pub fn probabilities(&self, subsystem: usize) -> Result<HashMap<String, f64>> {
        Ok(self
            .measurement
            .probabilities(&self.state, Target::Subsystem(subsystem))?)
    }

    /// Current state
    #[inline]
    pub fn state(&self) -> &QuantumState {
        &self.state
    }

    /// Session configuration
    #[inline]
    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }
}
