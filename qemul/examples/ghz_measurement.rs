//! Prepare a register and measure selected qubits
//!
//! Usage: ghz_measurement [--qubits N] [--preparation ghz|uniform] [--seed S] [SUBSYSTEM...]
//!
//! Set `RUST_LOG=debug` to trace preparation and every measurement.

use clap::{Parser, ValueEnum};
use qemul::{Emulator, EmulatorConfig, Preparation};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PreparationArg {
    /// (|0…0⟩ + |1…1⟩)/√2
    Ghz,
    /// Equal superposition of every basis state
    #[clap(alias = "uniform-superposition")]
    Uniform,
}

impl From<PreparationArg> for Preparation {
    fn from(arg: PreparationArg) -> Self {
        match arg {
            PreparationArg::Ghz => Preparation::Ghz,
            PreparationArg::Uniform => Preparation::UniformSuperposition,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ghz_measurement", about = "Prepare a qubit register and measure it")]
struct Args {
    /// Number of qubits in the register
    #[arg(short, long, default_value_t = 3)]
    qubits: usize,

    /// Initial state of the register
    #[arg(short, long, value_enum, default_value_t = PreparationArg::Ghz)]
    preparation: PreparationArg,

    /// Seed for the measurement sampler; entropy when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Qubits to measure, in order; all of them when omitted
    #[arg(value_name = "SUBSYSTEM")]
    subsystems: Vec<usize>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = EmulatorConfig::new()
        .with_qubits(args.qubits)
        .with_preparation(args.preparation.into());
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let subsystems = if args.subsystems.is_empty() {
        (0..args.qubits).collect()
    } else {
        args.subsystems
    };

    let mut emulator = match Emulator::new(config) {
        Ok(emulator) => emulator,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match emulator.measure(&subsystems) {
        Ok(outcomes) => {
            for (subsystem, outcome) in subsystems.iter().zip(&outcomes) {
                println!("Measurement result of subsystem #{subsystem} is {outcome}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
