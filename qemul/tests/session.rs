//! End-to-end emulator sessions

use approx::assert_relative_eq;
use qemul::{Emulator, EmulatorConfig, Preparation};

const TOL: f64 = 1e-10;

#[test]
fn test_seeded_sessions_repeat() {
    let config = EmulatorConfig::new()
        .with_qubits(3)
        .with_preparation(Preparation::UniformSuperposition)
        .with_seed(7);

    let first = Emulator::new(config.clone())
        .unwrap()
        .measure(&[0, 1, 2])
        .unwrap();
    let second = Emulator::new(config).unwrap().measure(&[0, 1, 2]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_ghz_collapse_fixes_remaining_qubits() {
    let config = EmulatorConfig::new().with_qubits(3).with_seed(3);
    let mut emulator = Emulator::new(config).unwrap();

    let first = emulator.measure(&[1]).unwrap().remove(0);
    for subsystem in [0, 2] {
        let probs = emulator.probabilities(subsystem).unwrap();
        assert_relative_eq!(probs[&first], 1.0, epsilon = TOL);
    }
}

#[test]
fn test_uniform_qubits_stay_independent() {
    let config = EmulatorConfig::new()
        .with_qubits(2)
        .with_preparation(Preparation::UniformSuperposition)
        .with_seed(11);
    let mut emulator = Emulator::new(config).unwrap();

    emulator.measure(&[0]).unwrap();
    let probs = emulator.probabilities(1).unwrap();
    assert_relative_eq!(probs["|0><0|"], 0.5, epsilon = TOL);
    assert_relative_eq!(probs["|1><1|"], 0.5, epsilon = TOL);
}

#[test]
fn test_repeated_subsystem_gives_same_outcome() {
    let config = EmulatorConfig::new()
        .with_qubits(2)
        .with_preparation(Preparation::UniformSuperposition)
        .with_seed(99);
    let mut emulator = Emulator::new(config).unwrap();

    let outcomes = emulator.measure(&[1, 1, 1]).unwrap();
    assert_eq!(outcomes[0], outcomes[1]);
    assert_eq!(outcomes[1], outcomes[2]);
    assert_relative_eq!(emulator.state().trace(), 1.0, epsilon = TOL);
}

#[test]
fn test_ghz_frequencies() {
    let mut zeros = 0;
    let runs = 400;
    for seed in 0..runs {
        let config = EmulatorConfig::new().with_qubits(2).with_seed(seed);
        let outcomes = Emulator::new(config).unwrap().measure(&[0]).unwrap();
        if outcomes[0] == "|0><0|" {
            zeros += 1;
        }
    }
    let fraction = zeros as f64 / runs as f64;
    assert!((0.35..0.65).contains(&fraction), "fraction of zeros: {fraction}");
}
