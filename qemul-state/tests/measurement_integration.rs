//! Integration tests for evolution and measurement on composite spaces

use approx::assert_relative_eq;
use qemul_core::{c64, kronecker, CMatrix, CVector, HilbertSpace};
use qemul_state::rng::seeded_rng;
use qemul_state::{Measurement, QuantumState, Target, UnitaryTransformation};

const TOL: f64 = 1e-10;

fn real(n: usize, values: &[f64]) -> CMatrix {
    CMatrix::from_row_slice(
        n,
        n,
        &values.iter().map(|&v| c64(v, 0.0)).collect::<Vec<_>>(),
    )
}

fn hadamard() -> CMatrix {
    let h = 1.0 / 2.0_f64.sqrt();
    real(2, &[h, h, h, -h])
}

fn cnot() -> CMatrix {
    real(
        4,
        &[
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
            0.0, 0.0, 1.0, 0.0,
        ],
    )
}

fn bell_state() -> QuantumState {
    let space = HilbertSpace::qubits(2).unwrap();
    let mut state = QuantumState::basis_state(space.clone(), &[0, 0]).unwrap();

    let h0 = kronecker::expand(&hadamard(), 0, space.dimensions()).unwrap();
    UnitaryTransformation::new(h0, space.clone())
        .unwrap()
        .apply_to(&mut state)
        .unwrap();
    UnitaryTransformation::new(cnot(), space)
        .unwrap()
        .apply_to(&mut state)
        .unwrap();
    state
}

#[test]
fn test_bell_state_preparation() {
    let state = bell_state();
    let rho = state.density_matrix();
    assert_relative_eq!(rho[(0, 0)].re, 0.5, epsilon = TOL);
    assert_relative_eq!(rho[(0, 3)].re, 0.5, epsilon = TOL);
    assert_relative_eq!(rho[(3, 3)].re, 0.5, epsilon = TOL);
    assert_relative_eq!(rho[(1, 1)].re, 0.0, epsilon = TOL);
}

#[test]
fn test_bell_state_reduced_is_mixed() {
    let reduced = bell_state().partial_trace(1).unwrap();
    assert_relative_eq!(reduced.purity(), 0.5, epsilon = TOL);
    assert!(!reduced.is_pure());
}

#[test]
fn test_bell_measurements_are_correlated() {
    let z = Measurement::projective(&HilbertSpace::single(2).unwrap());
    let mut rng = seeded_rng(Some(99));

    for _ in 0..25 {
        let mut state = bell_state();
        let first = z.perform_on(&mut state, Target::Subsystem(0), &mut rng).unwrap();

        // The partner qubit is now determined
        let probs = z.probabilities(&state, Target::Subsystem(1)).unwrap();
        assert_relative_eq!(probs[&first], 1.0, epsilon = TOL);

        let second = z.perform_on(&mut state, Target::Subsystem(1), &mut rng).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_outcome_frequencies_follow_probabilities() {
    let z = Measurement::projective(&HilbertSpace::single(2).unwrap());
    let mut rng = seeded_rng(Some(5));
    let shots = 2000;

    let mut ones = 0;
    for _ in 0..shots {
        let mut state = bell_state();
        if z.perform_on(&mut state, Target::Subsystem(0), &mut rng).unwrap() == "|1><1|" {
            ones += 1;
        }
    }

    let fraction = ones as f64 / shots as f64;
    assert!((0.4..0.6).contains(&fraction), "fraction of ones: {fraction}");
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let space = HilbertSpace::qubits(3).unwrap();
    let amplitudes = CVector::from_element(8, c64(1.0, 0.0));
    let measurement = Measurement::projective(&space);

    let run = |seed| {
        let mut rng = seeded_rng(Some(seed));
        (0..10)
            .map(|_| {
                let mut state = QuantumState::from_vector(&amplitudes, space.clone()).unwrap();
                measurement
                    .perform_on(&mut state, Target::Whole, &mut rng)
                    .unwrap()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(1234), run(1234));
}

#[test]
fn test_mixed_state_measurement() {
    let space = HilbertSpace::new(vec![3]).unwrap();
    let state = QuantumState::maximally_mixed(space.clone()).unwrap();
    let measurement = Measurement::projective(&space);

    let probs = measurement.probabilities(&state, Target::Whole).unwrap();
    assert_eq!(probs.len(), 3);
    for p in probs.values() {
        assert_relative_eq!(*p, 1.0 / 3.0, epsilon = TOL);
    }
}

#[test]
fn test_shared_labels_are_summed() {
    // Parity measurement on two qubits
    let space = HilbertSpace::qubits(2).unwrap();
    let mut parity = Measurement::new();
    for labels in [[0, 0], [0, 1], [1, 0], [1, 1]] {
        let basis = space.basis_vector(&labels).unwrap();
        let label = if labels[0] == labels[1] { "even" } else { "odd" };
        parity.add_operator(&basis * basis.adjoint(), label);
    }
    assert!(parity.is_valid());

    let probs = parity.probabilities(&bell_state(), Target::Whole).unwrap();
    assert_eq!(probs.len(), 2);
    assert_relative_eq!(probs["even"], 1.0, epsilon = TOL);
    assert_relative_eq!(probs["odd"], 0.0, epsilon = TOL);
}

#[test]
fn test_space_structure_matters() {
    let gate = UnitaryTransformation::new(cnot(), HilbertSpace::qubits(2).unwrap()).unwrap();
    let mut flat = QuantumState::basis_state(HilbertSpace::single(4).unwrap(), &[0]).unwrap();
    assert!(gate.apply_to(&mut flat).unwrap_err().is_structural());
}
