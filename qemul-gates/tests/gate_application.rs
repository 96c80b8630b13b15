//! Applying standard gates to states

use qemul_core::matrix_ops::is_approx;
use qemul_core::{c64, CMatrix, CVector, HilbertSpace};
use qemul_gates::{matrices, transform_on, Gate};
use qemul_state::{QuantumState, UnitaryTransformation};
use std::f64::consts::PI;

fn real(n: usize, values: &[f64]) -> CMatrix {
    CMatrix::from_row_slice(
        n,
        n,
        &values.iter().map(|&v| c64(v, 0.0)).collect::<Vec<_>>(),
    )
}

fn state_from(values: &[f64], space: HilbertSpace) -> QuantumState {
    let vector = CVector::from_iterator(values.len(), values.iter().map(|&v| c64(v, 0.0)));
    QuantumState::from_vector(&vector, space).unwrap()
}

fn apply(gate: CMatrix, state: &mut QuantumState) {
    UnitaryTransformation::new(gate, state.space().clone())
        .unwrap()
        .apply_to(state)
        .unwrap();
}

fn projector(dim: usize, indices: &[usize]) -> CMatrix {
    let weight = 1.0 / indices.len() as f64;
    let mut m = CMatrix::zeros(dim, dim);
    for &i in indices {
        for &j in indices {
            m[(i, j)] = c64(weight, 0.0);
        }
    }
    m
}

#[test]
fn test_pauli_x_flips() {
    let mut state = state_from(&[1.0, 0.0], HilbertSpace::single(2).unwrap());
    apply(matrices::pauli_x(), &mut state);
    assert!(is_approx(state.density_matrix(), &real(2, &[0.0, 0.0, 0.0, 1.0]), 1e-12));
}

#[test]
fn test_pauli_y_flips() {
    let mut state = state_from(&[1.0, 0.0], HilbertSpace::single(2).unwrap());
    apply(matrices::pauli_y(), &mut state);
    assert!(is_approx(state.density_matrix(), &real(2, &[0.0, 0.0, 0.0, 1.0]), 1e-12));
}

#[test]
fn test_pauli_z_keeps_zero() {
    let mut state = state_from(&[1.0, 0.0], HilbertSpace::single(2).unwrap());
    apply(matrices::pauli_z(), &mut state);
    assert!(is_approx(state.density_matrix(), &real(2, &[1.0, 0.0, 0.0, 0.0]), 1e-12));
}

#[test]
fn test_phase_shift_pi_on_plus() {
    let mut state = state_from(&[1.0, 1.0], HilbertSpace::single(2).unwrap());
    apply(matrices::phase_shift(PI), &mut state);
    let expected = real(2, &[0.5, -0.5, -0.5, 0.5]);
    assert!(is_approx(state.density_matrix(), &expected, 1e-10));
}

#[test]
fn test_swap() {
    // |00⟩ + |01⟩ → |00⟩ + |10⟩
    let mut state = state_from(&[1.0, 1.0, 0.0, 0.0], HilbertSpace::qubits(2).unwrap());
    apply(matrices::swap(), &mut state);
    assert!(is_approx(state.density_matrix(), &projector(4, &[0, 2]), 1e-10));
}

#[test]
fn test_cnot() {
    // |00⟩ + |11⟩ → |00⟩ + |10⟩
    let mut state = state_from(&[1.0, 0.0, 0.0, 1.0], HilbertSpace::qubits(2).unwrap());
    apply(matrices::cnot(), &mut state);
    assert!(is_approx(state.density_matrix(), &projector(4, &[0, 2]), 1e-10));
}

#[test]
fn test_toffoli() {
    // |000⟩ + |111⟩ → |000⟩ + |110⟩
    let mut state = state_from(
        &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        HilbertSpace::qubits(3).unwrap(),
    );
    apply(matrices::toffoli(), &mut state);
    assert!(is_approx(state.density_matrix(), &projector(8, &[0, 6]), 1e-10));
}

#[test]
fn test_ghz_via_embedded_gates() {
    let space = HilbertSpace::qubits(3).unwrap();
    let mut state = QuantumState::basis_state(space.clone(), &[0, 0, 0]).unwrap();

    transform_on(&Gate::Hadamard, 0, &space)
        .unwrap()
        .apply_to(&mut state)
        .unwrap();
    for control in 0..2 {
        transform_on(&Gate::Cnot, control, &space)
            .unwrap()
            .apply_to(&mut state)
            .unwrap();
    }

    assert!(is_approx(state.density_matrix(), &projector(8, &[0, 7]), 1e-10));
}

#[test]
fn test_gate_on_qutrit_neighbour() {
    // Pauli-X on the qubit of a qubit ⊗ qutrit space leaves the qutrit alone
    let space = HilbertSpace::new(vec![2, 3]).unwrap();
    let mut state = QuantumState::basis_state(space.clone(), &[0, 2]).unwrap();
    transform_on(&Gate::PauliX, 0, &space)
        .unwrap()
        .apply_to(&mut state)
        .unwrap();

    let target = space.vector_to_index(&[1, 2]).unwrap();
    assert!((state.density_matrix()[(target, target)].re - 1.0).abs() < 1e-12);
}
