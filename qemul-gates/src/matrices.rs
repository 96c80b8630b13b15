//! Standard gate matrices
//!
//! Fixed gates are stored as constant row-major tables and converted to
//! [`CMatrix`] on demand. Basis ordering follows the flat-index convention
//! of [`qemul_core::HilbertSpace`]: the first qubit is the most significant,
//! so for two qubits the rows are |00⟩, |01⟩, |10⟩, |11⟩.

use num_complex::Complex64;
use qemul_core::CMatrix;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// H = 1/√2 * [[1, 1], [1, -1]]
pub const HADAMARD: [[Complex64; 2]; 2] = [
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(INV_SQRT2, 0.0),
    ],
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(-INV_SQRT2, 0.0),
    ],
];

/// X = [[0, 1], [1, 0]]
pub const PAULI_X: [[Complex64; 2]; 2] = [[ZERO, ONE], [ONE, ZERO]];

/// Y = [[0, -i], [i, 0]]
pub const PAULI_Y: [[Complex64; 2]; 2] = [[ZERO, NEG_I], [I, ZERO]];

/// Z = [[1, 0], [0, -1]]
pub const PAULI_Z: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, NEG_ONE]];

/// SWAP exchanges two qubits: |01⟩ ↔ |10⟩
pub const SWAP: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ONE, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
];

/// Convert a constant row-major table into a dense matrix
pub fn to_matrix<const N: usize>(table: &[[Complex64; N]; N]) -> CMatrix {
    CMatrix::from_fn(N, N, |row, col| table[row][col])
}

/// Hadamard gate
pub fn hadamard() -> CMatrix {
    to_matrix(&HADAMARD)
}

/// Pauli-X (NOT) gate
pub fn pauli_x() -> CMatrix {
    to_matrix(&PAULI_X)
}

/// Pauli-Y gate
pub fn pauli_y() -> CMatrix {
    to_matrix(&PAULI_Y)
}

/// Pauli-Z gate
pub fn pauli_z() -> CMatrix {
    to_matrix(&PAULI_Z)
}

/// Phase shift gate
/// R(φ) = [[1, 0],
///         [0, e^(iφ)]]
pub fn phase_shift(phi: f64) -> CMatrix {
    let mut matrix = CMatrix::identity(2, 2);
    matrix[(1, 1)] = Complex64::from_polar(1.0, phi);
    matrix
}

/// Two-qubit SWAP gate
pub fn swap() -> CMatrix {
    to_matrix(&SWAP)
}

/// Controlled-U: apply `u` to the target when the control is |1⟩
///
/// The control is a qubit placed before the target, so the result is the
/// block-diagonal matrix diag(I, U) of size 2n for an n × n `u`.
pub fn controlled(u: &CMatrix) -> CMatrix {
    let n = u.nrows();
    let mut matrix = CMatrix::identity(2 * n, 2 * n);
    matrix.view_mut((n, n), (n, n)).copy_from(u);
    matrix
}

/// CNOT: controlled Pauli-X
pub fn cnot() -> CMatrix {
    controlled(&pauli_x())
}

/// Toffoli (CCNOT): flips the third qubit when the first two are |1⟩
pub fn toffoli() -> CMatrix {
    controlled(&cnot())
}

/// n × n identity
pub fn identity(n: usize) -> CMatrix {
    CMatrix::identity(n, n)
}
