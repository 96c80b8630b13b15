//! Generalized (POVM) measurement with state collapse
//!
//! A [`Measurement`] is an ordered list of labeled operators `{(Eₖ, ℓₖ)}`.
//! It is usable only while the set forms a valid POVM:
//!
//! 1. all operators are square and of equal size
//! 2. Σₖ Eₖ = I
//! 3. every Eₖ is Hermitian
//! 4. every Eₖ is positive semi-definite
//!
//! The checks run in this order after every change and the first failure
//! is recorded as a [`MeasurementIssue`].
//!
//! Outcome probabilities are `pₖ = Re Tr(ρ·Eₖ)`. Performing a measurement
//! samples an outcome and applies the Lüders update
//!
//! ```text
//! ρ → √Eₖ · ρ · √Eₖ / pₖ
//! ```
//!
//! Operators may be declared on a single subsystem; they are then lifted to
//! the full space with [`qemul_core::kronecker::expand`].

use crate::state::QuantumState;
use qemul_core::error::{PhysicalError, QuantumError, Result, StructuralError};
use qemul_core::kronecker;
use qemul_core::matrix_ops::{
    check_square, hermitian_eigen, identity_matrix, is_approx, is_hermitian, matrix_trace,
    operator_sqrt, outer_product, scaled_epsilon, APPROX_PRECISION,
};
use qemul_core::{CMatrix, HilbertSpace};
use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

/// Why an operator set is not a valid measurement
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementIssue {
    /// No operators yet
    #[error("Operators set cannot be empty")]
    Empty,

    /// An operator is not square
    #[error("Operators must be square")]
    NotSquare,

    /// Operators have different sizes
    #[error("All operators in one set must be the same size")]
    SizeMismatch,

    /// Σ Eₖ ≠ I
    #[error("Operators sum must be equal to the identity operator")]
    NotComplete,

    /// An operator is not Hermitian
    #[error("Operators must be Hermit")]
    NotHermitian,

    /// An operator has a negative eigenvalue
    #[error("Operators must have non-negative eigen values")]
    NotPositive,
}

/// Which part of the state a measurement acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Target {
    /// Operators act on the full state space
    #[default]
    Whole,

    /// Operators act on one subsystem and are embedded with identities elsewhere
    Subsystem(usize),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Whole => write!(f, "whole system"),
            Target::Subsystem(index) => write!(f, "subsystem {}", index),
        }
    }
}

/// Generalized measurement described by labeled POVM elements
#[derive(Debug, Clone)]
pub struct Measurement {
    /// POVM elements, in insertion order
    operators: Vec<CMatrix>,

    /// Outcome label for each operator
    labels: Vec<String>,

    /// Most recent validation failure, `None` while valid
    issue: Option<MeasurementIssue>,
}

impl Measurement {
    /// Create an empty (invalid) measurement
    ///
    /// Add operators with [`Measurement::add_operator`].
    pub fn new() -> Self {
        Self {
            operators: Vec::new(),
            labels: Vec::new(),
            issue: Some(MeasurementIssue::Empty),
        }
    }

    /// Create a measurement from operators and their outcome labels
    ///
    /// The result may still be invalid; check [`Measurement::is_valid`].
    ///
    /// # Errors
    /// Returns [`StructuralError::LabelCountMismatch`] if the lengths differ.
    pub fn from_operators(operators: Vec<CMatrix>, labels: Vec<String>) -> Result<Self> {
        if operators.len() != labels.len() {
            return Err(StructuralError::LabelCountMismatch {
                operators: operators.len(),
                labels: labels.len(),
            }
            .into());
        }
        let mut measurement = Self {
            operators,
            labels,
            issue: None,
        };
        measurement.revalidate();
        Ok(measurement)
    }

    /// Projective measurement in the eigenbasis of a Hermitian observable
    ///
    /// One projector |v⟩⟨v| per eigenvector, labeled `"0"`, `"1"`, … in
    /// ascending eigenvalue order.
    ///
    /// # Errors
    /// Fails if the observable is not square or not Hermitian.
    pub fn from_observable(observable: &CMatrix) -> Result<Self> {
        check_square(observable)?;
        if !is_hermitian(observable, APPROX_PRECISION) {
            return Err(PhysicalError::NotHermitian.into());
        }

        let (_, vectors) = hermitian_eigen(observable)?;
        let mut measurement = Self::new();
        for (index, column) in vectors.column_iter().enumerate() {
            measurement.add_operator(outer_product(&column.into_owned()), index.to_string());
        }
        Ok(measurement)
    }

    /// Complete projective measurement in the computational basis of `space`
    ///
    /// One projector per basis state, labeled in ket-bra notation: the
    /// projector onto (1, 2) is labeled `"|1,2><1,2|"`.
    pub fn projective(space: &HilbertSpace) -> Self {
        let mut measurement = Self::new();
        for index in 0..space.total_dimension() {
            // index < total, so decomposition and re-encoding cannot fail
            if let Ok(labels) = space.index_to_vector(index) {
                if let Ok(basis) = space.basis_vector(&labels) {
                    measurement.add_operator(outer_product(&basis), Self::ket_bra_label(&labels));
                }
            }
        }
        measurement
    }

    fn ket_bra_label(labels: &[usize]) -> String {
        let inner = labels
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!("|{inner}><{inner}|")
    }

    /// Append an operator with its outcome label and re-validate the set
    pub fn add_operator(&mut self, operator: CMatrix, label: impl Into<String>) -> &mut Self {
        self.operators.push(operator);
        self.labels.push(label.into());
        self.revalidate();
        self
    }

    /// Whether the operator set is currently a valid POVM
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.issue.is_none()
    }

    /// The recorded validation failure, if the set is invalid
    #[inline]
    pub fn issue(&self) -> Option<MeasurementIssue> {
        self.issue
    }

    /// Human-readable reason the set is invalid, if it is
    pub fn error(&self) -> Option<String> {
        self.issue.map(|issue| issue.to_string())
    }

    /// POVM elements in insertion order
    #[inline]
    pub fn operators(&self) -> &[CMatrix] {
        &self.operators
    }

    /// Outcome labels in insertion order
    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of outcomes
    #[inline]
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// True if no operators were added
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    fn revalidate(&mut self) {
        self.issue = self.find_issue();
        if let Some(issue) = self.issue {
            debug!(%issue, operators = self.operators.len(), "measurement set is not valid");
        }
    }

    /// First failing check, in order: emptiness, size, completeness, Hermiticity, positivity
    fn find_issue(&self) -> Option<MeasurementIssue> {
        let Some(first) = self.operators.first() else {
            return Some(MeasurementIssue::Empty);
        };
        let size = first.ncols();

        for operator in &self.operators {
            if !operator.is_square() {
                return Some(MeasurementIssue::NotSquare);
            }
            if operator.ncols() != size {
                return Some(MeasurementIssue::SizeMismatch);
            }
        }

        let sum = self
            .operators
            .iter()
            .fold(CMatrix::zeros(size, size), |acc, op| acc + op);
        if !is_approx(&sum, &identity_matrix(size), APPROX_PRECISION) {
            return Some(MeasurementIssue::NotComplete);
        }

        if !self
            .operators
            .iter()
            .all(|op| is_hermitian(op, APPROX_PRECISION))
        {
            return Some(MeasurementIssue::NotHermitian);
        }

        let floor = -scaled_epsilon(size);
        for operator in &self.operators {
            match hermitian_eigen(operator) {
                Ok((values, _)) if values.iter().all(|&v| v >= floor) => {}
                _ => return Some(MeasurementIssue::NotPositive),
            }
        }

        None
    }

    fn ensure_valid(&self) -> Result<()> {
        match self.issue {
            None => Ok(()),
            Some(issue) => Err(QuantumError::measurement_invalid(issue.to_string())),
        }
    }

    fn check_dimensions(&self, space: &HilbertSpace, target: Target) -> Result<()> {
        let expected = match target {
            Target::Whole => space.total_dimension(),
            Target::Subsystem(index) => space.dimension(index)?,
        };
        let actual = self.operators[0].ncols();
        if actual != expected {
            return Err(StructuralError::DimensionMismatch { expected, actual }.into());
        }
        Ok(())
    }

    /// Operator `k` as it acts on the full state space
    fn full_operator(&self, k: usize, space: &HilbertSpace, target: Target) -> Result<CMatrix> {
        match target {
            Target::Whole => Ok(self.operators[k].clone()),
            Target::Subsystem(index) => {
                kronecker::expand(&self.operators[k], index, space.dimensions())
            }
        }
    }

    /// Probability of each outcome in operator order
    ///
    /// # Errors
    /// - MeasurementInvalid: the operator set is not a valid POVM
    /// - Structural: operator size does not match the targeted dimension
    pub fn outcome_probabilities(
        &self,
        state: &QuantumState,
        target: Target,
    ) -> Result<Vec<f64>> {
        self.ensure_valid()?;
        self.check_dimensions(state.space(), target)?;

        (0..self.operators.len())
            .map(|k| {
                let operator = self.full_operator(k, state.space(), target)?;
                Ok(matrix_trace(&(state.density_matrix() * operator)).re)
            })
            .collect()
    }

    /// Probability of each outcome keyed by label
    ///
    /// Operators sharing a label contribute to the same entry.
    pub fn probabilities(
        &self,
        state: &QuantumState,
        target: Target,
    ) -> Result<HashMap<String, f64>> {
        let probabilities = self.outcome_probabilities(state, target)?;
        let mut result = HashMap::with_capacity(probabilities.len());
        for (label, p) in self.labels.iter().zip(probabilities) {
            *result.entry(label.clone()).or_insert(0.0) += p;
        }
        trace!(?result, %target, "measurement probabilities");
        Ok(result)
    }

    /// Perform the measurement, drawing one uniform number from `rng`
    ///
    /// Returns the label of the outcome that occurred; `state` is collapsed
    /// to the corresponding post-measurement state.
    pub fn perform_on<R: Rng + ?Sized>(
        &self,
        state: &mut QuantumState,
        target: Target,
        rng: &mut R,
    ) -> Result<String> {
        let r: f64 = rng.gen();
        self.perform_with(state, target, r)
    }

    /// Perform the measurement with an explicit sample `r ∈ [0, 1)`
    ///
    /// Outcomes are walked in insertion order accumulating probability; the
    /// first outcome whose cumulative probability exceeds `r` is selected.
    /// Outcomes whose probability is within round-off of zero are never
    /// selected.
    pub fn perform_with(
        &self,
        state: &mut QuantumState,
        target: Target,
        r: f64,
    ) -> Result<String> {
        let probabilities = self.outcome_probabilities(state, target)?;
        let cutoff = scaled_epsilon(state.dimension());

        let Some(k) = Self::select_outcome(&probabilities, r, cutoff) else {
            return Err(PhysicalError::NoPossibleOutcome.into());
        };

        let probability = probabilities[k];
        let operator = self.full_operator(k, state.space(), target)?;
        let root = operator_sqrt(&operator)?;

        // Tr(√E·ρ·√E) = p; normalizing by the trace absorbs round-off in p
        state.set_matrix_normalized(&root * state.density_matrix() * &root)?;

        debug!(
            outcome = %self.labels[k],
            probability,
            %target,
            "measurement performed"
        );
        Ok(self.labels[k].clone())
    }

    /// Index of the first outcome whose cumulative probability exceeds `r`
    ///
    /// Probabilities at or below `cutoff` count as zero. Falls back to the
    /// last possible outcome when round-off leaves the total just below `r`.
    fn select_outcome(probabilities: &[f64], r: f64, cutoff: f64) -> Option<usize> {
        let mut cumulative = 0.0;
        let mut last_possible = None;
        for (k, &p) in probabilities.iter().enumerate() {
            if p <= cutoff {
                continue;
            }
            last_possible = Some(k);
            cumulative += p;
            if r < cumulative {
                return Some(k);
            }
        }
        last_possible
    }
}

impl Default for Measurement {
    fn default() -> Self {
        Self::new()
    }
}
