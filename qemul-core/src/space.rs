//! Composite Hilbert spaces and basis indexing
//!
//! A [`HilbertSpace`] is an ordered list of subsystem dimensions
//! `d₁ ⊗ d₂ ⊗ … ⊗ dₙ`. Basis states are labeled by tuples `(b₁, …, bₙ)` with
//! `bᵢ < dᵢ` and stored at the mixed-radix flat index
//!
//! ```text
//! index = ((b₁·d₂ + b₂)·d₃ + b₃)… + bₙ
//! ```
//!
//! so the **last** subsystem varies fastest. Every component that splits or
//! builds a flat index (Kronecker embedding, partial trace, projective
//! measurements) relies on this ordering.
//!
//! # Example
//!
//! ```rust
//! use qemul_core::HilbertSpace;
//!
//! let space = HilbertSpace::new(vec![3, 4]).unwrap();
//! assert_eq!(space.total_dimension(), 12);
//! assert_eq!(space.index_to_vector(6).unwrap(), vec![1, 2]);
//! assert_eq!(space.vector_to_index(&[1, 2]).unwrap(), 6);
//! ```

use crate::error::{Result, StructuralError};
use crate::matrix_ops::{c64, CVector};
use std::fmt;

/// Tensor product of finite-dimensional subsystems
///
/// Equality is structural: two spaces are equal only if they have the same
/// subsystem dimensions in the same order, so `2⊗3` differs from `3⊗2` and
/// from `6` even though all have total dimension 6.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct HilbertSpace {
    /// Subsystem dimensions, all ≥ 1
    dimensions: Vec<usize>,

    /// Product of all dimensions, 0 for the empty space
    total: usize,
}

impl HilbertSpace {
    /// Create a composite space from subsystem dimensions
    ///
    /// # Errors
    /// Returns [`StructuralError::ZeroDimension`] if any dimension is zero.
    pub fn new(dimensions: Vec<usize>) -> Result<Self> {
        if dimensions.iter().any(|&d| d == 0) {
            return Err(StructuralError::ZeroDimension.into());
        }
        let total = Self::product(&dimensions)?;
        Ok(Self { dimensions, total })
    }

    /// Create a single (rank-1) space
    pub fn single(dimension: usize) -> Result<Self> {
        Self::new(vec![dimension])
    }

    /// Create `count` qubit subsystems (`2⊗2⊗…`)
    ///
    /// # Errors
    /// Returns [`StructuralError::DimensionOverflow`] if `2^count` does not fit in `usize`.
    pub fn qubits(count: usize) -> Result<Self> {
        Self::new(vec![2; count])
    }

    /// The rank-0 placeholder space
    ///
    /// It has total dimension 0 and cannot carry a state.
    pub fn empty() -> Self {
        Self::default()
    }

    fn product(dimensions: &[usize]) -> Result<usize> {
        if dimensions.is_empty() {
            return Ok(0);
        }
        dimensions
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| {
                StructuralError::DimensionOverflow {
                    dimensions: dimensions.to_vec(),
                }
                .into()
            })
    }

    /// Number of subsystems
    #[inline]
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// True for the rank-0 placeholder
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Dimension of subsystem `index`
    pub fn dimension(&self, index: usize) -> Result<usize> {
        self.dimensions.get(index).copied().ok_or_else(|| {
            StructuralError::SubsystemOutOfRange {
                index,
                rank: self.rank(),
            }
            .into()
        })
    }

    /// All subsystem dimensions in order
    #[inline]
    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    /// Product of all subsystem dimensions
    #[inline]
    pub fn total_dimension(&self) -> usize {
        self.total
    }

    /// Decompose a flat index into its basis tuple
    ///
    /// # Errors
    /// Returns [`StructuralError::IndexOutOfRange`] unless `index < total_dimension()`.
    pub fn index_to_vector(&self, index: usize) -> Result<Vec<usize>> {
        if index >= self.total {
            return Err(StructuralError::IndexOutOfRange {
                index,
                total: self.total,
            }
            .into());
        }

        let mut labels = vec![0; self.rank()];
        let mut rest = index;
        for (slot, &dim) in labels.iter_mut().zip(&self.dimensions).rev() {
            *slot = rest % dim;
            rest /= dim;
        }
        Ok(labels)
    }

    /// Encode a basis tuple as a flat index
    ///
    /// # Errors
    /// Fails if the tuple length differs from the rank or an entry is not
    /// below its subsystem dimension.
    pub fn vector_to_index(&self, labels: &[usize]) -> Result<usize> {
        if self.is_empty() {
            return Err(StructuralError::EmptySpace.into());
        }
        if labels.len() != self.rank() {
            return Err(StructuralError::TupleLengthMismatch {
                expected: self.rank(),
                actual: labels.len(),
            }
            .into());
        }

        let mut index = 0;
        for (subsystem, (&value, &dim)) in labels.iter().zip(&self.dimensions).enumerate() {
            if value >= dim {
                return Err(StructuralError::BasisLabelOutOfRange {
                    subsystem,
                    value,
                    dimension: dim,
                }
                .into());
            }
            index = index * dim + value;
        }
        Ok(index)
    }

    /// Canonical basis vector |b₁,…,bₙ⟩ of length `total_dimension()`
    pub fn basis_vector(&self, labels: &[usize]) -> Result<CVector> {
        let index = self.vector_to_index(labels)?;
        let mut vector = CVector::zeros(self.total);
        vector[index] = c64(1.0, 0.0);
        Ok(vector)
    }

    /// Tensor product `first ⊗ second` as a new space
    pub fn tensor(first: &HilbertSpace, second: &HilbertSpace) -> Result<HilbertSpace> {
        let mut space = first.clone();
        space.tensor_with(second)?;
        Ok(space)
    }

    /// Append the subsystems of `other` to this space
    ///
    /// On overflow of the total dimension the space is left unchanged.
    pub fn tensor_with(&mut self, other: &HilbertSpace) -> Result<()> {
        let mut dimensions = self.dimensions.clone();
        dimensions.extend_from_slice(&other.dimensions);
        self.total = Self::product(&dimensions)?;
        self.dimensions = dimensions;
        Ok(())
    }

    /// The space with subsystem `index` removed
    pub fn without_subsystem(&self, index: usize) -> Result<HilbertSpace> {
        self.dimension(index)?;
        let mut dimensions = self.dimensions.clone();
        dimensions.remove(index);
        Self::new(dimensions)
    }

    /// Product of the dimensions of subsystems strictly after `index`
    ///
    /// This is the stride of subsystem `index` in the flat index.
    pub fn stride(&self, index: usize) -> Result<usize> {
        self.dimension(index)?;
        Ok(self.dimensions[index + 1..].iter().product())
    }
}

impl fmt::Display for HilbertSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "∅");
        }
        let parts: Vec<String> = self.dimensions.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", parts.join("⊗"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space_3x4() -> HilbertSpace {
        HilbertSpace::new(vec![3, 4]).unwrap()
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(HilbertSpace::single(0).is_err());
        let err = HilbertSpace::new(vec![3, 4, 0]).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_rank_and_dimensions() {
        let space = space_3x4();
        assert_eq!(space.rank(), 2);
        assert_eq!(space.dimension(0).unwrap(), 3);
        assert_eq!(space.dimension(1).unwrap(), 4);
        assert!(space.dimension(2).is_err());
        assert_eq!(space.total_dimension(), 12);
    }

    #[test]
    fn test_empty_space() {
        let space = HilbertSpace::empty();
        assert_eq!(space.rank(), 0);
        assert_eq!(space.total_dimension(), 0);
        assert!(space.index_to_vector(0).is_err());
        assert!(space.vector_to_index(&[]).is_err());
    }

    #[test]
    fn test_tensor_with_appends() {
        let mut space = space_3x4();
        space
            .tensor_with(&HilbertSpace::new(vec![1, 6, 78]).unwrap())
            .unwrap();
        assert_eq!(space.rank(), 5);
        assert_eq!(space.dimension(2).unwrap(), 1);
        assert_eq!(space.dimension(4).unwrap(), 78);
        assert_eq!(space.total_dimension(), 3 * 4 * 6 * 78);
    }

    #[test]
    fn test_tensor_is_pure() {
        let space = space_3x4();
        let joined = HilbertSpace::tensor(&space, &HilbertSpace::single(2).unwrap()).unwrap();
        assert_eq!(joined.total_dimension(), 24);
        assert_eq!(joined.rank(), 3);
        assert_eq!(space.rank(), 2);
    }

    #[test]
    fn test_tensor_with_empty_keeps_total() {
        let joined = HilbertSpace::tensor(&HilbertSpace::empty(), &space_3x4()).unwrap();
        assert_eq!(joined, space_3x4());
        assert_eq!(joined.total_dimension(), 12);
    }

    #[test]
    fn test_total_dimension_overflow_rejected() {
        let err = HilbertSpace::new(vec![usize::MAX, 2]).unwrap_err();
        assert!(matches!(
            err,
            crate::QuantumError::Structural(StructuralError::DimensionOverflow { .. })
        ));
        assert!(HilbertSpace::qubits(usize::BITS as usize).is_err());
        assert_eq!(
            HilbertSpace::qubits(10).unwrap().total_dimension(),
            1024
        );

        let mut space = HilbertSpace::qubits(usize::BITS as usize - 1).unwrap();
        let before = space.clone();
        assert!(space.tensor_with(&HilbertSpace::single(4).unwrap()).is_err());
        assert_eq!(space, before);
    }

    #[test]
    fn test_index_vector_conversion() {
        let space = space_3x4();
        assert_eq!(space.index_to_vector(6).unwrap(), vec![1, 2]);
        assert_eq!(space.vector_to_index(&[1, 2]).unwrap(), 6);
        assert!(space.index_to_vector(12).is_err());
        assert!(space.vector_to_index(&[1]).is_err());
        assert!(space.vector_to_index(&[3, 0]).is_err());
    }

    #[test]
    fn test_round_trip_all_indices() {
        let space = HilbertSpace::new(vec![2, 3, 5]).unwrap();
        for index in 0..space.total_dimension() {
            let labels = space.index_to_vector(index).unwrap();
            assert_eq!(space.vector_to_index(&labels).unwrap(), index);
        }
    }

    #[test]
    fn test_basis_vector() {
        let vector = space_3x4().basis_vector(&[1, 2]).unwrap();
        assert_eq!(vector.len(), 12);
        for (i, z) in vector.iter().enumerate() {
            let expected = if i == 6 { 1.0 } else { 0.0 };
            assert_eq!(z.re, expected);
            assert_eq!(z.im, 0.0);
        }
    }

    #[test]
    fn test_structural_equality() {
        let a = HilbertSpace::new(vec![2, 3]).unwrap();
        let b = HilbertSpace::new(vec![3, 2]).unwrap();
        let c = HilbertSpace::single(6).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, HilbertSpace::new(vec![2, 3]).unwrap());
    }

    #[test]
    fn test_without_subsystem_and_stride() {
        let space = HilbertSpace::new(vec![2, 3, 5]).unwrap();
        assert_eq!(space.without_subsystem(1).unwrap().dimensions(), &[2, 5]);
        assert!(space.without_subsystem(3).is_err());
        assert_eq!(space.stride(0).unwrap(), 15);
        assert_eq!(space.stride(2).unwrap(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(space_3x4().to_string(), "3⊗4");
        assert_eq!(HilbertSpace::empty().to_string(), "∅");
    }
}
