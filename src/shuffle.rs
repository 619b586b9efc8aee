//! # Shuffles
//!
//! `Shuffle<E>` is a per-lane gather permutation tied to a species: applied
//! to a vector it produces `result[i] = source[shuffle[i]]`. Indices are
//! validated against the lane count when the shuffle is built, so every
//! later use is infallible with respect to indexing.

use core::fmt;
use std::sync::Arc;

use crate::element::Element;
use crate::error::{Result, VectorError};
use crate::species::Species;
use crate::vector::Vector;

/// A per-lane index permutation of species `Species<E>`.
#[derive(Clone)]
pub struct Shuffle<E> {
    species: Species<E>,
    indices: Arc<[usize]>,
}

impl<E: Element> Shuffle<E> {
    /// Builds a shuffle, rejecting any index outside `[0, lane_count)`.
    pub(crate) fn new(species: Species<E>, indices: Vec<usize>) -> Result<Self> {
        let n = species.lane_count();
        species.check_lane_count(indices.len(), "shuffle array")?;
        if let Some((lane, &index)) = indices.iter().enumerate().find(|&(_, &ix)| ix >= n) {
            return Err(VectorError::construction(format!(
                "shuffle lane {} holds index {}, outside [0, {})",
                lane, index, n
            )));
        }
        Ok(Shuffle {
            species,
            indices: indices.into(),
        })
    }

    pub(crate) fn identity(species: Species<E>) -> Self {
        Shuffle {
            species,
            indices: (0..species.lane_count()).collect(),
        }
    }

    #[inline]
    pub fn species(&self) -> Species<E> {
        self.species
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub(crate) fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Source index of lane `i`.
    pub fn get(&self, i: usize) -> Result<usize> {
        self.indices
            .get(i)
            .copied()
            .ok_or_else(|| VectorError::bounds(i, self.length()))
    }

    /// Composes two permutations: `result[i] = self[other[i]]`.
    pub fn rearrange(&self, other: &Shuffle<E>) -> Result<Shuffle<E>> {
        self.species.check_same(&other.species)?;
        let indices: Vec<usize> = other.indices.iter().map(|&j| self.indices[j]).collect();
        Ok(Shuffle {
            species: self.species,
            indices: indices.into(),
        })
    }

    pub fn to_array(&self) -> Vec<usize> {
        self.indices.to_vec()
    }

    /// Writes the indices into `out[offset..offset + length]`.
    pub fn into_array(&self, out: &mut [usize], offset: usize) -> Result<()> {
        let range = self.species.lane_range(out.len(), offset)?;
        out[range].copy_from_slice(&self.indices);
        Ok(())
    }

    /// The indices as lane values of the same species.
    ///
    /// Indices that do not fit `E` keep their low-order bits, as a cast would.
    pub fn to_vector(&self) -> Vector<E> {
        let lanes = self
            .indices
            .iter()
            .map(|&ix| E::cast_from(ix as u64))
            .collect();
        Vector::from_lanes(self.species, lanes)
    }

    /// The same permutation for another species with the same lane count.
    pub fn cast<F: Element>(&self, target: Species<F>) -> Result<Shuffle<F>> {
        if target.lane_count() != self.length() {
            return Err(self.species.mismatch(&target));
        }
        Ok(Shuffle {
            species: target,
            indices: Arc::clone(&self.indices),
        })
    }
}

impl<E> PartialEq for Shuffle<E> {
    fn eq(&self, other: &Self) -> bool {
        self.species == other.species && self.indices == other.indices
    }
}

impl<E> Eq for Shuffle<E> {}

impl<E: Element> fmt::Debug for Shuffle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shuffle({}, {:?})", self.species, &*self.indices)
    }
}
