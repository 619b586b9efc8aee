//! # Masks
//!
//! `Mask<E>` is a per-lane boolean predicate tied to a species. It is the
//! result of every comparison and the selector of every masked operation.
//!
//! Lanes are packed into 64-bit words. Bits beyond the lane count in the last
//! word are kept zero by every constructor and operation, so reductions such
//! as `all_true` can never be fooled by them. Words live behind an `Arc`,
//! which lets a species hand out its all-true/all-false masks without copying.

use core::fmt;
use std::sync::Arc;

use crate::element::Element;
use crate::error::{Result, VectorError};
use crate::species::Species;
use crate::vector::Vector;

const WORD_BITS: usize = 64;

/// Packs `lane_count` copies of `value` into words with a clean tail.
pub(crate) fn filled_words(lane_count: usize, value: bool) -> Arc<[u64]> {
    let fill = if value { u64::MAX } else { 0 };
    let mut words = vec![fill; lane_count.div_ceil(WORD_BITS)];
    clear_tail(&mut words, lane_count);
    words.into()
}

/// Valid bits of the last word.
#[inline]
fn tail_mask(lane_count: usize) -> u64 {
    match lane_count % WORD_BITS {
        0 => u64::MAX,
        rem => (1u64 << rem) - 1,
    }
}

#[inline]
fn clear_tail(words: &mut [u64], lane_count: usize) {
    if let Some(last) = words.last_mut() {
        *last &= tail_mask(lane_count);
    }
}

/// A per-lane boolean predicate of species `Species<E>`.
#[derive(Clone)]
pub struct Mask<E> {
    species: Species<E>,
    words: Arc<[u64]>,
}

impl<E: Element> Mask<E> {
    pub(crate) fn from_words(species: Species<E>, words: Arc<[u64]>) -> Self {
        Mask { species, words }
    }

    pub(crate) fn from_bools(species: Species<E>, bits: &[bool]) -> Self {
        let mut words = vec![0u64; bits.len().div_ceil(WORD_BITS)];
        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
            }
        }
        Mask {
            species,
            words: words.into(),
        }
    }

    fn zip_words(&self, other: &Mask<E>, f: impl Fn(u64, u64) -> u64) -> Result<Mask<E>> {
        self.species.check_same(&other.species)?;
        let mut words: Vec<u64> = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        clear_tail(&mut words, self.length());
        Ok(Mask::from_words(self.species, words.into()))
    }

    #[inline]
    pub fn species(&self) -> Species<E> {
        self.species
    }

    /// Number of lanes.
    #[inline]
    pub fn length(&self) -> usize {
        self.species.lane_count()
    }

    /// Lane `i`, unchecked against the lane count.
    #[inline]
    pub(crate) fn lane(&self, i: usize) -> bool {
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    /// Lane `i`, or a bounds error outside `[0, length)`.
    pub fn get(&self, i: usize) -> Result<bool> {
        if i >= self.length() {
            return Err(VectorError::bounds(i, self.length()));
        }
        Ok(self.lane(i))
    }

    /// Lane-wise AND.
    pub fn and(&self, other: &Mask<E>) -> Result<Mask<E>> {
        self.zip_words(other, |a, b| a & b)
    }

    /// Lane-wise OR.
    pub fn or(&self, other: &Mask<E>) -> Result<Mask<E>> {
        self.zip_words(other, |a, b| a | b)
    }

    /// Lane-wise XOR.
    pub fn xor(&self, other: &Mask<E>) -> Result<Mask<E>> {
        self.zip_words(other, |a, b| a ^ b)
    }

    /// Lane-wise NOT. Never sets bits beyond the lane count.
    pub fn not(&self) -> Mask<E> {
        let mut words: Vec<u64> = self.words.iter().map(|&w| !w).collect();
        clear_tail(&mut words, self.length());
        Mask::from_words(self.species, words.into())
    }

    /// True if any lane is set.
    pub fn any_true(&self) -> bool {
        self.words.iter().any(|&w| w != 0)
    }

    /// True if every lane is set.
    ///
    /// Only the low `length % 64` bits of the last word take part.
    pub fn all_true(&self) -> bool {
        let n = self.length();
        let last = self.words.len() - 1;
        self.words.iter().enumerate().all(|(i, &w)| {
            let valid = if i == last { tail_mask(n) } else { u64::MAX };
            w & valid == valid
        })
    }

    /// Number of set lanes.
    pub fn true_count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Index of the lowest set lane.
    pub fn first_true(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|&(_, &w)| w != 0)
            .map(|(i, &w)| i * WORD_BITS + w.trailing_zeros() as usize)
    }

    /// Lanes `0..64` as a bit set; lane `i` is bit `i`.
    pub fn to_bits(&self) -> u64 {
        self.words[0]
    }

    /// One `bool` per lane.
    pub fn to_array(&self) -> Vec<bool> {
        (0..self.length()).map(|i| self.lane(i)).collect()
    }

    /// Writes the lanes into `out[offset..offset + length]`.
    pub fn into_array(&self, out: &mut [bool], offset: usize) -> Result<()> {
        let range = self.species.lane_range(out.len(), offset)?;
        for (i, slot) in out[range].iter_mut().enumerate() {
            *slot = self.lane(i);
        }
        Ok(())
    }

    /// Materializes the mask: set lanes become all-ones bit patterns, clear
    /// lanes become zero.
    pub fn to_vector(&self) -> Vector<E> {
        let ones = E::all_ones();
        let lanes = (0..self.length())
            .map(|i| if self.lane(i) { ones } else { E::ZERO })
            .collect();
        Vector::from_lanes(self.species, lanes)
    }

    /// The same lanes as a mask of another species with the same lane count.
    pub fn cast<F: Element>(&self, target: Species<F>) -> Result<Mask<F>> {
        if target.lane_count() != self.length() {
            return Err(self.species.mismatch(&target));
        }
        Ok(Mask::from_words(target, Arc::clone(&self.words)))
    }
}

impl<E> PartialEq for Mask<E> {
    fn eq(&self, other: &Self) -> bool {
        self.species == other.species && self.words == other.words
    }
}

impl<E> Eq for Mask<E> {}

impl<E: Element> fmt::Debug for Mask<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask({}, ", self.species)?;
        for i in 0..self.length() {
            f.write_str(if self.lane(i) { "1" } else { "0" })?;
        }
        f.write_str(")")
    }
}
