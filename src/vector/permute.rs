//! Lane movement: blends, shuffles, rotations and lane shifts.
//!
//! Rotating left moves lane contents toward higher lanes, wrapping the top
//! lanes around to lane 0. Shifting left moves them toward lane 0.

use super::Vector;
use crate::element::{Element, Wide};
use crate::error::{Result, VectorError};
use crate::mask::Mask;
use crate::shuffle::Shuffle;

impl<E: Element> Vector<E> {
    /// `result[i] = mask[i] ? other[i] : self[i]`.
    pub fn blend(&self, other: &Vector<E>, mask: &Mask<E>) -> Result<Vector<E>> {
        self.species.check_same(&other.species)?;
        self.species.check_same(&mask.species())?;
        Ok(Self::from_fn(self.species, |i| {
            if mask.lane(i) {
                other.lanes[i]
            } else {
                self.lanes[i]
            }
        }))
    }

    /// `result[i] = mask[i] ? value : self[i]`.
    pub fn blend_scalar(&self, value: E, mask: &Mask<E>) -> Result<Vector<E>> {
        self.blend(&self.species.broadcast(value), mask)
    }

    /// Gathers lanes: `result[i] = self[shuffle[i]]`.
    pub fn rearrange(&self, shuffle: &Shuffle<E>) -> Result<Vector<E>> {
        self.species.check_same(&shuffle.species())?;
        let indices = shuffle.indices();
        Ok(Self::from_fn(self.species, |i| self.lanes[indices[i]]))
    }

    /// `self.rearrange(s).blend(other.rearrange(s), m)`.
    pub fn rearrange_blend(
        &self,
        other: &Vector<E>,
        shuffle: &Shuffle<E>,
        mask: &Mask<E>,
    ) -> Result<Vector<E>> {
        self.rearrange(shuffle)?.blend(&other.rearrange(shuffle)?, mask)
    }

    /// `result[(i + k) mod n] = self[i]`.
    pub fn rotate_lanes_left(&self, k: usize) -> Vector<E> {
        let n = self.length();
        let k = k % n;
        Self::from_fn(self.species, |i| self.lanes[(i + n - k) % n])
    }

    /// `result[i] = self[(i + k) mod n]`.
    pub fn rotate_lanes_right(&self, k: usize) -> Vector<E> {
        let n = self.length();
        let k = k % n;
        Self::from_fn(self.species, |i| self.lanes[(i + k) % n])
    }

    /// `result[i] = self[i + k]`, zero once `i + k` runs off the end.
    pub fn shift_lanes_left(&self, k: usize) -> Vector<E> {
        let n = self.length();
        Self::from_fn(self.species, |i| match i.checked_add(k) {
            Some(j) if j < n => self.lanes[j],
            _ => E::ZERO,
        })
    }

    /// `result[i] = self[i - k]`, zero for the first `k` lanes.
    pub fn shift_lanes_right(&self, k: usize) -> Vector<E> {
        Self::from_fn(self.species, |i| {
            if i >= k {
                self.lanes[i - k]
            } else {
                E::ZERO
            }
        })
    }

    /// Reads the lanes as shuffle indices.
    ///
    /// Fails with a construction error if any lane is negative, fractional,
    /// or not below the lane count.
    pub fn to_shuffle(&self) -> Result<Shuffle<E>> {
        let n = self.length();
        let mut indices = Vec::with_capacity(n);
        for (lane, &x) in self.lanes.iter().enumerate() {
            let index = match x.to_wide() {
                Wide::Int(v) => usize::try_from(v).ok(),
                Wide::Float(f) if f >= 0.0 && f.fract() == 0.0 => Some(f as usize),
                Wide::Float(_) => None,
            }
            .filter(|&ix| ix < n);
            match index {
                Some(ix) => indices.push(ix),
                None => {
                    return Err(VectorError::construction(format!(
                        "lane {} holds {}, not a shuffle index below {}",
                        lane, x, n
                    )))
                }
            }
        }
        Shuffle::new(self.species, indices)
    }
}
