//! # Vectors
//!
//! `Vector<E>` is an immutable lane-parallel value of one species. Every
//! operation validates its operands (species, indices, offsets) first and
//! then returns a freshly built vector; nothing is ever mutated in place.
//!
//! The implementation is generic over the element type and monomorphized per
//! kind; the shape travels at runtime inside the species. Lane arithmetic,
//! comparisons and folds are delegated to the executor registered for `E`
//! (see [`crate::executor`]); lane movement and conversions run here.
//!
//! The operations are grouped by concern:
//!
//! - [`lanewise`]: arithmetic, bitwise and shift operations, plain and masked
//! - [`compare`]: lane predicates producing masks
//! - [`reduce`]: horizontal folds
//! - [`permute`]: blends, shuffles, lane rotations and lane shifts
//! - [`convert`]: cast, reinterpret and reshape
//! - [`memory`]: loads and stores against slices, bytes and buffers

use core::fmt;

use crate::element::Element;
use crate::error::{Result, VectorError};
use crate::executor::{self, LaneExecutor};
use crate::species::Species;

pub mod compare;
pub mod convert;
pub mod lanewise;
pub mod memory;
pub mod permute;
pub mod reduce;

/// An immutable vector of `species.lane_count()` lanes of `E`.
#[derive(Clone)]
pub struct Vector<E> {
    species: Species<E>,
    lanes: Box<[E]>,
}

impl<E: Element> Vector<E> {
    /// Wraps lanes already known to match the species' lane count.
    pub(crate) fn from_lanes(species: Species<E>, lanes: Vec<E>) -> Self {
        debug_assert_eq!(lanes.len(), species.lane_count());
        Vector {
            species,
            lanes: lanes.into_boxed_slice(),
        }
    }

    /// Builds a vector lane by lane.
    pub(crate) fn from_fn(species: Species<E>, f: impl FnMut(usize) -> E) -> Self {
        Self::from_lanes(species, (0..species.lane_count()).map(f).collect())
    }

    #[inline]
    pub(crate) fn exec() -> &'static dyn LaneExecutor<E> {
        executor::executor::<E>()
    }

    #[inline]
    pub fn species(&self) -> Species<E> {
        self.species
    }

    /// Number of lanes.
    #[inline]
    pub fn length(&self) -> usize {
        self.lanes.len()
    }

    /// Width of the vector in bits.
    #[inline]
    pub fn bit_size(&self) -> usize {
        self.species.bit_size()
    }

    /// Read-only view of the lanes.
    #[inline]
    pub fn lanes(&self) -> &[E] {
        &self.lanes
    }

    /// Lane `i`, or a bounds error outside `[0, length)`.
    pub fn get(&self, i: usize) -> Result<E> {
        self.lanes
            .get(i)
            .copied()
            .ok_or_else(|| VectorError::bounds(i, self.length()))
    }

    /// Copy of this vector with lane `i` replaced by `value`.
    pub fn with(&self, i: usize, value: E) -> Result<Vector<E>> {
        if i >= self.length() {
            return Err(VectorError::bounds(i, self.length()));
        }
        let mut lanes = self.lanes.to_vec();
        lanes[i] = value;
        Ok(Self::from_lanes(self.species, lanes))
    }

    /// The lanes as a new `Vec`.
    pub fn to_array(&self) -> Vec<E> {
        self.lanes.to_vec()
    }
}

/// Equal species and every lane equal under the lane-wise `eq` predicate,
/// so a vector holding a NaN lane is not equal to itself.
impl<E: Element> PartialEq for Vector<E> {
    fn eq(&self, other: &Self) -> bool {
        match self.eq_lanes(other) {
            Ok(mask) => mask.all_true(),
            Err(_) => false,
        }
    }
}

impl<E: Element> fmt::Debug for Vector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector({}, {:?})", self.species, &*self.lanes)
    }
}

impl<E: Element> fmt::Display for Vector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, lane) in self.lanes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", lane)?;
        }
        f.write_str("]")
    }
}
