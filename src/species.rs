//! # Species
//!
//! A species is the pair (element kind, shape). It fixes the lane count of
//! every vector, mask and shuffle built from it and acts as their factory.
//!
//! Species are process-wide singletons: one descriptor per pair, created on
//! first use through a `OnceCell` table so concurrent first callers all get
//! the same instance. Equality of species is identity of that descriptor.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use std::sync::Arc;

use log::debug;
use once_cell::sync::OnceCell;

use crate::config;
use crate::element::{Element, ElementKind};
use crate::error::{Result, VectorError};
use crate::mask::{self, Mask};
use crate::shape::Shape;
use crate::shuffle::Shuffle;
use crate::vector::Vector;

/// Immutable description of one (element kind, shape) pair.
#[derive(Debug)]
pub struct SpeciesDescriptor {
    kind: ElementKind,
    shape: Shape,
    bit_size: usize,
    lane_count: usize,
    all_true: Arc<[u64]>,
    all_false: Arc<[u64]>,
}

impl SpeciesDescriptor {
    fn new(kind: ElementKind, shape: Shape) -> Result<Self> {
        let bit_size = shape.bit_size();
        let element_bits = kind.bit_size();
        if bit_size == 0 || bit_size % element_bits != 0 {
            return Err(VectorError::construction(format!(
                "{}-bit shape cannot hold whole {} lanes",
                bit_size, kind
            )));
        }
        let lane_count = bit_size / element_bits;
        if config::current().log_species_creation {
            debug!(
                "Creating species {}x{} ({} bits, shape {})",
                kind, lane_count, bit_size, shape
            );
        }
        Ok(SpeciesDescriptor {
            kind,
            shape,
            bit_size,
            lane_count,
            all_true: mask::filled_words(lane_count, true),
            all_false: mask::filled_words(lane_count, false),
        })
    }

    pub fn element_kind(&self) -> ElementKind {
        self.kind
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn bit_size(&self) -> usize {
        self.bit_size
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }
}

impl fmt::Display for SpeciesDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}[{}]", self.kind, self.lane_count, self.shape)
    }
}

const TABLE_LEN: usize = ElementKind::ALL.len() * Shape::ALL.len();

#[allow(clippy::declare_interior_mutable_const)]
const EMPTY: OnceCell<SpeciesDescriptor> = OnceCell::new();

static TABLE: [OnceCell<SpeciesDescriptor>; TABLE_LEN] = [EMPTY; TABLE_LEN];

/// Resolves the singleton descriptor for a (kind, shape) pair.
pub fn descriptor(kind: ElementKind, shape: Shape) -> Result<&'static SpeciesDescriptor> {
    let slot = &TABLE[kind.index() * Shape::ALL.len() + shape.index()];
    slot.get_or_try_init(|| SpeciesDescriptor::new(kind, shape))
}

/// Handle to the singleton species of element type `E` at one shape.
pub struct Species<E> {
    desc: &'static SpeciesDescriptor,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Clone for Species<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Species<E> {}

impl<E> PartialEq for Species<E> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.desc, other.desc)
    }
}

impl<E> Eq for Species<E> {}

impl<E> Hash for Species<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::ptr::hash(self.desc, state)
    }
}

impl<E> fmt::Debug for Species<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Species({})", self.desc)
    }
}

impl<E> fmt::Display for Species<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.desc, f)
    }
}

impl<E: Element> Species<E> {
    /// The species of `E` at `shape`.
    pub fn of(shape: Shape) -> Result<Self> {
        Ok(Species {
            desc: descriptor(E::KIND, shape)?,
            _marker: PhantomData,
        })
    }

    /// The species of `E` at the fixed shape with `bits` width.
    pub fn try_of_bits(bits: usize) -> Result<Self> {
        Self::of(Shape::for_bit_size(bits)?)
    }

    /// The species of `E` at the platform's widest shape.
    pub fn preferred() -> Result<Self> {
        Self::of(Shape::Max)
    }

    pub fn descriptor(&self) -> &'static SpeciesDescriptor {
        self.desc
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        self.desc.shape
    }

    #[inline]
    pub fn element_kind(&self) -> ElementKind {
        E::KIND
    }

    /// Number of lanes: shape width / element width.
    #[inline]
    pub fn lane_count(&self) -> usize {
        self.desc.lane_count
    }

    #[inline]
    pub fn bit_size(&self) -> usize {
        self.desc.bit_size
    }

    /// Size of one element in bytes.
    #[inline]
    pub fn element_size(&self) -> usize {
        E::KIND.byte_size()
    }

    /// Size of a whole vector of this species in bytes.
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.desc.bit_size / 8
    }

    /// Fails with a species mismatch unless `other` is this species.
    pub(crate) fn check_same(&self, other: &Species<E>) -> Result<()> {
        if self == other {
            Ok(())
        } else {
            Err(self.mismatch(other))
        }
    }

    pub(crate) fn mismatch<F>(&self, other: &Species<F>) -> VectorError {
        VectorError::SpeciesMismatch {
            expected: self.to_string(),
            found: other.to_string(),
        }
    }

    pub(crate) fn check_lane_count(&self, len: usize, what: &str) -> Result<()> {
        if len == self.lane_count() {
            Ok(())
        } else {
            Err(VectorError::construction(format!(
                "{} has {} entries, species {} needs {}",
                what,
                len,
                self,
                self.lane_count()
            )))
        }
    }

    // ========================================================================
    // Vector factories
    // ========================================================================

    /// Vector with every lane zero.
    pub fn zero(&self) -> Vector<E> {
        self.broadcast(E::ZERO)
    }

    /// Vector with every lane set to `value`.
    pub fn broadcast(&self, value: E) -> Vector<E> {
        Vector::from_lanes(*self, vec![value; self.lane_count()])
    }

    /// Broadcasts a scalar of another element type, converted with the cast
    /// rules (narrowing keeps low-order bits, floats truncate and saturate).
    pub fn broadcast_from<S: Element>(&self, value: S) -> Vector<E> {
        self.broadcast(E::cast_from(value))
    }

    /// Vector holding exactly `values`, one per lane.
    pub fn from_values(&self, values: &[E]) -> Result<Vector<E>> {
        self.check_lane_count(values.len(), "value array")?;
        Ok(Vector::from_lanes(*self, values.to_vec()))
    }

    /// Vector whose lane `i` holds `i`, converted to `E`.
    pub fn iota(&self) -> Vector<E> {
        let lanes = (0..self.lane_count())
            .map(|i| E::cast_from(i as u64))
            .collect();
        Vector::from_lanes(*self, lanes)
    }

    // ========================================================================
    // Mask factories
    // ========================================================================

    /// The cached mask with every lane set.
    pub fn mask_all_true(&self) -> Mask<E> {
        Mask::from_words(*self, Arc::clone(&self.desc.all_true))
    }

    /// The cached mask with no lane set.
    pub fn mask_all_false(&self) -> Mask<E> {
        Mask::from_words(*self, Arc::clone(&self.desc.all_false))
    }

    /// Mask holding exactly `bits`, one per lane.
    pub fn mask_from_values(&self, bits: &[bool]) -> Result<Mask<E>> {
        self.check_lane_count(bits.len(), "mask array")?;
        Ok(Mask::from_bools(*self, bits))
    }

    /// Mask read from `bits[offset..offset + lane_count]`.
    pub fn mask_from_array(&self, bits: &[bool], offset: usize) -> Result<Mask<E>> {
        let range = self.lane_range(bits.len(), offset)?;
        Ok(Mask::from_bools(*self, &bits[range]))
    }

    /// Mask whose lane `i` is bit `i` of `bits`; lanes past 64 are false and
    /// bits past the lane count are ignored.
    pub fn mask_from_bits(&self, bits: u64) -> Mask<E> {
        let n = self.lane_count();
        let lanes: Vec<bool> = (0..n).map(|i| i < 64 && (bits >> i) & 1 == 1).collect();
        Mask::from_bools(*self, &lanes)
    }

    // ========================================================================
    // Shuffle factories
    // ========================================================================

    /// Shuffle holding exactly `indices`, each in `[0, lane_count)`.
    pub fn shuffle_from_values(&self, indices: &[usize]) -> Result<Shuffle<E>> {
        self.check_lane_count(indices.len(), "shuffle array")?;
        Shuffle::new(*self, indices.to_vec())
    }

    /// Shuffle read from `indices[offset..offset + lane_count]`.
    pub fn shuffle_from_array(&self, indices: &[usize], offset: usize) -> Result<Shuffle<E>> {
        let range = self.lane_range(indices.len(), offset)?;
        Shuffle::new(*self, indices[range].to_vec())
    }

    /// Shuffle whose lane `i` holds `f(i)`.
    pub fn shuffle_from_fn(&self, f: impl FnMut(usize) -> usize) -> Result<Shuffle<E>> {
        Shuffle::new(*self, (0..self.lane_count()).map(f).collect())
    }

    /// The identity permutation.
    pub fn shuffle_iota(&self) -> Shuffle<E> {
        Shuffle::identity(*self)
    }

    /// Range `offset..offset + lane_count`, checked against a source of
    /// length `len`.
    pub(crate) fn lane_range(&self, len: usize, offset: usize) -> Result<core::ops::Range<usize>> {
        let n = self.lane_count();
        match offset.checked_add(n) {
            Some(end) if end <= len => Ok(offset..end),
            _ => Err(VectorError::bounds(offset.saturating_add(n), len)),
        }
    }
}
