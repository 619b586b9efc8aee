//! Loads and stores against element slices, byte slices and byte buffers.
//!
//! Offsets into element slices count elements; offsets into bytes count
//! bytes. Bytes are read and written in native order.
//!
//! Masked loads touch (and bounds-check) only the selected lanes, so a
//! masked load may hang off the end of its slice as long as the lanes past
//! the end are unselected. Masked stores are read-modify-write over the full
//! lane range, which must lie inside the destination. All checks run before
//! the first lane is read or written.

use core::ops::Range;

use super::Vector;
use crate::buffer::ByteBuffer;
use crate::element::Element;
use crate::error::{Result, VectorError};
use crate::mask::Mask;
use crate::species::Species;

/// Slot of `lane` when lanes of `width` units start at `offset` in a region
/// of `len` units.
fn lane_slot(offset: usize, lane: usize, width: usize, len: usize) -> Result<Range<usize>> {
    let start = lane.checked_mul(width).and_then(|x| x.checked_add(offset));
    match start.and_then(|s| s.checked_add(width).map(|e| s..e)) {
        Some(slot) if slot.end <= len => Ok(slot),
        _ => Err(VectorError::bounds(
            offset
                .saturating_add(lane.saturating_mul(width))
                .saturating_add(width),
            len,
        )),
    }
}

/// Slots of every selected lane, or the first bounds error.
fn selected_slots<E: Element>(
    mask: &Mask<E>,
    offset: usize,
    width: usize,
    len: usize,
) -> Result<Vec<(usize, Range<usize>)>> {
    let mut slots = Vec::with_capacity(mask.true_count());
    for lane in 0..mask.length() {
        if mask.lane(lane) {
            slots.push((lane, lane_slot(offset, lane, width, len)?));
        }
    }
    Ok(slots)
}

// ============================================================================
// Loads
// ============================================================================

impl<E: Element> Species<E> {
    /// Loads `source[offset..offset + lane_count]`.
    pub fn from_array(&self, source: &[E], offset: usize) -> Result<Vector<E>> {
        let range = self.lane_range(source.len(), offset)?;
        Ok(Vector::from_lanes(*self, source[range].to_vec()))
    }

    /// Loads the selected lanes; unselected lanes are zero.
    pub fn from_array_masked(
        &self,
        source: &[E],
        offset: usize,
        mask: &Mask<E>,
    ) -> Result<Vector<E>> {
        self.zero().load_masked(source, offset, mask)
    }

    /// Loads lanes from `bytes[offset..offset + byte_size]`.
    pub fn from_byte_array(&self, bytes: &[u8], offset: usize) -> Result<Vector<E>> {
        let range = lane_slot(offset, 0, self.byte_size(), bytes.len())?;
        let lanes = bytes[range]
            .chunks_exact(self.element_size())
            .map(E::read_ne)
            .collect();
        Ok(Vector::from_lanes(*self, lanes))
    }

    /// Loads the selected lanes from bytes; unselected lanes are zero.
    pub fn from_byte_array_masked(
        &self,
        bytes: &[u8],
        offset: usize,
        mask: &Mask<E>,
    ) -> Result<Vector<E>> {
        self.check_same(&mask.species())?;
        let slots = selected_slots(mask, offset, self.element_size(), bytes.len())?;
        let mut lanes = vec![E::ZERO; self.lane_count()];
        for (lane, slot) in slots {
            lanes[lane] = E::read_ne(&bytes[slot]);
        }
        Ok(Vector::from_lanes(*self, lanes))
    }

    /// Loads lanes from a native-order buffer at byte `offset`.
    pub fn from_buffer(&self, buffer: &ByteBuffer, offset: usize) -> Result<Vector<E>> {
        self.from_byte_array(buffer.native_bytes()?, offset)
    }

    pub fn from_buffer_masked(
        &self,
        buffer: &ByteBuffer,
        offset: usize,
        mask: &Mask<E>,
    ) -> Result<Vector<E>> {
        self.from_byte_array_masked(buffer.native_bytes()?, offset, mask)
    }
}

impl<E: Element> Vector<E> {
    /// Replaces the selected lanes by `source[offset + i]`; unselected lanes
    /// keep their value in `self`.
    pub fn load_masked(&self, source: &[E], offset: usize, mask: &Mask<E>) -> Result<Vector<E>> {
        self.species.check_same(&mask.species())?;
        let slots = selected_slots(mask, offset, 1, source.len())?;
        let mut lanes = self.lanes.to_vec();
        for (lane, slot) in slots {
            lanes[lane] = source[slot.start];
        }
        Ok(Self::from_lanes(self.species, lanes))
    }

    // ========================================================================
    // Stores
    // ========================================================================

    /// Writes the lanes to `out[offset..offset + length]`.
    pub fn into_array(&self, out: &mut [E], offset: usize) -> Result<()> {
        let range = self.species.lane_range(out.len(), offset)?;
        out[range].copy_from_slice(&self.lanes);
        Ok(())
    }

    /// Writes the selected lanes; unselected destination slots are left
    /// untouched. The whole of `out[offset..offset + length]` must exist.
    pub fn into_array_masked(&self, out: &mut [E], offset: usize, mask: &Mask<E>) -> Result<()> {
        self.species.check_same(&mask.species())?;
        let range = self.species.lane_range(out.len(), offset)?;
        for (slot, (lane, &x)) in out[range].iter_mut().zip(self.lanes.iter().enumerate()) {
            if mask.lane(lane) {
                *slot = x;
            }
        }
        Ok(())
    }

    /// Writes the lanes as native-order bytes to
    /// `out[offset..offset + byte_size]`.
    pub fn into_byte_array(&self, out: &mut [u8], offset: usize) -> Result<()> {
        let range = lane_slot(offset, 0, self.species.byte_size(), out.len())?;
        let width = self.species.element_size();
        for (chunk, &lane) in out[range].chunks_exact_mut(width).zip(self.lanes.iter()) {
            lane.write_ne(chunk);
        }
        Ok(())
    }

    pub fn into_byte_array_masked(
        &self,
        out: &mut [u8],
        offset: usize,
        mask: &Mask<E>,
    ) -> Result<()> {
        self.species.check_same(&mask.species())?;
        let range = lane_slot(offset, 0, self.species.byte_size(), out.len())?;
        let width = self.species.element_size();
        let chunks = out[range].chunks_exact_mut(width);
        for (lane, (chunk, &x)) in chunks.zip(self.lanes.iter()).enumerate() {
            if mask.lane(lane) {
                x.write_ne(chunk);
            }
        }
        Ok(())
    }

    /// Writes the lanes into a writable native-order buffer at byte `offset`.
    pub fn into_buffer(&self, buffer: &mut ByteBuffer, offset: usize) -> Result<()> {
        self.into_byte_array(buffer.native_bytes_mut()?, offset)
    }

    pub fn into_buffer_masked(
        &self,
        buffer: &mut ByteBuffer,
        offset: usize,
        mask: &Mask<E>,
    ) -> Result<()> {
        self.into_byte_array_masked(buffer.native_bytes_mut()?, offset, mask)
    }
}
