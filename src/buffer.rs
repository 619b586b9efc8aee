//! Owned byte region with a declared byte order, the target of the
//! buffer load/store entry points.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorError};

/// Byte order of multi-byte lanes in a [`ByteBuffer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Byte order of the compile target.
    pub const fn native() -> ByteOrder {
        if cfg!(target_endian = "little") {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::LittleEndian => f.write_str("little-endian"),
            ByteOrder::BigEndian => f.write_str("big-endian"),
        }
    }
}

/// An owned byte region of fixed length.
///
/// New buffers are writable and in native order. Vector loads and stores
/// only accept native order, and stores reject read-only buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
    order: ByteOrder,
    read_only: bool,
}

impl ByteBuffer {
    /// Zero-filled buffer of `len` bytes.
    pub fn new(len: usize) -> Self {
        Self::from_vec(vec![0; len])
    }

    pub fn from_vec(data: Vec<u8>) -> Self {
        ByteBuffer {
            data,
            order: ByteOrder::native(),
            read_only: false,
        }
    }

    /// The same bytes, declared in `order`.
    pub fn with_order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    /// The same bytes, no longer writable through this buffer.
    pub fn as_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    fn check_native(&self) -> Result<()> {
        if self.order == ByteOrder::native() {
            Ok(())
        } else {
            Err(VectorError::format(format!(
                "buffer is {}, vectors need native {}",
                self.order,
                ByteOrder::native()
            )))
        }
    }

    /// The bytes for a lane load.
    pub(crate) fn native_bytes(&self) -> Result<&[u8]> {
        self.check_native()?;
        Ok(&self.data)
    }

    /// The bytes for a lane store.
    pub(crate) fn native_bytes_mut(&mut self) -> Result<&mut [u8]> {
        if self.read_only {
            return Err(VectorError::format("buffer is read-only"));
        }
        self.check_native()?;
        Ok(&mut self.data)
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        ByteBuffer::from_vec(data)
    }
}
