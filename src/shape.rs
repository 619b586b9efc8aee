//! # Shapes
//!
//! The physical register widths a vector can occupy. Fixed widths are pure
//! data; `Shape::Max` resolves once to the widest native register of the
//! compile target (or the configured override).

use core::fmt;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{Result, VectorError};

/// A supported physical vector width.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    S64,
    S128,
    S256,
    S512,
    /// The widest native register width of the platform.
    Max,
}

// Native width, picked the same way the backends pick their register type.
#[cfg(all(target_arch = "x86_64", target_feature = "avx512f"))]
const NATIVE_MAX_BITS: usize = 512;

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx2",
    not(target_feature = "avx512f")
))]
const NATIVE_MAX_BITS: usize = 256;

#[cfg(not(all(
    target_arch = "x86_64",
    any(target_feature = "avx2", target_feature = "avx512f")
)))]
const NATIVE_MAX_BITS: usize = 128;

static MAX_BITS: Lazy<usize> = Lazy::new(|| {
    let bits = config::current().max_bit_size.unwrap_or(NATIVE_MAX_BITS);
    debug!(
        "Max shape resolved to {} bits (native {})",
        bits, NATIVE_MAX_BITS
    );
    bits
});

impl Shape {
    /// Every shape, in ascending order of the fixed widths followed by `Max`.
    pub const ALL: [Shape; 5] = [Shape::S64, Shape::S128, Shape::S256, Shape::S512, Shape::Max];

    /// Width of the shape in bits.
    #[inline]
    pub fn bit_size(self) -> usize {
        match self {
            Shape::S64 => 64,
            Shape::S128 => 128,
            Shape::S256 => 256,
            Shape::S512 => 512,
            Shape::Max => *MAX_BITS,
        }
    }

    /// Width of the shape in bytes.
    #[inline]
    pub fn byte_size(self) -> usize {
        self.bit_size() / 8
    }

    /// Maps a bit width onto a fixed shape.
    ///
    /// Only the fixed widths are recognised; the max shape is reached through
    /// `Shape::Max` even when its width coincides with a fixed one.
    pub fn for_bit_size(bits: usize) -> Result<Shape> {
        match bits {
            64 => Ok(Shape::S64),
            128 => Ok(Shape::S128),
            256 => Ok(Shape::S256),
            512 => Ok(Shape::S512),
            _ => Err(VectorError::construction(format!(
                "unsupported vector bit size {}",
                bits
            ))),
        }
    }

    /// Dense index used by the species table.
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Shape::S64 => 0,
            Shape::S128 => 1,
            Shape::S256 => 2,
            Shape::S512 => 3,
            Shape::Max => 4,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Max => write!(f, "Max({})", self.bit_size()),
            _ => write!(f, "S{}", self.bit_size()),
        }
    }
}
