//! Error type for every fallible vector operation.
//!
//! Validation always runs before any lane is touched, so an `Err` never comes
//! with a partially built result.

use thiserror::Error;

/// Errors raised by species, vector, mask and shuffle operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    /// Invalid shape/element pairing, wrong-length lane arrays, out-of-range
    /// shuffle indices, or a late executor install.
    #[error("construction failed: {0}")]
    Construction(String),
    /// Lane index or memory offset outside the valid range.
    #[error("index {index} out of bounds for length {len}")]
    Bounds { index: usize, len: usize },
    /// Operands belong to different species.
    #[error("species mismatch: expected {expected}, found {found}")]
    SpeciesMismatch { expected: String, found: String },
    /// Conversion that needs an explicit reshape first.
    #[error("unsupported conversion from {from} to {to}")]
    UnsupportedConversion { from: String, to: String },
    /// Byte order or access-mode violation on a byte buffer.
    #[error("buffer format error: {0}")]
    Format(String),
}

impl VectorError {
    pub(crate) fn construction(msg: impl Into<String>) -> Self {
        VectorError::Construction(msg.into())
    }

    pub(crate) fn bounds(index: usize, len: usize) -> Self {
        VectorError::Bounds { index, len }
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        VectorError::Format(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, VectorError>;
