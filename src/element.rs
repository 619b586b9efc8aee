//! # Element kinds
//!
//! The closed set of numeric lane types and the per-lane primitives the scalar
//! executor is built from.
//!
//! Integer arithmetic wraps to match SIMD hardware. Bitwise operations on
//! floating kinds act on the IEEE bit pattern. Shifts act on the bit pattern
//! of every kind, with the amount already reduced modulo the element width.

use core::fmt::{self, Debug, Display};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use once_cell::sync::OnceCell;

use crate::executor::{BinaryOp, CompareOp, LaneExecutor, ShiftOp, TernaryOp, UnaryOp};

bitflags! {
    /// Properties of an element kind.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct KindFlags: u8 {
        const SIGNED = 0b01;
        const FLOATING = 0b10;
    }
}

/// Runtime tag for an element type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl ElementKind {
    pub const ALL: [ElementKind; 10] = [
        ElementKind::I8,
        ElementKind::I16,
        ElementKind::I32,
        ElementKind::I64,
        ElementKind::U8,
        ElementKind::U16,
        ElementKind::U32,
        ElementKind::U64,
        ElementKind::F32,
        ElementKind::F64,
    ];

    /// Width of one lane in bits.
    pub const fn bit_size(self) -> usize {
        match self {
            ElementKind::I8 | ElementKind::U8 => 8,
            ElementKind::I16 | ElementKind::U16 => 16,
            ElementKind::I32 | ElementKind::U32 | ElementKind::F32 => 32,
            ElementKind::I64 | ElementKind::U64 | ElementKind::F64 => 64,
        }
    }

    /// Width of one lane in bytes.
    pub const fn byte_size(self) -> usize {
        self.bit_size() / 8
    }

    pub fn flags(self) -> KindFlags {
        match self {
            ElementKind::I8 | ElementKind::I16 | ElementKind::I32 | ElementKind::I64 => {
                KindFlags::SIGNED
            }
            ElementKind::U8 | ElementKind::U16 | ElementKind::U32 | ElementKind::U64 => {
                KindFlags::empty()
            }
            ElementKind::F32 | ElementKind::F64 => KindFlags::SIGNED | KindFlags::FLOATING,
        }
    }

    pub fn is_floating(self) -> bool {
        self.flags().contains(KindFlags::FLOATING)
    }

    pub fn is_signed(self) -> bool {
        self.flags().contains(KindFlags::SIGNED)
    }

    /// Dense index used by the species table.
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::I8 => "i8",
            ElementKind::I16 => "i16",
            ElementKind::I32 => "i32",
            ElementKind::I64 => "i64",
            ElementKind::U8 => "u8",
            ElementKind::U16 => "u16",
            ElementKind::U32 => "u32",
            ElementKind::U64 => "u64",
            ElementKind::F32 => "f32",
            ElementKind::F64 => "f64",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scalar widened losslessly enough to drive every cast.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Wide {
    Int(i128),
    Float(f64),
}

mod sealed {
    pub trait Sealed {}
}

/// A type that can occupy a vector lane.
///
/// Implemented for `i8..i64`, `u8..u64`, `f32` and `f64` only.
pub trait Element:
    sealed::Sealed + Copy + Default + PartialOrd + Debug + Display + Send + Sync + 'static
{
    const KIND: ElementKind;
    /// Lane width in bits.
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    /// Identity of the min-reduction (type max, `+inf` for floats).
    const MIN_IDENTITY: Self;
    /// Identity of the max-reduction (type min, `-inf` for floats).
    const MAX_IDENTITY: Self;

    /// Bit pattern, zero-extended to 64 bits.
    fn to_raw(self) -> u64;
    /// Builds a lane from the low `BITS` bits of `bits`.
    fn from_raw(bits: u64) -> Self;

    fn to_wide(self) -> Wide;
    /// Converts with Rust `as` semantics: integer narrowing keeps low bits,
    /// float to integer truncates toward zero and saturates, NaN becomes 0.
    fn from_wide(wide: Wide) -> Self;

    fn apply_binary(op: BinaryOp, a: Self, b: Self) -> Self;
    fn apply_unary(op: UnaryOp, a: Self) -> Self;
    fn apply_ternary(op: TernaryOp, a: Self, b: Self, c: Self) -> Self;

    /// The executor slot of this element type, frozen on first use.
    #[doc(hidden)]
    fn executor_slot() -> &'static OnceCell<Box<dyn LaneExecutor<Self>>>;

    /// Lane predicate; IEEE semantics for floats (NaN compares unequal).
    #[inline(always)]
    fn apply_compare(op: CompareOp, a: Self, b: Self) -> bool {
        match op {
            CompareOp::Eq => a == b,
            CompareOp::Ne => a != b,
            CompareOp::Lt => a < b,
            CompareOp::Le => a <= b,
            CompareOp::Gt => a > b,
            CompareOp::Ge => a >= b,
        }
    }

    /// Shifts the bit pattern; `amount` must already be below `BITS`.
    #[inline(always)]
    fn apply_shift(op: ShiftOp, a: Self, amount: u32) -> Self {
        let raw = a.to_raw();
        match op {
            ShiftOp::Left => Self::from_raw(raw << amount),
            ShiftOp::RightLogical => Self::from_raw(raw >> amount),
            ShiftOp::RightArithmetic => {
                let spare = 64 - Self::BITS;
                let signed = ((raw << spare) as i64) >> spare;
                Self::from_raw((signed >> amount) as u64)
            }
        }
    }

    /// All bits set.
    #[inline(always)]
    fn all_ones() -> Self {
        Self::from_raw(u64::MAX)
    }

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        Self::from_raw(self.to_raw() & rhs.to_raw())
    }

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Self::from_raw(self.to_raw() | rhs.to_raw())
    }

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        Self::from_raw(self.to_raw() ^ rhs.to_raw())
    }

    #[inline(always)]
    fn bitnot(self) -> Self {
        Self::from_raw(!self.to_raw())
    }

    /// Converts a lane of another kind with the cast rules.
    #[inline(always)]
    fn cast_from<S: Element>(value: S) -> Self {
        Self::from_wide(value.to_wide())
    }

    /// Writes the lane in native byte order into `out[..BITS / 8]`.
    #[inline(always)]
    fn write_ne(self, out: &mut [u8]) {
        let bytes = self.to_raw().to_ne_bytes();
        let width = (Self::BITS / 8) as usize;
        if cfg!(target_endian = "little") {
            out[..width].copy_from_slice(&bytes[..width]);
        } else {
            out[..width].copy_from_slice(&bytes[8 - width..]);
        }
    }

    /// Reads a lane in native byte order from `bytes[..BITS / 8]`.
    #[inline(always)]
    fn read_ne(bytes: &[u8]) -> Self {
        let width = (Self::BITS / 8) as usize;
        let mut raw = [0u8; 8];
        if cfg!(target_endian = "little") {
            raw[..width].copy_from_slice(&bytes[..width]);
        } else {
            raw[8 - width..].copy_from_slice(&bytes[..width]);
        }
        Self::from_raw(u64::from_ne_bytes(raw))
    }
}

/// Integral lane types; these admit element-bit shifts.
pub trait IntElement: Element {}

/// Floating lane types; these admit division and square root.
pub trait FloatElement: Element {
    fn is_nan(self) -> bool;
}

// Integer arithmetic uses wrapping to match SIMD semantics
macro_rules! impl_element_int {
    ($t:ty, $u:ty, $kind:ident, $abs:expr) => {
        impl sealed::Sealed for $t {}

        impl Element for $t {
            const KIND: ElementKind = ElementKind::$kind;
            const BITS: u32 = <$t>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MIN_IDENTITY: Self = <$t>::MAX;
            const MAX_IDENTITY: Self = <$t>::MIN;

            #[inline(always)]
            fn to_raw(self) -> u64 {
                self as $u as u64
            }

            #[inline(always)]
            fn from_raw(bits: u64) -> Self {
                bits as $u as $t
            }

            #[inline(always)]
            fn to_wide(self) -> Wide {
                Wide::Int(self as i128)
            }

            #[inline(always)]
            fn from_wide(wide: Wide) -> Self {
                match wide {
                    Wide::Int(v) => v as $t,
                    Wide::Float(v) => v as $t,
                }
            }

            #[inline(always)]
            fn apply_binary(op: BinaryOp, a: Self, b: Self) -> Self {
                match op {
                    BinaryOp::Add => a.wrapping_add(b),
                    BinaryOp::Sub => a.wrapping_sub(b),
                    BinaryOp::Mul => a.wrapping_mul(b),
                    // Zero divisors yield zero rather than trapping.
                    BinaryOp::Div => {
                        if b == 0 {
                            0
                        } else {
                            a.wrapping_div(b)
                        }
                    }
                    BinaryOp::Min => a.min(b),
                    BinaryOp::Max => a.max(b),
                    BinaryOp::AddSaturate => a.saturating_add(b),
                    BinaryOp::SubSaturate => a.saturating_sub(b),
                    BinaryOp::And => a & b,
                    BinaryOp::Or => a | b,
                    BinaryOp::Xor => a ^ b,
                }
            }

            #[inline(always)]
            fn apply_unary(op: UnaryOp, a: Self) -> Self {
                match op {
                    UnaryOp::Neg => a.wrapping_neg(),
                    UnaryOp::Abs => ($abs)(a),
                    UnaryOp::Not => !a,
                    UnaryOp::Sqrt => Self::from_wide(Wide::Float((a as f64).sqrt())),
                }
            }

            #[inline(always)]
            fn apply_ternary(op: TernaryOp, a: Self, b: Self, c: Self) -> Self {
                match op {
                    TernaryOp::MulAdd => a.wrapping_mul(b).wrapping_add(c),
                }
            }

            fn executor_slot() -> &'static OnceCell<Box<dyn LaneExecutor<Self>>> {
                static SLOT: OnceCell<Box<dyn LaneExecutor<$t>>> = OnceCell::new();
                &SLOT
            }
        }

        impl IntElement for $t {}
    };
}

macro_rules! impl_element_float {
    ($t:ty, $u:ty, $kind:ident) => {
        impl sealed::Sealed for $t {}

        impl Element for $t {
            const KIND: ElementKind = ElementKind::$kind;
            const BITS: u32 = <$u>::BITS;
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const MIN_IDENTITY: Self = <$t>::INFINITY;
            const MAX_IDENTITY: Self = <$t>::NEG_INFINITY;

            #[inline(always)]
            fn to_raw(self) -> u64 {
                self.to_bits() as u64
            }

            #[inline(always)]
            fn from_raw(bits: u64) -> Self {
                <$t>::from_bits(bits as $u)
            }

            #[inline(always)]
            fn to_wide(self) -> Wide {
                Wide::Float(self as f64)
            }

            #[inline(always)]
            fn from_wide(wide: Wide) -> Self {
                match wide {
                    Wide::Int(v) => v as $t,
                    Wide::Float(v) => v as $t,
                }
            }

            #[inline(always)]
            fn apply_binary(op: BinaryOp, a: Self, b: Self) -> Self {
                match op {
                    BinaryOp::Add | BinaryOp::AddSaturate => a + b,
                    BinaryOp::Sub | BinaryOp::SubSaturate => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => a / b,
                    // NaN propagates; -0.0 orders below +0.0.
                    BinaryOp::Min => {
                        if a.is_nan() || b.is_nan() {
                            <$t>::NAN
                        } else if a == b {
                            <$t>::from_bits(a.to_bits() | b.to_bits())
                        } else if a < b {
                            a
                        } else {
                            b
                        }
                    }
                    BinaryOp::Max => {
                        if a.is_nan() || b.is_nan() {
                            <$t>::NAN
                        } else if a == b {
                            <$t>::from_bits(a.to_bits() & b.to_bits())
                        } else if a > b {
                            a
                        } else {
                            b
                        }
                    }
                    BinaryOp::And => a.bitand(b),
                    BinaryOp::Or => a.bitor(b),
                    BinaryOp::Xor => a.bitxor(b),
                }
            }

            #[inline(always)]
            fn apply_unary(op: UnaryOp, a: Self) -> Self {
                match op {
                    UnaryOp::Neg => -a,
                    UnaryOp::Abs => a.abs(),
                    UnaryOp::Not => a.bitnot(),
                    UnaryOp::Sqrt => a.sqrt(),
                }
            }

            #[inline(always)]
            fn apply_ternary(op: TernaryOp, a: Self, b: Self, c: Self) -> Self {
                match op {
                    TernaryOp::MulAdd => a.mul_add(b, c),
                }
            }

            fn executor_slot() -> &'static OnceCell<Box<dyn LaneExecutor<Self>>> {
                static SLOT: OnceCell<Box<dyn LaneExecutor<$t>>> = OnceCell::new();
                &SLOT
            }
        }

        impl FloatElement for $t {
            #[inline(always)]
            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }
        }
    };
}

// abs(MIN) stays MIN, as on hardware
impl_element_int!(i8, u8, I8, |a: i8| a.wrapping_abs());
impl_element_int!(i16, u16, I16, |a: i16| a.wrapping_abs());
impl_element_int!(i32, u32, I32, |a: i32| a.wrapping_abs());
impl_element_int!(i64, u64, I64, |a: i64| a.wrapping_abs());
impl_element_int!(u8, u8, U8, |a: u8| a);
impl_element_int!(u16, u16, U16, |a: u16| a);
impl_element_int!(u32, u32, U32, |a: u32| a);
impl_element_int!(u64, u64, U64, |a: u64| a);

impl_element_float!(f32, u32, F32);
impl_element_float!(f64, u64, F64);
