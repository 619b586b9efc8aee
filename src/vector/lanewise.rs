//! Lane-wise arithmetic, bitwise and shift operations.
//!
//! Each operation computes `result[i] = f(self[i], ...)`. The masked form
//! computes `mask[i] ? f(self[i], ...) : self[i]`: unselected lanes pass the
//! left operand through unchanged.

#![allow(clippy::should_implement_trait)]

use super::Vector;
use crate::element::{Element, FloatElement, IntElement};
use crate::error::Result;
use crate::executor::{BinaryOp, ShiftOp, TernaryOp, UnaryOp};
use crate::mask::Mask;

impl<E: Element> Vector<E> {
    pub(crate) fn binary_op(&self, op: BinaryOp, other: &Vector<E>) -> Result<Vector<E>> {
        self.species.check_same(&other.species)?;
        let mut out = vec![E::ZERO; self.length()];
        Self::exec().binary(op, &self.lanes, &other.lanes, &mut out);
        Ok(Self::from_lanes(self.species, out))
    }

    fn binary_op_masked(&self, op: BinaryOp, other: &Vector<E>, mask: &Mask<E>) -> Result<Vector<E>> {
        self.species.check_same(&mask.species())?;
        self.blend(&self.binary_op(op, other)?, mask)
    }

    /// `op` against `value` broadcast to every lane.
    fn scalar_op(&self, op: BinaryOp, value: E) -> Vector<E> {
        let rhs = vec![value; self.length()];
        let mut out = vec![E::ZERO; self.length()];
        Self::exec().binary(op, &self.lanes, &rhs, &mut out);
        Self::from_lanes(self.species, out)
    }

    fn unary_op(&self, op: UnaryOp) -> Vector<E> {
        let mut out = vec![E::ZERO; self.length()];
        Self::exec().unary(op, &self.lanes, &mut out);
        Self::from_lanes(self.species, out)
    }

    fn unary_op_masked(&self, op: UnaryOp, mask: &Mask<E>) -> Result<Vector<E>> {
        self.blend(&self.unary_op(op), mask)
    }

    fn shift_op(&self, op: ShiftOp, amount: i32) -> Vector<E> {
        // Amounts are taken modulo the element width, negatives included.
        let amount = (amount as u32) & (E::BITS - 1);
        let mut out = vec![E::ZERO; self.length()];
        Self::exec().shift(op, &self.lanes, amount, &mut out);
        Self::from_lanes(self.species, out)
    }
}

macro_rules! lanewise_binary {
    ($(($name:ident, $masked:ident, $op:expr, $doc:literal)),* $(,)?) => {
        impl<E: Element> Vector<E> {
            $(
                #[doc = $doc]
                pub fn $name(&self, other: &Vector<E>) -> Result<Vector<E>> {
                    self.binary_op($op, other)
                }

                #[doc = concat!("Masked `", stringify!($name), "`; unselected lanes keep `self`.")]
                pub fn $masked(&self, other: &Vector<E>, mask: &Mask<E>) -> Result<Vector<E>> {
                    self.binary_op_masked($op, other, mask)
                }
            )*
        }
    };
}

lanewise_binary!(
    (add, add_masked, BinaryOp::Add, "Lane-wise addition, wrapping for integers."),
    (sub, sub_masked, BinaryOp::Sub, "Lane-wise subtraction, wrapping for integers."),
    (mul, mul_masked, BinaryOp::Mul, "Lane-wise multiplication, wrapping for integers."),
    (min, min_masked, BinaryOp::Min, "Lane-wise minimum; NaN propagates for floats."),
    (max, max_masked, BinaryOp::Max, "Lane-wise maximum; NaN propagates for floats."),
    (add_saturate, add_saturate_masked, BinaryOp::AddSaturate, "Lane-wise addition clamped to the type range (plain addition for floats)."),
    (sub_saturate, sub_saturate_masked, BinaryOp::SubSaturate, "Lane-wise subtraction clamped to the type range (plain subtraction for floats)."),
    (and, and_masked, BinaryOp::And, "Lane-wise bitwise AND of the bit patterns."),
    (or, or_masked, BinaryOp::Or, "Lane-wise bitwise OR of the bit patterns."),
    (xor, xor_masked, BinaryOp::Xor, "Lane-wise bitwise XOR of the bit patterns."),
);

macro_rules! lanewise_scalar {
    ($(($name:ident, $masked:ident, $op:expr, $base:literal)),* $(,)?) => {
        impl<E: Element> Vector<E> {
            $(
                #[doc = concat!("`", $base, "` with `value` in every lane of the right operand.")]
                pub fn $name(&self, value: E) -> Vector<E> {
                    self.scalar_op($op, value)
                }

                pub fn $masked(&self, value: E, mask: &Mask<E>) -> Result<Vector<E>> {
                    self.blend(&self.scalar_op($op, value), mask)
                }
            )*
        }
    };
}

lanewise_scalar!(
    (add_scalar, add_scalar_masked, BinaryOp::Add, "add"),
    (sub_scalar, sub_scalar_masked, BinaryOp::Sub, "sub"),
    (mul_scalar, mul_scalar_masked, BinaryOp::Mul, "mul"),
    (min_scalar, min_scalar_masked, BinaryOp::Min, "min"),
    (max_scalar, max_scalar_masked, BinaryOp::Max, "max"),
    (and_scalar, and_scalar_masked, BinaryOp::And, "and"),
    (or_scalar, or_scalar_masked, BinaryOp::Or, "or"),
    (xor_scalar, xor_scalar_masked, BinaryOp::Xor, "xor"),
);

impl<E: Element> Vector<E> {
    /// Lane-wise negation, wrapping for integers.
    pub fn neg(&self) -> Vector<E> {
        self.unary_op(UnaryOp::Neg)
    }

    pub fn neg_masked(&self, mask: &Mask<E>) -> Result<Vector<E>> {
        self.unary_op_masked(UnaryOp::Neg, mask)
    }

    /// Lane-wise absolute value; the most negative integer maps to itself.
    pub fn abs(&self) -> Vector<E> {
        self.unary_op(UnaryOp::Abs)
    }

    pub fn abs_masked(&self, mask: &Mask<E>) -> Result<Vector<E>> {
        self.unary_op_masked(UnaryOp::Abs, mask)
    }

    /// Lane-wise bitwise complement.
    pub fn not(&self) -> Vector<E> {
        self.unary_op(UnaryOp::Not)
    }

    pub fn not_masked(&self, mask: &Mask<E>) -> Result<Vector<E>> {
        self.unary_op_masked(UnaryOp::Not, mask)
    }

    /// `self * b + c` per lane; fused for floats, wrapping for integers.
    pub fn fma(&self, b: &Vector<E>, c: &Vector<E>) -> Result<Vector<E>> {
        self.species.check_same(&b.species)?;
        self.species.check_same(&c.species)?;
        let mut out = vec![E::ZERO; self.length()];
        Self::exec().ternary(TernaryOp::MulAdd, &self.lanes, &b.lanes, &c.lanes, &mut out);
        Ok(Self::from_lanes(self.species, out))
    }

    pub fn fma_masked(&self, b: &Vector<E>, c: &Vector<E>, mask: &Mask<E>) -> Result<Vector<E>> {
        self.species.check_same(&mask.species())?;
        self.blend(&self.fma(b, c)?, mask)
    }
}

impl<E: FloatElement> Vector<E> {
    /// Lane-wise IEEE division.
    pub fn div(&self, other: &Vector<E>) -> Result<Vector<E>> {
        self.binary_op(BinaryOp::Div, other)
    }

    pub fn div_masked(&self, other: &Vector<E>, mask: &Mask<E>) -> Result<Vector<E>> {
        self.binary_op_masked(BinaryOp::Div, other, mask)
    }

    /// Lane-wise square root.
    pub fn sqrt(&self) -> Vector<E> {
        self.unary_op(UnaryOp::Sqrt)
    }

    pub fn sqrt_masked(&self, mask: &Mask<E>) -> Result<Vector<E>> {
        self.unary_op_masked(UnaryOp::Sqrt, mask)
    }
}

impl<E: IntElement> Vector<E> {
    /// Shifts every lane left by `amount` modulo the element width.
    pub fn shift_left(&self, amount: i32) -> Vector<E> {
        self.shift_op(ShiftOp::Left, amount)
    }

    pub fn shift_left_masked(&self, amount: i32, mask: &Mask<E>) -> Result<Vector<E>> {
        self.blend(&self.shift_left(amount), mask)
    }

    /// Zero-filling right shift of every lane by `amount` modulo the element
    /// width.
    pub fn shift_right(&self, amount: i32) -> Vector<E> {
        self.shift_op(ShiftOp::RightLogical, amount)
    }

    pub fn shift_right_masked(&self, amount: i32, mask: &Mask<E>) -> Result<Vector<E>> {
        self.blend(&self.shift_right(amount), mask)
    }

    /// Sign-propagating right shift of every lane by `amount` modulo the
    /// element width. The sign is the top bit of the lane, also for unsigned
    /// kinds.
    pub fn shift_right_arithmetic(&self, amount: i32) -> Vector<E> {
        self.shift_op(ShiftOp::RightArithmetic, amount)
    }

    pub fn shift_right_arithmetic_masked(&self, amount: i32, mask: &Mask<E>) -> Result<Vector<E>> {
        self.blend(&self.shift_right_arithmetic(amount), mask)
    }
}
