//! Scalar fallback executor (one lane at a time, no SIMD).
//!
//! Always available and used for correctness checks of accelerated
//! executors.

use super::{BinaryOp, CompareOp, LaneExecutor, ReduceOp, ShiftOp, TernaryOp, UnaryOp};
use crate::element::Element;

/// Portable executor built on the per-lane primitives of [`Element`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ScalarExecutor;

impl<E: Element> LaneExecutor<E> for ScalarExecutor {
    fn name(&self) -> &'static str {
        "scalar"
    }

    #[inline]
    fn binary(&self, op: BinaryOp, a: &[E], b: &[E], out: &mut [E]) {
        for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
            *o = E::apply_binary(op, x, y);
        }
    }

    #[inline]
    fn unary(&self, op: UnaryOp, a: &[E], out: &mut [E]) {
        for (o, &x) in out.iter_mut().zip(a) {
            *o = E::apply_unary(op, x);
        }
    }

    #[inline]
    fn ternary(&self, op: TernaryOp, a: &[E], b: &[E], c: &[E], out: &mut [E]) {
        for (((o, &x), &y), &z) in out.iter_mut().zip(a).zip(b).zip(c) {
            *o = E::apply_ternary(op, x, y, z);
        }
    }

    #[inline]
    fn shift(&self, op: ShiftOp, a: &[E], amount: u32, out: &mut [E]) {
        for (o, &x) in out.iter_mut().zip(a) {
            *o = E::apply_shift(op, x, amount);
        }
    }

    #[inline]
    fn compare(&self, op: CompareOp, a: &[E], b: &[E], out: &mut [bool]) {
        for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
            *o = E::apply_compare(op, x, y);
        }
    }

    #[inline]
    fn reduce(&self, op: ReduceOp, lanes: &[E]) -> E {
        let combine = op.combiner();
        lanes
            .iter()
            .fold(op.identity::<E>(), |acc, &x| E::apply_binary(combine, acc, x))
    }
}
