//! Horizontal reductions.
//!
//! A reduction folds all lanes left to right from the operation's identity.
//! The masked form replaces unselected lanes by the identity first, so an
//! all-false mask yields the identity itself.

use super::Vector;
use crate::element::Element;
use crate::error::Result;
use crate::executor::ReduceOp;
use crate::mask::Mask;

impl<E: Element> Vector<E> {
    pub fn reduce(&self, op: ReduceOp) -> E {
        Self::exec().reduce(op, &self.lanes)
    }

    pub fn reduce_masked(&self, op: ReduceOp, mask: &Mask<E>) -> Result<E> {
        self.species.check_same(&mask.species())?;
        let identity = op.identity::<E>();
        let lanes: Vec<E> = self
            .lanes
            .iter()
            .enumerate()
            .map(|(i, &x)| if mask.lane(i) { x } else { identity })
            .collect();
        Ok(Self::exec().reduce(op, &lanes))
    }

    /// Sum of all lanes, wrapping for integers.
    pub fn add_all(&self) -> E {
        self.reduce(ReduceOp::Add)
    }

    pub fn add_all_masked(&self, mask: &Mask<E>) -> Result<E> {
        self.reduce_masked(ReduceOp::Add, mask)
    }

    /// `0 - x0 - x1 - ...`, wrapping for integers.
    pub fn sub_all(&self) -> E {
        self.reduce(ReduceOp::Sub)
    }

    pub fn sub_all_masked(&self, mask: &Mask<E>) -> Result<E> {
        self.reduce_masked(ReduceOp::Sub, mask)
    }

    /// Product of all lanes, wrapping for integers.
    pub fn mul_all(&self) -> E {
        self.reduce(ReduceOp::Mul)
    }

    pub fn mul_all_masked(&self, mask: &Mask<E>) -> Result<E> {
        self.reduce_masked(ReduceOp::Mul, mask)
    }

    pub fn min_all(&self) -> E {
        self.reduce(ReduceOp::Min)
    }

    pub fn min_all_masked(&self, mask: &Mask<E>) -> Result<E> {
        self.reduce_masked(ReduceOp::Min, mask)
    }

    pub fn max_all(&self) -> E {
        self.reduce(ReduceOp::Max)
    }

    pub fn max_all_masked(&self, mask: &Mask<E>) -> Result<E> {
        self.reduce_masked(ReduceOp::Max, mask)
    }

    pub fn and_all(&self) -> E {
        self.reduce(ReduceOp::And)
    }

    pub fn and_all_masked(&self, mask: &Mask<E>) -> Result<E> {
        self.reduce_masked(ReduceOp::And, mask)
    }

    pub fn or_all(&self) -> E {
        self.reduce(ReduceOp::Or)
    }

    pub fn or_all_masked(&self, mask: &Mask<E>) -> Result<E> {
        self.reduce_masked(ReduceOp::Or, mask)
    }

    pub fn xor_all(&self) -> E {
        self.reduce(ReduceOp::Xor)
    }

    pub fn xor_all_masked(&self, mask: &Mask<E>) -> Result<E> {
        self.reduce_masked(ReduceOp::Xor, mask)
    }
}
