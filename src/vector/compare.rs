//! Lane predicates. Each comparison produces a mask of the same species.

#![allow(clippy::should_implement_trait)]

use super::Vector;
use crate::element::Element;
use crate::error::Result;
use crate::executor::CompareOp;
use crate::mask::Mask;

impl<E: Element> Vector<E> {
    /// Applies `op` lane by lane; for floats any comparison against NaN is
    /// false except `ne`.
    pub fn compare(&self, op: CompareOp, other: &Vector<E>) -> Result<Mask<E>> {
        self.species.check_same(&other.species)?;
        let mut bits = vec![false; self.length()];
        Self::exec().compare(op, &self.lanes, &other.lanes, &mut bits);
        Ok(Mask::from_bools(self.species, &bits))
    }

    /// Compares every lane against `value`.
    pub fn compare_scalar(&self, op: CompareOp, value: E) -> Mask<E> {
        let rhs = vec![value; self.length()];
        let mut bits = vec![false; self.length()];
        Self::exec().compare(op, &self.lanes, &rhs, &mut bits);
        Mask::from_bools(self.species, &bits)
    }

    pub fn eq_scalar(&self, value: E) -> Mask<E> {
        self.compare_scalar(CompareOp::Eq, value)
    }

    pub fn ne_scalar(&self, value: E) -> Mask<E> {
        self.compare_scalar(CompareOp::Ne, value)
    }

    pub fn lt_scalar(&self, value: E) -> Mask<E> {
        self.compare_scalar(CompareOp::Lt, value)
    }

    pub fn le_scalar(&self, value: E) -> Mask<E> {
        self.compare_scalar(CompareOp::Le, value)
    }

    pub fn gt_scalar(&self, value: E) -> Mask<E> {
        self.compare_scalar(CompareOp::Gt, value)
    }

    pub fn ge_scalar(&self, value: E) -> Mask<E> {
        self.compare_scalar(CompareOp::Ge, value)
    }

    pub(crate) fn eq_lanes(&self, other: &Vector<E>) -> Result<Mask<E>> {
        self.compare(CompareOp::Eq, other)
    }

    pub fn eq(&self, other: &Vector<E>) -> Result<Mask<E>> {
        self.compare(CompareOp::Eq, other)
    }

    pub fn ne(&self, other: &Vector<E>) -> Result<Mask<E>> {
        self.compare(CompareOp::Ne, other)
    }

    pub fn lt(&self, other: &Vector<E>) -> Result<Mask<E>> {
        self.compare(CompareOp::Lt, other)
    }

    pub fn le(&self, other: &Vector<E>) -> Result<Mask<E>> {
        self.compare(CompareOp::Le, other)
    }

    pub fn gt(&self, other: &Vector<E>) -> Result<Mask<E>> {
        self.compare(CompareOp::Gt, other)
    }

    pub fn ge(&self, other: &Vector<E>) -> Result<Mask<E>> {
        self.compare(CompareOp::Ge, other)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::VectorError;
    use crate::executor::CompareOp;
    use crate::shape::Shape;
    use crate::species::Species;

    #[test]
    fn test_ordering_predicates() {
        let s = Species::<i32>::of(Shape::S128).unwrap();
        let a = s.from_values(&[1, 5, 3, -2]).unwrap();
        let b = s.broadcast(3);
        assert_eq!(a.lt(&b).unwrap().to_array(), vec![true, false, false, true]);
        assert_eq!(a.le(&b).unwrap().to_array(), vec![true, false, true, true]);
        assert_eq!(a.gt(&b).unwrap().to_array(), vec![false, true, false, false]);
        assert_eq!(a.ge(&b).unwrap().to_array(), vec![false, true, true, false]);
        assert_eq!(a.eq(&b).unwrap().to_array(), vec![false, false, true, false]);
        assert_eq!(a.ne(&b).unwrap().to_array(), vec![true, true, false, true]);
    }

    #[test]
    fn test_scalar_predicates() {
        let s = Species::<i32>::of(Shape::S128).unwrap();
        let a = s.from_values(&[1, 5, 3, -2]).unwrap();
        for op in [CompareOp::Eq, CompareOp::Ne, CompareOp::Lt, CompareOp::Ge] {
            assert_eq!(
                a.compare_scalar(op, 3).to_array(),
                a.compare(op, &s.broadcast(3)).unwrap().to_array()
            );
        }
        assert_eq!(a.le_scalar(1).to_array(), vec![true, false, false, true]);
        assert_eq!(a.gt_scalar(-2).true_count(), 3);
        assert!(a.eq_scalar(0).not().all_true());
        assert_eq!(a.ne_scalar(5).first_true(), Some(0));
        assert!(!a.lt_scalar(-2).any_true());
        assert!(a.ge_scalar(-2).all_true());
    }

    #[test]
    fn test_unsigned_ordering() {
        let s = Species::<u8>::of(Shape::S64).unwrap();
        let a = s.broadcast(200);
        let b = s.broadcast(100);
        assert!(a.gt(&b).unwrap().all_true());
    }

    #[test]
    fn test_nan_lanes() {
        let s = Species::<f64>::of(Shape::S128).unwrap();
        let a = s.from_values(&[f64::NAN, 1.0]).unwrap();
        assert_eq!(a.eq(&a).unwrap().to_array(), vec![false, true]);
        assert_eq!(a.ne(&a).unwrap().to_array(), vec![true, false]);
        assert_eq!(a.ge(&a).unwrap().to_array(), vec![false, true]);
    }

    #[test]
    fn test_mismatch() {
        let a = Species::<i64>::of(Shape::S128).unwrap().zero();
        let b = Species::<i64>::of(Shape::S256).unwrap().zero();
        assert!(matches!(a.lt(&b), Err(VectorError::SpeciesMismatch { .. })));
    }
}
