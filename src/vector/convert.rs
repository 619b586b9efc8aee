//! Conversions between species.
//!
//! - `reshape` changes only the shape, keeping the element kind: lanes are
//!   dropped from the end or zero lanes appended.
//! - `cast` converts lane values to another element kind at an equal lane
//!   count.
//! - `reinterpret` keeps the bits: the source is first reshaped to the target
//!   width, then its bytes (native order) are read back as target lanes.

use super::Vector;
use crate::element::Element;
use crate::error::{Result, VectorError};
use crate::species::Species;

impl<E: Element> Vector<E> {
    /// Same element kind at another shape.
    ///
    /// Lane `i` of the result is lane `i` of `self` where both exist, zero
    /// otherwise.
    pub fn reshape(&self, target: Species<E>) -> Vector<E> {
        Self::from_fn(target, |i| self.lanes.get(i).copied().unwrap_or(E::ZERO))
    }

    /// Converts every lane value to `F`.
    ///
    /// Integer narrowing keeps the low bits, widening extends by the source
    /// signedness, float to integer truncates toward zero and saturates (NaN
    /// becomes zero), conversions to float round to nearest. Lane counts must
    /// match; reshape first otherwise.
    pub fn cast<F: Element>(&self, target: Species<F>) -> Result<Vector<F>> {
        if target.lane_count() != self.length() {
            return Err(VectorError::UnsupportedConversion {
                from: self.species.to_string(),
                to: target.to_string(),
            });
        }
        let lanes = self.lanes.iter().map(|&x| F::cast_from(x)).collect();
        Ok(Vector::from_lanes(target, lanes))
    }

    /// The same bits viewed as lanes of `target`.
    ///
    /// Lane count scales with the element size ratio. A narrower target
    /// truncates the trailing bits; a wider one is zero-filled.
    pub fn reinterpret<F: Element>(&self, target: Species<F>) -> Result<Vector<F>> {
        let resized = self.reshape(Species::<E>::of(target.shape())?);
        let mut bytes = vec![0u8; target.byte_size()];
        let width = E::KIND.byte_size();
        for (chunk, &lane) in bytes.chunks_exact_mut(width).zip(resized.lanes.iter()) {
            lane.write_ne(chunk);
        }
        let width = F::KIND.byte_size();
        let lanes = bytes.chunks_exact(width).map(F::read_ne).collect();
        Ok(Vector::from_lanes(target, lanes))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::VectorError;
    use crate::shape::Shape;
    use crate::species::Species;

    #[test]
    fn test_reshape_widens_and_truncates() {
        let s64 = Species::<i16>::of(Shape::S64).unwrap();
        let s128 = Species::<i16>::of(Shape::S128).unwrap();
        let v = s64.from_values(&[1, 2, 3, 4]).unwrap();
        let wide = v.reshape(s128);
        assert_eq!(wide.to_array(), vec![1, 2, 3, 4, 0, 0, 0, 0]);
        assert_eq!(wide.reshape(s64), v);
    }

    #[test]
    fn test_cast_rules() {
        let f = Species::<f32>::of(Shape::S128).unwrap();
        let i = Species::<i32>::of(Shape::S128).unwrap();
        let v = f.from_values(&[-1.9, 3e10, f32::NAN, 2.5]).unwrap();
        assert_eq!(v.cast(i).unwrap().to_array(), vec![-1, i32::MAX, 0, 2]);

        let b = Species::<i8>::of(Shape::S64).unwrap();
        let wide = Species::<i64>::of(Shape::S512).unwrap();
        let v = b.broadcast(-3);
        assert!(v.cast(wide).unwrap().to_array().iter().all(|&x| x == -3));
        let u = Species::<u64>::of(Shape::S512).unwrap();
        let v = Species::<u8>::of(Shape::S64).unwrap().broadcast(0xFD);
        assert!(v.cast(u).unwrap().to_array().iter().all(|&x| x == 0xFD));
    }

    #[test]
    fn test_cast_requires_equal_lane_counts() {
        let a = Species::<i32>::of(Shape::S128).unwrap().zero();
        let target = Species::<i64>::of(Shape::S128).unwrap();
        assert!(matches!(
            a.cast(target),
            Err(VectorError::UnsupportedConversion { .. })
        ));
    }

    #[test]
    fn test_reinterpret_same_width() {
        let i = Species::<i32>::of(Shape::S128).unwrap();
        let f = Species::<f32>::of(Shape::S128).unwrap();
        let v = i.broadcast(0x3F80_0000);
        assert!(v.reinterpret(f).unwrap().to_array().iter().all(|&x| x == 1.0));
    }

    #[test]
    fn test_reinterpret_across_shapes() {
        let bytes = Species::<u8>::of(Shape::S64).unwrap();
        let wide = Species::<u16>::of(Shape::S128).unwrap();
        let v = bytes.from_values(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let r = v.reinterpret(wide).unwrap();
        assert_eq!(r.length(), 8);
        assert_eq!(&r.to_array()[4..], &[0, 0, 0, 0]);
        let first = u16::from_ne_bytes([1, 2]);
        assert_eq!(r.get(0).unwrap(), first);

        let narrow = Species::<u32>::of(Shape::S64).unwrap();
        let r = v.reinterpret(narrow).unwrap();
        assert_eq!(r.get(1).unwrap(), u32::from_ne_bytes([5, 6, 7, 8]));
    }
}
