//! Mask construction, boolean algebra and conversions.

use anyhow::Result;
use lanewise::{Shape, Species, VectorError};
use test_log::test;

#[test]
fn test_singleton_masks_are_shared() -> Result<()> {
    let s = Species::<u8>::of(Shape::S512)?;
    let a = s.mask_all_true();
    let b = s.mask_all_true();
    assert_eq!(a, b);
    assert_eq!(a.length(), 64);
    assert_eq!(a.true_count(), 64);
    assert_eq!(a.to_bits(), u64::MAX);
    assert!(!s.mask_all_false().any_true());
    Ok(())
}

#[test]
fn test_mask_from_array_offset_and_bounds() -> Result<()> {
    let s = Species::<i32>::of(Shape::S128)?;
    let bits = [false, true, true, false, true, false];
    let m = s.mask_from_array(&bits, 1)?;
    assert_eq!(m.to_array(), vec![true, true, false, true]);
    assert!(matches!(
        s.mask_from_array(&bits, 3),
        Err(VectorError::Bounds { index: 7, len: 6 })
    ));
    Ok(())
}

#[test]
fn test_mask_from_values_wrong_length() -> Result<()> {
    let s = Species::<i32>::of(Shape::S128)?;
    assert!(matches!(
        s.mask_from_values(&[true; 5]),
        Err(VectorError::Construction(_))
    ));
    Ok(())
}

#[test]
fn test_mask_from_bits_ignores_high_bits() -> Result<()> {
    let s = Species::<i64>::of(Shape::S256)?;
    let m = s.mask_from_bits(u64::MAX);
    assert!(m.all_true());
    assert_eq!(m.to_bits(), 0b1111);
    Ok(())
}

#[test]
fn test_get_and_into_array() -> Result<()> {
    let s = Species::<f64>::of(Shape::S256)?;
    let m = s.mask_from_values(&[true, false, false, true])?;
    assert!(m.get(0)?);
    assert!(!m.get(1)?);
    assert!(m.get(4).is_err());

    let mut out = [false; 6];
    m.into_array(&mut out, 2)?;
    assert_eq!(out, [false, false, true, false, false, true]);
    assert!(m.into_array(&mut out, 3).is_err());
    Ok(())
}

#[test]
fn test_to_vector_materializes_all_ones() -> Result<()> {
    let s = Species::<i16>::of(Shape::S64)?;
    let m = s.mask_from_values(&[true, false, true, false])?;
    assert_eq!(m.to_vector().to_array(), vec![-1, 0, -1, 0]);

    let f = Species::<f32>::of(Shape::S64)?;
    let v = f.mask_from_values(&[true, false])?.to_vector();
    assert_eq!(v.get(0)?.to_bits(), u32::MAX);
    assert_eq!(v.get(1)?.to_bits(), 0);
    Ok(())
}

#[test]
fn test_cast_keeps_lanes_when_counts_match() -> Result<()> {
    let src = Species::<i32>::of(Shape::S128)?;
    let dst = Species::<f64>::of(Shape::S256)?;
    let m = src.mask_from_values(&[false, true, true, false])?;
    let c = m.cast(dst)?;
    assert_eq!(c.species(), dst);
    assert_eq!(c.to_array(), m.to_array());

    let wrong = Species::<f64>::of(Shape::S128)?;
    assert!(matches!(
        m.cast(wrong),
        Err(VectorError::SpeciesMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_compare_result_drives_masked_reduce() -> Result<()> {
    let s = Species::<u32>::of(Shape::S256)?;
    let v = s.iota();
    let odd = v.and(&s.broadcast(1))?.eq(&s.broadcast(1))?;
    assert_eq!(odd.first_true(), Some(1));
    assert_eq!(v.add_all_masked(&odd)?, 1 + 3 + 5 + 7);
    assert_eq!(v.add_all_masked(&odd.not())?, 2 + 4 + 6);
    Ok(())
}

#[test]
fn test_debug_format() -> Result<()> {
    let s = Species::<u8>::of(Shape::S64)?;
    let m = s.mask_from_bits(0b1010_0001);
    let text = format!("{:?}", m);
    assert!(text.ends_with("10000101)"), "{}", text);
    Ok(())
}
