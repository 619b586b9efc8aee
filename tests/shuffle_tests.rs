//! Shuffle validation, composition and lane permutation.

use anyhow::Result;
use lanewise::{Shape, Species, VectorError};
use test_log::test;

#[test]
fn test_shuffle_validation() -> Result<()> {
    let s = Species::<u16>::of(Shape::S64)?;
    assert!(s.shuffle_from_values(&[0, 1, 2, 3]).is_ok());
    assert!(matches!(
        s.shuffle_from_values(&[0, 1, 2, 4]),
        Err(VectorError::Construction(_))
    ));
    assert!(matches!(
        s.shuffle_from_values(&[0, 1, 2]),
        Err(VectorError::Construction(_))
    ));
    assert!(matches!(
        s.shuffle_from_fn(|i| i + 1),
        Err(VectorError::Construction(_))
    ));
    Ok(())
}

#[test]
fn test_shuffle_from_array_offset() -> Result<()> {
    let s = Species::<u16>::of(Shape::S64)?;
    let sh = s.shuffle_from_array(&[9, 3, 2, 1, 0], 1)?;
    assert_eq!(sh.to_array(), vec![3, 2, 1, 0]);
    assert!(matches!(
        s.shuffle_from_array(&[3, 2, 1, 0], 1),
        Err(VectorError::Bounds { .. })
    ));
    Ok(())
}

#[test]
fn test_broadcast_shuffle() -> Result<()> {
    let s = Species::<f32>::of(Shape::S128)?;
    let v = s.from_values(&[1.0, 2.0, 3.0, 4.0])?;
    let splat2 = s.shuffle_from_fn(|_| 2)?;
    assert_eq!(v.rearrange(&splat2)?, s.broadcast(3.0));
    Ok(())
}

#[test]
fn test_identity_is_neutral() -> Result<()> {
    let s = Species::<i8>::of(Shape::S128)?;
    let v = s.iota();
    let id = s.shuffle_iota();
    assert_eq!(v.rearrange(&id)?, v);
    let rev = s.shuffle_from_fn(|i| 15 - i)?;
    assert_eq!(rev.rearrange(&id)?, rev);
    assert_eq!(id.rearrange(&rev)?, rev);
    Ok(())
}

#[test]
fn test_shuffle_round_trips_through_vector() -> Result<()> {
    let s = Species::<i32>::of(Shape::S256)?;
    let sh = s.shuffle_from_values(&[7, 0, 6, 1, 5, 2, 4, 3])?;
    assert_eq!(sh.to_vector().to_shuffle()?, sh);
    Ok(())
}

#[test]
fn test_cast_to_other_species() -> Result<()> {
    let s = Species::<i32>::of(Shape::S128)?;
    let sh = s.shuffle_from_values(&[1, 2, 3, 0])?;
    let bytes = Species::<u8>::of(Shape::S64)?;
    assert!(matches!(
        sh.cast(bytes),
        Err(VectorError::SpeciesMismatch { .. })
    ));
    let shorts = Species::<i16>::of(Shape::S64)?;
    let cast = sh.cast(shorts)?;
    let v = shorts.from_values(&[10, 20, 30, 40])?;
    assert_eq!(v.rearrange(&cast)?.to_array(), vec![20, 30, 40, 10]);
    Ok(())
}

#[test]
fn test_rearrange_rejects_foreign_shuffle() -> Result<()> {
    let v = Species::<i32>::of(Shape::S128)?.iota();
    let other = Species::<i32>::of(Shape::S256)?.shuffle_iota();
    assert!(matches!(
        v.rearrange(&other),
        Err(VectorError::SpeciesMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_rotate_matches_equivalent_shuffle() -> Result<()> {
    let small = Species::<i32>::of(Shape::S128)?.from_values(&[10, 20, 30, 40])?;
    assert_eq!(small.rotate_lanes_left(1).to_array(), vec![40, 10, 20, 30]);
    assert_eq!(small.rotate_lanes_right(1).to_array(), vec![20, 30, 40, 10]);

    let s = Species::<u64>::of(Shape::S512)?;
    let v = s.iota();
    for k in 0..12 {
        let left = s.shuffle_from_fn(|i| (i + 8 - k % 8) % 8)?;
        assert_eq!(v.rotate_lanes_left(k), v.rearrange(&left)?);
        let right = s.shuffle_from_fn(|i| (i + k) % 8)?;
        assert_eq!(v.rotate_lanes_right(k), v.rearrange(&right)?);
    }
    Ok(())
}
