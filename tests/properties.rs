//! Algebraic properties that must hold for every species.

use std::thread;

use anyhow::Result;
use lanewise::{ByteBuffer, ByteOrder, Element, Shape, Species, VectorError};
use test_log::test;

fn add_sub_round_trip<E: Element>(shape: Shape) -> Result<()> {
    let s = Species::<E>::of(shape)?;
    let a = s.iota();
    let b = s.broadcast(E::all_ones());
    assert_eq!(a.add(&b)?.sub(&b)?, a, "{}", s);
    Ok(())
}

#[test]
fn test_add_sub_round_trip_integers() -> Result<()> {
    for shape in Shape::ALL {
        add_sub_round_trip::<i8>(shape)?;
        add_sub_round_trip::<i16>(shape)?;
        add_sub_round_trip::<i32>(shape)?;
        add_sub_round_trip::<i64>(shape)?;
        add_sub_round_trip::<u8>(shape)?;
        add_sub_round_trip::<u16>(shape)?;
        add_sub_round_trip::<u32>(shape)?;
        add_sub_round_trip::<u64>(shape)?;
    }
    Ok(())
}

#[test]
fn test_add_sub_round_trip_floats_within_tolerance() -> Result<()> {
    const TOLERANCE: f64 = 1e-12;

    let s = Species::<f64>::of(Shape::S256)?;
    let a = s.from_values(&[0.1, -2.75, 1e3, 3.0e-5])?;
    let b = s.broadcast(0.3);
    let back = a.add(&b)?.sub(&b)?;
    for (x, y) in back.to_array().iter().zip(a.to_array()) {
        assert!((x - y).abs() <= TOLERANCE * y.abs().max(1.0), "{} vs {}", x, y);
    }
    Ok(())
}

#[test]
fn test_double_blend_restores() -> Result<()> {
    let s = Species::<i16>::of(Shape::S128)?;
    let a = s.iota();
    let b = s.broadcast(-100);
    for bits in [0u64, 0b1010_1010, 0xFF, 0b0000_0001] {
        let m = s.mask_from_bits(bits);
        assert_eq!(a.blend(&b, &m)?.blend(&a, &m)?, a);
    }
    Ok(())
}

#[test]
fn test_shuffle_composition() -> Result<()> {
    let s = Species::<i32>::of(Shape::S128)?;
    let s1 = s.shuffle_from_values(&[1, 0, 3, 2])?;
    let s2 = s.shuffle_from_values(&[2, 3, 0, 1])?;
    let v = s.from_values(&[10, 20, 30, 40])?;

    let stepwise = v.rearrange(&s1)?.rearrange(&s2)?;
    let composed = v.rearrange(&s1.rearrange(&s2)?)?;
    assert_eq!(stepwise, composed);
    assert_eq!(stepwise.to_array(), vec![40, 30, 20, 10]);
    Ok(())
}

#[test]
fn test_array_round_trip() -> Result<()> {
    let s = Species::<u32>::of(Shape::S512)?;
    let arr: Vec<u32> = (0..16).map(|i| i * 0x0101_0101).collect();
    let mut out = vec![0; 16];
    s.from_array(&arr, 0)?.into_array(&mut out, 0)?;
    assert_eq!(out, arr);
    Ok(())
}

fn ones_product<E: Element>(shape: Shape) -> Result<usize> {
    let s = Species::<E>::of(shape)?;
    assert_eq!(s.broadcast(E::ONE).mul_all(), E::ONE, "{}", s);
    Ok(s.lane_count())
}

#[test]
fn test_mul_all_of_ones() -> Result<()> {
    let counts = [
        ones_product::<i64>(Shape::S128)?,
        ones_product::<f32>(Shape::S128)?,
        ones_product::<u16>(Shape::S128)?,
        ones_product::<i8>(Shape::S128)?,
        ones_product::<u8>(Shape::S256)?,
        ones_product::<i8>(Shape::S512)?,
    ];
    assert_eq!(counts, [2, 4, 8, 16, 32, 64]);
    Ok(())
}

#[test]
fn test_mask_not_all_true_iff_none_true() -> Result<()> {
    fn check<E: Element>(shape: Shape) -> Result<()> {
        let s = Species::<E>::of(shape)?;
        for m in [s.mask_all_true(), s.mask_all_false()] {
            assert_eq!(m.not().all_true(), !m.any_true(), "{}", s);
        }
        Ok(())
    }
    for shape in Shape::ALL {
        check::<u8>(shape)?;
        check::<i32>(shape)?;
        check::<f64>(shape)?;
    }
    Ok(())
}

#[test]
fn test_lane_count_index_rejected() -> Result<()> {
    let s = Species::<f32>::of(Shape::S256)?;
    let n = s.lane_count();
    assert!(matches!(s.zero().get(n), Err(VectorError::Bounds { .. })));
    let mut indices: Vec<usize> = (0..n).collect();
    indices[0] = n;
    assert!(matches!(
        s.shuffle_from_values(&indices),
        Err(VectorError::Construction(_))
    ));
    Ok(())
}

#[test]
fn test_int_float_int_reinterpret_keeps_extreme_patterns() -> Result<()> {
    let i = Species::<i32>::of(Shape::S128)?;
    let f = Species::<f32>::of(Shape::S128)?;
    for v in [i.zero(), i.broadcast(-1)] {
        assert_eq!(v.reinterpret(f)?.reinterpret(i)?, v);
    }
    let l = Species::<u64>::of(Shape::S256)?;
    let d = Species::<f64>::of(Shape::S256)?;
    for v in [l.zero(), l.broadcast(u64::MAX)] {
        assert_eq!(v.reinterpret(d)?.reinterpret(l)?, v);
    }
    Ok(())
}

#[test]
fn test_masked_store_untouched_slots() -> Result<()> {
    let s = Species::<u8>::of(Shape::S64)?;
    let m = s.mask_from_bits(0b0011_1100);
    let mut out = [0xEEu8; 8];
    s.zero().into_array_masked(&mut out, 0, &m)?;
    assert_eq!(out, [0xEE, 0xEE, 0, 0, 0, 0, 0xEE, 0xEE]);
    Ok(())
}

#[test]
fn test_non_native_buffer_load_fails() -> Result<()> {
    let foreign = match ByteOrder::native() {
        ByteOrder::LittleEndian => ByteOrder::BigEndian,
        ByteOrder::BigEndian => ByteOrder::LittleEndian,
    };
    let buf = ByteBuffer::new(64).with_order(foreign);
    let s = Species::<i16>::of(Shape::S128)?;
    assert!(matches!(s.from_buffer(&buf, 0), Err(VectorError::Format(_))));
    assert!(matches!(
        s.from_buffer_masked(&buf, 0, &s.mask_all_false()),
        Err(VectorError::Format(_))
    ));
    Ok(())
}

#[test]
fn test_concurrent_first_use_yields_one_singleton() -> Result<()> {
    let handles: Vec<_> = (0..16)
        .map(|_| {
            thread::spawn(|| {
                Species::<u16>::of(Shape::S256)
                    .map(|s| s.descriptor() as *const _ as usize)
            })
        })
        .collect();
    let mut addresses = Vec::new();
    for handle in handles {
        let address = handle
            .join()
            .map_err(|_| anyhow::anyhow!("species thread panicked"))??;
        addresses.push(address);
    }
    addresses.dedup();
    assert_eq!(addresses.len(), 1);
    Ok(())
}
