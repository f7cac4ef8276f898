use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn premultiply_then_unpremultiply_is_close() {
    let mut px = vec![200u8, 100, 50, 128, 10, 20, 30, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px[..3].iter().zip([200u8, 100, 50]) {
        assert!(got.abs_diff(want) <= 1, "{got} vs {want}");
    }
}

#[test]
fn unit_to_u8_clamps() {
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(unit_to_u8(9.0), 255);
}
