use super::*;

#[test]
fn reference_pair_uses_fixture_colors() {
    let (dst, src) = reference_pair(Dimensions::new(4, 2)).unwrap();
    assert!(dst.as_pixels().iter().all(|px| *px == REFERENCE_DST));
    assert!(src.as_pixels().iter().all(|px| *px == REFERENCE_SRC));
}

#[test]
fn reference_out_matches_scalar_blend() {
    let (mut dst, src) = reference_pair(Dimensions::new(1, 1)).unwrap();
    dst.blend_from(&src, crate::Strategy::Scalar).unwrap();
    assert_eq!(dst.pixel(0), Some(REFERENCE_OUT));
}

#[test]
fn random_pair_is_deterministic_per_seed() {
    let dims = Dimensions::new(9, 4);
    let a = random_pair(dims, 42).unwrap();
    let b = random_pair(dims, 42).unwrap();
    let c = random_pair(dims, 43).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a.0, a.1);
}

#[test]
fn random_with_alpha_forces_alpha() {
    let buf = random_with_alpha(Dimensions::new(16, 3), 0, 7).unwrap();
    assert!(buf.alpha_channel().all(|a| a == 0));
    assert!(buf.as_pixels().iter().any(|px| px[0] != 0));
}
