use super::*;

#[test]
fn byte_len_is_four_bytes_per_pixel() {
    let d = Dimensions::new(1920, 1200);
    assert_eq!(d.pixel_count().unwrap(), 2_304_000);
    assert_eq!(d.byte_len().unwrap(), 9_216_000);
    assert_eq!(d.row_bytes(), 7680);
}

#[test]
fn zero_sized_dimensions_are_empty() {
    assert!(Dimensions::new(0, 10).is_empty());
    assert!(Dimensions::new(10, 0).is_empty());
    assert!(!Dimensions::new(1, 1).is_empty());
    assert_eq!(Dimensions::new(0, 10).byte_len().unwrap(), 0);
}

#[test]
fn display_is_width_by_height() {
    assert_eq!(Dimensions::new(7, 3).to_string(), "7x3");
}

#[test]
fn overflowing_dimensions_are_rejected() {
    let err = Dimensions::new(u32::MAX, u32::MAX).byte_len().unwrap_err();
    assert!(err.is_validation());
}
