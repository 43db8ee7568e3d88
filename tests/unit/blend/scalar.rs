use super::*;

#[test]
fn blend_pixel_keeps_destination_alpha() {
    let mut dst = [101, 102, 103, 17];
    blend_pixel(&mut dst, &[10, 217, 100, 123]);
    assert_eq!(dst, [56, 156, 101, 17]);
}

#[test]
fn opaque_source_encodes_shift_approximation() {
    let mut dst = [[0, 0, 0, 255]; 2];
    ScalarKernel.blend_pixels(&mut dst, &[[217, 255, 1, 255], [0, 128, 254, 255]]);
    assert_eq!(dst, [[216, 254, 0, 255], [0, 127, 253, 255]]);
}

#[test]
fn transparent_source_trails_destination_by_one() {
    let mut dst = [[0, 1, 200, 255]];
    ScalarKernel.blend_pixels(&mut dst, &[[255, 255, 255, 0]]);
    assert_eq!(dst, [[0, 0, 199, 255]]);
}

#[test]
fn visits_every_pixel() {
    let mut dst = vec![[101, 102, 103, 255]; 13];
    let src = vec![[10, 217, 100, 123]; 13];
    ScalarKernel.blend_pixels(&mut dst, &src);
    assert!(dst.iter().all(|px| *px == [56, 156, 101, 255]));
}
