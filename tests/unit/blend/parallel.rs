use super::*;
use crate::blend::blend_in_place;

fn striped(dims: Dimensions) -> (Vec<u8>, Vec<u8>) {
    let n = dims.byte_len().unwrap();
    let dst = (0..n).map(|i| (i * 7 % 251) as u8).collect();
    let src = (0..n).map(|i| (i * 13 % 253) as u8).collect();
    (dst, src)
}

#[test]
fn zero_threads_is_rejected() {
    let err = ParallelBlender::new(ParallelOpts {
        threads: Some(0),
        rows_per_band: 8,
    })
    .err()
    .unwrap();
    assert!(err.is_validation());
}

#[test]
fn zero_rows_per_band_is_treated_as_one() {
    let blender = ParallelBlender::new(ParallelOpts {
        threads: Some(2),
        rows_per_band: 0,
    })
    .unwrap();
    assert_eq!(blender.rows_per_band(), 1);
    assert_eq!(blender.threads(), 2);
}

#[test]
fn matches_sequential_for_every_strategy() {
    let dims = Dimensions::new(37, 23);
    let blender = ParallelBlender::new(ParallelOpts {
        threads: Some(3),
        rows_per_band: 5,
    })
    .unwrap();

    for strategy in Strategy::ALL {
        let (mut expected, src) = striped(dims);
        blend_in_place(&mut expected, &src, dims, Strategy::Scalar).unwrap();

        let (mut actual, _) = striped(dims);
        blender
            .blend_in_place(&mut actual, &src, dims, strategy)
            .unwrap();
        assert_eq!(actual, expected, "{strategy}");
    }
}

#[test]
fn validates_before_spawning_work() {
    let dims = Dimensions::new(4, 4);
    let (mut dst, src) = striped(dims);
    let before = dst.clone();

    let err = blend_parallel(
        &mut dst,
        &src[..src.len() - 4],
        dims,
        Strategy::default(),
        ParallelOpts::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("buffer length mismatch"));
    assert_eq!(dst, before);
}

#[test]
fn empty_buffer_is_a_noop() {
    let mut dst: Vec<u8> = Vec::new();
    blend_parallel(
        &mut dst,
        &[],
        Dimensions::new(0, 5),
        Strategy::Scalar,
        ParallelOpts::default(),
    )
    .unwrap();
}
