use super::*;

fn reference(px: usize) -> (Vec<u8>, Vec<u8>) {
    ([101u8, 102, 103, 255].repeat(px), [10u8, 217, 100, 123].repeat(px))
}

#[test]
fn reference_pixel_for_every_strategy() {
    for strategy in Strategy::ALL {
        let (mut dst, src) = reference(1);
        blend_in_place(&mut dst, &src, Dimensions::new(1, 1), strategy).unwrap();
        assert_eq!(dst, [56, 156, 101, 255], "{strategy}");
    }
}

#[test]
fn length_mismatch_is_rejected_before_writing() {
    let (mut dst, _) = reference(4);
    let (_, src) = reference(3);
    let before = dst.clone();

    let err = blend_in_place(&mut dst, &src, Dimensions::new(4, 1), Strategy::Scalar).unwrap_err();
    assert!(err.to_string().contains("buffer length mismatch"));
    assert_eq!(dst, before);
}

#[test]
fn partial_pixel_is_rejected() {
    let mut dst = vec![0u8; 10];
    let src = vec![0u8; 10];
    let err = blend_in_place(&mut dst, &src, Dimensions::new(2, 1), Strategy::default()).unwrap_err();
    assert!(err.to_string().contains("length not a multiple of 4"));
}

#[test]
fn dims_must_match_length() {
    let (mut dst, src) = reference(6);
    let before = dst.clone();
    let err = blend_in_place(&mut dst, &src, Dimensions::new(4, 2), Strategy::default()).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("4x2"));
    assert_eq!(dst, before);
}

#[test]
fn empty_buffers_are_a_noop() {
    for strategy in Strategy::ALL {
        let mut dst: Vec<u8> = Vec::new();
        blend_in_place(&mut dst, &[], Dimensions::new(0, 0), strategy).unwrap();
        assert!(dst.is_empty());
    }
}

#[test]
fn strategy_names_are_stable() {
    let names: Vec<_> = Strategy::ALL.iter().map(|s| s.to_string()).collect();
    assert_eq!(names, ["scalar", "batched4", "batched8", "batched16"]);
    assert_eq!(Strategy::default(), Strategy::Batched(LaneWidth::X8));
}

#[test]
fn strategy_serializes_lowercase() {
    let json = serde_json::to_string(&Strategy::ALL).unwrap();
    assert_eq!(
        json,
        r#"["scalar",{"batched":"x4"},{"batched":"x8"},{"batched":"x16"}]"#
    );
    let back: Vec<Strategy> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Strategy::ALL);
}

#[test]
fn strategy_parses_from_names() {
    let parsed: Vec<Strategy> = ["scalar", "batched", "batched4", "batched8", "BATCHED16"]
        .iter()
        .map(|name| name.parse().unwrap())
        .collect();
    assert_eq!(
        parsed,
        [
            Strategy::Scalar,
            Strategy::Batched(LaneWidth::X8),
            Strategy::Batched(LaneWidth::X4),
            Strategy::Batched(LaneWidth::X8),
            Strategy::Batched(LaneWidth::X16),
        ]
    );
    for strategy in Strategy::ALL {
        assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
    }

    let err = "batched32".parse::<Strategy>().unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("unknown strategy 'batched32'"));
}
