use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BlendError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BlendError::image("x").to_string().contains("image error:"));
}

#[test]
fn is_validation_only_matches_validation() {
    assert!(BlendError::validation("x").is_validation());
    assert!(!BlendError::image("x").is_validation());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BlendError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
