use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RevealError::malformed("{a:b")
            .to_string()
            .contains("malformed annotation: {a:b")
    );
    assert!(
        RevealError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RevealError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        RevealError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn malformed_kind_is_detectable() {
    assert!(RevealError::malformed("{x}").is_malformed_annotation());
    assert!(!RevealError::validation("x").is_malformed_annotation());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RevealError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
