use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SeqviewError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        SeqviewError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SeqviewError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        SeqviewError::window("x")
            .to_string()
            .contains("window error:")
    );
    assert!(
        SeqviewError::scheduler("x")
            .to_string()
            .contains("scheduler error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SeqviewError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_decode());
    assert!(SeqviewError::decode("bad png").is_decode());
}
