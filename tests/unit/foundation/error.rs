use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SourceError::resource_missing(ResourceKind::Image)
            .to_string()
            .contains("resource missing: image")
    );
    assert!(
        SourceError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SourceError::texture("x")
            .to_string()
            .contains("texture error:")
    );
    assert!(SourceError::decode("x").to_string().contains("decode error:"));
}

#[test]
fn metadata_error_preserves_cause() {
    let base = std::io::Error::other("boom");
    let err = SourceError::metadata(MetadataKey::Duration, anyhow::Error::new(base));
    let msg = err.to_string();
    assert!(msg.contains("duration"));
    assert!(msg.contains("boom"));

    let cloned = err.clone();
    assert_eq!(cloned.to_string(), msg);
}
