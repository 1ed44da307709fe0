use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ReelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        StoreError::unavailable("x")
            .to_string()
            .contains("store unavailable:")
    );
    assert!(
        StoreError::read("x")
            .to_string()
            .contains("store read failure:")
    );
    assert!(
        StoreError::write("x")
            .to_string()
            .contains("store write failure:")
    );
}

#[test]
fn store_errors_pass_through_transparently() {
    let err = ReelError::from(StoreError::unavailable("quota exceeded"));
    assert_eq!(err.to_string(), "store unavailable: quota exceeded");
    assert!(matches!(err, ReelError::Store(StoreError::Unavailable(_))));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
