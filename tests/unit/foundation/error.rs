use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CrossfadeError::missing_source("x")
            .to_string()
            .contains("missing source:")
    );
    assert!(
        CrossfadeError::invalid_dimension("x")
            .to_string()
            .contains("invalid dimension:")
    );
    assert!(
        CrossfadeError::invalid_configuration("x")
            .to_string()
            .contains("invalid configuration:")
    );
    assert!(
        CrossfadeError::load_failure("x")
            .to_string()
            .contains("load failure:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CrossfadeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn construction_errors_are_classified() {
    assert!(CrossfadeError::missing_source("end").is_construction_error());
    assert!(CrossfadeError::invalid_configuration("distance").is_construction_error());
    assert!(!CrossfadeError::invalid_dimension("w").is_construction_error());
    assert!(!CrossfadeError::load_failure("timeout").is_construction_error());
}
