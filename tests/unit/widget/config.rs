use super::*;
use crate::geometry::anchor::Anchor;

#[test]
fn defaults_apply_when_only_sources_given() {
    let cfg = CrossfadeConfig::from_json(r#"{"start":"a.png","end":"b.png"}"#).unwrap();
    let r = cfg.resolve().unwrap();
    assert_eq!(r.start, "a.png");
    assert_eq!(r.end, "b.png");
    assert_eq!(r.anchor, PositionalAnchor::default());
    assert_eq!(r.distance, 0.5);
    assert!(!r.debug);
    assert_eq!(r.load_timeout, Some(DEFAULT_LOAD_TIMEOUT));
}

#[test]
fn legacy_option_names_are_aliases() {
    let cfg = CrossfadeConfig::from_json(
        r#"{"image":"a.png","imageBlurred":"b.png","threshold":0.2,
            "backgroundPosition":"top left","debug":true,"loadTimeoutMs":0,"extra":1}"#,
    )
    .unwrap();
    let r = cfg.resolve().unwrap();
    assert_eq!((r.start.as_str(), r.end.as_str()), ("a.png", "b.png"));
    assert_eq!(r.distance, 0.2);
    assert_eq!(r.anchor, PositionalAnchor::new(Anchor::Start, Anchor::Start));
    assert!(r.debug);
    assert_eq!(r.load_timeout, None);
}

#[test]
fn missing_either_source_is_missing_source() {
    for json in [
        r#"{"start":"a.png"}"#,
        r#"{"end":"b.png"}"#,
        r#"{"start":"a.png","end":"   "}"#,
        r#"{}"#,
    ] {
        let err = CrossfadeConfig::from_json(json).unwrap().resolve().unwrap_err();
        assert!(matches!(err, CrossfadeError::MissingSource(_)), "{json}");
    }
}

#[test]
fn non_positive_distance_is_invalid_configuration() {
    for d in [0.0, -1.0, f64::NAN] {
        let cfg = CrossfadeConfig {
            start: Some("a".into()),
            end: Some("b".into()),
            distance: Some(d),
            ..CrossfadeConfig::default()
        };
        assert!(matches!(
            cfg.resolve(),
            Err(CrossfadeError::InvalidConfiguration(_))
        ));
    }
}

#[test]
fn malformed_json_is_invalid_configuration() {
    assert!(matches!(
        CrossfadeConfig::from_json("{"),
        Err(CrossfadeError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        CrossfadeConfig::from_json(r#"{"threshold":"lots"}"#),
        Err(CrossfadeError::InvalidConfiguration(_))
    ));
}

#[test]
fn data_attributes_are_read_and_options_win() {
    let attrs = CrossfadeConfig::from_data_attributes([
        ("data-crossfade-start", "attr-a.png"),
        ("Data-Crossfade-End", " attr-b.png "),
        ("data-crossfade-threshold", "0.8"),
        ("data-crossfade-debug", ""),
        ("class", "hero"),
    ])
    .unwrap();
    assert_eq!(attrs.end.as_deref(), Some("attr-b.png"));
    assert_eq!(attrs.debug, Some(true));

    let options = CrossfadeConfig {
        start: Some("opt-a.png".into()),
        background_position: Some("right bottom".into()),
        ..CrossfadeConfig::default()
    };
    let r = CrossfadeConfig::merge_defaults(options, attrs).resolve().unwrap();
    assert_eq!(r.start, "opt-a.png");
    assert_eq!(r.end, "attr-b.png");
    assert_eq!(r.distance, 0.8);
    assert_eq!(r.anchor, PositionalAnchor::new(Anchor::End, Anchor::End));
    assert!(r.debug);
}

#[test]
fn older_image_attributes_are_recognized() {
    let cfg =
        CrossfadeConfig::from_data_attributes([("image-start", "s.jpg"), ("image-end", "e.jpg")])
            .unwrap();
    let r = cfg.resolve().unwrap();
    assert_eq!((r.start.as_str(), r.end.as_str()), ("s.jpg", "e.jpg"));
}

#[test]
fn bad_attribute_values_are_rejected() {
    assert!(CrossfadeConfig::from_data_attributes([("data-crossfade-threshold", "x")]).is_err());
    assert!(CrossfadeConfig::from_data_attributes([("data-crossfade-debug", "maybe")]).is_err());
    assert!(
        CrossfadeConfig::from_data_attributes([("data-crossfade-load-timeout-ms", "-4")]).is_err()
    );
}
