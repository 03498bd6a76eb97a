use super::*;

#[test]
fn size_validation_rejects_degenerate_axes() {
    assert!(Size::new(4.0, 3.0).is_positive());
    assert!(!Size::new(0.0, 3.0).is_positive());
    assert!(!Size::new(4.0, -1.0).is_positive());
    assert!(!Size::new(f64::NAN, 1.0).is_positive());
    assert!(!Size::new(f64::INFINITY, 1.0).is_positive());

    let err = Size::new(0.0, 10.0).ensure_positive("container").unwrap_err();
    assert!(matches!(err, CrossfadeError::InvalidDimension(_)));
    assert!(err.to_string().contains("container"));
}

#[test]
fn pixel_grid_rounds_and_floors_at_one() {
    assert_eq!(Size::new(399.6, 300.2).to_pixel_grid(), (400, 300));
    assert_eq!(Size::new(0.0, 0.4).to_pixel_grid(), (1, 1));
    assert_eq!(Size::new(f64::NAN, 2.0).to_pixel_grid(), (1, 2));
}

#[test]
fn region_size_ignores_document_offset() {
    let r = Region::new(1000.0, 400.0, 500.0);
    assert_eq!(r.top, 1000.0);
    assert_eq!(r.size(), Size::new(400.0, 500.0));
}
