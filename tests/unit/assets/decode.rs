use std::io::Cursor;

use super::*;

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let prepared = decode_image(&buf).unwrap();
    assert_eq!(prepared.width(), 1);
    assert_eq!(prepared.height(), 1);
    assert_eq!(
        prepared.premul_bytes(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_garbage_fails_with_context() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, CrossfadeError::Other(_)));
    assert!(format!("{err:#}").contains("decode image"));
}

#[test]
fn resource_rejects_bad_buffers() {
    assert!(matches!(
        ImageResource::from_premul_rgba8(0, 4, vec![]),
        Err(CrossfadeError::InvalidDimension(_))
    ));
    assert!(matches!(
        ImageResource::from_premul_rgba8(2, 2, vec![0; 15]),
        Err(CrossfadeError::InvalidDimension(_))
    ));
}

#[test]
fn undersized_buffer_never_becomes_a_drawable_image() {
    // A 4x4 image needs 64 bytes; a single pixel's worth must not get through.
    let err = ImageResource::from_premul_rgba8(4, 4, vec![255; 4]).unwrap_err();
    assert!(matches!(err, CrossfadeError::InvalidDimension(_)));
    assert!(err.to_string().contains("expected 64"));
}

#[test]
fn oversized_dimension_is_rejected() {
    let err = ImageResource::from_premul_rgba8(70_000, 1, vec![0; 280_000]).unwrap_err();
    assert!(matches!(err, CrossfadeError::InvalidDimension(_)));
}

#[test]
fn clones_share_pixels_and_compare_by_content() {
    let a = ImageResource::solid(2, 2, [10, 20, 30, 255]).unwrap();
    let b = ImageResource::solid(2, 2, [10, 20, 30, 255]).unwrap();
    assert_eq!(a.clone(), a);
    assert_eq!(a, b);
    assert_ne!(a, ImageResource::solid(2, 2, [10, 20, 31, 255]).unwrap());
    assert_eq!(a.premul_bytes().len(), 16);
}

#[test]
fn solid_premultiplies_and_exposes_pixels() {
    let img = ImageResource::solid(3, 2, [200, 100, 0, 128]).unwrap();
    assert_eq!(img.size(), Size::new(3.0, 2.0));
    assert_eq!(img.pixel(2, 1), Some([100, 50, 0, 128]));
    assert_eq!(img.pixel(3, 0), None);
}
