use super::*;

/// 20x20 source whose red channel encodes x and green channel encodes y.
fn coordinate_source() -> SourceImage {
    let img = image::RgbaImage::from_fn(20, 20, |x, y| image::Rgba([x as u8, y as u8, 0, 255]));
    SourceImage::from_rgba(img).unwrap()
}

#[test]
fn zero_offset_crops_the_centre() {
    let source = coordinate_source();
    let geometry = ShakeGeometry::new(source.dimensions, 40).unwrap();
    assert_eq!(geometry.crop_margin, 4);

    let frame = crop_frame(&source, &geometry, Offset::ZERO).unwrap();
    assert_eq!((frame.width, frame.height), (12, 12));
    assert_eq!(frame.data.len(), 12 * 12 * 4);
    assert_eq!(frame.pixel(0, 0), Some([4, 4, 0, 255]));
    assert_eq!(frame.pixel(11, 11), Some([15, 15, 0, 255]));
    assert_eq!(frame.pixel(12, 0), None);
}

#[test]
fn offset_moves_the_crop_origin() {
    let source = coordinate_source();
    let geometry = ShakeGeometry::new(source.dimensions, 40).unwrap();

    let frame = crop_frame(&source, &geometry, Offset::new(-4, 3)).unwrap();
    assert_eq!(frame.pixel(0, 0), Some([0, 7, 0, 255]));
    assert_eq!(frame.dimensions(), geometry.frame);
}

#[test]
fn mismatched_geometry_is_rejected() {
    let source = coordinate_source();
    let other = ShakeGeometry::new(Dimensions::new(30, 30).unwrap(), 10).unwrap();
    assert!(crop_frame(&source, &other, Offset::ZERO).is_err());
}

#[test]
fn frame_converts_into_image() {
    let source = coordinate_source();
    let geometry = ShakeGeometry::new(source.dimensions, 10).unwrap();
    let frame = crop_frame(&source, &geometry, Offset::ZERO).unwrap();
    let img = frame.into_image().unwrap();
    assert_eq!(img.dimensions(), (18, 18));
}
