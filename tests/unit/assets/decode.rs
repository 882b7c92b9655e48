use std::io::Cursor;

use super::*;

#[test]
fn decode_png_reports_dimensions() {
    let img = image::RgbaImage::from_pixel(7, 3, image::Rgba([1, 2, 3, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    let source = decode_image(&bytes).unwrap();
    assert_eq!(source.dimensions, Dimensions::new(7, 3).unwrap());
    assert_eq!(source.pixels().get_pixel(6, 2).0, [1, 2, 3, 255]);
}

#[test]
fn decode_garbage_fails() {
    assert!(decode_image(b"definitely not an image").is_err());
}

#[test]
fn load_missing_file_mentions_path() {
    let err = load_image(Path::new("does/not/exist.png")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.png"));
}
