use super::*;

#[test]
fn transparent_source_keeps_destination() {
    assert_eq!(over([10, 20, 30, 255], [0, 0, 0, 0]), [10, 20, 30, 255]);
}

#[test]
fn opaque_source_replaces_destination() {
    assert_eq!(over([10, 20, 30, 255], [255, 255, 0, 255]), [255, 255, 0, 255]);
}

#[test]
fn half_coverage_blends() {
    // 50% black over white.
    let out = over([255, 255, 255, 255], [0, 0, 0, 128]);
    assert_eq!(out[3], 255);
    assert!((126..=128).contains(&out[0]), "{out:?}");
}

#[test]
fn over_in_place_rejects_mismatched_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
}

#[test]
fn composite_layer_touches_only_covered_pixels() {
    let mut frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![10, 20, 30, 255, 40, 50, 60, 255],
    };
    let layer = [0u8, 0, 0, 0, 255, 255, 0, 255];
    composite_layer(&mut frame, &layer).unwrap();
    assert_eq!(frame.data, vec![10, 20, 30, 255, 255, 255, 0, 255]);
}
