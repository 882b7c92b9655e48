use super::*;

fn dims(w: u32, h: u32) -> Dimensions {
    Dimensions::new(w, h).unwrap()
}

#[test]
fn hundred_px_at_ten_percent_trims_five_px() {
    let g = ShakeGeometry::new(dims(100, 100), 10).unwrap();
    assert_eq!(g.crop_margin, 5);
    assert_eq!(g.max_step, 2);
    assert_eq!(g.frame, dims(90, 90));
}

#[test]
fn margin_follows_shortest_axis() {
    let g = ShakeGeometry::new(dims(640, 480), 25).unwrap();
    assert_eq!(g.crop_margin, 60);
    assert_eq!(g.max_step, 30);
    assert_eq!(g.frame, dims(520, 360));
}

#[test]
fn margin_rounds_down() {
    // 33 * 10 / 200 = 1.65
    let g = ShakeGeometry::new(dims(33, 50), 10).unwrap();
    assert_eq!(g.crop_margin, 1);
    assert_eq!(g.max_step, 0);
    assert_eq!(g.frame, dims(31, 48));
}

#[test]
fn max_shake_still_leaves_a_frame() {
    let g = ShakeGeometry::new(dims(1, 1), 99).unwrap();
    assert_eq!(g.crop_margin, 0);
    assert_eq!(g.frame, dims(1, 1));

    let g = ShakeGeometry::new(dims(200, 201), 99).unwrap();
    assert_eq!(g.crop_margin, 99);
    assert_eq!(g.frame, dims(2, 3));
}

#[test]
fn shake_percent_out_of_range_is_rejected() {
    assert!(ShakeGeometry::new(dims(100, 100), 0).is_err());
    assert!(ShakeGeometry::new(dims(100, 100), 100).is_err());
}

#[test]
fn crop_origin_is_margin_plus_offset() {
    let g = ShakeGeometry::new(dims(100, 100), 10).unwrap();
    assert_eq!(g.crop_origin(Offset::ZERO).unwrap(), (5, 5));
    assert_eq!(g.crop_origin(Offset::new(-5, 5)).unwrap(), (0, 10));
    assert!(g.crop_origin(Offset::new(6, 0)).is_err());
    assert!(g.crop_origin(Offset::new(0, -6)).is_err());
}
