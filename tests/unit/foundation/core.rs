use super::*;

#[test]
fn offset_max_abs_uses_larger_axis() {
    assert_eq!(Offset::new(-3, 2).max_abs(), 3);
    assert_eq!(Offset::new(1, -7).max_abs(), 7);
    assert_eq!(Offset::ZERO.max_abs(), 0);
    assert_eq!(Offset::from((4, 5)), Offset::new(4, 5));
}

#[test]
fn dimensions_reject_zero_axes() {
    assert!(Dimensions::new(0, 10).is_err());
    assert!(Dimensions::new(10, 0).is_err());
    let d = Dimensions::new(120, 80).unwrap();
    assert_eq!(d.shortest_axis(), 80);
    assert_eq!(d.pixel_count(), 9600);
}

#[test]
fn frame_delay_converts_centis_to_millis() {
    assert_eq!(FrameDelay::default().as_millis(), 20);
    assert_eq!(FrameDelay::new(7).unwrap().as_millis(), 70);
    assert!(FrameDelay::new(0).is_err());
}
