use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn assert_walk_invariants(offsets: &[Offset], frames: u32, margin: u32) {
    assert_eq!(offsets.len(), frames as usize + 1);
    assert_eq!(offsets[0], Offset::ZERO);
    assert_eq!(offsets[offsets.len() - 1], Offset::ZERO);
    for o in offsets {
        assert!(o.max_abs() <= margin, "{o:?} exceeds margin {margin}");
    }
}

#[test]
fn two_frames_are_fixed() {
    let mut rng = StdRng::seed_from_u64(1);
    let offsets = generate_offsets(2, 2, 5, &mut rng).unwrap();
    assert_eq!(
        offsets,
        vec![Offset::ZERO, Offset::new(2, 2), Offset::ZERO]
    );

    let offsets = generate_offsets(2, 0, 0, &mut rng).unwrap();
    assert_eq!(offsets, vec![Offset::ZERO; 3]);
}

#[test]
fn default_shake_walk_is_closed_and_bounded() {
    let mut rng = StdRng::seed_from_u64(42);
    let offsets = generate_offsets(6, 2, 5, &mut rng).unwrap();
    assert_walk_invariants(&offsets, 6, 5);
}

#[test]
fn steps_never_exceed_max_step() {
    let mut rng = StdRng::seed_from_u64(7);
    let offsets = generate_offsets(12, 3, 6, &mut rng).unwrap();
    for pair in offsets.windows(2) {
        assert!((pair[1].x - pair[0].x).abs() <= 3);
        assert!((pair[1].y - pair[0].y).abs() <= 3);
    }
}

#[test]
fn same_seed_same_walk() {
    let a = generate_offsets(8, 4, 9, &mut StdRng::seed_from_u64(99)).unwrap();
    let b = generate_offsets(8, 4, 9, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn fewer_than_two_frames_is_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    let err = generate_offsets(1, 2, 5, &mut rng).unwrap_err();
    assert!(matches!(err, IntensifyError::Validation(_)));
}

#[test]
fn step_larger_than_margin_is_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(generate_offsets(4, 6, 5, &mut rng).is_err());
}

#[test]
fn zero_step_with_many_frames_errors_instead_of_spinning() {
    let mut rng = StdRng::seed_from_u64(0);
    let err = generate_offsets(6, 0, 1, &mut rng).unwrap_err();
    assert!(matches!(err, IntensifyError::Offsets(_)));
}

#[test]
fn exhausted_attempts_are_reported() {
    let mut rng = StdRng::seed_from_u64(0);
    let err = OffsetWalk::new(6, 2, 5)
        .with_max_attempts(0)
        .generate(&mut rng)
        .unwrap_err();
    assert!(err.to_string().contains("after 0 attempts"));
}

#[test]
fn walk_from_geometry_uses_half_margin() {
    let geometry = ShakeGeometry::new(
        crate::foundation::core::Dimensions::new(100, 100).unwrap(),
        10,
    )
    .unwrap();
    let walk = OffsetWalk::for_geometry(6, &geometry);
    assert_eq!(walk.max_step, 2);
    assert_eq!(walk.crop_margin, 5);
}

#[test]
fn large_margin_walks_close_within_a_few_attempts() {
    let geometry = ShakeGeometry::new(
        crate::foundation::core::Dimensions::new(4000, 4000).unwrap(),
        99,
    )
    .unwrap();
    assert_eq!(geometry.crop_margin, 1980);
    assert_eq!(geometry.max_step, 990);

    for frames in [3, 6, 20] {
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let offsets = OffsetWalk::for_geometry(frames, &geometry)
                .with_max_attempts(1_000)
                .generate(&mut rng)
                .unwrap();
            assert_walk_invariants(&offsets, frames, geometry.crop_margin);
            for pair in offsets.windows(2) {
                assert!((pair[1].x - pair[0].x).abs() <= 990);
                assert!((pair[1].y - pair[0].y).abs() <= 990);
            }
        }
    }
}

#[test]
fn unit_step_walks_still_close() {
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let offsets = generate_offsets(20, 1, 2, &mut rng).unwrap();
        assert_walk_invariants(&offsets, 20, 2);
    }
}

#[test]
fn axis_range_is_clamped_to_bound() {
    assert_eq!(axis_range(0, 3, 10), -3..=3);
    assert_eq!(axis_range(8, 3, 10), 5..=10);
    assert_eq!(axis_range(2, 3, 0), 0..=0);
}

proptest! {
    #[test]
    fn walks_are_closed_bounded_and_non_repeating(
        frames in 3u32..=20,
        margin in 2u32..=2000,
        seed in any::<u64>(),
    ) {
        let max_step = margin / 2;
        let mut rng = StdRng::seed_from_u64(seed);
        let offsets = generate_offsets(frames, max_step, margin, &mut rng).unwrap();

        prop_assert_eq!(offsets.len(), frames as usize + 1);
        prop_assert_eq!(offsets[0], Offset::ZERO);
        prop_assert_eq!(offsets[frames as usize], Offset::ZERO);
        for (i, o) in offsets.iter().enumerate() {
            prop_assert!(o.max_abs() <= margin);
            if i > 0 {
                prop_assert!((o.x - offsets[i - 1].x).abs() <= max_step as i32);
                prop_assert!((o.y - offsets[i - 1].y).abs() <= max_step as i32);
            }
            for back in 1..=2 {
                if i >= back {
                    prop_assert_ne!(*o, offsets[i - back]);
                }
            }
        }
    }
}
