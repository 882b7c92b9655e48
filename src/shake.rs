//! Shake geometry and the randomized offset walk.

/// Crop margin, per-frame step and frame size derived from image dimensions.
pub mod geometry;
/// Closed random walk producing per-frame crop offsets.
pub mod offsets;
