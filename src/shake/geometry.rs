use crate::foundation::core::{Dimensions, Offset};
use crate::foundation::error::{IntensifyError, IntensifyResult};

/// Accepted `shake_percent` values.
pub const SHAKE_PERCENT_RANGE: std::ops::RangeInclusive<u8> = 1..=99;

/// Crop geometry shared by every frame of one animation.
///
/// The source is trimmed by `crop_margin` pixels on each edge; each frame then moves its crop
/// origin by an [`Offset`] whose components never exceed `crop_margin`, so every crop stays inside
/// the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ShakeGeometry {
    pub source: Dimensions,
    pub crop_margin: u32,
    pub max_step: u32,
    pub frame: Dimensions,
}

impl ShakeGeometry {
    pub fn new(source: Dimensions, shake_percent: u8) -> IntensifyResult<Self> {
        if !SHAKE_PERCENT_RANGE.contains(&shake_percent) {
            return Err(IntensifyError::validation(format!(
                "shake percent must be in {}..={}, got {shake_percent}",
                SHAKE_PERCENT_RANGE.start(),
                SHAKE_PERCENT_RANGE.end()
            )));
        }

        let shortest = u64::from(source.shortest_axis());
        let crop_margin = (shortest * u64::from(shake_percent) / 200) as u32;
        // shake < 100% keeps 2 * crop_margin strictly below the shortest axis.
        let frame = Dimensions::new(
            source.width - 2 * crop_margin,
            source.height - 2 * crop_margin,
        )?;

        Ok(Self {
            source,
            crop_margin,
            max_step: crop_margin / 2,
            frame,
        })
    }

    /// Top-left corner of the crop rectangle for `offset`.
    pub fn crop_origin(&self, offset: Offset) -> IntensifyResult<(u32, u32)> {
        let margin = self.crop_margin as i64;
        let x = margin + i64::from(offset.x);
        let y = margin + i64::from(offset.y);
        if !(0..=2 * margin).contains(&x) || !(0..=2 * margin).contains(&y) {
            return Err(IntensifyError::render(format!(
                "offset ({}, {}) exceeds crop margin {}",
                offset.x, offset.y, self.crop_margin
            )));
        }
        Ok((x as u32, y as u32))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shake/geometry.rs"]
mod tests;
