use crate::foundation::error::{IntensifyError, IntensifyResult};

/// Displacement applied to the crop origin of one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Largest absolute component.
    pub fn max_abs(self) -> u32 {
        self.x.unsigned_abs().max(self.y.unsigned_abs())
    }
}

impl From<(i32, i32)> for Offset {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> IntensifyResult<Self> {
        if width == 0 || height == 0 {
            return Err(IntensifyError::validation(format!(
                "image dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn shortest_axis(self) -> u32 {
        self.width.min(self.height)
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

/// GIF frame delay in centiseconds (1/100 s ticks).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FrameDelay(pub u16);

impl FrameDelay {
    pub const DEFAULT: Self = Self(2);

    pub fn new(centis: u16) -> IntensifyResult<Self> {
        if centis == 0 {
            return Err(IntensifyError::validation("frame delay must be > 0"));
        }
        Ok(Self(centis))
    }

    pub fn as_millis(self) -> u32 {
        u32::from(self.0) * 10
    }
}

impl Default for FrameDelay {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
