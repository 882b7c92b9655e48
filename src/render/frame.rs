use crate::assets::decode::SourceImage;
use crate::foundation::core::{Dimensions, Offset};
use crate::foundation::error::{IntensifyError, IntensifyResult};
use crate::shake::geometry::ShakeGeometry;

/// A rendered animation frame.
///
/// Pixels are straight-alpha RGBA8, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        self.data
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    pub fn into_image(self) -> IntensifyResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| IntensifyError::render("frame buffer length does not match its size"))
    }
}

/// Cut the frame for `offset` out of `source`.
pub fn crop_frame(
    source: &SourceImage,
    geometry: &ShakeGeometry,
    offset: Offset,
) -> IntensifyResult<FrameRGBA> {
    if source.dimensions != geometry.source {
        return Err(IntensifyError::render(format!(
            "geometry was computed for {}x{} but source is {}x{}",
            geometry.source.width,
            geometry.source.height,
            source.dimensions.width,
            source.dimensions.height
        )));
    }

    let (x, y) = geometry.crop_origin(offset)?;
    let Dimensions { width, height } = geometry.frame;
    let cropped = image::imageops::crop_imm(source.pixels(), x, y, width, height).to_image();
    Ok(FrameRGBA {
        width,
        height,
        data: cropped.into_raw(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
