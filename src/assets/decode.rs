use std::path::Path;

use anyhow::Context;

use crate::foundation::core::Dimensions;
use crate::foundation::error::IntensifyResult;

/// Decoded still image in straight-alpha RGBA8.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub dimensions: Dimensions,
    pub(crate) rgba: image::RgbaImage,
}

impl SourceImage {
    pub fn from_rgba(rgba: image::RgbaImage) -> IntensifyResult<Self> {
        let (width, height) = rgba.dimensions();
        Ok(Self {
            dimensions: Dimensions::new(width, height)?,
            rgba,
        })
    }

    /// Borrow the decoded pixels.
    pub fn pixels(&self) -> &image::RgbaImage {
        &self.rgba
    }
}

/// Decode an image file, guessing the format from its contents.
#[tracing::instrument]
pub fn load_image(path: &Path) -> IntensifyResult<SourceImage> {
    let reader = image::ImageReader::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("sniff image format of '{}'", path.display()))?;
    let dyn_img = reader
        .decode()
        .with_context(|| format!("decode image '{}'", path.display()))?;
    let source = SourceImage::from_rgba(dyn_img.to_rgba8())?;
    tracing::debug!(
        width = source.dimensions.width,
        height = source.dimensions.height,
        "decoded source image"
    );
    Ok(source)
}

/// Decode encoded image bytes.
pub fn decode_image(bytes: &[u8]) -> IntensifyResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    SourceImage::from_rgba(dyn_img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
