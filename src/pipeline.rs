use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assets::decode::{SourceImage, load_image};
use crate::assets::font::{FontBytes, FontSource, load_font};
use crate::encode::disposal::{DisposalFixup, FixupOutcome};
use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameDelay, Offset};
use crate::foundation::error::{IntensifyError, IntensifyResult};
use crate::render::caption::CaptionRenderer;
use crate::render::composite::composite_layer;
use crate::render::frame::crop_frame;
use crate::shake::geometry::{SHAKE_PERCENT_RANGE, ShakeGeometry};
use crate::shake::offsets::OffsetWalk;

pub const DEFAULT_SHAKE_PERCENT: u8 = 10;
pub const DEFAULT_FRAMES: u32 = 6;
/// Accepted animation lengths.
pub const FRAMES_RANGE: RangeInclusive<u32> = 2..=20;

/// Options for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntensifyOpts {
    /// Maximum shake as a percentage of the shortest image axis.
    pub shake_percent: u8,
    /// Number of frames in the animation.
    pub frames: u32,
    pub caption: Option<String>,
    pub delay: FrameDelay,
    /// Seed for the offset walk. `None` draws from the thread RNG.
    pub seed: Option<u64>,
    pub max_walk_attempts: u64,
}

impl Default for IntensifyOpts {
    fn default() -> Self {
        Self {
            shake_percent: DEFAULT_SHAKE_PERCENT,
            frames: DEFAULT_FRAMES,
            caption: None,
            delay: FrameDelay::DEFAULT,
            seed: None,
            max_walk_attempts: OffsetWalk::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl IntensifyOpts {
    pub fn validate(&self) -> IntensifyResult<()> {
        if !SHAKE_PERCENT_RANGE.contains(&self.shake_percent) {
            return Err(IntensifyError::validation(format!(
                "shake must be in {}..={}, got {}",
                SHAKE_PERCENT_RANGE.start(),
                SHAKE_PERCENT_RANGE.end(),
                self.shake_percent
            )));
        }
        if !FRAMES_RANGE.contains(&self.frames) {
            return Err(IntensifyError::validation(format!(
                "frames must be in {}..={}, got {}",
                FRAMES_RANGE.start(),
                FRAMES_RANGE.end(),
                self.frames
            )));
        }
        if self.delay.0 == 0 {
            return Err(IntensifyError::validation("frame delay must be > 0"));
        }
        Ok(())
    }

    /// Caption text, if one was given and is not blank.
    pub fn caption_text(&self) -> Option<&str> {
        self.caption.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// What [`render_frames`] produced.
#[derive(Clone, Debug, serde::Serialize)]
pub struct RenderSummary {
    pub geometry: ShakeGeometry,
    pub offsets: Vec<Offset>,
    pub frames_written: u32,
    pub captioned: bool,
}

/// Crop one frame per offset (all but the closing one), caption them, and push them into `sink`.
#[tracing::instrument(skip(source, captions, rng, sink), fields(
    width = source.dimensions.width,
    height = source.dimensions.height,
))]
pub fn render_frames<R: Rng + ?Sized>(
    source: &SourceImage,
    opts: &IntensifyOpts,
    captions: Option<&mut CaptionRenderer>,
    rng: &mut R,
    sink: &mut dyn FrameSink,
) -> IntensifyResult<RenderSummary> {
    opts.validate()?;

    let geometry = ShakeGeometry::new(source.dimensions, opts.shake_percent)?;
    tracing::debug!(
        crop_margin = geometry.crop_margin,
        max_step = geometry.max_step,
        frame_width = geometry.frame.width,
        frame_height = geometry.frame.height,
        "computed shake geometry"
    );

    let offsets = OffsetWalk::for_geometry(opts.frames, &geometry)
        .with_max_attempts(opts.max_walk_attempts)
        .generate(rng)?;

    let layer = match (opts.caption_text(), captions) {
        (Some(text), Some(renderer)) => Some(renderer.render_layer(text, geometry.frame)?),
        _ => None,
    };
    if let Some(layer) = &layer
        && layer.dimensions() != geometry.frame
    {
        return Err(IntensifyError::render("caption layer does not match frame size"));
    }

    sink.begin(SinkConfig {
        frame: geometry.frame,
        frame_count: opts.frames,
        delay: opts.delay,
    })?;

    // The closing offset equals the first; it only exists so the loop lands back home.
    let mut frames_written = 0u32;
    for (idx, offset) in offsets[..offsets.len() - 1].iter().enumerate() {
        let mut frame = crop_frame(source, &geometry, *offset)?;
        if let Some(layer) = &layer {
            composite_layer(&mut frame, &layer.premul)?;
        }
        sink.push_frame(idx as u32, &frame)?;
        frames_written += 1;
    }
    sink.end()?;

    Ok(RenderSummary {
        geometry,
        offsets,
        frames_written,
        captioned: layer.is_some(),
    })
}

/// Outcome of [`intensify_file`].
#[derive(Clone, Debug, serde::Serialize)]
pub struct RunSummary {
    pub output: PathBuf,
    pub render: RenderSummary,
    pub font_family: Option<String>,
    #[serde(skip)]
    pub font: Option<FontBytes>,
    pub fixup: FixupOutcome,
}

/// Turn the image at `input` into a shaking GIF at `output`, then run `fixup` on it once.
///
/// A caption font that cannot be downloaded, or that downloads as something other than a font, is
/// logged and replaced by a system sans-serif font; without one the animation is produced
/// uncaptioned. A local font file that cannot be read or parsed is an error.
#[tracing::instrument(skip(opts, fixup))]
pub fn intensify_file(
    input: &Path,
    output: &Path,
    opts: &IntensifyOpts,
    font: &FontSource,
    fixup: &dyn DisposalFixup,
) -> IntensifyResult<RunSummary> {
    opts.validate()?;
    let source = load_image(input)?;

    let mut captions = match opts.caption_text() {
        None => None,
        Some(_) => caption_renderer(font)?,
    };

    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut sink = GifSink::new(GifSinkOpts::new(output));
    let render = render_frames(&source, opts, captions.as_mut(), &mut rng, &mut sink)?;

    let fixup = fixup.fix(output)?;

    Ok(RunSummary {
        output: output.to_path_buf(),
        render,
        font_family: captions.as_ref().map(|c| c.family_name().to_string()),
        font: captions
            .as_ref()
            .and_then(|c| c.font_bytes())
            .cloned(),
        fixup,
    })
}

/// Resolve the caption font, degrading a failed download to a system font and then to no caption.
fn caption_renderer(font: &FontSource) -> IntensifyResult<Option<CaptionRenderer>> {
    let err = match load_font(font).and_then(CaptionRenderer::new) {
        Ok(renderer) => return Ok(Some(renderer)),
        Err(err) if matches!(font, FontSource::File(_)) => return Err(err),
        Err(err) => err,
    };
    tracing::warn!(error = %err, "caption font unavailable, falling back to a system font");

    match CaptionRenderer::system() {
        Ok(renderer) => {
            tracing::info!(family = renderer.family_name(), "captioning with system font");
            Ok(Some(renderer))
        }
        Err(err) => {
            tracing::warn!(error = %err, "no system font either, rendering without caption");
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
