use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{IntensifyError, IntensifyResult};
use crate::render::frame::FrameRGBA;

/// Suffix appended to the input's file stem to name the animation.
pub const OUTPUT_SUFFIX: &str = "-intense";

/// Output file name for `input`: `<stem>-intense.gif`, without any directory.
pub fn output_name_for(input: &Path) -> IntensifyResult<PathBuf> {
    let stem = input
        .file_stem()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            IntensifyError::validation(format!(
                "input path '{}' has no file name",
                input.display()
            ))
        })?;
    let mut name = stem.to_os_string();
    name.push(OUTPUT_SUFFIX);
    name.push(".gif");
    Ok(PathBuf::from(name))
}

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    pub out_path: PathBuf,
    /// Encoder quantization speed, 1 (best) to 30 (fastest).
    pub speed: i32,
    pub repeat_forever: bool,
}

impl GifSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            speed: 10,
            repeat_forever: true,
        }
    }
}

/// Sink that writes frames to an animated GIF file.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    cfg: Option<SinkConfig>,
    last_idx: Option<u32>,
    written: u32,
}

impl GifSink {
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            last_idx: None,
            written: 0,
        }
    }

    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    pub fn frames_written(&self) -> u32 {
        self.written
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> IntensifyResult<()> {
        if !(1..=30).contains(&self.opts.speed) {
            return Err(IntensifyError::validation(
                "gif encoder speed must be in 1..=30",
            ));
        }
        if cfg.frame.width > u32::from(u16::MAX) || cfg.frame.height > u32::from(u16::MAX) {
            return Err(IntensifyError::validation(format!(
                "gif frames are limited to 65535x65535, got {}x{}",
                cfg.frame.width, cfg.frame.height
            )));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        let file = File::create(&self.opts.out_path)
            .with_context(|| format!("create gif '{}'", self.opts.out_path.display()))?;
        let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), self.opts.speed);
        if self.opts.repeat_forever {
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| IntensifyError::encode(format!("set gif repeat: {e}")))?;
        }

        tracing::debug!(
            path = %self.opts.out_path.display(),
            width = cfg.frame.width,
            height = cfg.frame.height,
            frames = cfg.frame_count,
            "gif sink started"
        );
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA) -> IntensifyResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| IntensifyError::encode("gif sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(IntensifyError::encode(
                "gif sink received out-of-order frame index",
            ));
        }
        if frame.dimensions() != cfg.frame {
            return Err(IntensifyError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.frame.width, cfg.frame.height
            )));
        }
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(IntensifyError::encode("gif sink is already finalized"));
        };

        let delay = image::Delay::from_numer_denom_ms(cfg.delay.as_millis(), 1);
        let gif_frame = image::Frame::from_parts(frame.clone().into_image()?, 0, 0, delay);
        encoder
            .encode_frame(gif_frame)
            .map_err(|e| IntensifyError::encode(format!("encode gif frame {idx}: {e}")))?;

        self.last_idx = Some(idx);
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> IntensifyResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| IntensifyError::encode("gif sink not started"))?;
        // Dropping the encoder writes the trailer and flushes the file.
        drop(encoder);

        let cfg = self.cfg.take();
        if let Some(cfg) = cfg
            && self.written != cfg.frame_count
        {
            return Err(IntensifyError::encode(format!(
                "gif sink expected {} frames, got {}",
                cfg.frame_count, self.written
            )));
        }
        tracing::info!(path = %self.opts.out_path.display(), frames = self.written, "wrote gif");
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> IntensifyResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
