use crate::foundation::core::{Dimensions, FrameDelay};
use crate::foundation::error::IntensifyResult;
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    pub frame: Dimensions,
    pub frame_count: u32,
    pub delay: FrameDelay,
}

/// Sink contract for consuming rendered frames in animation order.
///
/// `push_frame` is called with strictly increasing indices starting at 0.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> IntensifyResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA) -> IntensifyResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> IntensifyResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    pub(crate) frames: Vec<(u32, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(u32, FrameRGBA)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> IntensifyResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA) -> IntensifyResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> IntensifyResult<()> {
        self.finished = true;
        Ok(())
    }
}
