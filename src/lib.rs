//! Intensify turns a still image into a looping "shaky camera" GIF.
//!
//! # Pipeline overview
//!
//! 1. **Decode** the source image ([`load_image`]).
//! 2. **Measure**: derive the crop margin from the shake percentage and the shortest axis
//!    ([`ShakeGeometry`]).
//! 3. **Walk**: generate a closed random walk of crop offsets ([`OffsetWalk`]).
//! 4. **Render**: crop one frame per offset and optionally burn in an outlined caption
//!    ([`crop_frame`], [`CaptionRenderer`]).
//! 5. **Encode**: stream frames into a [`FrameSink`], normally a [`GifSink`].
//! 6. **Fix up**: hand the finished file to ImageMagick once to set the "previous" disposal method
//!    ([`DisposalFixup`]).
//!
//! [`intensify_file`] runs the whole pipeline; [`render_frames`] stops before encoding so frames
//! can be inspected in memory.
#![forbid(unsafe_code)]

mod assets;
mod encode;
mod foundation;
mod pipeline;
mod render;
mod shake;

pub use assets::decode::{SourceImage, decode_image, load_image};
pub use assets::font::{DEFAULT_FONT_URL, FontBytes, FontSource, load_font};
pub use encode::disposal::{
    DisposalFixup, FixupKind, FixupOutcome, MagickFixup, MagickTool, NoFixup, create_fixup,
    fixup_args, is_tool_on_path,
};
pub use encode::gif::{GifSink, GifSinkOpts, OUTPUT_SUFFIX, ensure_parent_dir, output_name_for};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Dimensions, FrameDelay, Offset};
pub use foundation::error::{IntensifyError, IntensifyResult};
pub use pipeline::{
    DEFAULT_FRAMES, DEFAULT_SHAKE_PERCENT, FRAMES_RANGE, IntensifyOpts, RenderSummary, RunSummary,
    intensify_file, render_frames,
};
pub use render::caption::{
    CAPTION_FILL, CAPTION_OUTLINE, CAPTION_SIZE_RATIO, CaptionLayer, CaptionPlacement,
    CaptionRenderer, TextBrushRgba8, TextLayoutEngine,
};
pub use render::composite::{composite_layer, over, over_in_place};
pub use render::frame::{FrameRGBA, crop_frame};
pub use shake::geometry::{SHAKE_PERCENT_RANGE, ShakeGeometry};
pub use shake::offsets::{OffsetWalk, generate_offsets};
