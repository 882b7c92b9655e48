//! Encoding sinks and GIF post-processing.
//!
//! Sinks consume rendered frames in animation order; the disposal fix-up runs once on the finished
//! file.

/// External disposal-method fix-up.
pub mod disposal;
/// GIF file sink.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
