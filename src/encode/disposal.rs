use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::foundation::error::{IntensifyError, IntensifyResult};

/// Result of running a [`DisposalFixup`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub enum FixupOutcome {
    /// The tool rewrote the file successfully.
    Applied { tool: &'static str },
    /// The tool ran but exited unsuccessfully. The GIF is left as the encoder wrote it.
    ToolFailed {
        tool: &'static str,
        code: Option<i32>,
        stderr: String,
    },
    /// No fix-up was attempted.
    Skipped { reason: String },
}

/// Rewrites a finished GIF so every frame uses the "previous" disposal method.
pub trait DisposalFixup {
    fn fix(&self, gif: &Path) -> IntensifyResult<FixupOutcome>;
}

/// ImageMagick binaries able to rewrite disposal metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MagickTool {
    /// ImageMagick 6 `convert`.
    Convert,
    /// ImageMagick 7 `magick`.
    Magick,
}

impl MagickTool {
    pub fn program(self) -> &'static str {
        match self {
            Self::Convert => "convert",
            Self::Magick => "magick",
        }
    }
}

/// Arguments for `<tool> -dispose previous <gif> <gif>`.
pub fn fixup_args(gif: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-dispose"),
        OsString::from("previous"),
        gif.as_os_str().to_os_string(),
        gif.as_os_str().to_os_string(),
    ]
}

/// Fix-up that shells out to ImageMagick.
#[derive(Clone, Copy, Debug)]
pub struct MagickFixup {
    tool: MagickTool,
}

impl MagickFixup {
    pub fn new(tool: MagickTool) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> MagickTool {
        self.tool
    }
}

impl DisposalFixup for MagickFixup {
    #[tracing::instrument(skip(self), fields(tool = self.tool.program()))]
    fn fix(&self, gif: &Path) -> IntensifyResult<FixupOutcome> {
        let program = self.tool.program();
        let output = Command::new(program)
            .args(fixup_args(gif))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                IntensifyError::encode(format!(
                    "failed to spawn {program} (is ImageMagick installed and on PATH?): {e}"
                ))
            })?;

        if output.status.success() {
            tracing::debug!("disposal set to previous");
            return Ok(FixupOutcome::Applied { tool: program });
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::warn!(status = %output.status, stderr = %stderr, "disposal fix-up failed");
        Ok(FixupOutcome::ToolFailed {
            tool: program,
            code: output.status.code(),
            stderr,
        })
    }
}

/// Fix-up that leaves the file untouched.
#[derive(Clone, Debug, Default)]
pub struct NoFixup {
    reason: Option<String>,
}

impl NoFixup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn because(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }
}

impl DisposalFixup for NoFixup {
    fn fix(&self, _gif: &Path) -> IntensifyResult<FixupOutcome> {
        Ok(FixupOutcome::Skipped {
            reason: self
                .reason
                .clone()
                .unwrap_or_else(|| "disposal fix-up disabled".to_string()),
        })
    }
}

/// How to pick a [`DisposalFixup`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FixupKind {
    /// `magick` if available, else `convert`, else skip.
    #[default]
    Auto,
    Convert,
    Magick,
    None,
}

/// Construct the fix-up for `kind`, probing `PATH` when `kind` is [`FixupKind::Auto`].
pub fn create_fixup(kind: FixupKind) -> Box<dyn DisposalFixup> {
    match kind {
        FixupKind::Convert => Box::new(MagickFixup::new(MagickTool::Convert)),
        FixupKind::Magick => Box::new(MagickFixup::new(MagickTool::Magick)),
        FixupKind::None => Box::new(NoFixup::new()),
        FixupKind::Auto => {
            for tool in [MagickTool::Magick, MagickTool::Convert] {
                if is_tool_on_path(tool.program()) {
                    tracing::debug!(tool = tool.program(), "using ImageMagick for disposal fix-up");
                    return Box::new(MagickFixup::new(tool));
                }
            }
            tracing::warn!("neither `magick` nor `convert` found on PATH; skipping disposal fix-up");
            Box::new(NoFixup::because("ImageMagick not found on PATH"))
        }
    }
}

/// Return `true` when `program -version` can be invoked from `PATH`.
pub fn is_tool_on_path(program: &str) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/disposal.rs"]
mod tests;
