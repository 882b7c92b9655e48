use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::foundation::error::{IntensifyError, IntensifyResult};

/// Source Code Pro Regular, pinned to a fixed commit of the Google Fonts repository.
pub const DEFAULT_FONT_URL: &str = "https://github.com/google/fonts/blob/\
     4a99a0649614f7e582ec184fea5cdeec51702d79/ofl/sourcecodepro/\
     SourceCodePro-Regular.ttf?raw=true";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where caption font bytes come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// Download over HTTP(S).
    Url(String),
    /// Read a local TTF/OTF file.
    File(PathBuf),
}

impl Default for FontSource {
    fn default() -> Self {
        Self::Url(DEFAULT_FONT_URL.to_string())
    }
}

impl std::fmt::Display for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Raw font file contents, shared cheaply between the layout and raster stages.
#[derive(Clone, Debug)]
pub struct FontBytes(Arc<Vec<u8>>);

impl FontBytes {
    pub fn new(bytes: Vec<u8>) -> IntensifyResult<Self> {
        if bytes.is_empty() {
            return Err(IntensifyError::font("font data is empty"));
        }
        Ok(Self(Arc::new(bytes)))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

/// Resolve `source` to font bytes.
#[tracing::instrument]
pub fn load_font(source: &FontSource) -> IntensifyResult<FontBytes> {
    match source {
        FontSource::File(path) => read_font_file(path),
        FontSource::Url(url) => download_font(url),
    }
}

fn read_font_file(path: &Path) -> IntensifyResult<FontBytes> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read font file '{}'", path.display()))?;
    FontBytes::new(bytes)
}

fn download_font(url: &str) -> IntensifyResult<FontBytes> {
    let client = reqwest::blocking::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("build http client")?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| IntensifyError::font(format!("request to '{url}' failed: {e}")))?;
    let status = response.status();
    if !status.is_success() {
        return Err(IntensifyError::font(format!(
            "font download from '{url}' returned {status}"
        )));
    }

    let body = response
        .bytes()
        .map_err(|e| IntensifyError::font(format!("reading font body from '{url}': {e}")))?;
    tracing::debug!(bytes = body.len(), "downloaded font");
    FontBytes::new(body.to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
