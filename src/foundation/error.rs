/// Result alias used across the crate.
pub type IntensifyResult<T> = Result<T, IntensifyError>;

/// Error type returned by every fallible library operation.
#[derive(thiserror::Error, Debug)]
pub enum IntensifyError {
    /// Options or inputs outside their accepted range.
    #[error("validation error: {0}")]
    Validation(String),

    /// The offset walk could not produce a closed sequence.
    #[error("offset generation error: {0}")]
    Offsets(String),

    /// Cropping, caption layout or rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// GIF writing or the disposal fix-up failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Font bytes could not be obtained or registered.
    #[error("font error: {0}")]
    Font(String),

    /// Lower-level failure with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntensifyError {
    /// Build an [`IntensifyError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`IntensifyError::Offsets`].
    pub fn offsets(msg: impl Into<String>) -> Self {
        Self::Offsets(msg.into())
    }

    /// Build an [`IntensifyError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`IntensifyError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build an [`IntensifyError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
