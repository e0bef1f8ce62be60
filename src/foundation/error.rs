/// Convenience result type used across thumbforge.
pub type ThumbResult<T> = Result<T, ThumbError>;

/// Top-level error taxonomy used by the rendering and filtering APIs.
#[derive(thiserror::Error, Debug)]
pub enum ThumbError {
    /// Bad color, bad size, disallowed file extension, malformed data-URL header.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Corrupt or undecodable image bytes.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// Filter name outside the supported set.
    #[error("unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// Unexpected internal error while composing or encoding an image.
    #[error("render failure: {0}")]
    RenderFailure(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThumbError {
    /// Build a [`ThumbError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`ThumbError::DecodeFailure`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    /// Build a [`ThumbError::UnsupportedFilter`] value.
    pub fn unsupported_filter(msg: impl Into<String>) -> Self {
        Self::UnsupportedFilter(msg.into())
    }

    /// Build a [`ThumbError::RenderFailure`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::RenderFailure(msg.into())
    }

    /// Whether the failure was caused by the request rather than by the renderer.
    ///
    /// HTTP collaborators map `true` to a 400-class status and `false` to a 500-class one.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::DecodeFailure(_) | Self::UnsupportedFilter(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
