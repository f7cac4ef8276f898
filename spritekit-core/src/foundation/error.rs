/// Convenience result type used across spritekit.
pub type SpriteResult<T> = Result<T, SpriteError>;

/// Top-level error taxonomy for the fallible constructors and loaders.
///
/// Per-frame operations (`update`, `draw`, tween stepping) never return errors; they absorb
/// failures and report them through `tracing`.
#[derive(thiserror::Error, Debug)]
pub enum SpriteError {
    /// Invalid caller-provided data (sizes, buffers, options).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while decoding image or media data.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors while allocating or drawing into a render surface.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpriteError {
    /// Build a [`SpriteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SpriteError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SpriteError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
