/// Convenience result type used across the crate.
pub type BlendResult<T> = Result<T, BlendError>;

/// Errors returned by buffer construction, blending and image I/O.
#[derive(thiserror::Error, Debug)]
pub enum BlendError {
    /// Mismatched lengths, partial pixels, bad dimensions or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image decode or encode failures.
    #[error("image error: {0}")]
    Image(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlendError {
    /// Build a [`BlendError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BlendError::Image`] value.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Whether this is a [`BlendError::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
