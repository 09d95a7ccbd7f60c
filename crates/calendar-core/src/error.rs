use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A required identifier was missing (nil); a validation failure as well.
    #[error("Validation error: {0} id should be provided")]
    EmptyIdentifier(&'static str),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

impl CoreError {
    /// ## Summary
    /// Builds a validation error from any message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// ## Summary
    /// Returns true for failures caused by caller input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::EmptyIdentifier(_) | Self::InvalidIdentifier(_)
        )
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
