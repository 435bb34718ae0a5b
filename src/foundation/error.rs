/// Convenience result type used across crossmorph.
pub type CrossmorphResult<T> = Result<T, CrossmorphError>;

/// Top-level error type for the fallible edges of the engine.
///
/// The transition core itself never surfaces errors to callers; these variants cover the
/// boundaries where input is parsed or a host capture is attempted.
#[derive(thiserror::Error, Debug)]
pub enum CrossmorphError {
    /// Modifier or preset text could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The host could not capture a render proxy.
    #[error("capture error: {0}")]
    Capture(String),

    /// JSON or serde-related failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CrossmorphError {
    /// Build a [`CrossmorphError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`CrossmorphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CrossmorphError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`CrossmorphError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CrossmorphError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
