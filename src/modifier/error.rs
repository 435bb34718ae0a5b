use std::fmt;

use crate::foundation::error::CrossmorphError;

/// Failure while reading modifier or preset text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Byte offset into the source text.
    pub offset: usize,
    /// Human-readable reason.
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modifier text error at byte {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for CrossmorphError {
    fn from(e: ParseError) -> Self {
        CrossmorphError::parse(e.to_string())
    }
}
