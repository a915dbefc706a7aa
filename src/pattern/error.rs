// Fri Oct 16 2026 - Alex

use thiserror::Error;

/// Raised for the first pattern in a batch that cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("error parsing pattern {pattern}: {message}")]
pub struct CompileError {
    pattern: String,
    message: String,
}

impl CompileError {
    pub fn new(pattern: &str, message: impl Into<String>) -> Self {
        Self {
            pattern: pattern.to_string(),
            message: message.into(),
        }
    }

    /// The pattern text exactly as it was supplied.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
