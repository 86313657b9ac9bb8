//! Kernel errors

use thiserror::Error;

/// Errors raised while building kernel values from untrusted input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Text that cannot name a stored record
    #[error("'{input}' is not a valid {kind} id")]
    InvalidIdentifier { kind: &'static str, input: String },
}

impl CoreError {
    pub fn invalid_identifier(kind: &'static str, input: impl Into<String>) -> Self {
        CoreError::InvalidIdentifier {
            kind,
            input: input.into(),
        }
    }
}
