//! Error types for emulator detection.
//!
//! Signal unavailability is never an error: an unreadable property or a
//! failed shell command is folded into the evidence as an ambiguous reading.
//! The variants below cover the cases that must reach the caller.

use thiserror::Error;

/// Errors surfaced by the detection engine and its configuration layer.
#[derive(Debug, Error)]
pub enum EmuCheckError {
    /// No usable execution context was supplied. Raised before any signal
    /// is read.
    #[error("Invalid execution context: {reason}")]
    InvalidContext {
        /// Why the context was rejected.
        reason: String,
    },

    /// A scoring policy failed validation.
    #[error("Invalid scoring policy: {reason}")]
    Policy {
        /// What was wrong with the policy.
        reason: String,
    },

    /// Reading a policy or fixture file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A policy or fixture file was not valid JSON for its type.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EmuCheckError {
    /// Shorthand for [`EmuCheckError::InvalidContext`].
    pub fn invalid_context(reason: impl Into<String>) -> Self {
        Self::InvalidContext {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`EmuCheckError::Policy`].
    pub fn policy(reason: impl Into<String>) -> Self {
        Self::Policy {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EmuCheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_context_message() {
        let err = EmuCheckError::invalid_context("no probe supplied");
        assert_eq!(
            err.to_string(),
            "Invalid execution context: no probe supplied"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: EmuCheckError = io.into();
        assert!(matches!(err, EmuCheckError::Io(_)));
    }
}
