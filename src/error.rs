//! Error types for the lease auditor

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, AuditError>;

/// Recoverable conditions raised by the auditor.
///
/// Missing contract terms and a missing market anchor are not errors: they
/// degrade to sentinel values and `NoRecommendation` respectively.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Invalid VIN: normalized to {length} characters, expected 17")]
    InvalidVin { cleaned: String, length: usize },

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Chat history entry {index} has the system role; the system message is built fresh")]
    SystemMessageInHistory { index: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuditError {
    /// Whether the caller supplied bad input (as opposed to an upstream or
    /// internal failure)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidVin { .. } | Self::EmptyMessage | Self::SystemMessageInHistory { .. }
        )
    }
}

impl From<config::ConfigError> for AuditError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
