// error.rs — Error types for the goal ledger and its persistence.

use thiserror::Error;

/// Errors that can occur while persisting or restoring a goal ledger.
///
/// Completing goals and recording events never fail; every variant here
/// comes from storage, decoding, configuration, or notification.
#[derive(Debug, Error)]
pub enum GoalError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// The persisted bytes are not a well-formed ledger document
    /// (invalid JSON, or a field holding the wrong JSON type).
    #[error("malformed ledger data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A goal record carries a discriminator that names no known variant.
    #[error("unknown goal kind '{kind}' at {location}")]
    UnknownKind { location: String, kind: String },

    /// A field required to reconstruct the ledger or a goal is absent.
    #[error("missing field '{field}' at {location}")]
    MissingField {
        location: String,
        field: &'static str,
    },

    /// Failed to encode a ledger for storage.
    #[error("failed to encode ledger: {0}")]
    Encode(serde_json::Error),

    /// The quest configuration file could not be parsed.
    #[error("invalid config at {path}: {reason}")]
    Config { path: String, reason: String },

    /// A notification dispatch failed (non-fatal).
    #[error("notification error: {0}")]
    NotificationError(String),
}
