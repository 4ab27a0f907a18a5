//! # Store Error Types
//!
//! Persistence-layer failures, layered above [`granel_core::CoreError`].

use thiserror::Error;

/// Errors raised by the store and command layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File system failure while loading or flushing the document.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document on disk is not valid JSON.
    ///
    /// Raised at load time only; the store refuses to start over a corrupt
    /// file rather than silently replacing it.
    #[error("corrupt state file: {0}")]
    CorruptDocument(#[source] serde_json::Error),

    /// Serialization failure while flushing (should not occur for our types).
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An imported backup could not be parsed. Existing state is untouched.
    #[error("invalid backup file: {reason}")]
    Import { reason: String },

    /// CSV report assembly failure.
    #[error("report error: {0}")]
    Report(String),

    /// Export requested with an entirely empty ledger.
    #[error("no records to export")]
    NothingToExport,

    /// Business rule or validation rejection from granel-core.
    #[error(transparent)]
    Core(#[from] granel_core::CoreError),
}

impl From<granel_core::ValidationError> for StoreError {
    fn from(err: granel_core::ValidationError) -> Self {
        StoreError::Core(err.into())
    }
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
