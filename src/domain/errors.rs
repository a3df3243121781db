//! Domain error types
//!
//! This module defines the error hierarchy for sheetbatch. Batch-fatal
//! failures surface as [`SheetBatchError`]; host collaborator failures as
//! [`HostError`]; post-export file reconciliation failures as
//! [`ReconcileError`]. None of them expose third-party types.

use thiserror::Error;

/// Main sheetbatch error type
///
/// Returned to the caller when a batch cannot start or has to abort.
/// Per-sheet problems are not reported through this type; they are
/// collected in the batch result instead.
#[derive(Debug, Error)]
pub enum SheetBatchError {
    /// Configuration-related errors (bad folder, empty sheet set, invalid file)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Host collaborator errors
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// File reconciliation errors
    #[error("Reconcile error: {0}")]
    Reconcile(#[from] ReconcileError),

    /// Batch-fatal export errors (combined phase)
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Host collaborator errors
///
/// Raised by the exporter and transactional unit implementations. The host
/// is treated as a black box, so the payload is a message only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The export call itself failed
    #[error("Export call failed: {0}")]
    ExportFailed(String),

    /// A transactional unit could not be started
    #[error("Failed to start transaction: {0}")]
    TransactionStart(String),

    /// A transactional unit could not be committed
    #[error("Failed to commit transaction: {0}")]
    TransactionCommit(String),

    /// A transactional unit could not be rolled back
    #[error("Failed to roll back transaction: {0}")]
    TransactionRollback(String),

    /// The host is not reachable or refused the request
    #[error("Host unavailable: {0}")]
    Unavailable(String),
}

/// File reconciliation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// No file in the output folder could be attributed to the sheet
    #[error("No exported file found for sheet {sheet} (token {token})")]
    NotFound { sheet: String, token: String },

    /// The produced file stayed locked for every rename attempt
    #[error("File {path} still locked after {attempts} attempts: {message}")]
    Locked {
        path: String,
        attempts: u32,
        message: String,
    },

    /// The output folder could not be listed
    #[error("Output folder unavailable: {0}")]
    FolderUnavailable(String),
}

impl ReconcileError {
    /// Whether the exported file is probably still on disk under its
    /// host-chosen name
    pub fn file_left_behind(&self) -> bool {
        matches!(self, ReconcileError::Locked { .. })
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for SheetBatchError {
    fn from(err: std::io::Error) -> Self {
        SheetBatchError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SheetBatchError {
    fn from(err: serde_json::Error) -> Self {
        SheetBatchError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SheetBatchError {
    fn from(err: toml::de::Error) -> Self {
        SheetBatchError::Configuration(format!("TOML parse error: {err}"))
    }
}
