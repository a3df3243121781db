//! Batch result and reporting
//!
//! [`BatchResult`] is built incrementally by the orchestrator and handed to
//! the caller once the batch ends.

use crate::domain::{BatchId, FileKind, HostError, ReconcileError, SheetRef};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Why a sheet failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The host export call (or its transactional unit) failed
    ExportCall,
    /// The exported file could not be renamed; it is probably still on disk
    ReconcileLocked,
    /// No exported file was found
    ReconcileNotFound,
    /// The output folder could not be listed during reconciliation
    FolderUnavailable,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::ExportCall => "export call failed",
            FailureKind::ReconcileLocked => "file locked",
            FailureKind::ReconcileNotFound => "file not found",
            FailureKind::FolderUnavailable => "folder unavailable",
        };
        write!(f, "{s}")
    }
}

impl From<&ReconcileError> for FailureKind {
    fn from(err: &ReconcileError) -> Self {
        match err {
            ReconcileError::NotFound { .. } => FailureKind::ReconcileNotFound,
            ReconcileError::Locked { .. } => FailureKind::ReconcileLocked,
            ReconcileError::FolderUnavailable(_) => FailureKind::FolderUnavailable,
        }
    }
}

/// One failed sheet
#[derive(Debug, Clone)]
pub struct SheetFailure {
    /// The sheet that failed
    pub sheet: SheetRef,

    /// Failure category
    pub kind: FailureKind,

    /// Format being processed, when the failure is format-specific
    pub format: Option<FileKind>,

    /// Error message
    pub message: String,
}

impl SheetFailure {
    /// Failure of the export call or its transactional unit
    pub fn export_call(sheet: &SheetRef, err: &HostError) -> Self {
        Self {
            sheet: sheet.clone(),
            kind: FailureKind::ExportCall,
            format: None,
            message: err.to_string(),
        }
    }

    /// Failure to reconcile one produced file
    pub fn reconcile(sheet: &SheetRef, format: FileKind, err: &ReconcileError) -> Self {
        Self {
            sheet: sheet.clone(),
            kind: FailureKind::from(err),
            format: Some(format),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for SheetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            Some(format) => write!(
                f,
                "{} [{}] {}: {}",
                self.sheet.label(),
                format,
                self.kind,
                self.message
            ),
            None => write!(f, "{} {}: {}", self.sheet.label(), self.kind, self.message),
        }
    }
}

/// Outcome of one batch
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Batch id, shared with every log line of the run
    pub batch_id: BatchId,

    /// Final paths of every file produced
    pub succeeded_files: Vec<PathBuf>,

    /// Sheets that failed, in processing order
    pub failed_sheets: Vec<SheetFailure>,

    /// The run stopped early on request
    pub cancelled: bool,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl BatchResult {
    /// Create an empty result
    pub fn new(batch_id: BatchId) -> Self {
        Self {
            batch_id,
            succeeded_files: Vec::new(),
            failed_sheets: Vec::new(),
            cancelled: false,
            duration: Duration::ZERO,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a produced file
    pub fn add_success(&mut self, path: PathBuf) {
        self.succeeded_files.push(path);
    }

    /// Record a failed sheet
    pub fn add_failure(&mut self, failure: SheetFailure) {
        self.failed_sheets.push(failure);
    }

    /// No sheet failed and the run was not cancelled
    pub fn is_successful(&self) -> bool {
        self.failed_sheets.is_empty() && !self.cancelled
    }

    /// Share of produced files among all attempted files, as a percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.succeeded_files.len() + self.failed_sheets.len();
        if total == 0 {
            return 100.0;
        }
        (self.succeeded_files.len() as f64 / total as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            batch_id = %self.batch_id,
            files = self.succeeded_files.len(),
            failed = self.failed_sheets.len(),
            cancelled = self.cancelled,
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Batch completed"
        );

        if !self.failed_sheets.is_empty() {
            tracing::warn!(
                failure_count = self.failed_sheets.len(),
                "Batch completed with failures"
            );
            for failure in &self.failed_sheets {
                tracing::warn!(
                    sheet_number = %failure.sheet.number,
                    sheet_id = %failure.sheet.id,
                    kind = ?failure.kind,
                    format = ?failure.format,
                    message = %failure.message,
                    "Sheet failed"
                );
            }
        }
    }
}
