//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output on stderr
//! - JSON-formatted log files with daily or hourly rotation
//! - Configurable log levels, overridable with `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use sheetbatch::logging::init_logging;
//! use sheetbatch::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(sheet_number = "A101", "Exported sheet");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a batch
///
/// # Example
///
/// ```no_run
/// use sheetbatch::log_batch_start;
/// use sheetbatch::domain::{BatchId, ExportFormat};
///
/// let batch_id = BatchId::generate();
/// log_batch_start!(batch_id, 12, ExportFormat::Both, false);
/// ```
#[macro_export]
macro_rules! log_batch_start {
    ($batch_id:expr, $sheet_count:expr, $format:expr, $combine:expr) => {
        tracing::info!(
            batch_id = %$batch_id,
            sheet_count = $sheet_count,
            format = %$format,
            combine = $combine,
            "Starting batch export"
        );
    };
}

/// Log per-sheet progress
///
/// # Example
///
/// ```no_run
/// use sheetbatch::log_item_progress;
///
/// log_item_progress!(3, 12, "A103");
/// ```
#[macro_export]
macro_rules! log_item_progress {
    ($current:expr, $total:expr, $sheet_number:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            sheet_number = %$sheet_number,
            "Processing sheet"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use sheetbatch::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "file in use by another process");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = $reason,
            "Retrying operation"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{BatchId, ExportFormat};

    #[test]
    fn test_macros_expand() {
        let batch_id = BatchId::generate();
        crate::log_batch_start!(batch_id, 3, ExportFormat::Pdf, false);
        crate::log_item_progress!(1, 3, "A101");
        crate::log_retry_attempt!(1, 3, "locked");
    }
}
