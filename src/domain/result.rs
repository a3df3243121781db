//! Result type alias for sheetbatch
//!
//! This module provides a convenient Result type alias that uses
//! SheetBatchError as the error type.

use super::errors::SheetBatchError;

/// Result type alias for sheetbatch operations
///
/// # Examples
///
/// ```
/// use sheetbatch::domain::result::Result;
/// use sheetbatch::domain::errors::SheetBatchError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(SheetBatchError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, SheetBatchError>;
