//! Domain models and types for sheetbatch.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`SheetId`], [`TempToken`], [`BatchId`])
//! - **Host models** ([`SheetRef`], [`ProjectInfo`], [`AttributeProvider`])
//! - **Batch specification** ([`ExportBatchSpec`], [`ExportFormat`], [`FileKind`])
//! - **Error types** ([`SheetBatchError`], [`HostError`], [`ReconcileError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use sheetbatch::domain::{ExportBatchSpec, ExportFormat, SheetId, SheetRef};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sheet = SheetRef::new(SheetId::new("1001")?, "A101", "Floor Plan")
//!     .with_attribute("Drawn By", "JD");
//!
//! let spec = ExportBatchSpec::new("/srv/exports", "{Sheet Number}-{Sheet Name}", ExportFormat::Both)
//!     .with_dwg_setup("AIA Layers");
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod errors;
pub mod ids;
pub mod result;
pub mod sheet;

// Re-export commonly used types for convenience
pub use batch::{
    ColorDepth, DwgOptions, ExportBatchSpec, ExportFormat, FileKind, PdfOptions, RasterQuality,
};
pub use errors::{HostError, ReconcileError, SheetBatchError};
pub use ids::{BatchId, SheetId, TempToken, TEMP_TOKEN_PREFIX};
pub use result::Result;
pub use sheet::{AttributeProvider, ProjectInfo, SheetRef};
