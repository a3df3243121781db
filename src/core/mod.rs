//! Core business logic for sheetbatch.
//!
//! # Modules
//!
//! - [`naming`] - Naming rule rendering and file name sanitization
//! - [`export`] - Batch orchestration, temp tokens and results
//! - [`reconcile`] - Locating and renaming host-written files
//! - [`state`] - Last-used settings persisted between runs
//!
//! # Export Workflow
//!
//! 1. **Plan**: decide on the combined PDF phase and per-item formats
//! 2. **Combined PDF** (optional): one host call with every sheet
//! 3. **Per item**: temp token, transactional export, reconciliation
//! 4. **Report**: return the [`export::BatchResult`]
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetbatch::adapters::host::{Exporter, ProgressSink, TransactionalUnit};
//! use sheetbatch::core::export::ExportOrchestrator;
//! use sheetbatch::domain::{ExportBatchSpec, ExportFormat, ProjectInfo, SheetRef};
//!
//! fn run(
//!     exporter: &mut dyn Exporter,
//!     transactions: &mut dyn TransactionalUnit,
//!     progress: &mut dyn ProgressSink,
//!     sheets: &[SheetRef],
//! ) -> sheetbatch::domain::Result<()> {
//!     let spec = ExportBatchSpec::new("/srv/exports", "{Sheet Number}", ExportFormat::Pdf);
//!     let result = ExportOrchestrator::new(exporter, transactions, progress)
//!         .execute(&spec, sheets, &ProjectInfo::default())?;
//!
//!     println!("Files: {}", result.succeeded_files.len());
//!     println!("Failed: {}", result.failed_sheets.len());
//!     Ok(())
//! }
//! ```

pub mod export;
pub mod naming;
pub mod reconcile;
pub mod state;
