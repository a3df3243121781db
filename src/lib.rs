// Sheetbatch - Batch sheet export pipeline
// Copyright (c) 2025 Sheetbatch Contributors
// Licensed under the MIT License

//! # Sheetbatch - Batch sheet export
//!
//! Sheetbatch exports a selected set of drawing sheets from a host modeling
//! application to PDF and/or DWG files, naming every file from a
//! user-defined template such as `{Sheet Number}-{Sheet Name}`.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Naming** output files from sheet and project attributes
//! - **Orchestrating** a combined-PDF phase and a per-sheet phase
//! - **Reconciling** files the host wrote under names of its own choosing
//! - **Reporting** per-sheet failures without aborting the batch
//!
//! ## Architecture
//!
//! Sheetbatch follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (naming, export orchestration, reconciliation, settings)
//! - [`adapters`] - Host collaborator traits and the local command bridge
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sheetbatch::adapters::local::{
//!     CommandExporter, ConsoleProgress, SessionTransactions, SheetManifest,
//! };
//! use sheetbatch::config::load_config;
//! use sheetbatch::core::export::ExportOrchestrator;
//! use sheetbatch::domain::{ExportBatchSpec, ExportFormat};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sheetbatch.toml")?;
//! let manifest = SheetManifest::load(&config.host.manifest)?;
//!
//! let spec = ExportBatchSpec::new("/srv/exports", "{Sheet Number}-{Sheet Name}", ExportFormat::Pdf);
//!
//! let mut exporter = CommandExporter::from_config(&config.host);
//! let mut transactions = SessionTransactions::new();
//! let mut progress = ConsoleProgress::stdout();
//! let result = ExportOrchestrator::new(&mut exporter, &mut transactions, &mut progress)
//!     .execute(&spec, &manifest.sheets, &manifest.project)?;
//!
//! println!("Exported {} files", result.succeeded_files.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Naming Rules
//!
//! Tokens resolve against the sheet first, then the project; unresolved
//! tokens become `Unknown`, and the result is sanitized for the file system:
//!
//! ```rust
//! use sheetbatch::core::naming::NamingRule;
//! use sheetbatch::domain::{ProjectInfo, SheetId, SheetRef};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sheet = SheetRef::new(SheetId::new("1001")?, "A101", "Floor Plan");
//! let project = ProjectInfo::new("P-204", "Harbour Tower");
//!
//! let rule = NamingRule::new("{Project Number}_{Sheet Number}-{Sheet Name}");
//! assert_eq!(rule.file_base_name(Some(&sheet), &project), "P-204_A101-Floor Plan");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Batch-fatal problems are returned as [`domain::SheetBatchError`]. Per-sheet
//! failures never abort the batch; they are collected in
//! [`core::export::BatchResult::failed_sheets`].
//!
//! ## Logging
//!
//! Sheetbatch uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! tracing::info!(sheet_number = "A101", temp_token = "SBTMP_7K3M9QXA", "Exported sheet");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
