//! Configuration management for sheetbatch.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! sheetbatch uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment overrides (`SHEETBATCH_<SECTION>_<KEY>`)
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sheetbatch::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sheetbatch.toml")?;
//!
//! println!("Host program: {}", config.host.program);
//! println!("Format: {}", config.export.format);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and settings file location
//! - [`ExportConfig`] - Output folder, naming rule, format, PDF options
//! - [`ReconcileConfig`] - Grace period, backoff and rename attempts
//! - [`HostConfig`] - Sheet manifest and bridge program
//! - [`LoggingConfig`] - Local log files
//!
//! # Example Configuration
//!
//! ```toml
//! [export]
//! output_folder = "${SHEETBATCH_OUT}"
//! naming_rule = "{Sheet Number}-{Sheet Name}"
//! format = "both"
//!
//! [export.pdf]
//! color_depth = "black_line"
//!
//! [host]
//! manifest = "sheets.toml"
//! program = "host-bridge"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ExportConfig, HostConfig, LoggingConfig, PdfConfig, ReconcileConfig,
    SheetBatchConfig,
};
