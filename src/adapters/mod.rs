//! External system integrations for sheetbatch.
//!
//! - [`host`] - Traits the export core is written against
//! - [`local`] - Command-line bridge implementing those traits
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate the modeling host and
//! enable testing with mock implementations. The core only ever sees the
//! [`host`] traits.
//!
//! ```rust,no_run
//! use sheetbatch::adapters::local::{CommandExporter, ConsoleProgress, SessionTransactions};
//! use sheetbatch::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sheetbatch.toml")?;
//!
//! let mut exporter = CommandExporter::from_config(&config.host);
//! let mut transactions = SessionTransactions::new();
//! let mut progress = ConsoleProgress::stdout();
//! # Ok(())
//! # }
//! ```

pub mod host;
pub mod local;
