//! Naming rule engine
//!
//! Turns a flat `{token}` template into a filesystem-safe base name:
//!
//! - [`NamingRule`] / [`render`] resolve each `{Token Name}` segment against
//!   the sheet, then the project, then `"Unknown"`
//! - [`sanitize`] replaces characters that are illegal in file names
//! - [`expand_tokens`] is the raw substitution shared with the host bridge
//!
//! Rendering is pure: no I/O and no host access.
//!
//! # Example
//!
//! ```rust
//! use sheetbatch::core::naming::{render, sanitize};
//! use sheetbatch::domain::{ProjectInfo, SheetId, SheetRef};
//!
//! let sheet = SheetRef::new(SheetId::new("1001").unwrap(), "A101", "Floor Plan");
//! let project = ProjectInfo::new("P-204", "Harbour Tower");
//!
//! assert_eq!(render("{Sheet Number}-{Sheet Name}", Some(&sheet), &project), "A101-Floor Plan");
//! assert_eq!(sanitize("A101/B: Plan?"), "A101_B_ Plan_");
//! ```

pub mod rule;
pub mod sanitize;

pub use rule::{
    expand_tokens, render, NamingRule, DEFAULT_FALLBACK_LABEL, DEFAULT_NAMING_RULE,
    PROJECT_NAME_TOKEN, PROJECT_NUMBER_TOKEN, SHEET_NAME_TOKEN, SHEET_NUMBER_TOKEN,
    UNKNOWN_TOKEN_VALUE,
};
pub use sanitize::{is_valid_file_name_char, sanitize};
