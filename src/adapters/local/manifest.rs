//! Sheet manifest
//!
//! The host side of the bridge describes the project and its sheets in a
//! TOML file:
//!
//! ```toml
//! [project]
//! number = "P-204"
//! name = "Harbour Tower"
//!
//! [[sheets]]
//! id = "312047"
//! number = "A101"
//! name = "Floor Plan"
//! attributes = { "Drawn By" = "JD" }
//! ```
//!
//! Sheet order in the file is the export order.

use crate::domain::{ProjectInfo, Result, SheetBatchError, SheetRef};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Project and sheets exposed by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetManifest {
    /// Project-level information
    #[serde(default)]
    pub project: ProjectInfo,

    /// Sheets in export order
    #[serde(default)]
    pub sheets: Vec<SheetRef>,
}

impl SheetManifest {
    /// Load and validate a manifest file
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file is missing, is not valid
    /// TOML, or contains blank or duplicate sheet ids.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            SheetBatchError::Configuration(format!(
                "Failed to read sheet manifest {}: {e}",
                path.display()
            ))
        })?;

        let manifest = Self::parse(&contents)?;
        tracing::debug!(
            path = %path.display(),
            sheet_count = manifest.sheets.len(),
            "Loaded sheet manifest"
        );
        Ok(manifest)
    }

    /// Parse and validate manifest text
    pub fn parse(contents: &str) -> Result<Self> {
        let manifest: SheetManifest = toml::from_str(contents)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for sheet in &self.sheets {
            if sheet.id.as_str().trim().is_empty() {
                return Err(SheetBatchError::Configuration(format!(
                    "Sheet '{}' in manifest has an empty id",
                    sheet.number
                )));
            }
            if !seen.insert(sheet.id.as_str()) {
                return Err(SheetBatchError::Configuration(format!(
                    "Duplicate sheet id '{}' in manifest",
                    sheet.id
                )));
            }
        }
        Ok(())
    }

    /// Sheets whose number is listed in `numbers`, in manifest order
    ///
    /// An empty selection returns every sheet.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming every requested number that is
    /// not in the manifest.
    pub fn select(&self, numbers: &[String]) -> Result<Vec<SheetRef>> {
        if numbers.is_empty() {
            return Ok(self.sheets.clone());
        }

        let unknown: Vec<&str> = numbers
            .iter()
            .map(String::as_str)
            .filter(|number| !self.sheets.iter().any(|sheet| sheet.number == *number))
            .collect();
        if !unknown.is_empty() {
            return Err(SheetBatchError::Configuration(format!(
                "Unknown sheet numbers: {}",
                unknown.join(", ")
            )));
        }

        Ok(self
            .sheets
            .iter()
            .filter(|sheet| numbers.contains(&sheet.number))
            .cloned()
            .collect())
    }
}
