//! Last-used export settings
//!
//! The naming rule, separator and output folder of the last successful
//! batch are remembered in a small JSON file and offered as defaults for
//! the next run. The file is a convenience: a missing, unreadable or
//! corrupt file behaves like an empty one, and a failed save is only
//! logged.

use crate::core::naming::DEFAULT_NAMING_RULE;
use crate::domain::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default separator offered when composing naming rules
pub const DEFAULT_SEPARATOR: &str = "-";

/// Settings remembered between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastUsedSettings {
    /// Naming rule of the last batch
    #[serde(default = "default_naming_rule")]
    pub naming_rule: String,

    /// Separator used when the rule was composed
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Output folder of the last batch
    #[serde(default)]
    pub output_folder: Option<PathBuf>,

    /// When the settings were saved
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for LastUsedSettings {
    fn default() -> Self {
        Self {
            naming_rule: default_naming_rule(),
            separator: default_separator(),
            output_folder: None,
            updated_at: None,
        }
    }
}

fn default_naming_rule() -> String {
    DEFAULT_NAMING_RULE.to_string()
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// JSON-file backed store for [`LastUsedSettings`]
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store for the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(&self) -> LastUsedSettings {
        if !self.path.exists() {
            return LastUsedSettings::default();
        }

        match self.read() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring unreadable settings file"
                );
                LastUsedSettings::default()
            }
        }
    }

    /// Save settings; failures are logged and otherwise ignored
    pub fn save(&self, settings: &LastUsedSettings) {
        match self.write(settings) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Saved last-used settings"),
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to save last-used settings"
            ),
        }
    }

    /// Record a finished batch
    pub fn remember(&self, naming_rule: &str, output_folder: &Path) {
        let mut settings = self.load();
        settings.naming_rule = naming_rule.to_string();
        settings.output_folder = Some(output_folder.to_path_buf());
        settings.updated_at = Some(Utc::now());
        self.save(&settings);
    }

    fn read(&self) -> Result<LastUsedSettings> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, settings: &LastUsedSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
