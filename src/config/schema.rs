//! Configuration schema types
//!
//! This module defines the configuration structure for sheetbatch.

use crate::domain::{ColorDepth, ExportFormat, PdfOptions, RasterQuality};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Upper bound for the reconcile delays, in milliseconds
pub const MAX_RECONCILE_DELAY_MS: u64 = 10_000;

/// Upper bound for rename attempts
pub const MAX_RECONCILE_ATTEMPTS: u32 = 10;

/// Main sheetbatch configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetBatchConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Reconciliation timing
    #[serde(default)]
    pub reconcile: ReconcileConfig,

    /// Host bridge settings
    pub host: HostConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SheetBatchConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.reconcile.validate()?;
        self.host.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Where last-used export settings are remembered
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        if self.settings_path.trim().is_empty() {
            return Err("application.settings_path cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            settings_path: default_settings_path(),
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output folder; the last-used folder is offered when absent
    #[serde(default)]
    pub output_folder: Option<String>,

    /// Naming rule; the last-used rule is offered when absent
    #[serde(default)]
    pub naming_rule: Option<String>,

    /// Combine all sheets into one PDF
    #[serde(default)]
    pub combine: bool,

    /// Output format (pdf, dwg, both)
    #[serde(default = "default_format")]
    pub format: String,

    /// Named DWG export setup
    #[serde(default)]
    pub dwg_setup: Option<String>,

    /// Open the output folder when the batch finishes
    #[serde(default)]
    pub open_after: bool,

    /// PDF rendering options
    #[serde(default)]
    pub pdf: PdfConfig,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(folder) = &self.output_folder {
            if folder.trim().is_empty() {
                return Err("export.output_folder cannot be empty".to_string());
            }
        }

        self.export_format()?;

        if let Some(setup) = &self.dwg_setup {
            if setup.trim().is_empty() {
                return Err("export.dwg_setup cannot be empty when set".to_string());
            }
        }

        self.pdf.validate()
    }

    /// Parsed output format
    pub fn export_format(&self) -> Result<ExportFormat, String> {
        ExportFormat::from_str(&self.format).map_err(|e| format!("export.format: {e}"))
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_folder: None,
            naming_rule: None,
            combine: false,
            format: default_format(),
            dwg_setup: None,
            open_after: false,
            pdf: PdfConfig::default(),
        }
    }
}

/// PDF rendering options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Colour depth (color, grayscale, black_line)
    #[serde(default = "default_color_depth")]
    pub color_depth: String,

    /// Raster quality (low, medium, high, presentation)
    #[serde(default = "default_raster_quality")]
    pub raster_quality: String,

    /// Hide scope boxes in the output
    #[serde(default = "default_true")]
    pub hide_scope_boxes: bool,
}

impl PdfConfig {
    fn validate(&self) -> Result<(), String> {
        self.to_options().map(|_| ())
    }

    /// Options handed to the host exporter
    pub fn to_options(&self) -> Result<PdfOptions, String> {
        let color_depth = ColorDepth::from_str(&self.color_depth)
            .map_err(|e| format!("export.pdf.color_depth: {e}"))?;
        let raster_quality = RasterQuality::from_str(&self.raster_quality)
            .map_err(|e| format!("export.pdf.raster_quality: {e}"))?;

        Ok(PdfOptions {
            color_depth,
            raster_quality,
            hide_scope_boxes: self.hide_scope_boxes,
            ..PdfOptions::default()
        })
    }
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            color_depth: default_color_depth(),
            raster_quality: default_raster_quality(),
            hide_scope_boxes: true,
        }
    }
}

/// Reconciliation timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Grace period before the output folder is scanned
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Wait between rename attempts
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Total rename attempts
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl ReconcileConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 || self.max_attempts > MAX_RECONCILE_ATTEMPTS {
            return Err(format!(
                "reconcile.max_attempts must be between 1 and {MAX_RECONCILE_ATTEMPTS}"
            ));
        }

        if self.initial_delay_ms > MAX_RECONCILE_DELAY_MS {
            return Err(format!(
                "reconcile.initial_delay_ms must be <= {MAX_RECONCILE_DELAY_MS}"
            ));
        }

        if self.retry_backoff_ms > MAX_RECONCILE_DELAY_MS {
            return Err(format!(
                "reconcile.retry_backoff_ms must be <= {MAX_RECONCILE_DELAY_MS}"
            ));
        }

        Ok(())
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            retry_backoff_ms: default_retry_backoff_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Host bridge settings
///
/// Argument templates use the same `{token}` syntax as naming rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Sheet manifest (TOML) describing the project and its sheets
    pub manifest: String,

    /// Bridge program invoked for every export call
    pub program: String,

    /// Arguments for a combined PDF export
    #[serde(default = "default_combined_args")]
    pub combined_args: Vec<String>,

    /// Arguments for a single-sheet PDF export
    #[serde(default = "default_pdf_args")]
    pub pdf_args: Vec<String>,

    /// Arguments for a single-sheet DWG export
    #[serde(default = "default_dwg_args")]
    pub dwg_args: Vec<String>,

    /// Working directory of the bridge program
    #[serde(default)]
    pub working_dir: Option<String>,
}

impl HostConfig {
    fn validate(&self) -> Result<(), String> {
        if self.manifest.trim().is_empty() {
            return Err("host.manifest cannot be empty".to_string());
        }

        if self.program.trim().is_empty() {
            return Err("host.program cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in MB
    #[serde(default = "default_local_max_size_mb")]
    pub local_max_size_mb: usize,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_max_size_mb == 0 {
            return Err("logging.local_max_size_mb must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            local_max_size_mb: default_local_max_size_mb(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_settings_path() -> String {
    ".sheetbatch/settings.json".to_string()
}

fn default_format() -> String {
    "pdf".to_string()
}

fn default_color_depth() -> String {
    "color".to_string()
}

fn default_raster_quality() -> String {
    "high".to_string()
}

fn default_true() -> bool {
    true
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_retry_backoff_ms() -> u64 {
    1500
}

fn default_max_attempts() -> u32 {
    3
}

fn default_combined_args() -> Vec<String> {
    [
        "export-combined",
        "--folder",
        "{folder}",
        "--name",
        "{name}",
        "--sheets",
        "{sheets}",
        "--color",
        "{color_depth}",
        "--quality",
        "{raster_quality}",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_pdf_args() -> Vec<String> {
    [
        "export-pdf",
        "--folder",
        "{folder}",
        "--name",
        "{name}",
        "--sheet",
        "{sheet}",
        "--color",
        "{color_depth}",
        "--quality",
        "{raster_quality}",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_dwg_args() -> Vec<String> {
    [
        "export-dwg",
        "--folder",
        "{folder}",
        "--prefix",
        "{name}",
        "--sheet",
        "{sheet}",
        "--setup",
        "{dwg_setup}",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_local_max_size_mb() -> usize {
    100
}
