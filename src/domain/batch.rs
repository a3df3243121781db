//! Export batch settings
//!
//! [`ExportBatchSpec`] is built once by the caller (CLI or embedding host)
//! and handed to the orchestrator. It carries the output folder, naming rule,
//! format selection and the rendering options the core passes through to the
//! host without interpreting them.

use super::errors::SheetBatchError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Requested output format(s)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PDF only
    #[default]
    Pdf,
    /// DWG only
    Dwg,
    /// PDF and DWG
    Both,
}

impl ExportFormat {
    /// Whether PDF output is requested
    pub fn includes_pdf(self) -> bool {
        matches!(self, ExportFormat::Pdf | ExportFormat::Both)
    }

    /// Whether DWG output is requested
    pub fn includes_dwg(self) -> bool {
        matches!(self, ExportFormat::Dwg | ExportFormat::Both)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Dwg => "dwg",
            ExportFormat::Both => "both",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ExportFormat {
    type Err = SheetBatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "dwg" => Ok(ExportFormat::Dwg),
            "both" => Ok(ExportFormat::Both),
            _ => Err(SheetBatchError::Validation(format!(
                "Invalid format '{s}'. Must be one of: pdf, dwg, both"
            ))),
        }
    }
}

/// Kind of file produced by a single export call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// PDF document
    Pdf,
    /// DWG drawing
    Dwg,
}

impl FileKind {
    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Dwg => "dwg",
        }
    }

    /// File name for a base name, e.g. `A101.pdf`
    pub fn file_name(self, base_name: &str) -> String {
        format!("{base_name}.{}", self.extension())
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// PDF colour depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorDepth {
    /// Full colour
    #[default]
    Color,
    /// Greyscale
    Grayscale,
    /// Black lines only
    BlackLine,
}

impl ColorDepth {
    /// Configuration/argument spelling
    pub fn as_str(self) -> &'static str {
        match self {
            ColorDepth::Color => "color",
            ColorDepth::Grayscale => "grayscale",
            ColorDepth::BlackLine => "black_line",
        }
    }
}

impl FromStr for ColorDepth {
    type Err = SheetBatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "color" => Ok(ColorDepth::Color),
            "grayscale" => Ok(ColorDepth::Grayscale),
            "black_line" => Ok(ColorDepth::BlackLine),
            _ => Err(SheetBatchError::Validation(format!(
                "Invalid color depth '{s}'. Must be one of: color, grayscale, black_line"
            ))),
        }
    }
}

/// PDF raster quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RasterQuality {
    Low,
    Medium,
    #[default]
    High,
    Presentation,
}

impl RasterQuality {
    /// Configuration/argument spelling
    pub fn as_str(self) -> &'static str {
        match self {
            RasterQuality::Low => "low",
            RasterQuality::Medium => "medium",
            RasterQuality::High => "high",
            RasterQuality::Presentation => "presentation",
        }
    }
}

impl FromStr for RasterQuality {
    type Err = SheetBatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RasterQuality::Low),
            "medium" => Ok(RasterQuality::Medium),
            "high" => Ok(RasterQuality::High),
            "presentation" => Ok(RasterQuality::Presentation),
            _ => Err(SheetBatchError::Validation(format!(
                "Invalid raster quality '{s}'. Must be one of: low, medium, high, presentation"
            ))),
        }
    }
}

/// Options forwarded to the host PDF exporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfOptions {
    pub color_depth: ColorDepth,
    pub raster_quality: RasterQuality,
    pub hide_scope_boxes: bool,
    pub hide_reference_planes: bool,
    /// Host keeps going after a sheet-level rendering error
    pub stop_on_error: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            color_depth: ColorDepth::default(),
            raster_quality: RasterQuality::default(),
            hide_scope_boxes: true,
            hide_reference_planes: true,
            stop_on_error: false,
        }
    }
}

/// Options forwarded to the host DWG exporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DwgOptions {
    /// Named export setup; host defaults are used when absent or unknown
    pub setup_name: Option<String>,
    /// Views on a sheet are merged into a single drawing
    pub merged_views: bool,
}

impl DwgOptions {
    /// Options for a named setup
    pub fn for_setup(setup_name: Option<String>) -> Self {
        Self {
            setup_name,
            merged_views: true,
        }
    }
}

impl Default for DwgOptions {
    fn default() -> Self {
        Self::for_setup(None)
    }
}

/// Batch configuration handed to the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBatchSpec {
    /// Absolute output folder; created when missing
    pub output_folder: PathBuf,

    /// Flat `{token}` naming template
    pub naming_rule: String,

    /// Combine all sheets into one PDF (DWG is never combined)
    pub combine: bool,

    /// Requested format(s)
    pub format: ExportFormat,

    /// PDF rendering options
    pub pdf: PdfOptions,

    /// DWG rendering options
    pub dwg: DwgOptions,

    /// Open the output folder when the batch finishes
    pub open_after: bool,
}

impl ExportBatchSpec {
    /// Creates a spec with default rendering options
    pub fn new(
        output_folder: impl Into<PathBuf>,
        naming_rule: impl Into<String>,
        format: ExportFormat,
    ) -> Self {
        Self {
            output_folder: output_folder.into(),
            naming_rule: naming_rule.into(),
            combine: false,
            format,
            pdf: PdfOptions::default(),
            dwg: DwgOptions::default(),
            open_after: false,
        }
    }

    /// Sets the combine flag
    pub fn combined(mut self, combine: bool) -> Self {
        self.combine = combine;
        self
    }

    /// Sets the DWG export setup name
    pub fn with_dwg_setup(mut self, setup_name: impl Into<String>) -> Self {
        self.dwg = DwgOptions::for_setup(Some(setup_name.into()));
        self
    }

    /// Sets the PDF options
    pub fn with_pdf_options(mut self, pdf: PdfOptions) -> Self {
        self.pdf = pdf;
        self
    }

    /// Validates the batch settings
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the output folder is empty or
    /// relative, or names an existing non-directory.
    pub fn validate(&self) -> Result<()> {
        if self.output_folder.as_os_str().is_empty() {
            return Err(SheetBatchError::Configuration(
                "output folder cannot be empty".to_string(),
            ));
        }

        if !self.output_folder.is_absolute() {
            return Err(SheetBatchError::Configuration(format!(
                "output folder must be an absolute path, got {}",
                self.output_folder.display()
            )));
        }

        if self.output_folder.exists() && !self.output_folder.is_dir() {
            return Err(SheetBatchError::Configuration(format!(
                "output folder {} exists but is not a directory",
                self.output_folder.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_format_flags() {
        assert!(ExportFormat::Pdf.includes_pdf());
        assert!(!ExportFormat::Pdf.includes_dwg());
        assert!(!ExportFormat::Dwg.includes_pdf());
        assert!(ExportFormat::Dwg.includes_dwg());
        assert!(ExportFormat::Both.includes_pdf());
        assert!(ExportFormat::Both.includes_dwg());
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!(ExportFormat::from_str("PDF").unwrap(), ExportFormat::Pdf);
        assert_eq!(ExportFormat::from_str("both").unwrap(), ExportFormat::Both);
        assert!(ExportFormat::from_str("svg").is_err());
    }

    #[test]
    fn test_pdf_option_enums_from_str() {
        assert_eq!(ColorDepth::from_str("black_line").unwrap(), ColorDepth::BlackLine);
        assert_eq!(
            RasterQuality::from_str("Presentation").unwrap(),
            RasterQuality::Presentation
        );
        assert!(ColorDepth::from_str("sepia").is_err());
        assert!(RasterQuality::from_str("ultra").is_err());
    }

    #[test]
    fn test_file_kind_file_name() {
        assert_eq!(FileKind::Pdf.file_name("A101"), "A101.pdf");
        assert_eq!(FileKind::Dwg.file_name("A101-Floor Plan"), "A101-Floor Plan.dwg");
    }

    #[test]
    fn test_dwg_options_always_merge_views() {
        assert!(DwgOptions::default().merged_views);
        assert!(DwgOptions::for_setup(Some("AIA".to_string())).merged_views);
    }

    #[test]
    fn test_spec_validate_relative_folder() {
        let spec = ExportBatchSpec::new("relative/out", "{Sheet Number}", ExportFormat::Pdf);
        assert!(matches!(
            spec.validate(),
            Err(SheetBatchError::Configuration(_))
        ));
    }

    #[test]
    fn test_spec_validate_missing_folder_is_creatable() {
        let temp_dir = TempDir::new().unwrap();
        let spec = ExportBatchSpec::new(
            temp_dir.path().join("not-yet"),
            "{Sheet Number}",
            ExportFormat::Pdf,
        );
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_spec_validate_file_in_place_of_folder() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("out");
        std::fs::write(&file, b"x").unwrap();

        let spec = ExportBatchSpec::new(file, "{Sheet Number}", ExportFormat::Pdf);
        assert!(spec.validate().is_err());
    }
}
