//! Exporter backed by an external bridge program
//!
//! Every export call runs `host.program` once, with arguments expanded from
//! the configured templates. Placeholders:
//!
//! | Placeholder               | Value                                        |
//! |---------------------------|----------------------------------------------|
//! | `{folder}`                | output folder                                |
//! | `{name}`                  | combined name, or the per-sheet name hint    |
//! | `{sheet}`                 | host sheet id                                |
//! | `{sheets}`                | comma-separated sheet ids (combined only)    |
//! | `{color_depth}`           | `color`, `grayscale` or `black_line`         |
//! | `{raster_quality}`        | `low`, `medium`, `high` or `presentation`    |
//! | `{hide_scope_boxes}`      | `true` / `false`                             |
//! | `{hide_reference_planes}` | `true` / `false`                             |
//! | `{dwg_setup}`             | named DWG setup, empty when unset            |
//! | `{merged_views}`          | `true` / `false`                             |
//!
//! Unknown placeholders are passed through unchanged.

use crate::adapters::host::Exporter;
use crate::config::HostConfig;
use crate::core::naming::expand_tokens;
use crate::domain::{DwgOptions, HostError, PdfOptions, SheetId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs the bridge program for every export call
#[derive(Debug, Clone)]
pub struct CommandExporter {
    program: String,
    combined_args: Vec<String>,
    pdf_args: Vec<String>,
    dwg_args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandExporter {
    /// Create an exporter from the `[host]` section
    pub fn from_config(config: &HostConfig) -> Self {
        Self {
            program: config.program.clone(),
            combined_args: config.combined_args.clone(),
            pdf_args: config.pdf_args.clone(),
            dwg_args: config.dwg_args.clone(),
            working_dir: config.working_dir.as_ref().map(PathBuf::from),
        }
    }

    fn run(&self, operation: &str, template: &[String], values: &HashMap<&str, String>) -> Result<(), HostError> {
        let args = expand_args(template, values);
        tracing::debug!(program = %self.program, operation, args = ?args, "Invoking host bridge");

        let mut command = Command::new(&self.program);
        command.args(&args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|e| {
            HostError::Unavailable(format!("Failed to start {}: {e}", self.program))
        })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr.trim();
        tracing::warn!(
            program = %self.program,
            operation,
            status = ?output.status,
            stderr = %detail,
            "Host bridge reported failure"
        );

        Err(HostError::ExportFailed(if detail.is_empty() {
            format!("{operation}: {} exited with {}", self.program, output.status)
        } else {
            format!("{operation}: {} exited with {}: {detail}", self.program, output.status)
        }))
    }
}

impl Exporter for CommandExporter {
    fn export_combined(
        &mut self,
        folder: &Path,
        name: &str,
        sheets: &[SheetId],
        options: &PdfOptions,
    ) -> Result<(), HostError> {
        let mut values = pdf_values(folder, name, options);
        let ids: Vec<&str> = sheets.iter().map(SheetId::as_str).collect();
        values.insert("sheets", ids.join(","));
        self.run("export-combined", &self.combined_args, &values)
    }

    fn export_pdf(
        &mut self,
        folder: &Path,
        name_hint: &str,
        sheet: &SheetId,
        options: &PdfOptions,
    ) -> Result<(), HostError> {
        let mut values = pdf_values(folder, name_hint, options);
        values.insert("sheet", sheet.to_string());
        self.run("export-pdf", &self.pdf_args, &values)
    }

    fn export_dwg(
        &mut self,
        folder: &Path,
        name_hint: &str,
        sheet: &SheetId,
        options: &DwgOptions,
    ) -> Result<(), HostError> {
        let mut values = base_values(folder, name_hint);
        values.insert("sheet", sheet.to_string());
        values.insert("dwg_setup", options.setup_name.clone().unwrap_or_default());
        values.insert("merged_views", options.merged_views.to_string());
        self.run("export-dwg", &self.dwg_args, &values)
    }
}

fn base_values(folder: &Path, name: &str) -> HashMap<&'static str, String> {
    HashMap::from([
        ("folder", folder.display().to_string()),
        ("name", name.to_string()),
    ])
}

fn pdf_values(folder: &Path, name: &str, options: &PdfOptions) -> HashMap<&'static str, String> {
    let mut values = base_values(folder, name);
    values.insert("color_depth", options.color_depth.as_str().to_string());
    values.insert("raster_quality", options.raster_quality.as_str().to_string());
    values.insert("hide_scope_boxes", options.hide_scope_boxes.to_string());
    values.insert("hide_reference_planes", options.hide_reference_planes.to_string());
    values
}

/// Expand every argument template
fn expand_args(template: &[String], values: &HashMap<&str, String>) -> Vec<String> {
    template
        .iter()
        .map(|arg| {
            expand_tokens(arg, |name| match values.get(name) {
                Some(value) => value.clone(),
                None => format!("{{{name}}}"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColorDepth, RasterQuality};

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_expand_args() {
        let values = base_values(Path::new("/out"), "SBTMP_ABCD1234");
        let expanded = expand_args(&args(&["--out={folder}/{name}.pdf", "{unknown}"]), &values);
        assert_eq!(
            expanded,
            vec!["--out=/out/SBTMP_ABCD1234.pdf".to_string(), "{unknown}".to_string()]
        );
    }

    #[test]
    fn test_pdf_values() {
        let options = PdfOptions {
            color_depth: ColorDepth::BlackLine,
            raster_quality: RasterQuality::Presentation,
            ..PdfOptions::default()
        };
        let values = pdf_values(Path::new("/out"), "A101", &options);

        assert_eq!(values["color_depth"], "black_line");
        assert_eq!(values["raster_quality"], "presentation");
        assert_eq!(values["hide_reference_planes"], "true");
    }

    fn exporter(program: &str, pdf_args: &[&str]) -> CommandExporter {
        CommandExporter {
            program: program.to_string(),
            combined_args: Vec::new(),
            pdf_args: args(pdf_args),
            dwg_args: Vec::new(),
            working_dir: None,
        }
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let mut exporter = exporter("sheetbatch-no-such-bridge-program", &[]);
        let sheet = SheetId::new("1").unwrap();

        let result = exporter.export_pdf(Path::new("/tmp"), "A101", &sheet, &PdfOptions::default());
        assert!(matches!(result, Err(HostError::Unavailable(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_export_failure() {
        let mut exporter = exporter("sh", &["-c", "echo 'sheet {sheet} not printable' >&2; exit 3"]);
        let sheet = SheetId::new("312047").unwrap();

        let err = exporter
            .export_pdf(Path::new("/tmp"), "A101", &sheet, &PdfOptions::default())
            .unwrap_err();
        assert!(matches!(err, HostError::ExportFailed(_)));
        assert!(err.to_string().contains("sheet 312047 not printable"));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_bridge_writes_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut exporter = exporter("sh", &["-c", "printf pdf > '{folder}/{name}.pdf'"]);
        let sheet = SheetId::new("312047").unwrap();

        exporter
            .export_pdf(temp_dir.path(), "SBTMP_ABCD1234", &sheet, &PdfOptions::default())
            .unwrap();
        assert!(temp_dir.path().join("SBTMP_ABCD1234.pdf").exists());
    }
}
