//! Export command implementation
//!
//! This module implements the `export` command, which exports the sheets
//! listed in the manifest through the configured host bridge program.

use crate::adapters::local::{
    open_folder, CommandExporter, ConsoleProgress, SessionTransactions, SheetManifest,
};
use crate::cli::{EXIT_CONFIG, EXIT_FATAL, EXIT_INTERRUPTED, EXIT_PARTIAL, EXIT_SUCCESS};
use crate::config::{load_config, ExportConfig};
use crate::core::export::{BatchPlan, BatchResult, CancellationFlag, ExportOrchestrator};
use crate::core::reconcile::{FileReconciler, ReconcilePolicy};
use crate::core::state::SettingsStore;
use crate::domain::{ExportBatchSpec, SheetBatchError};
use clap::Args;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Maximum number of failures listed in the console summary
const MAX_LISTED_FAILURES: usize = 10;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - print the planned files without calling the host
    #[arg(long)]
    pub dry_run: bool,

    /// Override the output folder
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<String>,

    /// Override the naming rule, e.g. "{Sheet Number}-{Sheet Name}"
    #[arg(short, long, value_name = "RULE")]
    pub rule: Option<String>,

    /// Combine all sheets into a single PDF
    #[arg(long)]
    pub combine: bool,

    /// Override the export format (pdf, dwg or both)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Sheet numbers to export (comma-separated); all sheets when omitted
    #[arg(long, value_name = "NUMBERS")]
    pub sheets: Option<String>,

    /// Open the output folder when the batch finishes
    #[arg(long)]
    pub open_after: bool,
}

impl ExportArgs {
    /// Sheet numbers requested with `--sheets`
    pub fn sheet_numbers(&self) -> Vec<String> {
        self.sheets
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str, cancel: CancellationFlag) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
        };

        // Apply CLI overrides
        if let Some(format) = &self.format {
            tracing::info!(format = %format, "Overriding export format from CLI");
            config.export.format = format.clone();
        }
        if self.combine {
            tracing::info!("Enabling combined PDF from CLI");
            config.export.combine = true;
        }
        if self.open_after {
            config.export.open_after = true;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let settings = SettingsStore::new(&config.application.settings_path);
        let last_used = settings.load();

        let Some(output_folder) = resolve_output_folder(
            self.output.as_deref(),
            config.export.output_folder.as_deref(),
            last_used.output_folder.as_deref(),
        ) else {
            eprintln!("No output folder configured. Use --output or set export.output_folder.");
            return Ok(EXIT_CONFIG);
        };
        let output_folder = absolutize(&output_folder)?;

        let naming_rule = self
            .rule
            .clone()
            .or_else(|| config.export.naming_rule.clone())
            .unwrap_or(last_used.naming_rule);

        let spec = match build_batch_spec(&config.export, output_folder, naming_rule) {
            Ok(spec) => spec,
            Err(e) => {
                eprintln!("Invalid export settings: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let manifest = match SheetManifest::load(&config.host.manifest) {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::error!(manifest = %config.host.manifest, error = %e, "Failed to load sheet manifest");
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
        };
        let sheets = match manifest.select(&self.sheet_numbers()) {
            Ok(sheets) => sheets,
            Err(e) => {
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
        };
        let project = manifest.project;

        let plan = BatchPlan::from_spec(&spec);

        if self.dry_run {
            tracing::info!("Dry run mode enabled - the host will not be called");
            println!("🔍 DRY RUN MODE - No files will be exported");
            println!();
            print_plan(&spec, &plan, sheets.len());
            for path in plan.planned_files(&spec.output_folder, &sheets, &project) {
                println!("  {}", path.display());
            }
            return Ok(EXIT_SUCCESS);
        }

        // Confirmation prompt (unless --yes)
        if !self.yes {
            println!("Export Configuration:");
            print_plan(&spec, &plan, sheets.len());
            println!();
            print!("Proceed with export? [y/N]: ");
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(EXIT_SUCCESS);
            }
        }

        println!("🚀 Starting export...");
        println!();

        let host = config.host.clone();
        let policy = ReconcilePolicy::from_config(&config.reconcile);
        let run_spec = spec.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            let mut exporter = CommandExporter::from_config(&host);
            let mut transactions = SessionTransactions::new();
            let mut progress = ConsoleProgress::stdout();
            ExportOrchestrator::new(&mut exporter, &mut transactions, &mut progress)
                .with_reconciler(FileReconciler::new(policy))
                .with_cancellation(cancel)
                .execute(&run_spec, &sheets, &project)
        })
        .await?;

        let result = match outcome {
            Ok(result) => result,
            Err(e @ SheetBatchError::Configuration(_)) => {
                tracing::error!(error = %e, "Batch did not start");
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        print_summary(&result);

        if !result.succeeded_files.is_empty() {
            settings.remember(&spec.naming_rule, &spec.output_folder);
        }

        if spec.open_after && !result.cancelled {
            open_folder(&spec.output_folder);
        }

        Ok(exit_code_for(&result))
    }
}

/// Pick the output folder: CLI flag, then config, then the last run
fn resolve_output_folder(
    from_args: Option<&str>,
    from_config: Option<&str>,
    last_used: Option<&Path>,
) -> Option<PathBuf> {
    from_args
        .or(from_config)
        .map(PathBuf::from)
        .or_else(|| last_used.map(Path::to_path_buf))
        .filter(|path| !path.as_os_str().is_empty())
}

/// Relative folders are taken relative to the working directory
fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Build the batch spec from the export section and the resolved folder and rule
fn build_batch_spec(
    export: &ExportConfig,
    output_folder: PathBuf,
    naming_rule: String,
) -> Result<ExportBatchSpec, String> {
    let mut spec = ExportBatchSpec::new(output_folder, naming_rule, export.export_format()?)
        .combined(export.combine)
        .with_pdf_options(export.pdf.to_options()?);

    if let Some(setup) = &export.dwg_setup {
        spec = spec.with_dwg_setup(setup.as_str());
    }
    spec.open_after = export.open_after;

    Ok(spec)
}

fn print_plan(spec: &ExportBatchSpec, plan: &BatchPlan, sheet_count: usize) {
    println!("  Output folder: {}", spec.output_folder.display());
    println!("  Naming rule: {}", spec.naming_rule);
    println!("  Format: {}", spec.format);
    println!("  Sheets: {sheet_count}");
    println!(
        "  Combined PDF: {}",
        if plan.combined_pdf { "yes" } else { "no" }
    );
    if plan.has_per_item_phase() {
        let formats: Vec<&str> = plan.per_item_formats.iter().map(|k| k.extension()).collect();
        println!("  Per-sheet files: {}", formats.join(", "));
    }
}

fn print_summary(result: &BatchResult) {
    println!();
    println!("📊 Export Summary:");
    println!("  Batch: {}", result.batch_id);
    println!("  Files written: {}", result.succeeded_files.len());
    println!("  Failed sheets: {}", result.failed_sheets.len());
    println!("  Duration: {:.2}s", result.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", result.success_rate());
    println!();

    if !result.failed_sheets.is_empty() {
        println!("⚠️  Failures:");
        for failure in result.failed_sheets.iter().take(MAX_LISTED_FAILURES) {
            println!("  - {failure}");
        }
        if result.failed_sheets.len() > MAX_LISTED_FAILURES {
            println!(
                "  ... and {} more failures",
                result.failed_sheets.len() - MAX_LISTED_FAILURES
            );
        }
        println!();
    }

    if result.cancelled {
        println!("⚠️  Export cancelled. Remaining sheets were not exported.");
    } else if result.is_successful() {
        println!("✅ Export completed successfully!");
    } else {
        println!("⚠️  Export completed with failures");
    }
}

/// Exit code for a batch that ran to completion or was cancelled
fn exit_code_for(result: &BatchResult) -> i32 {
    if result.cancelled {
        EXIT_INTERRUPTED
    } else if result.failed_sheets.is_empty() {
        EXIT_SUCCESS
    } else {
        EXIT_PARTIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::SheetFailure;
    use crate::domain::{BatchId, ExportFormat, HostError, SheetId, SheetRef};

    #[test]
    fn test_export_args_defaults() {
        let args = ExportArgs::default();

        assert!(!args.yes);
        assert!(!args.dry_run);
        assert!(args.output.is_none());
        assert!(args.rule.is_none());
        assert!(args.sheet_numbers().is_empty());
    }

    #[test]
    fn test_sheet_numbers_trims_and_skips_blanks() {
        let args = ExportArgs {
            sheets: Some(" A101, A102,,A103 ".to_string()),
            ..Default::default()
        };

        assert_eq!(args.sheet_numbers(), vec!["A101", "A102", "A103"]);
    }

    #[test]
    fn test_output_folder_precedence() {
        let last = PathBuf::from("/last");

        assert_eq!(
            resolve_output_folder(Some("/cli"), Some("/config"), Some(&last)),
            Some(PathBuf::from("/cli"))
        );
        assert_eq!(
            resolve_output_folder(None, Some("/config"), Some(&last)),
            Some(PathBuf::from("/config"))
        );
        assert_eq!(resolve_output_folder(None, None, Some(&last)), Some(last));
        assert_eq!(resolve_output_folder(None, None, None), None);
        assert_eq!(resolve_output_folder(Some(""), None, None), None);
    }

    #[test]
    fn test_absolutize_relative_path() {
        let path = absolutize(Path::new("exports")).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("exports"));
    }

    #[test]
    fn test_build_batch_spec() {
        let export = ExportConfig {
            combine: true,
            format: "both".to_string(),
            dwg_setup: Some("AIA Layers".to_string()),
            open_after: true,
            ..Default::default()
        };

        let spec = build_batch_spec(&export, PathBuf::from("/srv/out"), "{Sheet Number}".into())
            .unwrap();

        assert!(spec.combine);
        assert_eq!(spec.format, ExportFormat::Both);
        assert_eq!(spec.dwg.setup_name.as_deref(), Some("AIA Layers"));
        assert!(spec.open_after);
        assert_eq!(spec.naming_rule, "{Sheet Number}");
    }

    #[test]
    fn test_build_batch_spec_rejects_bad_format() {
        let export = ExportConfig {
            format: "svg".to_string(),
            ..Default::default()
        };

        assert!(build_batch_spec(&export, PathBuf::from("/srv/out"), String::new()).is_err());
    }

    #[test]
    fn test_exit_codes() {
        let mut result = BatchResult::new(BatchId::generate());
        assert_eq!(exit_code_for(&result), EXIT_SUCCESS);

        let sheet = SheetRef::new(SheetId::new("1").unwrap(), "A101", "Plan");
        result.add_failure(SheetFailure::export_call(
            &sheet,
            &HostError::ExportFailed("boom".to_string()),
        ));
        assert_eq!(exit_code_for(&result), EXIT_PARTIAL);

        result.cancelled = true;
        assert_eq!(exit_code_for(&result), EXIT_INTERRUPTED);
    }
}
