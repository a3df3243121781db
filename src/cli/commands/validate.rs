//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the sheetbatch configuration file.

use crate::cli::{EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::load_config;
use crate::config::SheetBatchConfig;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        for line in summary_lines(&config) {
            println!("{line}");
        }
        println!();
        Ok(EXIT_SUCCESS)
    }
}

fn summary_lines(config: &SheetBatchConfig) -> Vec<String> {
    let export = &config.export;
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Settings File: {}", config.application.settings_path),
        format!(
            "  Output Folder: {}",
            export.output_folder.as_deref().unwrap_or("(last used)")
        ),
        format!(
            "  Naming Rule: {}",
            export.naming_rule.as_deref().unwrap_or("(last used)")
        ),
        format!("  Format: {}", export.format),
        format!("  Combine: {}", export.combine),
        format!(
            "  PDF: {} / {}",
            export.pdf.color_depth, export.pdf.raster_quality
        ),
    ];
    if let Some(setup) = &export.dwg_setup {
        lines.push(format!("  DWG Setup: {setup}"));
    }
    lines.push(format!(
        "  Reconcile: {}ms grace, {} attempts, {}ms backoff",
        config.reconcile.initial_delay_ms,
        config.reconcile.max_attempts,
        config.reconcile.retry_backoff_ms
    ));
    lines.push(format!("  Sheet Manifest: {}", config.host.manifest));
    lines.push(format!("  Host Program: {}", config.host.program));
    if config.logging.local_enabled {
        lines.push(format!(
            "  Log Files: {} ({})",
            config.logging.local_path, config.logging.local_rotation
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_summary_lines() {
        let config = parse_config(
            r#"
[export]
format = "both"
dwg_setup = "AIA Layers"

[host]
manifest = "sheets.toml"
program = "host-bridge"
"#,
        )
        .unwrap();

        let lines = summary_lines(&config);
        assert!(lines.contains(&"  Format: both".to_string()));
        assert!(lines.contains(&"  DWG Setup: AIA Layers".to_string()));
        assert!(lines.contains(&"  Output Folder: (last used)".to_string()));
        assert!(lines.contains(&"  Host Program: host-bridge".to_string()));
    }

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}
            .execute("does-not-exist.toml")
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
