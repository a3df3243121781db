//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for sheetbatch using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Exit code: batch completed and every sheet succeeded
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code: batch completed with per-sheet failures
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code: configuration, manifest or argument error; nothing exported
pub const EXIT_CONFIG: i32 = 2;
/// Exit code: batch-fatal error
pub const EXIT_FATAL: i32 = 5;
/// Exit code: cancelled by signal
pub const EXIT_INTERRUPTED: i32 = 130;

/// sheetbatch - batch sheet export with template naming
#[derive(Parser, Debug)]
#[command(name = "sheetbatch")]
#[command(version, about, long_about = None)]
#[command(author = "Sheetbatch Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sheetbatch.toml", env = "SHEETBATCH_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SHEETBATCH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export sheets to PDF and/or DWG
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["sheetbatch", "export"]);
        assert_eq!(cli.config, "sheetbatch.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["sheetbatch", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["sheetbatch", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_export_overrides() {
        let cli = Cli::parse_from([
            "sheetbatch",
            "export",
            "--output",
            "/srv/exports",
            "--rule",
            "{Sheet Number}",
            "--format",
            "both",
            "--combine",
            "--sheets",
            "A101,A102",
            "--yes",
        ]);
        let Commands::Export(args) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(args.output.as_deref(), Some("/srv/exports"));
        assert_eq!(args.rule.as_deref(), Some("{Sheet Number}"));
        assert!(args.combine);
        assert!(args.yes);
        assert_eq!(args.sheet_numbers(), vec!["A101", "A102"]);
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["sheetbatch", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["sheetbatch", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }
}
