//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::{EXIT_CONFIG, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "sheetbatch.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing sheetbatch configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point host.manifest at the sheet manifest your host writes");
                println!("  3. Point host.program at the host bridge executable");
                println!("  4. Validate configuration: sheetbatch validate-config");
                println!("  5. Preview file names: sheetbatch export --dry-run");
                println!("  6. Run export: sheetbatch export");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                tracing::error!(output = %self.output, error = %e, "Failed to write configuration file");
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# sheetbatch configuration file

[application]
log_level = "info"

[export]
output_folder = "./exports"
naming_rule = "{Sheet Number}-{Sheet Name}"
combine = false
format = "pdf"  # pdf | dwg | both

[host]
manifest = "sheets.toml"
program = "host-bridge"

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# sheetbatch configuration file
#
# Values may reference environment variables with ${VAR_NAME}; every setting
# can also be overridden with SHEETBATCH_<SECTION>_<KEY>, for example
# SHEETBATCH_EXPORT_FORMAT=both.

[application]
# trace | debug | info | warn | error
log_level = "info"

# Last-used naming rule and output folder are remembered here
settings_path = ".sheetbatch/settings.json"

[export]
# Absolute, or relative to the working directory. When omitted, the folder
# of the previous run is used.
output_folder = "${SHEETBATCH_OUT}"

# Tokens in braces are resolved against sheet attributes first, then
# project attributes. Built-in names: "Sheet Number", "Sheet Name",
# "Project Number", "Project Name". Unresolved tokens become "Unknown".
naming_rule = "{Project Number}_{Sheet Number}-{Sheet Name}"

# Produce one combined PDF instead of a PDF per sheet
combine = false

# pdf | dwg | both
format = "both"

# Named DWG export setup defined in the host project
dwg_setup = "AIA Layers"

# Open the output folder when the batch finishes
open_after = false

[export.pdf]
# color | grayscale | black_line
color_depth = "black_line"

# low | medium | high | presentation
raster_quality = "high"

hide_scope_boxes = true

[reconcile]
# Grace period before looking for the exported file
initial_delay_ms = 1000

# Pause between rename attempts while the file is locked
retry_backoff_ms = 1500

# Rename attempts per file (1-10)
max_attempts = 3

[host]
# Project and sheet list written by the host
manifest = "sheets.toml"

# Bridge program that performs the export calls
program = "host-bridge"
# working_dir = "/opt/host-bridge"

# Argument templates. Available tokens: {folder} {name} {sheet} {sheets}
# {color_depth} {raster_quality} {hide_scope_boxes} {hide_reference_planes}
# {dwg_setup} {merged_views}
pdf_args = ["export-pdf", "--folder", "{folder}", "--name", "{name}", "--sheet", "{sheet}"]
dwg_args = ["export-dwg", "--folder", "{folder}", "--prefix", "{name}", "--sheet", "{sheet}", "--setup", "{dwg_setup}"]
combined_args = ["export-combined", "--folder", "{folder}", "--name", "{name}", "--sheets", "{sheets}"]

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "daily"  # daily | hourly
local_max_size_mb = 100
"#
        .to_string()
    }
}
