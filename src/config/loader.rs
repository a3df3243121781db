//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SheetBatchConfig;
use crate::domain::errors::SheetBatchError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
});

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SheetBatchConfig
/// 4. Applies environment variable overrides (SHEETBATCH_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or parsed, a
/// referenced environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use sheetbatch::config::loader::load_config;
///
/// let config = load_config("sheetbatch.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SheetBatchConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SheetBatchError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SheetBatchError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text (substitution, overrides and validation included)
pub fn parse_config(contents: &str) -> Result<SheetBatchConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: SheetBatchConfig = toml::from_str(&contents)
        .map_err(|e| SheetBatchError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        SheetBatchError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in ENV_VAR_PATTERN.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SheetBatchError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|val| val.parse().ok())
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|val| val.parse().ok())
}

/// Applies environment variable overrides using the SHEETBATCH_* prefix
///
/// Environment variables follow the pattern: SHEETBATCH_<SECTION>_<KEY>
/// For example: SHEETBATCH_EXPORT_FORMAT, SHEETBATCH_HOST_PROGRAM.
/// Unparseable numeric and boolean values are ignored.
fn apply_env_overrides(config: &mut SheetBatchConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("SHEETBATCH_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("SHEETBATCH_APPLICATION_SETTINGS_PATH") {
        config.application.settings_path = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("SHEETBATCH_EXPORT_OUTPUT_FOLDER") {
        config.export.output_folder = Some(val);
    }
    if let Ok(val) = std::env::var("SHEETBATCH_EXPORT_NAMING_RULE") {
        config.export.naming_rule = Some(val);
    }
    if let Some(combine) = env_flag("SHEETBATCH_EXPORT_COMBINE") {
        config.export.combine = combine;
    }
    if let Ok(val) = std::env::var("SHEETBATCH_EXPORT_FORMAT") {
        config.export.format = val;
    }
    if let Ok(val) = std::env::var("SHEETBATCH_EXPORT_DWG_SETUP") {
        config.export.dwg_setup = Some(val);
    }
    if let Some(open_after) = env_flag("SHEETBATCH_EXPORT_OPEN_AFTER") {
        config.export.open_after = open_after;
    }
    if let Ok(val) = std::env::var("SHEETBATCH_EXPORT_PDF_COLOR_DEPTH") {
        config.export.pdf.color_depth = val;
    }
    if let Ok(val) = std::env::var("SHEETBATCH_EXPORT_PDF_RASTER_QUALITY") {
        config.export.pdf.raster_quality = val;
    }

    // Reconcile overrides
    if let Some(ms) = env_number("SHEETBATCH_RECONCILE_INITIAL_DELAY_MS") {
        config.reconcile.initial_delay_ms = ms;
    }
    if let Some(ms) = env_number("SHEETBATCH_RECONCILE_RETRY_BACKOFF_MS") {
        config.reconcile.retry_backoff_ms = ms;
    }
    if let Some(attempts) = env_number("SHEETBATCH_RECONCILE_MAX_ATTEMPTS") {
        config.reconcile.max_attempts = attempts;
    }

    // Host overrides
    if let Ok(val) = std::env::var("SHEETBATCH_HOST_MANIFEST") {
        config.host.manifest = val;
    }
    if let Ok(val) = std::env::var("SHEETBATCH_HOST_PROGRAM") {
        config.host.program = val;
    }
    if let Ok(val) = std::env::var("SHEETBATCH_HOST_WORKING_DIR") {
        config.host.working_dir = Some(val);
    }

    // Logging overrides
    if let Some(enabled) = env_flag("SHEETBATCH_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = enabled;
    }
    if let Ok(val) = std::env::var("SHEETBATCH_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("SHEETBATCH_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
