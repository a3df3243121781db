//! Opening the output folder in the platform file browser

use std::path::Path;
use std::process::Command;

#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";
#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const OPENER: &str = "xdg-open";

/// Name of the platform opener program
pub fn opener_program() -> &'static str {
    OPENER
}

/// Open `folder` in the file browser
///
/// Returns whether the opener was started. Failures are logged and never
/// affect the batch outcome.
pub fn open_folder(folder: &Path) -> bool {
    match Command::new(OPENER).arg(folder).spawn() {
        Ok(_) => {
            tracing::debug!(path = %folder.display(), opener = OPENER, "Opened output folder");
            true
        }
        Err(e) => {
            tracing::warn!(
                path = %folder.display(),
                opener = OPENER,
                error = %e,
                "Failed to open output folder"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opener_program_is_known() {
        assert!(["explorer", "open", "xdg-open"].contains(&opener_program()));
    }
}
