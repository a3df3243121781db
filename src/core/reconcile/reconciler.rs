//! File reconciler
//!
//! Locates the file a host export call produced and moves it to its final
//! name.

use super::policy::ReconcilePolicy;
use crate::domain::{FileKind, ReconcileError, SheetRef, TempToken};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

/// A file in the output folder attributable to the sheet being reconciled
#[derive(Debug, Clone)]
struct Candidate {
    path: PathBuf,
    modified: SystemTime,
    has_token: bool,
}

impl Candidate {
    /// Newer files win; on equal timestamps a token match wins
    fn outranks(&self, other: &Candidate) -> bool {
        (self.modified, self.has_token) > (other.modified, other.has_token)
    }
}

/// Finds and renames host-written export files
#[derive(Debug, Clone, Default)]
pub struct FileReconciler {
    policy: ReconcilePolicy,
}

impl FileReconciler {
    /// Create a reconciler with the given timing policy
    pub fn new(policy: ReconcilePolicy) -> Self {
        Self { policy }
    }

    /// The timing policy in use
    pub fn policy(&self) -> &ReconcilePolicy {
        &self.policy
    }

    /// Locate the file exported for `sheet` and rename it to
    /// `<final_base_name>.<ext>` inside `folder`
    ///
    /// Candidates are `.<ext>` files (extension compared case-insensitively)
    /// whose name contains the temp token, the sheet number or the sheet
    /// name. The most recently modified candidate is chosen.
    ///
    /// # Returns
    ///
    /// The final path of the file.
    ///
    /// # Errors
    ///
    /// - [`ReconcileError::FolderUnavailable`] if the folder cannot be listed
    /// - [`ReconcileError::NotFound`] if no candidate exists
    /// - [`ReconcileError::Locked`] if every rename attempt failed
    pub fn reconcile(
        &self,
        folder: &Path,
        token: &TempToken,
        sheet: &SheetRef,
        final_base_name: &str,
        kind: FileKind,
    ) -> Result<PathBuf, ReconcileError> {
        self.reconcile_unclaimed(folder, token, sheet, final_base_name, kind, &[])
    }

    /// Like [`reconcile`](Self::reconcile), but never picks a file in
    /// `claimed`
    ///
    /// A batch passes the files it has already produced, so two sheets that
    /// share a name cannot take each other's output when the host writes
    /// nothing.
    pub fn reconcile_unclaimed(
        &self,
        folder: &Path,
        token: &TempToken,
        sheet: &SheetRef,
        final_base_name: &str,
        kind: FileKind,
        claimed: &[PathBuf],
    ) -> Result<PathBuf, ReconcileError> {
        if !self.policy.initial_delay.is_zero() {
            thread::sleep(self.policy.initial_delay);
        }

        let target = folder.join(kind.file_name(final_base_name));

        let candidate = find_candidate(folder, token, sheet, kind, claimed)?.ok_or_else(|| {
            tracing::warn!(
                sheet_number = %sheet.number,
                temp_token = %token,
                extension = kind.extension(),
                "No exported file found for sheet"
            );
            not_found(sheet, token)
        })?;

        tracing::debug!(
            sheet_number = %sheet.number,
            candidate = %candidate.path.display(),
            matched_token = candidate.has_token,
            "Selected reconciliation candidate"
        );

        if same_path_ignore_case(&candidate.path, &target) {
            tracing::debug!(path = %candidate.path.display(), "Exported file already has its final name");
            return Ok(candidate.path);
        }

        self.move_into_place(&candidate.path, &target, sheet, token)?;
        Ok(target)
    }

    /// Replace `target` with `source`, retrying while the file is held open
    fn move_into_place(
        &self,
        source: &Path,
        target: &Path,
        sheet: &SheetRef,
        token: &TempToken,
    ) -> Result<(), ReconcileError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match replace_file(source, target) {
                Ok(()) => {
                    tracing::info!(
                        from = %source.display(),
                        to = %target.display(),
                        attempt,
                        "Renamed exported file"
                    );
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound && !source.exists() => {
                    tracing::warn!(
                        path = %source.display(),
                        "Exported file disappeared before it could be renamed"
                    );
                    return Err(not_found(sheet, token));
                }
                Err(e) => {
                    last_error = e.to_string();
                    if attempt < max_attempts {
                        crate::log_retry_attempt!(attempt, max_attempts, last_error.as_str());
                        thread::sleep(self.policy.retry_backoff);
                    }
                }
            }
        }

        tracing::error!(
            path = %source.display(),
            target = %target.display(),
            attempts = max_attempts,
            error = %last_error,
            "Giving up on renaming exported file"
        );

        Err(ReconcileError::Locked {
            path: source.display().to_string(),
            attempts: max_attempts,
            message: last_error,
        })
    }
}

fn not_found(sheet: &SheetRef, token: &TempToken) -> ReconcileError {
    ReconcileError::NotFound {
        sheet: sheet.label().to_string(),
        token: token.to_string(),
    }
}

/// Scan `folder` for the best candidate file
fn find_candidate(
    folder: &Path,
    token: &TempToken,
    sheet: &SheetRef,
    kind: FileKind,
    claimed: &[PathBuf],
) -> Result<Option<Candidate>, ReconcileError> {
    let entries = fs::read_dir(folder)
        .map_err(|e| ReconcileError::FolderUnavailable(format!("{}: {e}", folder.display())))?;

    let mut best: Option<Candidate> = None;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();
        if !has_extension(&path, kind) || claimed.contains(&path) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        let has_token = file_name.contains(token.as_str());
        if !has_token && !matches_sheet(&file_name, sheet) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping file without metadata");
                continue;
            }
        };

        let candidate = Candidate {
            path,
            modified: metadata.modified().unwrap_or(UNIX_EPOCH),
            has_token,
        };

        if best.as_ref().map_or(true, |current| candidate.outranks(current)) {
            best = Some(candidate);
        }
    }

    Ok(best)
}

/// Sheet number or name appearing anywhere in the file name
fn matches_sheet(file_name: &str, sheet: &SheetRef) -> bool {
    let contains = |needle: &str| !needle.is_empty() && file_name.contains(needle);
    contains(&sheet.number) || contains(&sheet.name)
}

fn has_extension(path: &Path, kind: FileKind) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(kind.extension()))
}

fn same_path_ignore_case(a: &Path, b: &Path) -> bool {
    a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
}

/// Delete-then-rename
fn replace_file(source: &Path, target: &Path) -> io::Result<()> {
    if target.exists() {
        fs::remove_file(target)?;
    }
    fs::rename(source, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SheetId;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::TempDir;

    fn sheet() -> SheetRef {
        SheetRef::new(SheetId::new("1001").unwrap(), "A101", "Floor Plan")
    }

    fn token() -> TempToken {
        TempToken::new("SBTMP_7K2M9QX4").unwrap()
    }

    fn write_with_mtime(path: &Path, secs_after_epoch: u64) {
        fs::write(path, b"%PDF-1.7").unwrap();
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(UNIX_EPOCH + Duration::from_secs(secs_after_epoch))
            .unwrap();
    }

    #[test]
    fn test_matches_sheet() {
        let sheet = sheet();
        assert!(matches_sheet("Sheet - A101 - Floor Plan.pdf", &sheet));
        assert!(matches_sheet("A101.pdf", &sheet));
        assert!(matches_sheet("Floor Plan.pdf", &sheet));
        assert!(!matches_sheet("A102.pdf", &sheet));
    }

    #[test]
    fn test_matches_sheet_ignores_empty_fields() {
        let sheet = SheetRef::new(SheetId::new("1").unwrap(), "", "");
        assert!(!matches_sheet("anything.pdf", &sheet));
    }

    #[test]
    fn test_has_extension_case_insensitive() {
        assert!(has_extension(Path::new("/o/A101.PDF"), FileKind::Pdf));
        assert!(!has_extension(Path::new("/o/A101.pdf"), FileKind::Dwg));
        assert!(!has_extension(Path::new("/o/A101"), FileKind::Pdf));
    }

    #[test]
    fn test_candidate_outranks_newer_then_token() {
        let old = Candidate {
            path: PathBuf::from("a"),
            modified: UNIX_EPOCH + Duration::from_secs(10),
            has_token: true,
        };
        let new = Candidate {
            path: PathBuf::from("b"),
            modified: UNIX_EPOCH + Duration::from_secs(20),
            has_token: false,
        };
        assert!(new.outranks(&old));
        assert!(!old.outranks(&new));

        let tied = Candidate {
            path: PathBuf::from("c"),
            modified: new.modified,
            has_token: true,
        };
        assert!(tied.outranks(&new));
    }

    #[test]
    fn test_find_candidate_prefers_latest() {
        let dir = TempDir::new().unwrap();
        write_with_mtime(&dir.path().join("SBTMP_7K2M9QX4-old.pdf"), 1_000);
        write_with_mtime(&dir.path().join("SBTMP_7K2M9QX4.pdf"), 2_000);

        let found = find_candidate(dir.path(), &token(), &sheet(), FileKind::Pdf, &[])
            .unwrap()
            .unwrap();
        assert_eq!(found.path, dir.path().join("SBTMP_7K2M9QX4.pdf"));
    }

    #[test]
    fn test_find_candidate_skips_other_extensions_and_dirs() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("SBTMP_7K2M9QX4.dwg"), b"x").unwrap();
        fs::create_dir(dir.path().join("A101.pdf")).unwrap();

        let found = find_candidate(dir.path(), &token(), &sheet(), FileKind::Pdf, &[]).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_find_candidate_skips_claimed_files() {
        let dir = TempDir::new().unwrap();
        let produced = dir.path().join("A100-Floor Plan.pdf");
        fs::write(&produced, b"%PDF").unwrap();

        let found = find_candidate(dir.path(), &token(), &sheet(), FileKind::Pdf, &[]).unwrap();
        assert!(found.is_some());

        let found = find_candidate(
            dir.path(),
            &token(),
            &sheet(),
            FileKind::Pdf,
            std::slice::from_ref(&produced),
        )
        .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_reconcile_missing_folder() {
        let dir = TempDir::new().unwrap();
        let reconciler = FileReconciler::new(ReconcilePolicy::immediate());

        let result = reconciler.reconcile(
            &dir.path().join("gone"),
            &token(),
            &sheet(),
            "A101",
            FileKind::Pdf,
        );
        assert!(matches!(result, Err(ReconcileError::FolderUnavailable(_))));
    }

    #[test]
    fn test_same_path_ignore_case() {
        assert!(same_path_ignore_case(
            Path::new("/out/A101.PDF"),
            Path::new("/out/a101.pdf")
        ));
        assert!(!same_path_ignore_case(
            Path::new("/out/A101.pdf"),
            Path::new("/out/A102.pdf")
        ));
    }
}
