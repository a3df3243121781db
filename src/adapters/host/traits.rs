//! Host collaborator traits
//!
//! The orchestrator drives the host through three narrow seams: an
//! [`Exporter`] that writes files, a [`TransactionalUnit`] that brackets
//! each export call, and a [`ProgressSink`] that reports to the operator.
//! All calls happen on the caller's thread; the host forbids concurrent
//! document mutation, so none of the traits require `Send`.

use crate::domain::{DwgOptions, HostError, PdfOptions, SheetId};
use std::path::Path;

#[cfg(test)]
use mockall::automock;

/// Host export capability
///
/// None of the methods guarantee that the file on disk is named after
/// `name_hint`; the host may derive its own name from sheet attributes.
/// The file may also still be flushing when the call returns.
#[cfg_attr(test, automock)]
pub trait Exporter {
    /// Export all sheets into one PDF named `name` (without extension)
    fn export_combined(
        &mut self,
        folder: &Path,
        name: &str,
        sheets: &[SheetId],
        options: &PdfOptions,
    ) -> Result<(), HostError>;

    /// Export one sheet to PDF, requesting `name_hint` as the file name
    fn export_pdf(
        &mut self,
        folder: &Path,
        name_hint: &str,
        sheet: &SheetId,
        options: &PdfOptions,
    ) -> Result<(), HostError>;

    /// Export one sheet to DWG, passing `name_hint` as the file prefix
    fn export_dwg(
        &mut self,
        folder: &Path,
        name_hint: &str,
        sheet: &SheetId,
        options: &DwgOptions,
    ) -> Result<(), HostError>;
}

/// Begin/commit/rollback boundary around a host mutation
#[cfg_attr(test, automock)]
pub trait TransactionalUnit {
    /// Open a unit labelled `label`
    fn start(&mut self, label: &str) -> Result<(), HostError>;

    /// Commit the open unit
    fn commit(&mut self) -> Result<(), HostError>;

    /// Discard the open unit
    fn rollback(&mut self) -> Result<(), HostError>;
}

/// Operator-facing progress reporting
#[cfg_attr(test, automock)]
pub trait ProgressSink {
    /// Overall completion, 0..=100
    fn update(&mut self, percent: f64);

    /// Human-readable status line
    fn set_status(&mut self, text: &str);

    /// Release the sink; called exactly once per batch on every exit path
    fn close(&mut self);
}

/// Scoped transactional unit
///
/// Rolls back on drop unless [`TransactionScope::commit`] succeeded, so an
/// early return or a failed export call never leaves a unit open.
pub struct TransactionScope<'a> {
    unit: &'a mut dyn TransactionalUnit,
    label: String,
    finished: bool,
}

impl<'a> TransactionScope<'a> {
    /// Start a unit on `unit`
    pub fn start(
        unit: &'a mut dyn TransactionalUnit,
        label: impl Into<String>,
    ) -> Result<Self, HostError> {
        let label = label.into();
        unit.start(&label)?;
        Ok(Self {
            unit,
            label,
            finished: false,
        })
    }

    /// Commit; on failure the drop guard still rolls back
    pub fn commit(mut self) -> Result<(), HostError> {
        self.unit.commit()?;
        self.finished = true;
        Ok(())
    }

    /// Roll back explicitly
    pub fn rollback(mut self) -> Result<(), HostError> {
        self.finished = true;
        self.unit.rollback()
    }
}

impl Drop for TransactionScope<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        tracing::debug!(label = %self.label, "Rolling back unfinished transaction");
        if let Err(e) = self.unit.rollback() {
            tracing::warn!(label = %self.label, error = %e, "Rollback failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::Sequence;

    #[test]
    fn test_scope_commit_does_not_roll_back() {
        let mut unit = MockTransactionalUnit::new();
        let mut seq = Sequence::new();
        unit.expect_start()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        unit.expect_commit()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        unit.expect_rollback().never();

        let scope = TransactionScope::start(&mut unit, "export A101").unwrap();
        scope.commit().unwrap();
    }

    #[test]
    fn test_scope_drop_rolls_back() {
        let mut unit = MockTransactionalUnit::new();
        unit.expect_start().returning(|_| Ok(()));
        unit.expect_commit().never();
        unit.expect_rollback().times(1).returning(|| Ok(()));

        {
            let _scope = TransactionScope::start(&mut unit, "export A101").unwrap();
        }
    }

    #[test]
    fn test_scope_failed_commit_rolls_back() {
        let mut unit = MockTransactionalUnit::new();
        unit.expect_start().returning(|_| Ok(()));
        unit.expect_commit()
            .times(1)
            .returning(|| Err(HostError::TransactionCommit("locked".to_string())));
        unit.expect_rollback().times(1).returning(|| Ok(()));

        let scope = TransactionScope::start(&mut unit, "export A101").unwrap();
        assert!(scope.commit().is_err());
    }

    #[test]
    fn test_scope_failed_start_does_not_roll_back() {
        let mut unit = MockTransactionalUnit::new();
        unit.expect_start()
            .returning(|_| Err(HostError::TransactionStart("read-only".to_string())));
        unit.expect_rollback().never();

        assert!(TransactionScope::start(&mut unit, "export A101").is_err());
    }

    #[test]
    fn test_scope_explicit_rollback_once() {
        let mut unit = MockTransactionalUnit::new();
        unit.expect_start().returning(|_| Ok(()));
        unit.expect_rollback().times(1).returning(|| Ok(()));

        let scope = TransactionScope::start(&mut unit, "combined").unwrap();
        scope.rollback().unwrap();
    }
}
