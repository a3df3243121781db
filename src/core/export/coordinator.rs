//! Export orchestrator - top-level driver of a batch
//!
//! A batch runs through up to two phases:
//!
//! 1. **Combined PDF**, when `combine` is set and PDF is requested: one
//!    transactional unit, one export call with every sheet, named directly
//!    with the project-level rendering of the naming rule. Any failure here
//!    aborts the batch.
//! 2. **Per item**, when PDF is not combined or DWG is requested: for each
//!    sheet a temp token, one transactional unit around the export calls,
//!    then reconciliation of every produced file. Failures are recorded in
//!    the [`BatchResult`] and the batch moves on.
//!
//! The progress sink is closed on every exit path.

use super::cancel::CancellationFlag;
use super::job::ExportJob;
use super::summary::{BatchResult, SheetFailure};
use super::token::TempTokenAllocator;
use crate::adapters::host::{Exporter, ProgressSink, TransactionScope, TransactionalUnit};
use crate::core::naming::NamingRule;
use crate::core::reconcile::FileReconciler;
use crate::domain::{
    BatchId, ExportBatchSpec, FileKind, HostError, ProjectInfo, Result, SheetBatchError, SheetId,
    SheetRef,
};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Fallback name for a combined PDF whose rule renders blank, e.g. `Batch_0314`
pub fn combined_fallback_label(date: NaiveDate) -> String {
    format!("Batch_{}", date.format("%m%d"))
}

/// Phase selection and naming for one batch
#[derive(Debug, Clone)]
pub struct BatchPlan {
    /// Run the combined PDF phase
    pub combined_pdf: bool,

    /// Formats exported per sheet; empty means no per-item phase
    pub per_item_formats: Vec<FileKind>,

    rule: NamingRule,
}

impl BatchPlan {
    /// Derive the plan from a batch spec
    pub fn from_spec(spec: &ExportBatchSpec) -> Self {
        Self {
            combined_pdf: spec.combine && spec.format.includes_pdf(),
            per_item_formats: ExportJob::formats_for(spec.format, spec.combine),
            rule: NamingRule::new(spec.naming_rule.as_str()),
        }
    }

    /// Whether the per-item phase runs
    pub fn has_per_item_phase(&self) -> bool {
        !self.per_item_formats.is_empty()
    }

    /// Base name of the combined PDF, rendered without a sheet
    pub fn combined_base_name(&self, project: &ProjectInfo) -> String {
        self.rule
            .clone()
            .with_fallback(combined_fallback_label(Local::now().date_naive()))
            .file_base_name(None, project)
    }

    /// Base name of one sheet's files
    pub fn item_base_name(&self, sheet: &SheetRef, project: &ProjectInfo) -> String {
        self.rule.file_base_name(Some(sheet), project)
    }

    /// Every path the batch is expected to produce, in production order
    pub fn planned_files(
        &self,
        folder: &Path,
        sheets: &[SheetRef],
        project: &ProjectInfo,
    ) -> Vec<PathBuf> {
        let mut files = Vec::new();
        if self.combined_pdf {
            files.push(folder.join(FileKind::Pdf.file_name(&self.combined_base_name(project))));
        }
        for sheet in sheets {
            let base_name = self.item_base_name(sheet, project);
            for kind in &self.per_item_formats {
                files.push(folder.join(kind.file_name(&base_name)));
            }
        }
        files
    }
}

/// Drives one batch against the host collaborators
///
/// All calls happen on the caller's thread, in sheet order.
pub struct ExportOrchestrator<'a> {
    exporter: &'a mut dyn Exporter,
    transactions: &'a mut dyn TransactionalUnit,
    progress: &'a mut dyn ProgressSink,
    allocator: TempTokenAllocator,
    reconciler: FileReconciler,
    cancel: CancellationFlag,
}

impl<'a> ExportOrchestrator<'a> {
    /// Create an orchestrator with the default reconcile policy
    pub fn new(
        exporter: &'a mut dyn Exporter,
        transactions: &'a mut dyn TransactionalUnit,
        progress: &'a mut dyn ProgressSink,
    ) -> Self {
        Self {
            exporter,
            transactions,
            progress,
            allocator: TempTokenAllocator::new(),
            reconciler: FileReconciler::default(),
            cancel: CancellationFlag::new(),
        }
    }

    /// Use a specific reconciler
    pub fn with_reconciler(mut self, reconciler: FileReconciler) -> Self {
        self.reconciler = reconciler;
        self
    }

    /// Use a specific token allocator
    pub fn with_allocator(mut self, allocator: TempTokenAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    /// Observe a cancellation flag between sheets
    pub fn with_cancellation(mut self, cancel: CancellationFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Execute the batch
    ///
    /// # Errors
    ///
    /// - [`SheetBatchError::Configuration`] for an empty sheet set or an
    ///   unusable output folder; nothing is exported
    /// - [`SheetBatchError::Export`] when the combined PDF phase fails
    ///
    /// Per-sheet failures never surface here; they are listed in
    /// [`BatchResult::failed_sheets`].
    pub fn execute(
        &mut self,
        spec: &ExportBatchSpec,
        sheets: &[SheetRef],
        project: &ProjectInfo,
    ) -> Result<BatchResult> {
        let outcome = self.run(spec, sheets, project);
        self.progress.close();
        outcome
    }

    fn run(
        &mut self,
        spec: &ExportBatchSpec,
        sheets: &[SheetRef],
        project: &ProjectInfo,
    ) -> Result<BatchResult> {
        let start_time = Instant::now();

        if sheets.is_empty() {
            return Err(SheetBatchError::Configuration(
                "No sheets selected for export".to_string(),
            ));
        }
        spec.validate()?;

        let batch_id = BatchId::generate();
        let plan = BatchPlan::from_spec(spec);
        crate::log_batch_start!(batch_id, sheets.len(), spec.format, spec.combine);

        fs::create_dir_all(&spec.output_folder).map_err(|e| {
            SheetBatchError::Configuration(format!(
                "Cannot create output folder {}: {e}",
                spec.output_folder.display()
            ))
        })?;

        let mut result = BatchResult::new(batch_id);

        if plan.combined_pdf {
            let path = self.run_combined_phase(&plan, spec, sheets, project)?;
            result.add_success(path);
        }

        if plan.has_per_item_phase() {
            self.run_per_item_phase(&plan, spec, sheets, project, &mut result);
        }

        let result = result.with_duration(start_time.elapsed());
        result.log_summary();
        Ok(result)
    }

    fn run_combined_phase(
        &mut self,
        plan: &BatchPlan,
        spec: &ExportBatchSpec,
        sheets: &[SheetRef],
        project: &ProjectInfo,
    ) -> Result<PathBuf> {
        let name = plan.combined_base_name(project);
        let target = spec.output_folder.join(FileKind::Pdf.file_name(&name));

        tracing::info!(
            name = %name,
            sheet_count = sheets.len(),
            "Exporting combined PDF"
        );
        self.progress
            .set_status(&format!("Combining {} sheets: {name}", sheets.len()));
        self.progress.update(50.0);

        if target.exists() {
            fs::remove_file(&target).map_err(|e| {
                SheetBatchError::Export(format!(
                    "Cannot replace existing file {}: {e}",
                    target.display()
                ))
            })?;
        }

        let sheet_ids: Vec<SheetId> = sheets.iter().map(|sheet| sheet.id.clone()).collect();
        self.export_combined(&spec.output_folder, &name, &sheet_ids, spec)
            .map_err(|e| {
                tracing::error!(name = %name, error = %e, "Combined PDF export failed");
                SheetBatchError::Export(format!("Combined PDF export failed: {e}"))
            })?;

        self.progress.update(100.0);
        Ok(target)
    }

    fn export_combined(
        &mut self,
        folder: &Path,
        name: &str,
        sheet_ids: &[SheetId],
        spec: &ExportBatchSpec,
    ) -> std::result::Result<(), HostError> {
        let scope = TransactionScope::start(&mut *self.transactions, "Export combined PDF")?;
        self.exporter
            .export_combined(folder, name, sheet_ids, &spec.pdf)?;
        scope.commit()
    }

    fn run_per_item_phase(
        &mut self,
        plan: &BatchPlan,
        spec: &ExportBatchSpec,
        sheets: &[SheetRef],
        project: &ProjectInfo,
        result: &mut BatchResult,
    ) {
        let total = sheets.len();

        for (index, sheet) in sheets.iter().enumerate() {
            if self.cancel.is_cancelled() {
                tracing::warn!(
                    processed = index,
                    remaining = total - index,
                    "Cancellation requested, stopping before next sheet"
                );
                result.cancelled = true;
                break;
            }

            let current = index + 1;
            crate::log_item_progress!(current, total, sheet.label());
            self.progress
                .set_status(&format!("Processing: {}", sheet.label()));

            let job = ExportJob::new(
                sheet,
                self.allocator.next_token(),
                plan.item_base_name(sheet, project),
                plan.per_item_formats.clone(),
            );

            match self.export_item(&job, spec) {
                Ok(()) => self.reconcile_item(&job, &spec.output_folder, result),
                Err(e) => {
                    tracing::error!(
                        sheet_number = %sheet.number,
                        sheet_id = %sheet.id,
                        temp_token = %job.temp_token,
                        error = %e,
                        "Sheet export failed, continuing with next sheet"
                    );
                    result.add_failure(SheetFailure::export_call(sheet, &e));
                }
            }

            self.progress
                .update(current as f64 / total as f64 * 100.0);
        }
    }

    /// One transactional unit around every export call of the job
    fn export_item(
        &mut self,
        job: &ExportJob<'_>,
        spec: &ExportBatchSpec,
    ) -> std::result::Result<(), HostError> {
        let folder = spec.output_folder.as_path();
        let hint = job.temp_token.as_str();

        let scope = TransactionScope::start(&mut *self.transactions, job.transaction_label())?;
        for kind in &job.formats {
            match kind {
                FileKind::Pdf => self
                    .exporter
                    .export_pdf(folder, hint, &job.sheet.id, &spec.pdf)?,
                FileKind::Dwg => self
                    .exporter
                    .export_dwg(folder, hint, &job.sheet.id, &spec.dwg)?,
            }
        }
        scope.commit()
    }

    fn reconcile_item(&self, job: &ExportJob<'_>, folder: &Path, result: &mut BatchResult) {
        for &kind in &job.formats {
            match self.reconciler.reconcile_unclaimed(
                folder,
                &job.temp_token,
                job.sheet,
                &job.final_base_name,
                kind,
                &result.succeeded_files,
            ) {
                Ok(path) => result.add_success(path),
                Err(e) => {
                    tracing::error!(
                        sheet_number = %job.sheet.number,
                        temp_token = %job.temp_token,
                        format = %kind,
                        file_left_behind = e.file_left_behind(),
                        error = %e,
                        "Reconciliation failed"
                    );
                    result.add_failure(SheetFailure::reconcile(job.sheet, kind, &e));
                }
            }
        }
    }
}
