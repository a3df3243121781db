//! Shared stubs for integration tests
//!
//! The stub host writes real files into a temp folder so the reconciler
//! runs against the file system.

#![allow(dead_code)]

use sheetbatch::adapters::host::{Exporter, ProgressSink, TransactionalUnit};
use sheetbatch::domain::{
    DwgOptions, ExportBatchSpec, ExportFormat, HostError, PdfOptions, ProjectInfo, SheetId,
    SheetRef,
};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Sheets numbered as given, ids `1001`, `1002`, ... and names `Sheet <n>`
pub fn sheets(numbers: &[&str]) -> Vec<SheetRef> {
    numbers
        .iter()
        .enumerate()
        .map(|(i, number)| {
            SheetRef::new(
                SheetId::new(format!("{}", 1001 + i)).unwrap(),
                *number,
                format!("Sheet {}", i + 1),
            )
        })
        .collect()
}

pub fn project() -> ProjectInfo {
    ProjectInfo::new("P-204", "Harbour Tower")
}

pub fn spec(folder: &Path, rule: &str, format: ExportFormat) -> ExportBatchSpec {
    ExportBatchSpec::new(folder, rule, format)
}

/// Host stand-in that writes one small file per export call
///
/// By default the file is named after the hint, as a cooperative host
/// would. With `ignore_hint` it names files `<sheet number> - Host.<ext>`.
#[derive(Debug, Default)]
pub struct StubExporter {
    numbers: HashMap<SheetId, String>,
    failing: HashSet<SheetId>,
    silent: HashSet<SheetId>,
    fail_combined: bool,
    ignore_hint: bool,
    pub calls: Vec<String>,
}

impl StubExporter {
    pub fn new(sheets: &[SheetRef]) -> Self {
        Self {
            numbers: sheets
                .iter()
                .map(|s| (s.id.clone(), s.number.clone()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn failing_for(mut self, sheet: &SheetRef) -> Self {
        self.failing.insert(sheet.id.clone());
        self
    }

    /// Report success for `sheet` without writing anything
    pub fn silent_for(mut self, sheet: &SheetRef) -> Self {
        self.silent.insert(sheet.id.clone());
        self
    }

    pub fn failing_combined(mut self) -> Self {
        self.fail_combined = true;
        self
    }

    pub fn ignoring_hint(mut self) -> Self {
        self.ignore_hint = true;
        self
    }

    fn write(&mut self, folder: &Path, hint: &str, sheet: &SheetId, ext: &str) -> Result<(), HostError> {
        if self.failing.contains(sheet) {
            return Err(HostError::ExportFailed(format!("sheet {sheet} is corrupt")));
        }
        if self.silent.contains(sheet) {
            return Ok(());
        }
        let number = self.numbers.get(sheet).cloned().unwrap_or_default();
        let file_name = if self.ignore_hint {
            format!("{number} - Host.{ext}")
        } else {
            format!("{hint}.{ext}")
        };
        fs::write(folder.join(file_name), b"%stub")
            .map_err(|e| HostError::ExportFailed(e.to_string()))
    }
}

impl Exporter for StubExporter {
    fn export_combined(
        &mut self,
        folder: &Path,
        name: &str,
        sheets: &[SheetId],
        _options: &PdfOptions,
    ) -> Result<(), HostError> {
        self.calls.push(format!("combined:{name}:{}", sheets.len()));
        if self.fail_combined {
            return Err(HostError::ExportFailed("printer offline".to_string()));
        }
        fs::write(folder.join(format!("{name}.pdf")), b"%combined")
            .map_err(|e| HostError::ExportFailed(e.to_string()))
    }

    fn export_pdf(
        &mut self,
        folder: &Path,
        name_hint: &str,
        sheet: &SheetId,
        _options: &PdfOptions,
    ) -> Result<(), HostError> {
        self.calls.push(format!("pdf:{sheet}"));
        self.write(folder, name_hint, sheet, "pdf")
    }

    fn export_dwg(
        &mut self,
        folder: &Path,
        name_hint: &str,
        sheet: &SheetId,
        _options: &DwgOptions,
    ) -> Result<(), HostError> {
        self.calls.push(format!("dwg:{sheet}"));
        self.write(folder, name_hint, sheet, "dwg")
    }
}

/// Counts transactional unit calls
#[derive(Debug, Default)]
pub struct RecordingTransactions {
    pub started: Vec<String>,
    pub committed: usize,
    pub rolled_back: usize,
}

impl TransactionalUnit for RecordingTransactions {
    fn start(&mut self, label: &str) -> Result<(), HostError> {
        self.started.push(label.to_string());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), HostError> {
        self.committed += 1;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), HostError> {
        self.rolled_back += 1;
        Ok(())
    }
}

/// Records everything reported to the operator
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub updates: Vec<f64>,
    pub statuses: Vec<String>,
    pub closed: usize,
}

impl ProgressSink for RecordingProgress {
    fn update(&mut self, percent: f64) {
        self.updates.push(percent);
    }

    fn set_status(&mut self, text: &str) {
        self.statuses.push(text.to_string());
    }

    fn close(&mut self) {
        self.closed += 1;
    }
}

/// File names in `folder`, sorted
pub fn file_names(folder: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(folder)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
