//! Per-sheet export job

use crate::domain::{ExportFormat, FileKind, SheetRef, TempToken};

/// One unit of per-item work
///
/// Created and consumed inside a single orchestrator run. The temp token is
/// never shared with another job of the same batch.
#[derive(Debug, Clone)]
pub struct ExportJob<'a> {
    /// Sheet being exported
    pub sheet: &'a SheetRef,

    /// Name hint handed to the host
    pub temp_token: TempToken,

    /// Sanitized base name the produced files end up with
    pub final_base_name: String,

    /// Formats exported for this sheet, in call order
    pub formats: Vec<FileKind>,
}

impl<'a> ExportJob<'a> {
    /// Create a job
    pub fn new(
        sheet: &'a SheetRef,
        temp_token: TempToken,
        final_base_name: impl Into<String>,
        formats: Vec<FileKind>,
    ) -> Self {
        Self {
            sheet,
            temp_token,
            final_base_name: final_base_name.into(),
            formats,
        }
    }

    /// Per-item formats for a batch
    ///
    /// PDF is exported per sheet only when the batch is not combined; DWG is
    /// always per sheet.
    pub fn formats_for(format: ExportFormat, combine: bool) -> Vec<FileKind> {
        let mut formats = Vec::with_capacity(2);
        if format.includes_pdf() && !combine {
            formats.push(FileKind::Pdf);
        }
        if format.includes_dwg() {
            formats.push(FileKind::Dwg);
        }
        formats
    }

    /// Label of the transactional unit bracketing this job
    pub fn transaction_label(&self) -> String {
        format!("Export {}", self.sheet.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SheetId;
    use test_case::test_case;

    #[test_case(ExportFormat::Pdf, false => vec![FileKind::Pdf] ; "pdf per item")]
    #[test_case(ExportFormat::Pdf, true => Vec::<FileKind>::new() ; "pdf combined")]
    #[test_case(ExportFormat::Dwg, false => vec![FileKind::Dwg] ; "dwg")]
    #[test_case(ExportFormat::Dwg, true => vec![FileKind::Dwg] ; "dwg never combined")]
    #[test_case(ExportFormat::Both, false => vec![FileKind::Pdf, FileKind::Dwg] ; "both per item")]
    #[test_case(ExportFormat::Both, true => vec![FileKind::Dwg] ; "both combined")]
    fn test_formats_for(format: ExportFormat, combine: bool) -> Vec<FileKind> {
        ExportJob::formats_for(format, combine)
    }

    #[test]
    fn test_transaction_label() {
        let sheet = SheetRef::new(SheetId::new("7").unwrap(), "A101", "Plan");
        let job = ExportJob::new(
            &sheet,
            TempToken::new("SBTMP_ABCD1234").unwrap(),
            "A101-Plan",
            vec![FileKind::Pdf],
        );
        assert_eq!(job.transaction_label(), "Export A101");
    }
}
