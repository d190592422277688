//! TSV export format implementation

use super::format::ExportFormat;
use super::record::JudgmentRecord;

/// TSV (Tab-Separated Values) exporter
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvExporter;

impl ExportFormat for TsvExporter {
    fn header(&self) -> Option<String> {
        Some(format_tsv_header())
    }

    fn format_row(&self, record: &JudgmentRecord) -> String {
        format_tsv_row(record)
    }
}

pub fn format_tsv_header() -> String {
    [
        "Index",
        "Kind",
        "ObjectTime",
        "JudgedAt",
        "Outcome",
        "Combo",
        "Score",
    ]
    .join("\t")
}

pub fn format_tsv_row(record: &JudgmentRecord) -> String {
    [
        record.index.to_string(),
        record.kind.clone(),
        record.object_time.to_string(),
        record.judged_at.to_string(),
        record.outcome.as_str().to_string(),
        record.combo.to_string(),
        record.score.to_string(),
    ]
    .join("\t")
}
