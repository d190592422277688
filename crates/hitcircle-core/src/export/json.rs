//! JSON export format implementation

use serde_json::{Value as JsonValue, json};

use super::format::ExportFormat;
use super::record::JudgmentRecord;

/// JSON exporter (one object per line, NDJSON format)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl ExportFormat for JsonExporter {
    fn header(&self) -> Option<String> {
        None
    }

    fn format_row(&self, record: &JudgmentRecord) -> String {
        format_json_entry(record).to_string()
    }
}

pub fn format_json_entry(record: &JudgmentRecord) -> JsonValue {
    json!({
        "index": record.index,
        "kind": record.kind,
        "object_time": record.object_time,
        "judged_at": record.judged_at,
        "offset_ms": record.offset_ms(),
        "outcome": record.outcome.as_str(),
        "combo": record.combo,
        "score": record.score
    })
}
