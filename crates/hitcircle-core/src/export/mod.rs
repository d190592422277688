//! Judgment timeline export (TSV and NDJSON).

mod format;
mod json;
mod record;
mod tsv;

pub use format::{ExportFormat, write_records};
pub use json::{JsonExporter, format_json_entry};
pub use record::JudgmentRecord;
pub use tsv::{TsvExporter, format_tsv_header, format_tsv_row};
