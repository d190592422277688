//! ExportFormat trait definition

use std::io::Write;

use super::record::JudgmentRecord;
use crate::error::Result;

/// Trait for export format implementations
///
/// Provides a common interface for different export formats (TSV, JSON, etc.)
pub trait ExportFormat {
    /// Returns the header line for the format (empty for formats without headers)
    fn header(&self) -> Option<String>;

    /// Format a single judgment record
    fn format_row(&self, record: &JudgmentRecord) -> String;

    /// Format multiple records, header first
    fn format_rows(&self, records: &[JudgmentRecord]) -> String {
        let mut output = String::new();
        if let Some(header) = self.header() {
            output.push_str(&header);
            output.push('\n');
        }
        for record in records {
            output.push_str(&self.format_row(record));
            output.push('\n');
        }
        output
    }
}

/// Write formatted records to any writer
pub fn write_records<W: Write + ?Sized>(
    writer: &mut W,
    format: &dyn ExportFormat,
    records: &[JudgmentRecord],
) -> Result<()> {
    writer.write_all(format.format_rows(records).as_bytes())?;
    writer.flush()?;
    Ok(())
}
