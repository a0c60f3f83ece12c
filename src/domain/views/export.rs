use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::entities::row::Row;

pub const UTF8_BOM: char = '\u{feff}';
pub const STATUS_HEADER: &str = "Status";
pub const NOTE_HEADER: &str = "Observação";

/// Serializes rows as CSV: imported columns, then status and note.
/// Every field is quoted. Records are separated by `\n`, with no trailing
/// newline after the last one.
pub fn export_csv(rows: &[Row], columns: &[String]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(
        columns
            .iter()
            .map(String::as_str)
            .chain([STATUS_HEADER, NOTE_HEADER]),
    )?;
    for row in rows {
        writer.write_record(
            columns
                .iter()
                .map(|column| row.display_value(column))
                .chain([row.status.as_str().to_string(), row.note.clone()]),
        )?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow!("failed to flush csv: {}", err.error()))?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// The CSV text as handed to the file writer, BOM first.
pub fn export_document(rows: &[Row], columns: &[String]) -> Result<String> {
    let mut document = String::from(UTF8_BOM);
    document.push_str(&export_csv(rows, columns)?);
    Ok(document)
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("faturas-{}.csv", date.format("%Y-%m-%d"))
}
