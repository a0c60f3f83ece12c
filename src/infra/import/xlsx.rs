use std::path::Path;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::domain::entities::row::CellValue;
use crate::infra::import::normalize_headers;
use crate::usecase::ports::parser::{RawRow, TabularData};

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Numeric cells stay numbers; everything else is text, blanks included.
pub fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        other => CellValue::Text(cell_to_string(other)),
    }
}

pub fn range_to_tabular(range: &Range<Data>) -> TabularData {
    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return TabularData {
            columns: Vec::new(),
            rows: Vec::new(),
        };
    };

    let columns = normalize_headers(header_row.iter().map(cell_to_string).collect());
    let rows = sheet_rows
        .map(|cells| {
            columns
                .iter()
                .enumerate()
                .map(|(idx, column)| {
                    let value = cells
                        .get(idx)
                        .map(cell_to_value)
                        .unwrap_or_else(|| CellValue::text(""));
                    (column.clone(), Some(value))
                })
                .collect::<RawRow>()
        })
        .collect();

    TabularData { columns, rows }
}

/// Reads the first sheet of an `.xlsx` or `.xls` workbook.
pub fn parse_workbook(xlsx_path: &Path) -> Result<TabularData> {
    let mut workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open workbook: {}", xlsx_path.display()))?;

    let Some(first_sheet) = workbook.worksheet_range_at(0) else {
        bail!("no sheet found in workbook: {}", xlsx_path.display());
    };
    let range = first_sheet
        .with_context(|| format!("failed to read first sheet: {}", xlsx_path.display()))?;

    Ok(range_to_tabular(&range))
}
