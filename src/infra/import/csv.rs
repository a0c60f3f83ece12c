use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};

use crate::domain::entities::row::CellValue;
use crate::infra::import::normalize_headers;
use crate::usecase::ports::parser::{RawRow, TabularData};

// Integers past 2^53 lose digits as f64; keep those as text.
const MAX_SAFE_NUMBER: f64 = 9_007_199_254_740_992.0;

// Only truly empty lines are skipped; `,,` and whitespace lines are records.
fn is_empty_line(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).map_or(true, str::is_empty)
}

fn is_digits(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit())
}

fn looks_numeric(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    let (mantissa, exponent) = match body.find(|c| c == 'e' || c == 'E') {
        Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
        None => (body, None),
    };

    let mut parts = mantissa.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next();

    if int_part.is_empty() && frac_part.map_or(true, str::is_empty) {
        return false;
    }
    if !is_digits(int_part) || !frac_part.map_or(true, is_digits) {
        return false;
    }
    // "007" is a code, not a number.
    if int_part.len() > 1 && int_part.starts_with('0') {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp
                .strip_prefix(|c| c == '+' || c == '-')
                .unwrap_or(exp);
            !exp.is_empty() && is_digits(exp)
        }
    }
}

/// Dynamic typing for one CSV field: empty is absent, numeric text is a number.
pub fn parse_scalar(field: &str) -> Option<CellValue> {
    if field.is_empty() {
        return None;
    }
    let trimmed = field.trim();
    if looks_numeric(trimmed) {
        if let Ok(value) = trimmed.parse::<f64>() {
            if value.is_finite() && value.abs() < MAX_SAFE_NUMBER {
                return Some(CellValue::Number(value));
            }
        }
    }
    Some(CellValue::text(field))
}

pub fn parse_csv_reader<R: Read>(reader: R) -> Result<TabularData> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut columns: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        if is_empty_line(&record) {
            continue;
        }

        let Some(header) = columns.as_ref() else {
            let raw_headers = record
                .iter()
                .enumerate()
                .map(|(idx, name)| {
                    if idx == 0 {
                        name.trim_start_matches('\u{feff}').to_string()
                    } else {
                        name.to_string()
                    }
                })
                .collect();
            columns = Some(normalize_headers(raw_headers));
            continue;
        };

        let row: RawRow = header
            .iter()
            .enumerate()
            .map(|(idx, column)| (column.clone(), record.get(idx).and_then(parse_scalar)))
            .collect();
        rows.push(row);
    }

    Ok(TabularData {
        columns: columns.unwrap_or_default(),
        rows,
    })
}

pub fn parse_csv(csv_path: &Path) -> Result<TabularData> {
    let file = File::open(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    parse_csv_reader(file).with_context(|| format!("failed to read csv: {}", csv_path.display()))
}
