use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;

use crate::usecase::ports::parser::{SourceFormat, TabularData, TabularParser};

pub mod csv;
pub mod xlsx;

const EMPTY_HEADER: &str = "__EMPTY";

/// Names blank headers `__EMPTY`, `__EMPTY_1`, ... and suffixes repeats
/// with `_1`, `_2`, ... so every column name is unique.
pub fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|name| {
            let base = if name.trim().is_empty() {
                EMPTY_HEADER.to_string()
            } else {
                name
            };
            let mut candidate = base.clone();
            let mut suffix = 1;
            while seen.contains(&candidate) {
                candidate = format!("{base}_{suffix}");
                suffix += 1;
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

pub struct FileParser;

impl TabularParser for FileParser {
    fn parse(&self, path: &Path, format: SourceFormat) -> Result<TabularData> {
        match format {
            SourceFormat::Csv => self::csv::parse_csv(path),
            SourceFormat::Xlsx | SourceFormat::Xls => self::xlsx::parse_workbook(path),
        }
    }
}
