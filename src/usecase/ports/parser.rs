use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::domain::entities::row::CellValue;
use crate::domain::error::StoreError;

/// One parsed record keyed by column name.
pub type RawRow = BTreeMap<String, Option<CellValue>>;

#[derive(Debug, Clone, PartialEq)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Xlsx,
    Xls,
}

impl SourceFormat {
    pub const EXTENSIONS: [&'static str; 3] = ["csv", "xlsx", "xls"];

    pub fn from_extension(ext: &str) -> Result<Self, StoreError> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "xlsx" => Ok(SourceFormat::Xlsx),
            "xls" => Ok(SourceFormat::Xls),
            other => Err(StoreError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Xlsx => "xlsx",
            SourceFormat::Xls => "xls",
        };
        f.write_str(name)
    }
}

pub trait TabularParser: Send + Sync {
    fn parse(&self, path: &Path, format: SourceFormat) -> anyhow::Result<TabularData>;
}
