use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single imported cell. Absent cells are `None` at the map level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Text(text) if text.is_empty())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Text(value) => f.write_str(value),
        }
    }
}

/// Payment state assigned by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    #[serde(alias = "pendente")]
    Pending,
    #[serde(alias = "pago")]
    Paid,
    #[serde(alias = "atrasado")]
    Late,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::Paid, Status::Late];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Paid => "paid",
            Status::Late => "late",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Pending => "⏳ Pendente",
            Status::Paid => "✓ Pago",
            Status::Late => "✗ Atrasado",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" | "pendente" => Ok(Status::Pending),
            "paid" | "pago" => Ok(Status::Paid),
            "late" | "atrasado" => Ok(Status::Late),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// One imported record plus its annotations.
///
/// `id`, `status` and `note` never share a namespace with the imported
/// columns: an imported column called `status` stays in `values`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub id: String,
    pub status: Status,
    pub note: String,
    pub values: BTreeMap<String, Option<CellValue>>,
}

impl Row {
    pub fn new(id: impl Into<String>, values: BTreeMap<String, Option<CellValue>>) -> Self {
        Self {
            id: id.into(),
            status: Status::Pending,
            note: String::new(),
            values,
        }
    }

    pub fn value(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column).and_then(Option::as_ref)
    }

    /// Display form of a column, empty when absent.
    pub fn display_value(&self, column: &str) -> String {
        self.value(column).map(ToString::to_string).unwrap_or_default()
    }

    /// String forms of every present field, reserved ones first.
    pub fn field_texts(&self) -> impl Iterator<Item = String> + '_ {
        [
            self.id.clone(),
            self.status.as_str().to_string(),
            self.note.clone(),
        ]
        .into_iter()
        .chain(self.values.values().flatten().map(ToString::to_string))
    }
}
