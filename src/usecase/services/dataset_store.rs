use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::entities::command::{CommandOutcome, RowCommand};
use crate::domain::entities::dataset::Dataset;
use crate::domain::entities::row::{CellValue, Row, Status};
use crate::domain::error::StoreError;
use crate::usecase::ports::parser::RawRow;
use crate::usecase::ports::storage::RecordStorage;

pub const STORAGE_KEY: &str = "faturas-data";

const LEGACY_NOTE_KEY: &str = "observacao";

/// A row as found in the persisted record.
///
/// Current records nest cells under `values`. Records left by the browser
/// version keep cells at the top level and the note under `observacao`.
#[derive(Debug, Deserialize)]
struct StoredRow {
    id: String,
    #[serde(default)]
    status: Status,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    values: Option<BTreeMap<String, Option<CellValue>>>,
    #[serde(flatten)]
    flat: BTreeMap<String, Value>,
}

fn flat_cell(value: Value) -> Result<Option<CellValue>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(flag) => Ok(Some(CellValue::text(flag.to_string()))),
        Value::Number(number) => number
            .as_f64()
            .map(|number| Some(CellValue::Number(number)))
            .ok_or_else(|| format!("unrepresentable number {number}")),
        Value::String(text) => Ok(Some(CellValue::Text(text))),
        other => Err(format!("unsupported cell {other}")),
    }
}

impl StoredRow {
    fn into_row(self, columns: &[String]) -> Result<Row, StoreError> {
        let StoredRow {
            id,
            status,
            note,
            values,
            mut flat,
        } = self;
        let corrupt = |reason: String| StoreError::LoadCorrupt(format!("row {id}: {reason}"));

        let legacy_note = match flat.remove(LEGACY_NOTE_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text),
            Some(other) => return Err(corrupt(format!("note is not text: {other}"))),
        };

        let values = match values {
            Some(values) if flat.is_empty() => values,
            Some(_) => {
                let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
                return Err(corrupt(format!("unexpected fields: {}", keys.join(", "))));
            }
            // Undeclared keys are dropped, as at import.
            None => columns
                .iter()
                .map(|column| match flat.remove(column) {
                    Some(value) => flat_cell(value).map(|cell| (column.clone(), cell)),
                    None => Ok((column.clone(), None)),
                })
                .collect::<Result<BTreeMap<_, _>, String>>()
                .map_err(corrupt)?,
        };

        Ok(Row {
            note: note.or(legacy_note).unwrap_or_default(),
            id,
            status,
            values,
        })
    }
}

#[derive(Debug, Serialize)]
struct PersistedRecord<'a> {
    data: &'a [Row],
    headers: &'a [String],
    #[serde(rename = "lastUpdate")]
    last_update: &'a str,
}

#[derive(Debug, Deserialize)]
struct StoredRecord {
    #[serde(default)]
    data: Vec<StoredRow>,
    #[serde(default)]
    headers: Vec<String>,
    #[serde(rename = "lastUpdate", default)]
    last_update: Option<String>,
}

impl StoredRecord {
    fn into_dataset(self) -> Result<(Dataset, Option<String>), StoreError> {
        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(self.data.len());
        for stored in self.data {
            if !seen.insert(stored.id.clone()) {
                return Err(StoreError::LoadCorrupt(format!(
                    "duplicate row id: {}",
                    stored.id
                )));
            }
            rows.push(stored.into_row(&self.headers)?);
        }
        let dataset = Dataset {
            rows,
            columns: self.headers,
        };
        Ok((dataset, self.last_update))
    }
}

fn is_fully_empty(raw: &RawRow, columns: &[String]) -> bool {
    columns.iter().all(|column| {
        raw.get(column)
            .and_then(Option::as_ref)
            .map_or(true, CellValue::is_blank)
    })
}

/// Owns the canonical dataset and keeps the persisted record in sync with it.
///
/// Every mutation updates memory first and persists second, so a failed write
/// surfaces as [`StoreError::PersistFailure`] without losing the edit.
pub struct DatasetStore {
    storage: Arc<dyn RecordStorage>,
    dataset: Dataset,
    last_update: Option<String>,
}

impl DatasetStore {
    pub fn new(storage: Arc<dyn RecordStorage>) -> Self {
        Self {
            storage,
            dataset: Dataset::default(),
            last_update: None,
        }
    }

    /// Creates the store and restores whatever was last persisted.
    pub fn open(storage: Arc<dyn RecordStorage>) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn rows(&self) -> &[Row] {
        &self.dataset.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.dataset.columns
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.rows.is_empty()
    }

    pub fn last_update(&self) -> Option<&str> {
        self.last_update.as_deref()
    }

    fn read_record(&self) -> Result<Option<(Dataset, Option<String>)>, StoreError> {
        let Some(text) = self
            .storage
            .read(STORAGE_KEY)
            .map_err(|err| StoreError::LoadCorrupt(err.to_string()))?
        else {
            return Ok(None);
        };
        let record: StoredRecord = serde_json::from_str(&text)
            .map_err(|err| StoreError::LoadCorrupt(err.to_string()))?;
        record.into_dataset().map(Some)
    }

    /// Replaces the in-memory dataset with the persisted one.
    ///
    /// Missing or unreadable records yield an empty dataset.
    pub fn load(&mut self) -> &Dataset {
        match self.read_record() {
            Ok(Some((dataset, last_update))) => {
                info!(
                    rows = dataset.rows.len(),
                    columns = dataset.columns.len(),
                    "restored persisted dataset"
                );
                self.dataset = dataset;
                self.last_update = last_update;
            }
            Ok(None) => {
                debug!("no persisted dataset");
                self.dataset = Dataset::default();
                self.last_update = None;
            }
            Err(err) => {
                warn!(error = %err, "discarding unreadable persisted dataset");
                self.dataset = Dataset::default();
                self.last_update = None;
            }
        }
        &self.dataset
    }

    /// Writes rows, columns and a timestamp as one record.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let last_update = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let record = PersistedRecord {
            data: &self.dataset.rows,
            headers: &self.dataset.columns,
            last_update: &last_update,
        };
        let text = serde_json::to_string(&record)
            .map_err(|err| StoreError::PersistFailure(err.to_string()))?;

        match self.storage.write(STORAGE_KEY, &text) {
            Ok(()) => {
                debug!(bytes = text.len(), "persisted dataset");
                self.last_update = Some(last_update);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to persist dataset");
                Err(StoreError::PersistFailure(err.to_string()))
            }
        }
    }

    /// Replaces the dataset with freshly imported rows.
    ///
    /// Returns the number of rows kept after dropping fully empty ones.
    pub fn import(&mut self, rows: Vec<RawRow>, columns: Vec<String>) -> Result<usize, StoreError> {
        self.import_batch(rows, columns, Utc::now().timestamp_millis())
    }

    fn import_batch(
        &mut self,
        rows: Vec<RawRow>,
        columns: Vec<String>,
        stamp: i64,
    ) -> Result<usize, StoreError> {
        if columns.is_empty() {
            return Err(StoreError::NoColumns);
        }

        let imported: Vec<Row> = rows
            .into_iter()
            .filter(|raw| !is_fully_empty(raw, &columns))
            .enumerate()
            .map(|(index, mut raw)| {
                let values = columns
                    .iter()
                    .map(|column| (column.clone(), raw.remove(column).flatten()))
                    .collect();
                Row::new(format!("row-{stamp}-{index}"), values)
            })
            .collect();

        if imported.is_empty() {
            return Err(StoreError::NoData);
        }

        let count = imported.len();
        info!(rows = count, columns = columns.len(), "imported dataset");
        self.dataset = Dataset {
            rows: imported,
            columns,
        };
        self.persist()?;
        Ok(count)
    }

    pub fn dispatch(&mut self, id: &str, command: RowCommand) -> Result<CommandOutcome, StoreError> {
        let Some(row) = self.dataset.row_mut(id) else {
            debug!(id, "ignoring command for unknown row");
            return Ok(CommandOutcome::missing());
        };
        let outcome = CommandOutcome::applied(&command);
        match command {
            RowCommand::SetStatus(status) => row.status = status,
            RowCommand::SetNote(text) => row.note = text,
        }
        self.persist()?;
        Ok(outcome)
    }

    /// Returns `Ok(false)` when no row has this id.
    pub fn update_status(&mut self, id: &str, status: Status) -> Result<bool, StoreError> {
        self.dispatch(id, RowCommand::SetStatus(status))
            .map(|outcome| outcome.applied)
    }

    pub fn update_note(&mut self, id: &str, text: impl Into<String>) -> Result<bool, StoreError> {
        self.dispatch(id, RowCommand::SetNote(text.into()))
            .map(|outcome| outcome.applied)
    }

    /// Empties the dataset and drops the persisted record.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.dataset = Dataset::default();
        self.last_update = None;
        info!("cleared dataset");
        self.storage.remove(STORAGE_KEY).map_err(|err| {
            warn!(error = %err, "failed to remove persisted dataset");
            StoreError::PersistFailure(err.to_string())
        })
    }
}

#[cfg(test)]
impl DatasetStore {
    pub fn import_stamped(
        &mut self,
        rows: Vec<RawRow>,
        columns: Vec<String>,
        stamp: i64,
    ) -> Result<usize, StoreError> {
        self.import_batch(rows, columns, stamp)
    }
}
