use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crate::domain::views::export::{export_document, export_filename};
use crate::usecase::services::dataset_store::DatasetStore;

pub struct ExportService;

impl ExportService {
    pub fn suggested_filename() -> String {
        export_filename(Local::now().date_naive())
    }

    /// Writes every row of the store, not only the visible ones.
    pub fn export_to(store: &DatasetStore, path: &Path) -> Result<usize> {
        let document = export_document(store.rows(), store.columns())?;
        std::fs::write(path, document.as_bytes())
            .with_context(|| format!("failed to write export: {}", path.display()))?;
        info!(path = %path.display(), rows = store.rows().len(), "exported dataset");
        Ok(store.rows().len())
    }
}
