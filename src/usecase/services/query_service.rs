use crate::domain::entities::dataset::FilterCriteria;
use crate::domain::entities::row::Row;
use crate::domain::views::filter::filter_owned;
use crate::domain::views::stats::{stats, Stats};
use crate::usecase::services::dataset_store::DatasetStore;

/// The rows the table renders for the current criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub total_rows: usize,
}

impl TableView {
    pub fn has_data(&self) -> bool {
        self.total_rows > 0
    }

    pub fn has_results(&self) -> bool {
        !self.rows.is_empty()
    }
}

pub struct QueryService;

impl QueryService {
    pub fn stats(store: &DatasetStore) -> Stats {
        stats(store.rows())
    }

    pub fn table_view(store: &DatasetStore, criteria: &FilterCriteria) -> TableView {
        TableView {
            columns: store.columns().to_vec(),
            rows: filter_owned(store.rows(), criteria),
            total_rows: store.rows().len(),
        }
    }
}
