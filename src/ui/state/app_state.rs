use std::sync::Arc;

use dioxus::prelude::{use_signal, ReadableExt, Signal};

use crate::domain::entities::dataset::StatusFilter;
use crate::domain::views::stats::Stats;
use crate::usecase::ports::storage::RecordStorage;
use crate::usecase::services::dataset_store::DatasetStore;
use crate::usecase::services::query_service::QueryService;

pub struct AppState {
    pub store: Signal<DatasetStore>,
    pub stats: Signal<Stats>,
    pub search: Signal<String>,
    pub status_filter: Signal<StatusFilter>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new(storage: Arc<dyn RecordStorage>) -> Self {
        let store = use_signal(move || DatasetStore::open(storage));
        Self {
            store,
            stats: use_signal(move || QueryService::stats(&store.peek())),
            search: use_signal(String::new),
            status_filter: use_signal(StatusFilter::default),
            busy: use_signal(|| false),
            status: use_signal(|| "Pronto".to_string()),
        }
    }
}
