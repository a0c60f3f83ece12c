pub mod dataset_store;
pub mod export_service;
pub mod import_service;
pub mod query_service;
