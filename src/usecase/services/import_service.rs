use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::error::StoreError;
use crate::usecase::ports::parser::{SourceFormat, TabularData, TabularParser};

pub struct ImportService {
    parser: Arc<dyn TabularParser>,
}

impl ImportService {
    pub fn new(parser: Arc<dyn TabularParser>) -> Self {
        Self { parser }
    }

    /// Reads a spreadsheet into rows without touching any store.
    ///
    /// Runs off the UI task; the caller hands the rows to
    /// `DatasetStore::import`, so format and parse failures leave the store
    /// untouched.
    pub fn read_file(&self, path: &Path) -> Result<TabularData, StoreError> {
        let format = SourceFormat::from_path(path)?;
        info!(path = %path.display(), %format, "reading file");

        self.parser.parse(path, format).map_err(|err| {
            warn!(path = %path.display(), error = %format!("{err:#}"), "failed to parse file");
            StoreError::ParseFailure(format!("{err:#}"))
        })
    }
}
