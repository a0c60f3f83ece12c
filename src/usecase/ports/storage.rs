#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Message(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Local key-value storage holding one text record per key.
///
/// A `write` either fully replaces the record or fails; readers never see a
/// partially written value.
pub trait RecordStorage: Send + Sync {
    fn init(&self) -> Result<(), StorageError>;

    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
