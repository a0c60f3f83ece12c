#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NoColumns,
    NoData,
    UnsupportedFormat(String),
    ParseFailure(String),
    PersistFailure(String),
    LoadCorrupt(String),
}

impl StoreError {
    /// Import rejections leave the previous dataset in place.
    pub fn is_import_rejection(&self) -> bool {
        matches!(
            self,
            StoreError::NoColumns
                | StoreError::NoData
                | StoreError::UnsupportedFormat(_)
                | StoreError::ParseFailure(_)
        )
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NoColumns => write!(f, "Nenhuma coluna encontrada no arquivo"),
            StoreError::NoData => write!(f, "Nenhum dado encontrado no arquivo"),
            StoreError::UnsupportedFormat(ext) => write!(
                f,
                "Formato não suportado ({ext}); envie um arquivo CSV ou Excel (.xlsx, .xls)"
            ),
            StoreError::ParseFailure(message) => {
                write!(f, "Erro ao processar o arquivo: {message}")
            }
            StoreError::PersistFailure(message) => write!(f, "Erro ao salvar dados: {message}"),
            StoreError::LoadCorrupt(message) => write!(f, "Erro ao carregar dados: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}
