use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

pub const DATA_DIR_ENV: &str = "FATURAS_DATA_DIR";
pub const LOG_ENV: &str = "FATURAS_LOG";
const DB_FILE_NAME: &str = "faturas.sqlite";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `FATURAS_DATA_DIR` when set, otherwise the platform's local data dir.
    pub fn from_env() -> Result<Self> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(Self::with_data_dir(dir));
        }
        let project_dirs = ProjectDirs::from("com", "faturas", "faturas")
            .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
        Ok(Self::with_data_dir(project_dirs.data_local_dir()))
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn webview_data_dir(&self) -> PathBuf {
        self.data_dir.join("webview2")
    }

    pub fn ensure_webview_data_dir(&self) -> Result<PathBuf> {
        ensure_dir(&self.webview_data_dir())
    }
}

fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create dir: {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

/// Log filter directive from `FATURAS_LOG`, then `RUST_LOG`.
pub fn log_filter_from_env() -> Option<String> {
    [LOG_ENV, "RUST_LOG"]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_live_under_data_dir() {
        let config = AppConfig::with_data_dir("/tmp/faturas-config");
        assert_eq!(config.db_path(), PathBuf::from("/tmp/faturas-config/faturas.sqlite"));
        assert_eq!(
            config.webview_data_dir(),
            PathBuf::from("/tmp/faturas-config/webview2")
        );
    }
}
