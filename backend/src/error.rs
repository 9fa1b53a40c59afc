use ncm_backup_core::NcmError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error(transparent)]
    Ncm(#[from] NcmError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("Config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("Login failed: {0}")]
    Login(NcmError),
}
