use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::BackupError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub netease: Account,
    #[serde(default)]
    pub backup: BackupConfig,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    pub download_cover: bool,
    pub save_path: PathBuf,
    /// Cookie file reused across runs; login is skipped while it is valid.
    pub session_file: Option<PathBuf>,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            download_cover: true,
            save_path: PathBuf::from("./playlists"),
            session_file: None,
        }
    }
}

impl Config {
    pub async fn from_file(path: &Path) -> Result<Self, BackupError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BackupError::ConfigNotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&content).map_err(|source| BackupError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let config = Config::parse(
            r#"
[netease]
email = "me@163.com"
password = "secret"

[backup]
download_cover = false
save_path = "/tmp/out"
session_file = "/tmp/cookie.json"
"#,
        )
        .unwrap();
        assert_eq!(config.netease.email, "me@163.com");
        assert_eq!(config.netease.password, "secret");
        assert!(!config.backup.download_cover);
        assert_eq!(config.backup.save_path, PathBuf::from("/tmp/out"));
        assert_eq!(
            config.backup.session_file,
            Some(PathBuf::from("/tmp/cookie.json"))
        );
    }

    #[test]
    fn test_parse_defaults() {
        let config = Config::parse(
            r#"
[netease]
email = "me@163.com"
"#,
        )
        .unwrap();
        assert!(config.backup.download_cover);
        assert_eq!(config.backup.save_path, PathBuf::from("./playlists"));
        assert!(config.backup.session_file.is_none());
        assert_eq!(config.netease.password, "");
    }

    #[test]
    fn test_missing_section() {
        assert!(Config::parse("[backup]\ndownload_cover = true\n").is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let config = Config::parse("[netease]\nemail = \"a\"\npassword = \"hunter2\"\n").unwrap();
        assert!(!format!("{:?}", config).contains("hunter2"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        assert!(matches!(
            Config::from_file(Path::new("/nonexistent/config.toml")).await,
            Err(BackupError::ConfigNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[netease]\nemail = \"me@163.com\"\n").unwrap();
        let config = Config::from_file(&path).await.unwrap();
        assert_eq!(config.netease.email, "me@163.com");

        std::fs::write(&path, "[netease\n").unwrap();
        assert!(matches!(
            Config::from_file(&path).await,
            Err(BackupError::Config { .. })
        ));
    }
}
