use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use docqa_engine::{ServiceSettings, DEFAULT_BASE_URL};
use docqa_logging::LogDestination;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::cli::Args;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_overrides(mut self, args: &Args) -> Self {
        if let Some(base_url) = &args.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(destination) = args.log {
            self.log_destination = destination;
        }
        self
    }

    /// Unknown level names fall back to `Info`.
    pub fn log_level(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings::new(self.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(base_url: Option<&str>, log: Option<LogDestination>) -> Args {
        Args {
            config: PathBuf::from("docqa.ron"),
            base_url: base_url.map(str::to_string),
            log,
        }
    }

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url, "http://localhost:8000/");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docqa.ron");
        fs::write(&path, r#"(base_url: "http://qa.lan:9000/", log_level: "debug")"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.base_url, "http://qa.lan:9000/");
        assert_eq!(config.log_level(), LevelFilter::Debug);
        assert_eq!(config.log_destination, LogDestination::File);
    }

    #[test]
    fn broken_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docqa.ron");
        fs::write(&path, "(base_url: ").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn cli_flags_win_over_file() {
        let config = AppConfig::default()
            .with_overrides(&args(Some("http://other:1/"), Some(LogDestination::Both)));
        assert_eq!(config.base_url, "http://other:1/");
        assert_eq!(config.log_destination, LogDestination::Both);

        let untouched = AppConfig::default().with_overrides(&args(None, None));
        assert_eq!(untouched, AppConfig::default());
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let config = AppConfig {
            log_level: "loud".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.log_level(), LevelFilter::Info);
    }
}
