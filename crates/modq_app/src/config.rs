use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use modq_engine::EngineSettings;
use modq_logging::LogDestination;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "./modq.ron";
pub const DEFAULT_PRESETS_FILE: &str = "./modq_presets.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub poll_interval_secs: u64,
    pub search_debounce_ms: u64,
    pub presets_path: PathBuf,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let engine = EngineSettings::default();
        Self {
            base_url: engine.base_url,
            connect_timeout_secs: engine.connect_timeout.as_secs(),
            request_timeout_secs: engine.request_timeout.as_secs(),
            poll_interval_secs: engine.poll_interval.as_secs(),
            search_debounce_ms: engine.search_debounce.as_millis() as u64,
            presets_path: PathBuf::from(DEFAULT_PRESETS_FILE),
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads `path`, or `./modq.ron` when none is given. Only the implicit
    /// default file may be missing.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if !required && err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path,
            message: err.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        self
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            search_debounce: Duration::from_millis(self.search_debounce_ms),
        }
    }
}

/// Human-readable origin of the loaded configuration, for the startup log.
pub fn source_description(path: Option<&Path>) -> String {
    match path {
        Some(path) => format!("config {}", path.display()),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => format!("config {DEFAULT_CONFIG_FILE}"),
        None => "built-in config defaults".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use modq_logging::LogDestination;
    use pretty_assertions::assert_eq;

    use super::{source_description, AppConfig, ConfigError};

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("modq.ron");
        fs::write(
            &path,
            r#"(base_url: "http://mod.test/api/v1", poll_interval_secs: 5, log_destination: Both)"#,
        )
        .expect("write config");

        let config = AppConfig::load(Some(&path)).expect("load");
        assert_eq!(config.base_url, "http://mod.test/api/v1");
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.request_timeout_secs, AppConfig::default().request_timeout_secs);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = AppConfig::load(Some(&dir.path().join("absent.ron"))).expect_err("missing");
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("modq.ron");
        fs::write(&path, "(base_url: 42").expect("write config");

        let err = AppConfig::load(Some(&path)).expect_err("malformed");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn flag_overrides_base_url() {
        let config = AppConfig::default().with_base_url(Some("http://other/api".to_string()));
        assert_eq!(config.engine_settings().base_url, "http://other/api");
        assert_eq!(
            AppConfig::default().engine_settings().poll_interval.as_secs(),
            30
        );
    }

    #[test]
    fn explicit_config_path_is_named_in_startup_log() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("site.ron");
        assert_eq!(
            source_description(Some(&path)),
            format!("config {}", path.display())
        );
    }
}
