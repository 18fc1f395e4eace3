use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tubelink_core::LinkTarget;
use tubelink_engine::{WebhookSettings, DEFAULT_ENDPOINT};
use tubelink_logging::tl_info;

use super::cli::CliArgs;

const APP_DIR: &str = "tubelink";
const CONFIG_FILENAME: &str = "config.ron";
const HISTORY_FILENAME: &str = "link_history.json";
const LOG_FILENAME: &str = "tubelink.log";

const DEFAULT_FOLDER_URL: &str =
    "https://drive.google.com/drive/folders/1HELuHCkm3h6S_NA3w7SpgORrJ5xe_pQM?hl=ID";
const DEFAULT_SPREADSHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1gEx_2wBqVt_kZWuPj7FG0OTsTFY5UqHSvnmrCAWWAiQ/edit?gid=0#gid=0";
/// Display form of the `id-ID` locale, e.g. `18/10/2026, 14.05.09`.
const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H.%M.%S";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid webhook endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("invalid timestamp format {0:?}")]
    InvalidTimestampFormat(String),
}

/// Settings read from `config.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub history_file: Option<PathBuf>,
    pub folder_url: String,
    pub spreadsheet_url: String,
    pub timestamp_format: String,
    pub notification_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            history_file: None,
            folder_url: DEFAULT_FOLDER_URL.to_string(),
            spreadsheet_url: DEFAULT_SPREADSHEET_URL.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            notification_secs: 4,
        }
    }
}

impl AppConfig {
    /// Loads the config from `explicit`, or from the user config dir when `None`.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_ron(&content)?;
        tl_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli(&mut self, args: &CliArgs) -> Result<(), ConfigError> {
        if let Some(endpoint) = &args.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(path) = &args.history_file {
            self.history_file = Some(path.clone());
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_endpoint(&self.endpoint)?;
        let broken = StrftimeItems::new(&self.timestamp_format)
            .any(|item| matches!(item, Item::Error));
        if broken {
            return Err(ConfigError::InvalidTimestampFormat(
                self.timestamp_format.clone(),
            ));
        }
        Ok(())
    }

    pub fn webhook_settings(&self) -> WebhookSettings {
        WebhookSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn history_path(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(|| data_dir().join(HISTORY_FILENAME))
    }

    pub fn link_url(&self, target: LinkTarget) -> &str {
        match target {
            LinkTarget::Folder => &self.folder_url,
            LinkTarget::Spreadsheet => &self.spreadsheet_url,
        }
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }
}

pub fn default_log_path() -> PathBuf {
    data_dir().join(LOG_FILENAME)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };
    let parsed = url::Url::parse(endpoint).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.endpoint, "http://localhost:5678/webhook/youtube");
        assert_eq!(config.notification_secs, 4);
        assert!(config.history_path().ends_with("link_history.json"));
    }

    #[test]
    fn partial_ron_keeps_defaults_for_missing_fields() {
        let config = AppConfig::from_ron(
            r#"(
                endpoint: "http://127.0.0.1:9000/webhook/youtube",
                request_timeout_secs: Some(15),
            )"#,
        )
        .unwrap();

        assert_eq!(config.endpoint, "http://127.0.0.1:9000/webhook/youtube");
        assert_eq!(
            config.webhook_settings().request_timeout,
            Some(Duration::from_secs(15))
        );
        assert_eq!(config.webhook_settings().connect_timeout, None);
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn rejects_bad_endpoint_and_format() {
        assert!(matches!(
            AppConfig::from_ron(r#"(endpoint: "localhost:5678")"#),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            AppConfig::from_ron(r#"(timestamp_format: "%H.%M %")"#),
            Err(ConfigError::InvalidTimestampFormat(_))
        ));
        assert!(matches!(
            AppConfig::from_ron("(endpoint: 12)"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn cli_overrides_endpoint_and_history_file() {
        let args = CliArgs::try_parse_from([
            "tubelink",
            "--endpoint",
            "https://hooks.example.com/yt",
            "--history-file",
            "/tmp/h.json",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        config.apply_cli(&args).unwrap();

        assert_eq!(config.endpoint, "https://hooks.example.com/yt");
        assert_eq!(config.history_path(), PathBuf::from("/tmp/h.json"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("nope.ron");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn link_urls_follow_target() {
        let config = AppConfig::default();
        assert!(config.link_url(LinkTarget::Folder).contains("drive.google.com"));
        assert!(config
            .link_url(LinkTarget::Spreadsheet)
            .contains("docs.google.com/spreadsheets"));
    }
}
