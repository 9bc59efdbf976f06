use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::{AppError, AppResult, ConfigError, FileError};
use crate::models::SearchQuery;

pub const DEFAULT_BASE_URL: &str = "https://www.expertvoice.com";

/// Program configuration file
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub auth_info: AuthInfo,
    /// Named search presets
    #[serde(default)]
    pub saved_queries: BTreeMap<String, SearchQuery>,
    #[serde(default = "default_seen_listings_filename")]
    pub seen_listings_filename: String,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Clone, Default, Deserialize)]
pub struct AuthInfo {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for AuthInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthInfo")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Logging section; `RUST_LOG` overrides `level` when set
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Append log output to this file instead of stderr
    pub file: Option<String>,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            ansi: true,
        }
    }
}

fn default_seen_listings_filename() -> String {
    "seen_listings.json".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Config {
    /// Load from a JSON file, or TOML when the extension is `.toml`,
    /// then apply environment overrides.
    pub fn load(path: &Path) -> AppResult<Self> {
        let path_str = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(&path_str, e))?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            Self::from_toml_str(&content).map_err(|source| FileError::TomlParseFailed {
                path: path_str.clone(),
                source,
            })?
        } else {
            Self::from_json_str(&content).map_err(|source| FileError::JsonParseFailed {
                path: path_str.clone(),
                source,
            })?
        };

        Ok(config.with_env_overrides())
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// `EV_USERNAME`, `EV_PASSWORD` and `EV_BASE_URL` win over the file
    pub fn with_env_overrides(self) -> Self {
        Self {
            auth_info: AuthInfo {
                username: std::env::var("EV_USERNAME").unwrap_or(self.auth_info.username),
                password: std::env::var("EV_PASSWORD").unwrap_or(self.auth_info.password),
            },
            base_url: std::env::var("EV_BASE_URL").unwrap_or(self.base_url),
            ..self
        }
    }

    /// Sorted saved query names
    pub fn query_names(&self) -> Vec<&str> {
        self.saved_queries.keys().map(String::as_str).collect()
    }

    /// Queries selected on the command line: one by name, or all of them
    pub fn select_queries(
        &self,
        name: Option<&str>,
        all: bool,
    ) -> AppResult<Vec<(String, SearchQuery)>> {
        if all {
            if self.saved_queries.is_empty() {
                return Err(ConfigError::NoSavedQueries.into());
            }
            return Ok(self
                .saved_queries
                .iter()
                .map(|(name, query)| (name.clone(), query.clone()))
                .collect());
        }

        let name = name.ok_or(ConfigError::NoSavedQueries)?;
        let query = self
            .saved_queries
            .get(name)
            .ok_or_else(|| ConfigError::UnknownQuery {
                name: name.to_string(),
            })?;
        Ok(vec![(name.to_string(), query.clone())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "auth_info": {"username": "me@example.com", "password": "hunter2"},
        "saved_queries": {
            "shoes": {"categories": [10]},
            "arcteryx": {"brands": [77], "in_stock_only": true}
        },
        "logging": {"level": "debug", "version": 1}
    }"#;

    #[test]
    fn test_json_defaults() {
        let config = Config::from_json_str(SAMPLE).unwrap();
        assert_eq!(config.auth_info.username, "me@example.com");
        assert_eq!(config.seen_listings_filename, "seen_listings.json");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.ansi);
        assert_eq!(config.query_names(), vec!["arcteryx", "shoes"]);
    }

    #[test]
    fn test_toml_config() {
        let config = Config::from_toml_str(
            r#"
            seen_listings_filename = "seen.json"

            [auth_info]
            username = "me"
            password = "pw"

            [saved_queries.jackets]
            categories = [1, 2]
            "#,
        )
        .unwrap();
        assert_eq!(config.seen_listings_filename, "seen.json");
        assert_eq!(config.saved_queries["jackets"].categories, vec![1, 2]);
    }

    #[test]
    fn test_select_queries() {
        let config = Config::from_json_str(SAMPLE).unwrap();

        let all = config.select_queries(None, true).unwrap();
        assert_eq!(all.len(), 2);

        let one = config.select_queries(Some("shoes"), false).unwrap();
        assert_eq!(one[0].0, "shoes");
        assert_eq!(one[0].1.categories, vec![10]);

        let missing = config.select_queries(Some("hats"), false);
        assert!(matches!(
            missing,
            Err(AppError::Config(ConfigError::UnknownQuery { .. }))
        ));
    }

    #[test]
    fn test_password_not_in_debug_output() {
        let config = Config::from_json_str(SAMPLE).unwrap();
        let rendered = format!("{:?}", config.auth_info);
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.saved_queries.len(), 2);

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{").unwrap();
        assert!(matches!(
            Config::load(&broken),
            Err(AppError::File(FileError::JsonParseFailed { .. }))
        ));
    }
}
