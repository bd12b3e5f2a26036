//! Configuration for the Gmail-backed tools
//!
//! Values are loaded in layers:
//! 1. Built-in defaults
//! 2. JSON file (`~/.config/mailsearch/mailsearch.json`)
//! 3. Runtime environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::gmail::{GmailClient, TOKEN_FILE};

/// Config filename in the mailsearch config directory
const CONFIG_FILE: &str = "mailsearch.json";

/// Environment variable overriding the access token
pub const ACCESS_TOKEN_ENV: &str = "GMAIL_ACCESS_TOKEN";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "GMAIL_API_BASE_URL";

/// Settings used to build Gmail clients and tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Gmail REST API root
    pub base_url: String,
    /// Mailbox owner; `me` is the authenticated user
    pub user_id: String,
    /// Bearer token; when unset the stored token file is consulted
    pub access_token: Option<String>,
    /// Stored token location, defaults to `gmail-tokens.json` in the config dir
    pub token_file: Option<PathBuf>,
    /// Overall per-request timeout
    pub timeout_secs: Option<u64>,
    /// Result cap used when a tool call does not specify one
    pub default_max_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: GmailClient::BASE_URL.to_string(),
            user_id: "me".to_string(),
            access_token: None,
            token_file: None,
            timeout_secs: None,
            default_max_results: 10,
        }
    }
}

impl SearchConfig {
    /// Load the config file if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let from_file: Option<Self> = config::load_json_opt(CONFIG_FILE)?;
        Ok(from_file
            .unwrap_or_default()
            .with_overrides(|key| std::env::var(key).ok()))
    }

    /// Load config from a specific JSON file, without environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        config::load_json_file(path)
    }

    /// Parse config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply overrides from a variable lookup (normally the process environment)
    ///
    /// Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = lookup(ACCESS_TOKEN_ENV) {
            self.access_token = Some(token);
        }
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Where the stored token lives, if anywhere
    pub fn token_path(&self) -> Option<PathBuf> {
        self.token_file
            .clone()
            .or_else(|| config::config_path(TOKEN_FILE))
    }

    /// Default config file path (~/.config/mailsearch/mailsearch.json)
    pub fn default_config_path() -> Option<PathBuf> {
        config::config_path(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.base_url, "https://gmail.googleapis.com/gmail/v1");
        assert_eq!(config.user_id, "me");
        assert_eq!(config.default_max_results, 10);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SearchConfig::from_json(r#"{ "user_id": "alice@example.com", "timeout_secs": 15 }"#).unwrap();
        assert_eq!(config.user_id, "alice@example.com");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.base_url, GmailClient::BASE_URL);
        assert_eq!(config.default_max_results, 10);
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "access_token": "file-token", "default_max_results": 25 }"#).unwrap();

        let config = SearchConfig::from_file(&path).unwrap();
        assert_eq!(config.access_token.as_deref(), Some("file-token"));
        assert_eq!(config.default_max_results, 25);
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ACCESS_TOKEN_ENV, "env-token"),
            (BASE_URL_ENV, "http://localhost:9999"),
        ]);
        let config = SearchConfig {
            access_token: Some("file-token".to_string()),
            ..SearchConfig::default()
        }
        .with_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.access_token.as_deref(), Some("env-token"));
        assert_eq!(config.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_empty_overrides_ignored() {
        let config = SearchConfig {
            access_token: Some("file-token".to_string()),
            ..SearchConfig::default()
        }
        .with_overrides(|_| Some("  ".to_string()));

        assert_eq!(config.access_token.as_deref(), Some("file-token"));
        assert_eq!(config.base_url, GmailClient::BASE_URL);
    }

    #[test]
    fn test_explicit_token_file() {
        let config = SearchConfig {
            token_file: Some(PathBuf::from("/tmp/tokens.json")),
            ..SearchConfig::default()
        };
        assert_eq!(config.token_path(), Some(PathBuf::from("/tmp/tokens.json")));
    }
}
