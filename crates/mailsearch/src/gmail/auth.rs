//! Access-token resolution for the Gmail client
//!
//! Obtaining and refreshing OAuth tokens is left to the host application.
//! This module only finds a token that is already usable: either configured
//! directly or stored on disk by whatever performed the OAuth flow.

use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::SearchConfig;
use crate::error::ProviderError;

/// Token filename in the mailsearch config directory
pub const TOKEN_FILE: &str = "gmail-tokens.json";

/// Tokens expiring within this window are treated as expired
const EXPIRY_BUFFER_SECS: i64 = 300;

/// Token data as stored by the OAuth flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds) when the access token expires
    pub expires_at: Option<i64>,
}

impl StoredToken {
    /// Whether the access token is usable at `now` (unix seconds)
    ///
    /// Tokens without an expiry are assumed valid.
    pub fn is_fresh_at(&self, now: i64) -> bool {
        !self.access_token.is_empty()
            && self
                .expires_at
                .is_none_or(|expires_at| expires_at > now + EXPIRY_BUFFER_SECS)
    }

    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now().timestamp())
    }

    /// Load a stored token, `None` if the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>, ProviderError> {
        config::load_json_file_opt(path).map_err(|e| ProviderError::Auth(format!("{:#}", e)))
    }
}

/// Find an access token for `config`
///
/// Uses the configured token first (which already includes any
/// `GMAIL_ACCESS_TOKEN` override), then the stored token file.
pub fn resolve_access_token(config: &SearchConfig) -> Result<String, ProviderError> {
    if let Some(token) = config.access_token.as_deref().filter(|t| !t.is_empty()) {
        debug!("Using configured access token");
        return Ok(token.to_string());
    }

    let path = config.token_path().ok_or_else(|| {
        ProviderError::Auth("no access token configured and no config directory".to_string())
    })?;

    match StoredToken::load(&path)? {
        Some(token) if token.is_fresh() => {
            debug!("Using stored access token from {}", path.display());
            Ok(token.access_token)
        }
        Some(_) => Err(ProviderError::Auth(format!(
            "stored access token in {} has expired",
            path.display()
        ))),
        None => Err(ProviderError::Auth(format!(
            "no access token configured; set GMAIL_ACCESS_TOKEN or write {}",
            path.display()
        ))),
    }
}
