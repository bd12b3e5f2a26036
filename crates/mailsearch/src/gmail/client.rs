//! Gmail API HTTP client
//!
//! Provides single-page search and message fetches against the Gmail API.
//! Uses synchronous HTTP (ureq) to be executor-agnostic.

use log::debug;
use serde::de::DeserializeOwned;
use std::time::Duration;
use ureq::Agent;

use super::api::{ListResponse, RawEmail, RawMessage};
use crate::error::ProviderError;
use crate::models::Resource;
use crate::provider::MailProvider;

/// Gmail API client bound to one access token
pub struct GmailClient {
    agent: Agent,
    access_token: String,
    base_url: String,
    user_id: String,
}

impl GmailClient {
    /// Gmail API base URL
    pub const BASE_URL: &'static str = "https://gmail.googleapis.com/gmail/v1";

    /// Largest page Gmail will return for list calls
    const MAX_PAGE_SIZE: u32 = 500;

    /// Create a client for the authenticated user (`me`)
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            agent: Agent::new_with_defaults(),
            access_token: access_token.into(),
            base_url: Self::BASE_URL.to_string(),
            user_id: "me".to_string(),
        }
    }

    /// Point the client at a different API root (used by tests and proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Apply an overall per-request timeout
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        let config = Agent::config_builder().timeout_global(timeout).build();
        self.agent = Agent::new_with_config(config);
        self
    }

    fn user_url(&self) -> String {
        format!(
            "{}/users/{}",
            self.base_url,
            urlencoding::encode(&self.user_id)
        )
    }

    /// List messages matching a Gmail search query
    ///
    /// Only ids and thread ids are populated; see [`Self::get_message`].
    ///
    /// # Arguments
    /// * `query` - Gmail search syntax, e.g. `from:alice is:unread`
    /// * `max_results` - Maximum number of messages to return (1-500)
    pub fn list_messages(&self, query: &str, max_results: u32) -> Result<ListResponse, ProviderError> {
        let url = format!(
            "{}/messages?q={}&maxResults={}",
            self.user_url(),
            urlencoding::encode(query),
            max_results.min(Self::MAX_PAGE_SIZE)
        );
        self.get_json(&url, "list messages")
    }

    /// List threads matching a Gmail search query
    pub fn list_threads(&self, query: &str, max_results: u32) -> Result<ListResponse, ProviderError> {
        let url = format!(
            "{}/threads?q={}&maxResults={}",
            self.user_url(),
            urlencoding::encode(query),
            max_results.min(Self::MAX_PAGE_SIZE)
        );
        self.get_json(&url, "list threads")
    }

    /// Get full message details by ID
    pub fn get_message(&self, id: &str) -> Result<RawMessage, ProviderError> {
        let url = format!(
            "{}/messages/{}?format=full",
            self.user_url(),
            urlencoding::encode(id)
        );
        self.get_json(&url, "get message")
    }

    /// List messages and fetch each one in full, keeping list order
    pub fn search_messages(&self, query: &str, max_results: u32) -> Result<ListResponse, ProviderError> {
        let mut list = self.list_messages(query, max_results)?;

        if let Some(refs) = list.messages.take() {
            debug!("Fetching {} messages", refs.len());
            let full = refs
                .iter()
                .map(|r| self.get_message(&r.id))
                .collect::<Result<Vec<_>, _>>()?;
            list.messages = Some(full);
        }

        Ok(list)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T, ProviderError> {
        let mut response = self
            .agent
            .get(url)
            .header("Authorization", &format!("Bearer {}", self.access_token))
            .call()
            .map_err(|e| map_request_error(e, what))?;

        response
            .body_mut()
            .read_json()
            .map_err(|e| ProviderError::Parse(format!("{} response: {}", what, e)))
    }
}

impl MailProvider for GmailClient {
    fn search(
        &self,
        resource: Resource,
        query: &str,
        max_results: u32,
    ) -> Result<ListResponse, ProviderError> {
        match resource {
            Resource::Messages => self.search_messages(query, max_results),
            Resource::Threads => self.list_threads(query, max_results),
        }
    }

    fn get_raw_message(&self, id: &str) -> Result<RawEmail, ProviderError> {
        let url = format!(
            "{}/messages/{}?format=raw",
            self.user_url(),
            urlencoding::encode(id)
        );
        self.get_json(&url, "get raw message")
    }
}

/// Convert a ureq failure into a provider error
fn map_request_error(err: ureq::Error, what: &str) -> ProviderError {
    match err {
        ureq::Error::StatusCode(status) => {
            let reason = ureq::http::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown status");
            ProviderError::Http {
                status,
                message: format!("{} failed: {}", what, reason),
            }
        }
        other => ProviderError::Transport(format!("{} failed: {}", what, other)),
    }
}
