//! Gmail API integration
//!
//! This module provides:
//! - A synchronous Gmail REST client implementing [`MailProvider`](crate::provider::MailProvider)
//! - Access-token resolution and the per-call client factory
//! - Normalization of list responses into flat records
//! - Decoding of raw RFC 822 messages

mod auth;
mod client;
mod factory;
mod message;
mod normalize;

pub use auth::{StoredToken, TOKEN_FILE, resolve_access_token};
pub use client::GmailClient;
pub use factory::GmailFactory;
pub use message::{clean_email_body, decode_payload, parse_raw_email};
pub use normalize::{content_charset, decode_base64, decode_body, extract_body, parse_messages, parse_threads};

/// Gmail API response types
pub mod api {
    use serde::{Deserialize, Serialize};

    /// Response from `messages.list` or `threads.list`
    ///
    /// Only one of `messages` / `threads` is populated, depending on the
    /// endpoint. Gmail omits the field entirely when nothing matched.
    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ListResponse {
        pub messages: Option<Vec<RawMessage>>,
        pub threads: Option<Vec<RawThread>>,
        pub next_page_token: Option<String>,
        pub result_size_estimate: Option<u32>,
    }

    impl ListResponse {
        pub fn with_messages(messages: Vec<RawMessage>) -> Self {
            Self {
                messages: Some(messages),
                ..Default::default()
            }
        }

        pub fn with_threads(threads: Vec<RawThread>) -> Self {
            Self {
                threads: Some(threads),
                ..Default::default()
            }
        }
    }

    /// A message as returned by the API
    ///
    /// `messages.list` only fills `id` and `thread_id`; `messages.get` with
    /// `format=full` adds the snippet and payload.
    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RawMessage {
        #[serde(default)]
        pub id: String,
        #[serde(default)]
        pub thread_id: String,
        #[serde(default)]
        pub snippet: String,
        pub payload: Option<MessagePayload>,
    }

    /// Message payload containing headers and body
    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessagePayload {
        pub headers: Option<Vec<Header>>,
        pub body: Option<MessageBody>,
        pub mime_type: Option<String>,
    }

    /// Email header (name-value pair)
    #[derive(Debug, Clone, Deserialize, Serialize)]
    pub struct Header {
        pub name: String,
        pub value: String,
    }

    impl Header {
        pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                value: value.into(),
            }
        }
    }

    /// Message body (base64 encoded)
    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    pub struct MessageBody {
        pub size: Option<u32>,
        pub data: Option<String>,
    }

    /// A thread as returned by `threads.list`
    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RawThread {
        #[serde(default)]
        pub id: String,
        #[serde(default)]
        pub snippet: String,
        pub history_id: Option<String>,
    }

    /// A message fetched with `format=raw`
    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RawEmail {
        #[serde(default)]
        pub id: String,
        #[serde(default)]
        pub thread_id: String,
        #[serde(default)]
        pub snippet: String,
        /// Base64url-encoded RFC 822 message
        #[serde(default)]
        pub raw: String,
    }
}
