//! Error types for search and provider operations

use thiserror::Error;

/// Failure reported by a mail provider or the factory that builds it
///
/// These pass through [`SearchError::Provider`] unchanged so callers can
/// match on the upstream status themselves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The API answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never completed (DNS, TLS, timeout, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not the JSON we expected
    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    /// No usable access token
    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl ProviderError {
    /// HTTP status code, if this error came from an HTTP response
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error returned by the search and get-message tools
#[derive(Debug, Error)]
pub enum SearchError {
    /// Resource kind outside the supported set
    #[error("Resource '{0}' is not supported; expected 'messages' or 'threads'")]
    UnsupportedResource(String),

    /// Caller supplied arguments we cannot act on
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A fetched message could not be decoded into MIME parts
    #[error("Failed to read message: {0}")]
    Message(String),
}

/// Why a base64 body could not be turned into text
///
/// Recovered inside the parser; never surfaced to tool callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("body is not valid base64")]
    Base64,

    #[error("unknown charset '{0}'")]
    UnknownCharset(String),

    #[error("body is not valid {0}")]
    Malformed(String),
}
