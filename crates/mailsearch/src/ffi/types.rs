//! FFI-friendly type wrappers for UniFFI export
//!
//! These types convert internal Rust types to FFI-compatible versions:
//! - `SearchRecord` → tagged enum with plain string fields
//! - `SearchError` → flat error enum carrying messages
//! - JSON schemas → strings

use crate::error::{ProviderError, SearchError};
use crate::models::{MessageDetail, SearchRecord};
use crate::tools::ToolSpec;

// ============================================================================
// Error Types
// ============================================================================

/// FFI-friendly error type
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum SearchToolError {
    #[error("Unsupported resource: {resource}")]
    UnsupportedResource { resource: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Upstream HTTP failure; `status` is the response code
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Authentication required: {message}")]
    AuthRequired { message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<SearchError> for SearchToolError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::UnsupportedResource(resource) => {
                SearchToolError::UnsupportedResource { resource }
            }
            SearchError::InvalidArgument(message) => SearchToolError::InvalidArgument { message },
            SearchError::Provider(p) => p.into(),
            SearchError::Message(message) => SearchToolError::InvalidResponse { message },
        }
    }
}

impl From<ProviderError> for SearchToolError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Http { status, message } => SearchToolError::Http { status, message },
            ProviderError::Transport(message) => SearchToolError::Network { message },
            ProviderError::Parse(message) => SearchToolError::InvalidResponse { message },
            ProviderError::Auth(message) => SearchToolError::AuthRequired { message },
        }
    }
}

impl From<anyhow::Error> for SearchToolError {
    fn from(e: anyhow::Error) -> Self {
        SearchToolError::Config {
            message: format!("{:#}", e),
        }
    }
}

// ============================================================================
// Search Types
// ============================================================================

/// FFI-friendly search result entry
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum FfiSearchRecord {
    Message {
        id: String,
        thread_id: String,
        snippet: String,
        body: String,
    },
    Thread {
        id: String,
        snippet: String,
    },
}

impl From<SearchRecord> for FfiSearchRecord {
    fn from(r: SearchRecord) -> Self {
        match r {
            SearchRecord::Message(m) => FfiSearchRecord::Message {
                id: m.id,
                thread_id: m.thread_id,
                snippet: m.snippet,
                body: m.body,
            },
            SearchRecord::Thread(t) => FfiSearchRecord::Thread {
                id: t.id,
                snippet: t.snippet,
            },
        }
    }
}

/// FFI-friendly message detail
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMessageDetail {
    pub id: String,
    pub thread_id: String,
    pub snippet: String,
    pub body: String,
    pub subject: Option<String>,
    pub sender: Option<String>,
}

impl From<MessageDetail> for FfiMessageDetail {
    fn from(d: MessageDetail) -> Self {
        Self {
            id: d.id,
            thread_id: d.thread_id,
            snippet: d.snippet,
            body: d.body,
            subject: d.subject,
            sender: d.sender,
        }
    }
}

/// Tool registration data for the host
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiToolSpec {
    pub name: String,
    pub description: String,
    /// JSON schema of the tool's `call` arguments
    pub parameters_json: String,
}

impl From<ToolSpec> for FfiToolSpec {
    fn from(s: ToolSpec) -> Self {
        Self {
            name: s.name,
            description: s.description,
            parameters_json: s.parameters.to_string(),
        }
    }
}

// ============================================================================
// Log Callback
// ============================================================================

/// Log level for FFI callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<log::Level> for FfiLogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => FfiLogLevel::Error,
            log::Level::Warn => FfiLogLevel::Warn,
            log::Level::Info => FfiLogLevel::Info,
            log::Level::Debug => FfiLogLevel::Debug,
            log::Level::Trace => FfiLogLevel::Trace,
        }
    }
}

impl From<FfiLogLevel> for log::LevelFilter {
    fn from(level: FfiLogLevel) -> Self {
        match level {
            FfiLogLevel::Error => log::LevelFilter::Error,
            FfiLogLevel::Warn => log::LevelFilter::Warn,
            FfiLogLevel::Info => log::LevelFilter::Info,
            FfiLogLevel::Debug => log::LevelFilter::Debug,
            FfiLogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Callback interface for receiving log messages from Rust
///
/// The host should forward these into its own logging system.
#[uniffi::export(callback_interface)]
pub trait LogCallback: Send + Sync {
    /// Called when a log message is emitted
    ///
    /// # Arguments
    /// * `level` - The log level (error, warn, info, debug, trace)
    /// * `target` - The logging target (typically module path, e.g., "mailsearch::tools")
    /// * `message` - The log message
    fn on_log(&self, level: FfiLogLevel, target: String, message: String);
}
