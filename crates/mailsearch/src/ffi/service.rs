//! MailSearchTool facade for UniFFI export
//!
//! Wraps the search and get-message tools behind one object that a host
//! framework can construct once and invoke per tool call.

use std::sync::Arc;

use log::warn;

use crate::config::SearchConfig;
use crate::ffi::logging;
use crate::ffi::types::*;
use crate::gmail::GmailFactory;
use crate::provider::ProviderFactory;
use crate::tools::{GetMessage, MailSearch};

/// Main entry point for bindings
#[derive(uniffi::Object)]
pub struct MailSearchTool {
    search: MailSearch,
    get_message: GetMessage,
}

impl MailSearchTool {
    fn from_search_config(config: SearchConfig) -> Arc<Self> {
        let default_max_results = config.default_max_results;
        let factory: Arc<dyn ProviderFactory> = Arc::new(GmailFactory::new(config));

        Arc::new(Self {
            search: MailSearch::with_factory(factory.clone())
                .with_default_max_results(default_max_results),
            get_message: GetMessage::with_factory(factory),
        })
    }
}

#[uniffi::export]
impl MailSearchTool {
    /// Create a tool using an explicit access token
    ///
    /// # Arguments
    /// * `access_token` - OAuth bearer token with Gmail read scope
    /// * `base_url` - Optional API root; defaults to the public Gmail API
    #[uniffi::constructor]
    pub fn new(access_token: String, base_url: Option<String>) -> Arc<Self> {
        let mut config = SearchConfig {
            access_token: Some(access_token),
            ..SearchConfig::default()
        };
        if let Some(base_url) = base_url {
            config.base_url = base_url;
        }
        Self::from_search_config(config)
    }

    /// Create a tool from the config file and environment
    #[uniffi::constructor]
    pub fn from_config() -> Result<Arc<Self>, SearchToolError> {
        let config = SearchConfig::load()?;
        Ok(Self::from_search_config(config))
    }

    /// Search messages or threads
    ///
    /// # Arguments
    /// * `query` - Gmail search query
    /// * `resource` - `"messages"` or `"threads"`
    /// * `max_results` - Maximum number of records to return
    pub fn run(
        &self,
        query: String,
        resource: String,
        max_results: u32,
    ) -> Result<Vec<FfiSearchRecord>, SearchToolError> {
        let records = self.search.run_named(&query, &resource, max_results)?;
        Ok(records.into_iter().map(FfiSearchRecord::from).collect())
    }

    /// Invoke a tool by name with JSON arguments, returning JSON
    pub fn call(&self, tool_name: String, args_json: String) -> Result<String, SearchToolError> {
        match tool_name.as_str() {
            MailSearch::NAME => Ok(self.search.call(&args_json)?),
            GetMessage::NAME => Ok(self.get_message.call(&args_json)?),
            other => Err(SearchToolError::InvalidArgument {
                message: format!("unknown tool '{}'", other),
            }),
        }
    }

    /// Fetch one message by id
    pub fn get_message(&self, message_id: String) -> Result<FfiMessageDetail, SearchToolError> {
        let detail = self.get_message.get_message(&message_id)?;
        Ok(FfiMessageDetail::from(detail))
    }

    /// Registration data for every tool this object serves
    pub fn specs(&self) -> Vec<FfiToolSpec> {
        crate::tools::specs()
            .into_iter()
            .map(FfiToolSpec::from)
            .collect()
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Install the log bridge and start forwarding records to `callback`
///
/// Safe to call more than once; later calls only replace the callback and level.
/// Fails with [`SearchToolError::Config`] if the process already has a
/// different `log` backend.
#[uniffi::export]
pub fn initialize_logging(
    callback: Box<dyn LogCallback>,
    max_level: FfiLogLevel,
) -> Result<(), SearchToolError> {
    let level = log::LevelFilter::from(max_level);
    if let Err(e) = logging::init_ffi_logger(level) {
        warn!("Log callback not installed: {}", e);
        return Err(SearchToolError::Config {
            message: format!("another logger is already installed: {}", e),
        });
    }
    logging::set_log_callback(Some(Arc::from(callback)));
    Ok(())
}

/// Change the level of forwarded log records
#[uniffi::export]
pub fn set_log_level(max_level: FfiLogLevel) {
    logging::set_log_level(max_level.into());
}

/// Path of the default config file, if a config directory exists
#[uniffi::export]
pub fn default_config_path() -> Option<String> {
    SearchConfig::default_config_path().map(|p| p.display().to_string())
}
