//! Message and thread search tool

use log::{debug, info};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::ToolSpec;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::gmail::{GmailFactory, parse_messages, parse_threads};
use crate::models::{Resource, SearchRecord};
use crate::provider::ProviderFactory;

/// Arguments accepted by [`MailSearch::call`]
#[derive(Debug, Deserialize)]
pub struct SearchArgs {
    pub query: String,
    /// `messages` or `threads`; kept as a string so unknown values can be reported
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub max_results: Option<u32>,
}

/// Searches messages or threads and flattens the results
///
/// A new provider is obtained from the factory on every call.
pub struct MailSearch {
    factory: Arc<dyn ProviderFactory>,
    default_max_results: u32,
}

impl MailSearch {
    pub const NAME: &'static str = "search_gmail";
    pub const DESCRIPTION: &'static str = "Use this tool to search for email messages or threads. \
        The input must be a valid Gmail query. \
        The output is a JSON list of the requested resource.";

    const DEFAULT_MAX_RESULTS: u32 = 10;

    pub fn new(factory: impl ProviderFactory + 'static) -> Self {
        Self::with_factory(Arc::new(factory))
    }

    /// Build from a factory shared with other tools
    pub fn with_factory(factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            factory,
            default_max_results: Self::DEFAULT_MAX_RESULTS,
        }
    }

    /// Build a Gmail-backed search tool from config
    pub fn from_config(config: SearchConfig) -> Self {
        let default_max_results = config.default_max_results;
        Self::new(GmailFactory::new(config)).with_default_max_results(default_max_results)
    }

    /// Result cap used by [`Self::call`] when the arguments omit one
    pub fn with_default_max_results(mut self, max_results: u32) -> Self {
        self.default_max_results = max_results;
        self
    }

    /// Search and normalize
    ///
    /// Provider failures, including the factory failing to connect, are
    /// returned unchanged as [`SearchError::Provider`]. The result keeps the
    /// provider's order and holds at most `max_results` records.
    pub fn run(
        &self,
        query: &str,
        resource: Resource,
        max_results: u32,
    ) -> Result<Vec<SearchRecord>, SearchError> {
        if max_results == 0 {
            return Err(SearchError::InvalidArgument(
                "max_results must be at least 1".to_string(),
            ));
        }

        let provider = self.factory.connect()?;
        debug!("Searching {} for {:?} (max {})", resource, query, max_results);

        let response = provider.search(resource, query, max_results)?;
        let limit = max_results as usize;

        let records: Vec<SearchRecord> = match resource {
            Resource::Messages => {
                let mut raw = response.messages.unwrap_or_default();
                raw.truncate(limit);
                parse_messages(raw).into_iter().map(SearchRecord::from).collect()
            }
            Resource::Threads => {
                let mut raw = response.threads.unwrap_or_default();
                raw.truncate(limit);
                parse_threads(raw).into_iter().map(SearchRecord::from).collect()
            }
        };

        info!("Search returned {} {}", records.len(), resource);
        Ok(records)
    }

    /// Like [`Self::run`], with the resource given by name
    ///
    /// Unknown names fail with [`SearchError::UnsupportedResource`] before
    /// any provider is built.
    pub fn run_named(
        &self,
        query: &str,
        resource: &str,
        max_results: u32,
    ) -> Result<Vec<SearchRecord>, SearchError> {
        let resource: Resource = resource.parse()?;
        self.run(query, resource, max_results)
    }

    /// Tool entry point: JSON arguments in, JSON array out
    pub fn call(&self, args: &str) -> Result<String, SearchError> {
        let args: SearchArgs = serde_json::from_str(args)
            .map_err(|e| SearchError::InvalidArgument(format!("search arguments: {}", e)))?;

        let resource = args.resource.as_deref().unwrap_or(Resource::Messages.as_str());
        let max_results = args.max_results.unwrap_or(self.default_max_results);
        let records = self.run_named(&args.query, resource, max_results)?;

        serde_json::to_string(&records)
            .map_err(|e| SearchError::InvalidArgument(format!("failed to encode results: {}", e)))
    }

    /// JSON schema of [`SearchArgs`]
    pub fn args_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The Gmail query. Example filters include from:sender, to:recipient, subject:subject, -filtered_term, in:folder, is:important|read|starred, after:year/mo/date, before:year/mo/date, label:label_name, \"exact phrase\". Search newer/older than using d (day), m (month), and y (year): newer_than:2d, older_than:1y. Attachments with extension example: filename:pdf. Multiple term matching example: from:amy OR from:david."
                },
                "resource": {
                    "type": "string",
                    "enum": ["messages", "threads"],
                    "description": "Whether to search for threads or messages.",
                    "default": "messages"
                },
                "max_results": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "The maximum number of results to return.",
                    "default": Self::DEFAULT_MAX_RESULTS
                }
            },
            "required": ["query"]
        })
    }

    pub fn spec() -> ToolSpec {
        ToolSpec {
            name: Self::NAME.to_string(),
            description: Self::DESCRIPTION.to_string(),
            parameters: Self::args_schema(),
        }
    }
}
