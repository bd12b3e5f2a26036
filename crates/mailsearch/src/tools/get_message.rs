//! Single-message fetch tool

use log::info;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::ToolSpec;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::gmail::{GmailFactory, parse_raw_email};
use crate::models::MessageDetail;
use crate::provider::ProviderFactory;

#[derive(Debug, Deserialize)]
struct GetMessageArgs {
    message_id: String,
}

/// Fetches one message by id and returns its decoded body and headers
pub struct GetMessage {
    factory: Arc<dyn ProviderFactory>,
}

impl GetMessage {
    pub const NAME: &'static str = "get_gmail_message";
    pub const DESCRIPTION: &'static str = "Use this tool to fetch an email by message ID. \
        Returns the thread ID, snippet, body, subject, and sender.";

    pub fn new(factory: impl ProviderFactory + 'static) -> Self {
        Self::with_factory(Arc::new(factory))
    }

    pub fn with_factory(factory: Arc<dyn ProviderFactory>) -> Self {
        Self { factory }
    }

    pub fn from_config(config: SearchConfig) -> Self {
        Self::new(GmailFactory::new(config))
    }

    pub fn get_message(&self, message_id: &str) -> Result<MessageDetail, SearchError> {
        let message_id = message_id.trim();
        if message_id.is_empty() {
            return Err(SearchError::InvalidArgument(
                "message_id must not be empty".to_string(),
            ));
        }

        let provider = self.factory.connect()?;
        let raw = provider.get_raw_message(message_id)?;
        let detail = parse_raw_email(raw)?;

        info!("Fetched message {} ({} bytes of body)", detail.id, detail.body.len());
        Ok(detail)
    }

    /// Tool entry point: `{"message_id": ...}` in, JSON object out
    pub fn call(&self, args: &str) -> Result<String, SearchError> {
        let args: GetMessageArgs = serde_json::from_str(args)
            .map_err(|e| SearchError::InvalidArgument(format!("get message arguments: {}", e)))?;

        let detail = self.get_message(&args.message_id)?;
        serde_json::to_string(&detail)
            .map_err(|e| SearchError::InvalidArgument(format!("failed to encode message: {}", e)))
    }

    pub fn args_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "message_id": {
                    "type": "string",
                    "description": "The unique ID of the email message, retrieved from a search."
                }
            },
            "required": ["message_id"]
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
