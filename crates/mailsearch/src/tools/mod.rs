//! Callable tools exposed to an orchestration host
//!
//! Each tool has a stable name, a description for the host's model, a JSON
//! schema for its arguments, and a `call` entry point taking those arguments
//! as a JSON string.

mod get_message;
mod search;

pub use get_message::GetMessage;
pub use search::{MailSearch, SearchArgs};

use serde::Serialize;
use serde_json::Value;

/// Registration data a host needs to offer a tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON schema of the `call` arguments
    pub parameters: Value,
}

/// Specs for every tool in this crate
pub fn specs() -> Vec<ToolSpec> {
    vec![MailSearch::spec(), GetMessage::spec()]
}
