//! Normalized records handed back to the caller

use serde::{Deserialize, Serialize};

/// A message flattened to the fields a caller needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: String,
    #[serde(rename = "threadId")]
    pub thread_id: String,
    pub snippet: String,
    /// Decoded body text, or the raw base64 when decoding was not possible
    pub body: String,
}

/// A thread flattened to its id and preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadRecord {
    pub id: String,
    pub snippet: String,
}

/// One entry of a search result
///
/// Serializes untagged, so a message is `{id, threadId, snippet, body}` and
/// a thread is `{id, snippet}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchRecord {
    Message(MessageRecord),
    Thread(ThreadRecord),
}

impl SearchRecord {
    pub fn id(&self) -> &str {
        match self {
            SearchRecord::Message(m) => &m.id,
            SearchRecord::Thread(t) => &t.id,
        }
    }

    pub fn snippet(&self) -> &str {
        match self {
            SearchRecord::Message(m) => &m.snippet,
            SearchRecord::Thread(t) => &t.snippet,
        }
    }

    /// Thread id for messages; threads have none
    pub fn thread_id(&self) -> Option<&str> {
        match self {
            SearchRecord::Message(m) => Some(&m.thread_id),
            SearchRecord::Thread(_) => None,
        }
    }

    /// Body for messages; threads have none
    pub fn body(&self) -> Option<&str> {
        match self {
            SearchRecord::Message(m) => Some(&m.body),
            SearchRecord::Thread(_) => None,
        }
    }
}

impl From<MessageRecord> for SearchRecord {
    fn from(record: MessageRecord) -> Self {
        SearchRecord::Message(record)
    }
}

impl From<ThreadRecord> for SearchRecord {
    fn from(record: ThreadRecord) -> Self {
        SearchRecord::Thread(record)
    }
}

/// A single message fetched by id, with headers and a cleaned body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDetail {
    pub id: String,
    #[serde(rename = "threadId")]
    pub thread_id: String,
    pub snippet: String,
    pub body: String,
    pub subject: Option<String>,
    pub sender: Option<String>,
}
