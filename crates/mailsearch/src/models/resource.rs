//! Resource kind selecting what a search targets

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// What a search returns: individual messages or whole threads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Messages,
    Threads,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Messages => "messages",
            Resource::Threads => "threads",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "messages" => Ok(Resource::Messages),
            "threads" => Ok(Resource::Threads),
            _ => Err(SearchError::UnsupportedResource(s.to_string())),
        }
    }
}
