//! FFI bindings for UniFFI export
//!
//! Exposes the tools to a host framework through generated bindings.
//!
//! ## Usage from Python
//!
//! ```python
//! from mailsearch_ffi import MailSearchTool, FfiLogLevel, initialize_logging
//!
//! # Forward Rust logs into the host's logger
//! initialize_logging(MyLogCallback(), FfiLogLevel.INFO)
//!
//! tool = MailSearchTool.from_config()
//! for record in tool.run("from:alice newer_than:7d", "messages", 5):
//!     print(record)
//!
//! # Or dispatch generically from the host's tool router
//! result_json = tool.call("search_gmail", '{"query": "is:unread"}')
//! ```

mod logging;
mod service;
mod types;

pub use logging::{init_ffi_logger, set_log_callback};
pub use service::*;
pub use types::*;
