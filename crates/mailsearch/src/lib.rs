//! Mailsearch crate - Gmail search and fetch tools for orchestration hosts
//!
//! This crate provides:
//! - Domain records (MessageRecord, ThreadRecord, MessageDetail)
//! - A synchronous Gmail API client behind the `MailProvider` trait
//! - Response normalization with best-effort charset decoding of bodies
//! - `MailSearch` and `GetMessage` tools with JSON call surfaces
//! - UniFFI bindings so a host framework can invoke the tools
//!
//! Clients are built per call through a `ProviderFactory`, so the tools hold
//! no connection state and can be driven by test doubles.

uniffi::setup_scaffolding!();

pub mod config;
pub mod error;
pub mod ffi;
pub mod gmail;
pub mod models;
pub mod provider;
pub mod tools;

pub use crate::config::SearchConfig;
pub use error::{DecodeError, ProviderError, SearchError};
pub use gmail::{GmailClient, GmailFactory, StoredToken, parse_messages, parse_threads};
pub use models::{MessageDetail, MessageRecord, Resource, SearchRecord, ThreadRecord};
pub use provider::{MailProvider, ProviderFactory};
pub use tools::{GetMessage, MailSearch, SearchArgs, ToolSpec};
