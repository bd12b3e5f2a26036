//! Provider abstraction used by the tools
//!
//! Tools never build HTTP clients themselves. They ask a [`ProviderFactory`]
//! for a fresh [`MailProvider`] on every call, which keeps them testable with
//! in-memory doubles and leaves credentials to whoever builds the factory.

use crate::error::ProviderError;
use crate::gmail::api::{ListResponse, RawEmail};
use crate::models::Resource;

/// A mail backend that can search and fetch messages
pub trait MailProvider {
    /// Run a single-page search for `resource`
    ///
    /// Messages come back in `ListResponse::messages`, threads in
    /// `ListResponse::threads`, in the order the backend ranked them.
    fn search(
        &self,
        resource: Resource,
        query: &str,
        max_results: u32,
    ) -> Result<ListResponse, ProviderError>;

    /// Fetch one message in raw RFC 822 form
    fn get_raw_message(&self, id: &str) -> Result<RawEmail, ProviderError>;
}

/// Builds an authenticated [`MailProvider`]
pub trait ProviderFactory: Send + Sync {
    fn connect(&self) -> Result<Box<dyn MailProvider>, ProviderError>;
}

impl<F> ProviderFactory for F
where
    F: Fn() -> Result<Box<dyn MailProvider>, ProviderError> + Send + Sync,
{
    fn connect(&self) -> Result<Box<dyn MailProvider>, ProviderError> {
        self()
    }
}
