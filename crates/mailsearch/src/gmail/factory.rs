//! Per-call construction of authenticated Gmail clients

use log::debug;

use super::{GmailClient, resolve_access_token};
use crate::config::SearchConfig;
use crate::error::ProviderError;
use crate::provider::{MailProvider, ProviderFactory};

/// Builds a fresh [`GmailClient`] from a [`SearchConfig`] on every connect
///
/// The token is resolved at connect time, so a token file rewritten by the
/// host between calls is picked up without rebuilding the tools.
#[derive(Debug, Clone)]
pub struct GmailFactory {
    config: SearchConfig,
}

impl GmailFactory {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Build a concrete client (the trait object form is [`ProviderFactory::connect`])
    pub fn build_client(&self) -> Result<GmailClient, ProviderError> {
        let token = resolve_access_token(&self.config)?;
        debug!(
            "Connecting to {} as {}",
            self.config.base_url, self.config.user_id
        );

        Ok(GmailClient::new(token)
            .with_base_url(self.config.base_url.as_str())
            .with_user_id(self.config.user_id.as_str())
            .with_timeout(self.config.timeout()))
    }
}

impl ProviderFactory for GmailFactory {
    fn connect(&self) -> Result<Box<dyn MailProvider>, ProviderError> {
        Ok(Box::new(self.build_client()?))
    }
}
