pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;

use self::openai::OpenAIChatClient;
use super::request::ProviderRequest;
use crate::config::RelayConfig;
use crate::error::{ ConfigError, RelayError };

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub response: String,
}

/// One outbound call to a completion provider.
///
/// A provider-reported error comes back as [`RelayError::Provider`]; transport
/// and decoding failures as [`RelayError::ProviderUnavailable`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &ProviderRequest) -> Result<CompletionResponse, RelayError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> Option<String>;
}

pub fn new_client(config: &RelayConfig) -> Result<Arc<dyn CompletionClient>, ConfigError> {
    let client: Arc<dyn CompletionClient> = Arc::new(OpenAIChatClient::from_config(config)?);
    Ok(client)
}
