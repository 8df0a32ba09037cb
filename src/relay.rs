use log::{ error, info, warn };
use std::sync::Arc;
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::error::{ ConfigError, RelayError };
use crate::llm::chat::{ new_client, CompletionClient };
use crate::llm::request::build_provider_request;
use crate::models::chat::Turn;

/// Stateless relay between the chat front-end and the completion provider.
/// Cheap to clone; every clone shares the same immutable config and HTTP pool.
#[derive(Clone)]
pub struct CompletionRelay {
    config: Arc<RelayConfig>,
    client: Arc<dyn CompletionClient>,
}

impl CompletionRelay {
    pub fn new(config: RelayConfig) -> Result<Self, ConfigError> {
        let client = new_client(&config)?;
        info!(
            "Completion client configured: Mode={}, Model={}, BaseURL={}",
            config.mode,
            client.get_model(),
            client.get_base_url().as_deref().unwrap_or("adapter default")
        );
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: RelayConfig, client: Arc<dyn CompletionClient>) -> Self {
        Self { config: Arc::new(config), client }
    }

    /// Formats the conversation, makes exactly one provider call, and returns
    /// the text to show the user.
    ///
    /// A provider-reported error is not an `Err` here: it comes back as
    /// `Ok("ERROR with API integration. <message>")` so callers can display it
    /// directly. Only bad input and an unreachable provider are errors.
    pub async fn handle_completion_request(
        &self,
        conversation: &[Turn],
        user: Option<&str>
    ) -> Result<String, RelayError> {
        let request_id = Uuid::new_v4();
        info!("[{}] Relaying conversation with {} turns", request_id, conversation.len());

        let request = match build_provider_request(&self.config, conversation, user) {
            Ok(r) => r,
            Err(e) => {
                warn!("[{}] Rejected request: {}", request_id, e);
                return Err(e);
            }
        };

        match self.client.complete(&request).await {
            Ok(resp) => {
                info!("[{}] Provider returned {} chars", request_id, resp.response.len());
                Ok(resp.response)
            }
            Err(e @ RelayError::Provider(_)) => {
                error!("[{}] {}", request_id, e);
                Ok(e.to_string())
            }
            Err(e) => {
                error!("[{}] {}", request_id, e);
                Err(e)
            }
        }
    }
}
