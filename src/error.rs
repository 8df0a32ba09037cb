use thiserror::Error;

/// Prefix placed in front of every provider-reported error message.
pub const PROVIDER_ERROR_PREFIX: &str = "ERROR with API integration.";

/// Startup failures. Any of these stops the server before it binds.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing Environment Variable OPENAI_API_KEY")]
    MissingCredential,
    #[error("Invalid API key format: {0}")]
    InvalidCredential(String),
    #[error("Invalid prompt mode: '{0}' (expected 'chat' or 'completion')")]
    InvalidMode(String),
    #[error("Failed to read system prompt file '{path}': {source}")]
    PromptFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("System prompt file '{0}' is empty")]
    EmptyPrompt(String),
    #[error("Request timeout must be at least 1 second")]
    ZeroTimeout,
    #[error("Invalid TLS configuration: {0}")]
    Tls(String),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Per-request failures.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The provider answered with an error payload.
    #[error("{} {0}", PROVIDER_ERROR_PREFIX)]
    Provider(String),
    /// Network failure, timeout, or a body that is not a usable provider response.
    #[error("Completion provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("Invalid conversation: {0}")]
    Input(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::ProviderUnavailable(format!("request timed out: {}", err))
        } else {
            RelayError::ProviderUnavailable(err.to_string())
        }
    }
}
