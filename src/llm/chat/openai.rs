use async_trait::async_trait;
use log::debug;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

use super::{ CompletionClient, CompletionResponse };
use crate::config::RelayConfig;
use crate::error::{ ConfigError, RelayError };
use crate::llm::request::ProviderRequest;
use crate::llm::PromptMode;

pub struct OpenAIChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    // Some compatible servers send a bare string here instead of an object.
    #[serde(default)]
    error: Option<JsonValue>,
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    #[serde(default)]
    message: Option<OpenAIMessage>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAIChatClient {
    pub fn new(
        api_key: &str,
        model: String,
        base_url: String,
        timeout: Duration
    ) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e|
            ConfigError::InvalidCredential(e.to_string())
        )?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder().default_headers(headers).timeout(timeout).build()?;

        Ok(Self {
            http,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, ConfigError> {
        Self::new(
            &config.api_key,
            config.model.clone(),
            config.base_url.clone(),
            config.request_timeout
        )
    }

    fn url_for(&self, mode: PromptMode) -> String {
        format!("{}{}", self.base_url, mode.endpoint())
    }
}

/// Pulls the outcome out of a provider body. An error payload wins over
/// choices, whatever the HTTP status was.
fn parse_response(
    mode: PromptMode,
    status: reqwest::StatusCode,
    body: &str
) -> Result<String, RelayError> {
    let parsed: OpenAIResponse = serde_json::from_str(body).map_err(|e| {
        RelayError::ProviderUnavailable(format!("non-JSON response (HTTP {}): {}", status, e))
    })?;

    if let Some(err) = parsed.error.filter(|e| !e.is_null()) {
        let message = match &err {
            JsonValue::String(s) => s.clone(),
            other =>
                other
                    .get("message")
                    .and_then(JsonValue::as_str)
                    .map(str::to_owned)
                    .unwrap_or_else(|| other.to_string()),
        };
        debug!("OpenAI API error payload: {}", err);
        return Err(RelayError::Provider(message));
    }

    let choice = parsed.choices
        .into_iter()
        .next()
        .ok_or_else(|| {
            RelayError::ProviderUnavailable(format!("no choices in response (HTTP {})", status))
        })?;

    let content = match mode {
        PromptMode::Chat => choice.message.and_then(|m| m.content),
        PromptMode::Completion => choice.text,
    };
    content.ok_or_else(|| {
        RelayError::ProviderUnavailable("first choice carries no generated text".to_string())
    })
}

#[async_trait]
impl CompletionClient for OpenAIChatClient {
    async fn complete(&self, request: &ProviderRequest) -> Result<CompletionResponse, RelayError> {
        let mode = request.mode();
        let url = self.url_for(mode);
        debug!("Sending {} request to {}", mode, url);

        let resp = self.http.post(&url).json(request).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        let response = parse_response(mode, status, &body)?;
        Ok(CompletionResponse { response })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn extracts_chat_content_verbatim() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  What matters most to you?\n"}}]}"#;
        let text = parse_response(PromptMode::Chat, StatusCode::OK, body).unwrap();
        assert_eq!(text, "  What matters most to you?\n");
    }

    #[test]
    fn extracts_completion_text_from_first_choice() {
        let body = r#"{"choices":[{"text":" first"},{"text":" second"}]}"#;
        let text = parse_response(PromptMode::Completion, StatusCode::OK, body).unwrap();
        assert_eq!(text, " first");
    }

    #[test]
    fn error_payload_becomes_provider_error() {
        let body = r#"{"error":{"message":"rate limited","type":"requests"}}"#;
        let err = parse_response(PromptMode::Chat, StatusCode::TOO_MANY_REQUESTS, body).unwrap_err();
        assert!(matches!(err, RelayError::Provider(m) if m == "rate limited"));
    }

    #[test]
    fn string_error_payload_is_accepted() {
        let body = r#"{"error":"model overloaded"}"#;
        let err = parse_response(PromptMode::Chat, StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, RelayError::Provider(m) if m == "model overloaded"));
    }

    #[test]
    fn non_json_body_is_unavailable() {
        let err = parse_response(PromptMode::Chat, StatusCode::BAD_GATEWAY, "<html>502</html>").unwrap_err();
        assert!(matches!(err, RelayError::ProviderUnavailable(_)));
    }

    #[test]
    fn empty_choices_is_unavailable() {
        let err = parse_response(PromptMode::Completion, StatusCode::OK, r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, RelayError::ProviderUnavailable(_)));
    }

    #[test]
    fn builds_endpoint_per_mode() {
        let client = OpenAIChatClient::new(
            "sk-test",
            "gpt-3.5-turbo".to_string(),
            "https://api.openai.com/v1/".to_string(),
            Duration::from_secs(5)
        ).unwrap();
        assert_eq!(client.url_for(PromptMode::Chat), "https://api.openai.com/v1/chat/completions");
        assert_eq!(client.url_for(PromptMode::Completion), "https://api.openai.com/v1/completions");
        assert_eq!(client.get_model(), "gpt-3.5-turbo");
    }
}
