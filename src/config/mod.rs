pub mod prompt;

use std::fmt;
use std::time::Duration;
use reqwest::header::HeaderValue;

use crate::cli::Args;
use crate::error::ConfigError;
use crate::llm::PromptMode;

/// Everything the relay needs, validated once at startup and never reread.
#[derive(Clone)]
pub struct RelayConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub mode: PromptMode,
    pub system_prompt: String,
    pub bot_name: String,
    pub user_name: String,
    pub request_timeout: Duration,
}

impl RelayConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let api_key = validate_api_key(args.openai_api_key.as_deref())?;
        let mode: PromptMode = args.prompt_mode.parse()?;
        let model = match &args.model {
            Some(m) if !m.trim().is_empty() => m.trim().to_string(),
            _ => mode.default_model().to_string(),
        };
        if args.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let system_prompt = prompt::load_system_prompt(args.system_prompt_path.as_deref())?;

        Ok(Self {
            api_key,
            base_url: args.base_url.trim_end_matches('/').to_string(),
            model,
            mode,
            system_prompt,
            bot_name: args.bot_name.clone(),
            user_name: args.user_name.clone(),
            request_timeout: Duration::from_secs(args.request_timeout_secs),
        })
    }
}

// The key ends up in an Authorization header, so it has to be a valid header value.
fn validate_api_key(raw: Option<&str>) -> Result<String, ConfigError> {
    let key = raw.map(str::trim).filter(|k| !k.is_empty()).ok_or(ConfigError::MissingCredential)?;
    HeaderValue::from_str(&format!("Bearer {}", key)).map_err(|e|
        ConfigError::InvalidCredential(e.to_string())
    )?;
    Ok(key.to_string())
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("mode", &self.mode)
            .field("system_prompt_chars", &self.system_prompt.len())
            .field("bot_name", &self.bot_name)
            .field("user_name", &self.user_name)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
