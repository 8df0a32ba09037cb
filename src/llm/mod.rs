pub mod chat;
pub mod request;

use serde::{ Deserialize, Serialize };
use std::str::FromStr;
use std::fmt;

use crate::error::ConfigError;

/// Shape of the request sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptMode {
    /// Role-tagged message list, `/chat/completions`.
    Chat,
    /// Single flattened text prompt with speaker labels, `/completions`.
    Completion,
}

impl PromptMode {
    pub fn default_model(&self) -> &'static str {
        match self {
            PromptMode::Chat => "gpt-3.5-turbo",
            PromptMode::Completion => "gpt-3.5-turbo-instruct",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            PromptMode::Chat => "/chat/completions",
            PromptMode::Completion => "/completions",
        }
    }
}

impl fmt::Display for PromptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptMode::Chat => write!(f, "chat"),
            PromptMode::Completion => write!(f, "completion"),
        }
    }
}

impl FromStr for PromptMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chat" | "structured" => Ok(PromptMode::Chat),
            "completion" | "flattened" => Ok(PromptMode::Completion),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_names_case_insensitively() {
        assert_eq!("Chat".parse::<PromptMode>().unwrap(), PromptMode::Chat);
        assert_eq!("flattened".parse::<PromptMode>().unwrap(), PromptMode::Completion);
        assert!("davinci".parse::<PromptMode>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for mode in [PromptMode::Chat, PromptMode::Completion] {
            assert_eq!(mode.to_string().parse::<PromptMode>().unwrap(), mode);
        }
    }
}
