use std::fs;
use log::info;

use crate::error::ConfigError;

/// Built-in guide persona used when no prompt file is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a friendly and thoughtful guide helping business owners uncover their top 5 personal and top 5 business core values. Ask one reflective question at a time and listen attentively. Start with personal questions, then transition to business questions. At the end of the conversation, analyze their responses carefully and select 5 personal and 5 business values that best represent them, using only the predefined core values list grouped into 8 clusters. Include the cluster name next to each value. Use a warm, professional tone throughout. Do not ask them to pick values\u{2014}determine them yourself based on their stories and reflections.";

/// Resolves the system instruction once at startup.
pub fn load_system_prompt(path: Option<&str>) -> Result<String, ConfigError> {
    let Some(path) = path.filter(|p| !p.trim().is_empty()) else {
        return Ok(DEFAULT_SYSTEM_PROMPT.to_string());
    };

    let content = fs::read_to_string(path).map_err(|source| ConfigError::PromptFile {
        path: path.to_string(),
        source,
    })?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyPrompt(path.to_string()));
    }

    info!("Loaded system prompt from '{}' ({} chars)", path, trimmed.len());
    Ok(trimmed.to_string())
}
