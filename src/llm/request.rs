use serde::Serialize;

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::llm::PromptMode;
use crate::models::chat::{ Speaker, Turn };

const TEMPERATURE: f32 = 0.7;
const CHAT_MAX_TOKENS: u32 = 1000;
const COMPLETION_MAX_TOKENS: u32 = 200;
/// Flattened prompts need a greeting and a reply before there is anything to continue.
pub const MIN_COMPLETION_TURNS: usize = 2;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TextCompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub stop: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Body of the single outbound call.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ProviderRequest {
    Chat(ChatCompletionRequest),
    Completion(TextCompletionRequest),
}

impl ProviderRequest {
    pub fn mode(&self) -> PromptMode {
        match self {
            ProviderRequest::Chat(_) => PromptMode::Chat,
            ProviderRequest::Completion(_) => PromptMode::Completion,
        }
    }
}

pub fn build_provider_request(
    config: &RelayConfig,
    conversation: &[Turn],
    user: Option<&str>
) -> Result<ProviderRequest, RelayError> {
    match config.mode {
        PromptMode::Chat => Ok(ProviderRequest::Chat(build_chat_request(config, conversation, user))),
        PromptMode::Completion =>
            build_completion_request(config, conversation, user).map(ProviderRequest::Completion),
    }
}

pub fn build_chat_request(
    config: &RelayConfig,
    conversation: &[Turn],
    user: Option<&str>
) -> ChatCompletionRequest {
    let mut messages = Vec::with_capacity(conversation.len() + 1);
    messages.push(ChatMessage {
        role: "system".to_string(),
        content: config.system_prompt.clone(),
    });
    messages.extend(
        conversation.iter().map(|turn| ChatMessage {
            role: turn.speaker.role().to_string(),
            content: turn.text.clone(),
        })
    );

    ChatCompletionRequest {
        model: config.model.clone(),
        messages,
        temperature: TEMPERATURE,
        max_tokens: CHAT_MAX_TOKENS,
        user: user.map(str::to_owned),
    }
}

pub fn build_completion_request(
    config: &RelayConfig,
    conversation: &[Turn],
    user: Option<&str>
) -> Result<TextCompletionRequest, RelayError> {
    if conversation.len() < MIN_COMPLETION_TURNS {
        return Err(
            RelayError::Input(
                format!(
                    "completion mode needs at least {} messages, got {}",
                    MIN_COMPLETION_TURNS,
                    conversation.len()
                )
            )
        );
    }

    Ok(TextCompletionRequest {
        model: config.model.clone(),
        prompt: render_prompt(config, conversation),
        temperature: TEMPERATURE,
        max_tokens: COMPLETION_MAX_TOKENS,
        top_p: 1.0,
        frequency_penalty: 0.0,
        presence_penalty: 0.0,
        stop: stop_sequences(config),
        user: user.map(str::to_owned),
    })
}

/// `Bot: <instruction>`, one labelled line per turn, then a bare `Bot: ` cue.
pub fn render_prompt(config: &RelayConfig, conversation: &[Turn]) -> String {
    let mut lines = Vec::with_capacity(conversation.len() + 2);
    lines.push(format!("{}: {}", config.bot_name, config.system_prompt));
    for turn in conversation {
        lines.push(format!("{}: {}", speaker_label(config, turn.speaker), turn.text));
    }
    lines.push(format!("{}: ", config.bot_name));
    lines.join("\n")
}

pub fn stop_sequences(config: &RelayConfig) -> Vec<String> {
    vec![format!("{}: ", config.bot_name), format!("{}: ", config.user_name)]
}

fn speaker_label(config: &RelayConfig, speaker: Speaker) -> &str {
    match speaker {
        Speaker::User => &config.user_name,
        Speaker::Assistant => &config.bot_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(mode: PromptMode) -> RelayConfig {
        RelayConfig {
            api_key: "sk-test".to_string(),
            base_url: "http://localhost".to_string(),
            model: mode.default_model().to_string(),
            mode,
            system_prompt: "Be a guide.".to_string(),
            bot_name: "AI".to_string(),
            user_name: "Owner".to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }

    fn greeting() -> Vec<Turn> {
        vec![
            Turn::new(Speaker::Assistant, "Hi, I'm the guide..."),
            Turn::new(Speaker::User, "I value honesty.")
        ]
    }

    #[test]
    fn chat_request_leads_with_system_turn() {
        let req = build_chat_request(&config(PromptMode::Chat), &greeting(), None);
        let roles: Vec<&str> = req.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "assistant", "user"]);
        assert_eq!(req.messages[0].content, "Be a guide.");
        assert_eq!(req.messages[1].content, "Hi, I'm the guide...");
        assert_eq!(req.messages[2].content, "I value honesty.");
        assert_eq!(req.max_tokens, 1000);
        assert_eq!(req.temperature, 0.7);
    }

    #[test]
    fn chat_request_accepts_empty_conversation() {
        let req = build_chat_request(&config(PromptMode::Chat), &[], None);
        assert_eq!(req.messages.len(), 1);
    }

    #[test]
    fn chat_request_serializes_without_user_when_absent() {
        let req = build_chat_request(&config(PromptMode::Chat), &greeting(), None);
        let json = serde_json::to_value(ProviderRequest::Chat(req)).unwrap();
        assert!(json.get("user").is_none());
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
    }

    #[test]
    fn flattened_prompt_preserves_order_and_ends_with_cue() {
        let mut turns = greeting();
        turns.push(Turn::new(Speaker::Assistant, "Tell me a story about that."));
        let prompt = render_prompt(&config(PromptMode::Completion), &turns);
        assert_eq!(
            prompt,
            "AI: Be a guide.\nAI: Hi, I'm the guide...\nOwner: I value honesty.\nAI: Tell me a story about that.\nAI: "
        );
        assert!(prompt.ends_with("\nAI: "));
    }

    #[test]
    fn stop_sequences_do_not_depend_on_history_length() {
        let cfg = config(PromptMode::Completion);
        let short = build_completion_request(&cfg, &greeting(), None).unwrap();
        let mut long_turns = greeting();
        for i in 0..10 {
            long_turns.push(Turn::new(Speaker::User, format!("answer {}", i)));
        }
        let long = build_completion_request(&cfg, &long_turns, None).unwrap();
        assert_eq!(short.stop, vec!["AI: ".to_string(), "Owner: ".to_string()]);
        assert_eq!(long.stop, short.stop);
    }

    #[test]
    fn completion_request_uses_fixed_generation_parameters() {
        let req = build_completion_request(
            &config(PromptMode::Completion),
            &greeting(),
            Some("owner-7")
        ).unwrap();
        assert_eq!(req.max_tokens, 200);
        assert_eq!(req.top_p, 1.0);
        assert_eq!(req.frequency_penalty, 0.0);
        assert_eq!(req.presence_penalty, 0.0);
        assert_eq!(req.user.as_deref(), Some("owner-7"));
    }

    #[test]
    fn completion_mode_rejects_short_conversations() {
        let cfg = config(PromptMode::Completion);
        let one = vec![Turn::new(Speaker::Assistant, "Hi")];
        assert!(matches!(build_completion_request(&cfg, &one, None), Err(RelayError::Input(_))));
        assert!(matches!(build_completion_request(&cfg, &[], None), Err(RelayError::Input(_))));
    }

    #[test]
    fn provider_request_follows_configured_mode() {
        let chat = build_provider_request(&config(PromptMode::Chat), &greeting(), None).unwrap();
        assert_eq!(chat.mode(), PromptMode::Chat);
        let completion = build_provider_request(
            &config(PromptMode::Completion),
            &greeting(),
            None
        ).unwrap();
        assert_eq!(completion.mode(), PromptMode::Completion);
    }
}
