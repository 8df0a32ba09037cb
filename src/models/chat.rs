use serde::{ Deserialize, Serialize };

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Role string understood by chat-style providers.
    pub fn role(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        }
    }
}

// Clients tag the end user as "user"; everything else ("bot", "ai", ...) is the assistant.
impl From<String> for Speaker {
    fn from(who: String) -> Self {
        if who == "user" { Speaker::User } else { Speaker::Assistant }
    }
}

/// One message of the conversation, in the shape the front-end sends.
#[derive(Clone, Debug, Deserialize)]
pub struct Turn {
    #[serde(rename = "who", deserialize_with = "deserialize_speaker")]
    pub speaker: Speaker,
    #[serde(rename = "message")]
    pub text: String,
}

fn deserialize_speaker<'de, D>(deserializer: D) -> Result<Speaker, D::Error>
    where D: serde::Deserializer<'de>
{
    String::deserialize(deserializer).map(Speaker::from)
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self { speaker, text: text.into() }
    }
}

pub type Conversation = Vec<Turn>;

#[derive(Clone, Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Conversation,
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub text: String,
}

impl ChatResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
