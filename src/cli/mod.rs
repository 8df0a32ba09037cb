use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Provider Args ---
    /// API key for the completion provider. Required; the server refuses to start without it.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API (without the endpoint path).
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub base_url: String,

    /// Model name. Defaults to gpt-3.5-turbo (chat) or gpt-3.5-turbo-instruct (completion).
    #[arg(long, env = "OPENAI_MODEL")] // No default, the prompt mode picks one
    pub model: Option<String>,

    /// Timeout in seconds for the outbound provider call.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout_secs: u64,

    // --- Prompt Args ---
    /// Request shape sent to the provider (chat, completion)
    #[arg(long, env = "PROMPT_MODE", default_value = "chat")]
    pub prompt_mode: String,

    /// Speaker label for the assistant in completion mode.
    #[arg(long, env = "BOT_NAME", default_value = "AI")]
    pub bot_name: String,

    /// Speaker label for the end user in completion mode.
    #[arg(long, env = "USER_NAME", default_value = "User")]
    pub user_name: String,

    /// Optional file whose contents replace the built-in system instruction.
    #[arg(long, env = "SYSTEM_PROMPT_PATH")]
    pub system_prompt_path: Option<String>,

    // --- Server Args ---
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:3000")]
    pub server_addr: String,

    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}
