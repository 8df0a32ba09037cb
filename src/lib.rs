pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod relay;
pub mod server;

use cli::Args;
use config::RelayConfig;
use log::info;
use relay::CompletionRelay;
use server::Server;
use std::error::Error;

/// Validates configuration, then serves. A configuration error returns before
/// anything binds.
pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = RelayConfig::from_args(&args)?;

    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Prompt Mode: {}", config.mode);
    info!("Model: {}", config.model);
    info!("Provider Base URL: {}", config.base_url);
    info!("Request Timeout: {}s", config.request_timeout.as_secs());
    info!("Speaker Labels: {} / {}", config.bot_name, config.user_name);
    info!(
        "System Prompt: {}",
        args.system_prompt_path.as_deref().unwrap_or("built-in")
    );
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let relay = CompletionRelay::new(config)?;
    let addr = args.server_addr.clone();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, relay, args);
    server.run().await?;

    Ok(())
}
