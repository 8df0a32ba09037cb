use clap::Parser;
use completion_relay::cli::Args;
use dotenv::dotenv;
use log::error;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(e) = completion_relay::run(args).await {
        error!("Fatal: {}", e);
        return Err(e);
    }
    Ok(())
}
