pub mod api;

use crate::cli::Args;
use crate::error::ConfigError;
use crate::relay::CompletionRelay;
use std::error::Error;
use std::net::SocketAddr;
use log::{ info, error };

pub struct Server {
    addr: String,
    relay: CompletionRelay,
    args: Args,
}

impl Server {
    pub fn new(addr: String, relay: CompletionRelay, args: Args) -> Self {
        Self { addr, relay, args }
    }

    /// Serves until the listener fails. Does not return on success.
    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.addr.parse::<SocketAddr>()?;
        let app = api::router(self.relay.clone());

        match tls_paths(&self.args)? {
            Some((cert_path, key_path)) => {
                info!(
                    "TLS enabled. Loading certificate from '{}' and key from '{}'",
                    cert_path,
                    key_path
                );
                let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                    cert_path,
                    key_path
                ).await?;

                info!("HTTPS server listening on: https://{}", addr);
                axum_server::bind_rustls(addr, tls_config)
                    .serve(app.into_make_service())
                    .await
                    .map_err(|e| {
                        error!("HTTPS server error: {}", e);
                        e
                    })?;
            }
            None => {
                let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
                    error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
                    e
                })?;
                info!("HTTP server listening on: http://{}", addr);
                axum::serve(listener, app.into_make_service()).await?;
            }
        }

        Ok(())
    }
}

fn tls_paths(args: &Args) -> Result<Option<(&str, &str)>, ConfigError> {
    if !args.enable_tls {
        info!("TLS not enabled. Running plain HTTP server.");
        return Ok(None);
    }
    match (args.tls_cert_path.as_deref(), args.tls_key_path.as_deref()) {
        (Some(cert), Some(key)) => Ok(Some((cert, key))),
        (Some(_), None) | (None, Some(_)) => {
            error!("Both --tls-cert-path and --tls-key-path must be provided to enable TLS.");
            Err(ConfigError::Tls("missing TLS certificate or key path".to_string()))
        }
        (None, None) => {
            error!("--enable-tls was set but no certificate/key paths provided.");
            Err(ConfigError::Tls("TLS enabled without cert/key".to_string()))
        }
    }
}
