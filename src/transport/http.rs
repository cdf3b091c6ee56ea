//! HTTP transport
//!
//! Serves the API router until Ctrl+C or the returned token is cancelled.

use crate::util::bind_with_fallback;
use axum::Router;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Default port for the HTTP API
pub const DEFAULT_HTTP_PORT: u16 = 20290;

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Address to bind to (e.g., "127.0.0.1:20290")
    pub bind: SocketAddr,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], DEFAULT_HTTP_PORT)),
        }
    }
}

impl HttpConfig {
    pub fn new(bind: SocketAddr) -> Self {
        Self { bind }
    }

    /// Create config from host and port strings
    pub fn from_host_port(host: &str, port: u16) -> Result<Self, std::net::AddrParseError> {
        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        Ok(Self::new(addr))
    }
}

/// Run the API server until `ct` is cancelled
///
/// Port discovery is used to find an available port if the configured port
/// is taken.
pub async fn run_http(router: Router, config: HttpConfig, ct: CancellationToken) -> anyhow::Result<()> {
    let host = config.bind.ip().to_string();
    let listener = bind_with_fallback(&host, config.bind.port()).await?;
    let local = listener.local_addr()?;

    info!("HTTP API listening on http://{}", local);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await?;

    info!("HTTP API stopped");
    Ok(())
}

/// Run the API server and wait for Ctrl+C
pub async fn run_http_blocking(router: Router, config: HttpConfig) -> anyhow::Result<()> {
    let ct = CancellationToken::new();
    let shutdown = ct.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
        }
        shutdown.cancel();
    });

    info!("Press Ctrl+C to stop the server");
    run_http(router, config, ct).await
}
