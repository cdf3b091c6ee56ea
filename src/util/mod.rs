//! Utility functions shared across the application.

mod secret;

pub use secret::SecretString;

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::warn;

/// Number of consecutive ports tried after the preferred one
const PORT_FALLBACK_RANGE: u16 = 10;

fn socket_addr(host: &str, port: u16) -> std::io::Result<SocketAddr> {
    format!("{}:{}", host, port)
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
}

/// Bind a listener, starting from the preferred port.
///
/// Strategy:
/// 1. Try the preferred port first
/// 2. If unavailable, try the next 10 consecutive ports
/// 3. If all are unavailable, let the OS assign a port
///
/// The bound listener is returned, so the port cannot be taken between
/// discovery and use.
pub async fn bind_with_fallback(host: &str, preferred: u16) -> std::io::Result<TcpListener> {
    if let Ok(listener) = TcpListener::bind(socket_addr(host, preferred)?).await {
        return Ok(listener);
    }

    for offset in 1..=PORT_FALLBACK_RANGE {
        let port = preferred.saturating_add(offset);
        if let Ok(listener) = TcpListener::bind(socket_addr(host, port)?).await {
            warn!(
                preferred,
                actual = port,
                "Preferred port unavailable, using alternate"
            );
            return Ok(listener);
        }
    }

    let listener = TcpListener::bind(socket_addr(host, 0)?).await?;
    warn!(
        preferred,
        actual = listener.local_addr()?.port(),
        "Using OS-assigned port"
    );
    Ok(listener)
}
