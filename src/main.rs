//! wcif-gate server
//!
//! Competitions API with dual-principal access control and atomic WCIF
//! event replacement.

use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wcif_gate::{
    config::{AppConfig, LogFormat, load_config},
    server::{AppState, router},
    store::{CompetitionStore, InMemoryStore, seed_store},
    transport::{HttpConfig, run_http_blocking},
    wcif::EventListSchema,
};

/// wcif-gate - WCA competitions API with scoped access control
#[derive(Parser, Debug)]
#[command(name = "wcif-gate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "WCIF_GATE_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "WCIF_GATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// HTTP server host; overrides the config file
    #[arg(long, env = "WCIF_GATE_HTTP_HOST")]
    http_host: Option<String>,

    /// HTTP server port; overrides the config file
    #[arg(long, env = "WCIF_GATE_HTTP_PORT")]
    http_port: Option<u16>,
}

fn init_logging(config: &AppConfig, level: Option<&str>) {
    let level = level.unwrap_or(&config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_logging(&config, args.log_level.as_deref());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        users = config.auth.users.len(),
        "Starting wcif-gate"
    );

    let schema = Arc::new(
        EventListSchema::new().inspect_err(|e| error!(error = %e, "Failed to compile schema"))?,
    );

    let store = Arc::new(InMemoryStore::new());
    if let Some(seed_path) = &config.store.seed_path {
        let expanded = shellexpand::tilde(seed_path);
        seed_store(store.as_ref(), &schema, Path::new(expanded.as_ref()))
            .await
            .inspect_err(|e| error!(error = %e, "Failed to seed competition store"))?;
    }
    let store: Arc<dyn CompetitionStore> = store;

    let state = AppState::from_config(&config, store, schema);
    let app = router(state, config.server.cors);

    let host = args.http_host.unwrap_or_else(|| config.server.host.clone());
    let port = args.http_port.unwrap_or(config.server.port);
    let http_config = HttpConfig::from_host_port(&host, port)?;

    run_http_blocking(app, http_config).await
}
