//! Halftone server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use halftone_core::config::AppConfig;
use halftone_server::{AppState, create_router};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Halftone - A multi-tenant webcomic publishing server
#[derive(Parser, Debug)]
#[command(name = "halftoned")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "HALFTONE_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Halftone v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file is optional, env vars can provide/override everything)
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    let has_config_file = config_path.exists();

    if has_config_file {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    // Check for HALFTONE_ environment variables (excluding HALFTONE_CONFIG which is just the path)
    let has_env_config =
        std::env::vars().any(|(key, _)| key.starts_with("HALFTONE_") && key != "HALFTONE_CONFIG");

    if !has_config_file && !has_env_config {
        anyhow::bail!(
            "No configuration provided.\n\n\
             Provide configuration via one of:\n  \
             1. Config file: halftoned --config /path/to/config.toml\n  \
             2. Environment variables: HALFTONE_SERVER__BIND=0.0.0.0:8080 \
             HALFTONE_METADATA__PATH=/var/lib/halftone/metadata.db halftoned\n\n\
             See config/server.example.toml for example configuration.\n\
             Set HALFTONE_CONFIG env var to specify a default config file path."
        );
    }

    if !has_config_file {
        tracing::info!("Using environment variables for configuration");
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("HALFTONE_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    // Register Prometheus metrics
    halftone_server::metrics::register_metrics();
    tracing::info!("Prometheus metrics registered");

    // Initialize metadata store
    let metadata = halftone_metadata::from_config(&config.metadata)
        .await
        .context("failed to initialize metadata store")?;
    tracing::info!("Metadata store initialized");

    // Verify store connectivity before accepting requests. This catches
    // configuration errors early, preventing the server from reporting
    // healthy when the database is unreachable.
    metadata
        .health_check()
        .await
        .context("metadata health check failed")?;

    let state = AppState::new(config.clone(), metadata);

    let app = create_router(state);

    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
