// ABOUTME: Entry point for the spellgate binary.
// ABOUTME: Loads env files and config, initializes tracing, builds the gateways, and starts the HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use spellgate_server::{AppState, Gateways, ServerConfig, serve};

#[derive(Debug, Parser)]
#[command(name = "spellgate", version, about = "Spelling and grammar checking gateway")]
struct Cli {
    /// Load environment variables from this file (defaults to ./.env when present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Override the PORT environment variable
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "spellgate=debug,spellgate_server=debug,spellgate_gateway=debug,tower_http=debug"
                    .parse()
                    .unwrap()
            }),
        )
        .init();

    let mut config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(port) = cli.port {
        config.bind.set_port(port);
    }

    tracing::info!(
        env = %config.node_env,
        bind = %config.bind,
        views = %config.views_dir.display(),
        static_dir = %config.static_dir.display(),
        upstream_timeout_ms = config.upstream_timeout.as_millis() as u64,
        "spellgate starting up"
    );

    let gateways = Gateways::from_config(&config).context("failed to build gateways")?;
    let state = Arc::new(AppState::new(config, gateways));

    serve(state).await.context("server error")?;
    Ok(())
}
