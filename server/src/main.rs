//! Farm Fresh catalog server.
//!
//! Starts the JSON API on `--host:--port`, seeded with the demo catalog unless
//! `--no-seed` is given. All data lives in memory and is lost on shutdown.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use farmfresh_server::{router, seed, AppState, MemStore};

#[derive(Parser)]
#[command(name = "farmfresh-server", about = "Farm Fresh catalog API server")]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "FARMFRESH_HOST", default_value = "0.0.0.0")]
    host: String,

    /// HTTP port to listen on.
    #[arg(long, env = "FARMFRESH_PORT", default_value_t = 5000)]
    port: u16,

    /// Start with an empty catalog.
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let store = if cli.no_seed {
        MemStore::new()
    } else {
        seed::seeded_store().context("Failed to load seed catalog")?
    };
    let state = AppState::new(store);
    let app = router(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, seeded = !cli.no_seed, "Farm Fresh server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
