//! # Trailhead Server
//!
//! Serves the signup eligibility API. Configuration comes from defaults,
//! `config.toml` and `TRAILHEAD__*` environment variables; the flags below
//! override the listen address and log format.

use clap::Parser;
use std::net::SocketAddr;
use trailhead_api::{build_router, AppState};
use trailhead_common::policy::ClubPolicy;

#[derive(Parser)]
#[command(name = "trailhead", version, about = "Trip signup eligibility service")]
struct Cli {
    /// Override `server.host`
    #[arg(long, env = "TRAILHEAD_HOST")]
    host: Option<String>,
    /// Override `server.port`
    #[arg(long, env = "TRAILHEAD_PORT")]
    port: Option<u16>,
    /// Emit logs as JSON lines
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = trailhead_common::config::init()?;

    // Initialize tracing (structured logging)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trailhead=debug,tower_http=debug".into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!("Starting Trailhead v{}", env!("CARGO_PKG_VERSION"));

    let policy = ClubPolicy::from_config(&config.club)?;
    tracing::info!(
        club = %config.club.name,
        time_zone = %policy.zone,
        must_update_after_days = policy.must_update_after_days,
        "Club policy loaded"
    );

    let state = AppState::new(policy, config.auth.jwt_secret.clone(), config.club.name.clone());
    let router = build_router(state);

    let host = cli.host.as_deref().unwrap_or(&config.server.host);
    let addr = SocketAddr::new(host.parse()?, cli.port.unwrap_or(config.server.port));

    tracing::info!(server = %config.server.name, "REST API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
