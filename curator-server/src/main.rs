//! BCH Curator Server - Headless Daemon
//!
//! A pure Rust HTTP server that:
//! - Serves the public content API (videos, blog, featured, stats, contact) on /api/*
//! - Serves moderation and sync controls on /api/admin/* behind `CURATOR_ADMIN_KEY`
//! - Keeps the hosted backend awake and runs the remote video sync on a timer
//!
//! Access via: http://localhost:8046

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use curator_client::{BackendConfig, SupabaseClient, YouTubeClient};
use curator_core::modules::logger;
use curator_core::{AdminService, Backend, SyncScheduler};

mod api;
mod cli;
mod commands;
mod middleware;
mod router;
mod server_utils;
mod state;
#[cfg(test)]
mod test_helpers;

use cli::{Cli, Commands};
use state::AppState;

const ADMIN_KEY_VAR: &str = "CURATOR_ADMIN_KEY";
const YOUTUBE_KEY_VAR: &str = "YOUTUBE_API_KEY";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(&cli.log_level);

    let config = BackendConfig::from_env().context("Backend configuration")?;
    let backend: Arc<dyn Backend> = Arc::new(SupabaseClient::new(config)?);
    let scheduler = Arc::new(SyncScheduler::with_system_clock(Arc::clone(&backend)));
    let admin = admin_service(Arc::clone(&backend))?;

    match cli.command {
        Some(Commands::Sync) => commands::handle_sync(&scheduler).await,
        Some(Commands::Ping) => commands::handle_ping(&scheduler).await,
        Some(Commands::Channel(cmd)) => commands::handle_channel_command(&admin, cmd).await,
        Some(Commands::Serve) | None => serve(&cli, backend, admin, scheduler).await,
    }
}

fn admin_service(backend: Arc<dyn Backend>) -> Result<AdminService> {
    let admin = AdminService::new(backend);
    match std::env::var(YOUTUBE_KEY_VAR).ok().filter(|k| !k.trim().is_empty()) {
        Some(key) => Ok(admin.with_directory(Arc::new(YouTubeClient::new(key)?))),
        None => {
            tracing::warn!("⚠️ {} not set, channel lookups are disabled", YOUTUBE_KEY_VAR);
            Ok(admin)
        },
    }
}

async fn serve(
    cli: &Cli,
    backend: Arc<dyn Backend>,
    admin: AdminService,
    scheduler: Arc<SyncScheduler>,
) -> Result<()> {
    info!("🚀 BCH Curator Server starting on port {}...", cli.port);

    let admin_key = std::env::var(ADMIN_KEY_VAR).ok();
    if admin_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
        tracing::warn!("⚠️ {} not set, the admin API will reject every request", ADMIN_KEY_VAR);
    }

    scheduler.start(cli.sync_config()).context("Invalid sync configuration")?;

    let state = AppState::new(backend, admin, Arc::clone(&scheduler), admin_key);
    info!("✅ Application state initialized");

    let app = router::build_router(state);
    let listener = server_utils::create_listener(&cli.bind, cli.port)?;

    info!("🌐 Server listening on http://{}", listener.local_addr()?);
    info!("🔌 API available at http://{}:{}/api/", cli.bind, cli.port);

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    scheduler.stop();
    info!("👋 Server stopped");
    Ok(())
}
