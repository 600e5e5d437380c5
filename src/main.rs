use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use quakemap::feed::HttpFeedClient;
use quakemap::server::{start_server, AppState};
use quakemap::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🗺️  QuakeMap v{} starting...", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load().context("Failed to load settings")?;
    tracing::info!(
        "Feed: {} | initial filters: {} / {}",
        settings.feed_base_url,
        settings.magnitude.label(),
        settings.time_window.label()
    );

    let client = Arc::new(HttpFeedClient::new()?);
    let port = settings.port;
    let state = AppState::new(&settings, client);

    // Initial load, same as a filter change
    state.spawn_refresh();

    start_server(state, port).await?;

    Ok(())
}
