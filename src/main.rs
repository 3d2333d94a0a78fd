mod app;
mod cache;
mod config;
mod events;
mod spotify;
mod ui;

use anyhow::Result;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{app::App, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    // ── Logging setup ────────────────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("moodtune=info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load()?;

    // ── Run the server ───────────────────────────────────────────────────────
    let app = App::new(config)?;
    if let Err(e) = app.run().await {
        error!("Server error: {e:?}");
        return Err(e);
    }

    Ok(())
}
