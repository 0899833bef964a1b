use anyhow::Context;
use ask_forwarder::telemetry;
use tracing::{Level, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file when one exists.
    let dotenv = match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(err) if err.not_found() => None,
        Err(err) => return Err(err).context("failed to read .env file"),
    };

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("warn", Level::INFO))
        .with(telemetry::layer())
        .init();

    if let Some(path) = dotenv {
        info!(path = %path.display(), "loaded environment from file");
    }

    api::start().await.context("ask gateway failed")?;

    Ok(())
}
