use anyhow::Result;
use farecast::config::{FarecastConfig, LoggingConfig};
use farecast::web;
use tracing_subscriber::EnvFilter;

// RUST_LOG takes precedence over the configured level
fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.format == "compact" {
        builder.compact().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = FarecastConfig::load()?;
    init_tracing(&config.logging);

    tracing::info!(
        endpoint = %config.prediction.base_url,
        timeout_seconds = config.prediction.timeout_seconds,
        "starting farecast"
    );

    web::run(config).await
}
