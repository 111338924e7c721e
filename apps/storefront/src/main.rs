use core_config::tracing::{init_tracing, install_color_eyre};
use database::Context;
use std::time::Duration;
use tracing::info;

use storefront::config::Config;
use storefront::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!(
        environment = %config.environment,
        storage = %config.storage,
        "Starting storefront"
    );

    // Root context; cancelled on shutdown so in-flight storage calls stop
    let root = Context::background();

    let startup = root.with_timeout(config.startup_timeout);
    let state = AppState::build(&startup, config).await?;

    let healthy = state
        .is_healthy(&root.with_timeout(Duration::from_secs(5)))
        .await;
    info!(healthy, "Storage ready, waiting for shutdown signal");

    tokio::signal::ctrl_c().await?;

    info!("Shutting down: cancelling in-flight storage operations");
    root.cancel();
    // MongoDB client closes automatically on drop
    drop(state);

    info!("Storefront shutdown complete");
    Ok(())
}
