//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the MedCare REST API on its own.
//!
//! ## Intended use
//! Useful for development and debugging. The workspace's `medcare-run` binary serves the same
//! router and is the one shipped in the container image.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use medcare_core::CoreConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("medcare_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::from_lookup(|key| std::env::var(key).ok())?;

    tracing::info!("-- Starting MedCare REST API on {}", cfg.rest_addr());

    let app = router(AppState::from_config(&cfg)?);

    let listener = tokio::net::TcpListener::bind(cfg.rest_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
