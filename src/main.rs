use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use medcare_core::CoreConfig;

/// Main entry point for the MedCare backend
///
/// Loads configuration from the environment, opens the record store (seeding it when a seed
/// file is configured) and serves the REST API with Swagger UI.
///
/// # Environment Variables
/// - `MEDCARE_REST_ADDR`: REST server address (default: "0.0.0.0:5000")
/// - `MEDCARE_DATA_DIR`: Directory for the JSON record files (in-memory store when unset)
/// - `MEDCARE_SEED_FILE`: YAML seed applied to empty collections at startup
/// - `MEDCARE_RANDOM_SEED`: Fixed seed for tip-of-the-day selection
/// - `MEDCARE_PROVIDERS`: Comma-separated external summary providers, or `none`
/// - `MEDCARE_PROVIDER_TIMEOUT_SECS`: Per-request timeout for external providers
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, storage or the listener fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medcare_run=info".parse()?)
                .add_directive("medcare_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::from_lookup(|key| std::env::var(key).ok())?;

    match cfg.data_dir() {
        Some(dir) => tracing::info!("++ Using record store at {}", dir.display()),
        None => tracing::warn!("++ MEDCARE_DATA_DIR not set; records are kept in memory only"),
    }
    tracing::info!("++ Starting MedCare REST on {}", cfg.rest_addr());

    let app = router(AppState::from_config(&cfg)?);

    let listener = tokio::net::TcpListener::bind(cfg.rest_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
