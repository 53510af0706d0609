//! # API REST
//!
//! REST API implementation for MedCare.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, error bodies)
//!
//! Uses `api-shared` for request/response types and `medcare-core` for all data operations.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use std::sync::{Arc, Mutex};

use axum::routing::get;
use axum::Router;
use medcare_core::{
    CoreConfig, IngestionService, MatchingService, RecordStore, SummaryProvider, TipService,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::{ApiError, ApiJson};

/// Application state for the REST API server
///
/// Holds the services every handler needs plus the random source used for tip-of-the-day
/// selection. The store handle is shared by all services.
#[derive(Clone)]
pub struct AppState {
    pub matching: MatchingService,
    pub tips: TipService,
    pub ingestion: IngestionService,
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    /// Builds the state from a store handle, the enabled providers and an optional seed.
    ///
    /// Without a seed the random source is seeded from OS entropy.
    pub fn new(
        store: Arc<dyn RecordStore>,
        providers: Vec<Arc<dyn SummaryProvider>>,
        random_seed: Option<u64>,
    ) -> Self {
        let rng = match random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            matching: MatchingService::new(store.clone()),
            tips: TipService::new(store.clone(), providers),
            ingestion: IngestionService::new(store),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Opens the configured store and builds the configured providers.
    pub fn from_config(cfg: &CoreConfig) -> anyhow::Result<Self> {
        let store = cfg.open_store()?;
        let providers = medcare_providers::build_providers(cfg)?;
        tracing::info!(
            "-- Enabled summary providers: {:?}",
            providers.iter().map(|p| p.name()).collect::<Vec<_>>()
        );
        Ok(Self::new(store, providers, cfg.random_seed()))
    }

    pub(crate) fn rng(&self) -> &Mutex<StdRng> {
        &self.rng
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_medicines,
        handlers::create_medicine,
        handlers::get_medicine,
        handlers::check,
        handlers::list_preventive,
        handlers::create_preventive,
        handlers::search_preventive,
        handlers::random_preventive,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorRes,
        api_shared::CheckReq,
        api_shared::CheckRes,
        api_shared::CreateMedicineRes,
        api_shared::CreateTipRes,
        medcare_core::DiseaseRecord,
        medcare_core::MedicineRef,
        medcare_core::GenderConstraint,
        medcare_core::NewDiseaseRecord,
        medcare_core::NewTip,
        medcare_core::PreventiveTip,
        medcare_core::Summary,
        medcare_core::TipSearchHit,
        medcare_core::SuitabilityReasons,
    ))
)]
pub struct ApiDoc;

/// Builds the full REST router: API routes, Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(
            "/medicines",
            get(handlers::list_medicines).post(handlers::create_medicine),
        )
        .route("/medicines/:name", get(handlers::get_medicine))
        .route("/check", axum::routing::post(handlers::check))
        .route(
            "/preventive",
            get(handlers::list_preventive).post(handlers::create_preventive),
        )
        .route("/preventive/search/:query", get(handlers::search_preventive))
        .route("/preventive/tip/random", get(handlers::random_preventive))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests;
