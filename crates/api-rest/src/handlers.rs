//! Request handlers.
//!
//! Handlers translate between JSON bodies and core services. They hold no logic of their own
//! beyond mapping errors through [`ApiError`].

use axum::extract::{Path, State};
use axum::response::Json;
use medcare_core::{
    DiseaseRecord, MedcareError, MedicineRef, NewDiseaseRecord, NewTip, PreventiveTip,
    SymptomCheck, TipSearchHit,
};

use api_shared::{
    CheckReq, CheckRes, CreateMedicineRes, CreateTipRes, ErrorRes, HealthRes, HealthService,
};

use crate::{ApiError, ApiJson, AppState};

/// Plain-text liveness banner.
pub async fn root() -> &'static str {
    "MedCare backend is running"
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// This endpoint is used for monitoring and load balancer health checks.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/medicines",
    responses(
        (status = 200, description = "All disease records", body = [DiseaseRecord]),
        (status = 500, description = "Storage failure", body = ErrorRes)
    )
)]
/// List all disease/medicine records.
#[axum::debug_handler]
pub async fn list_medicines(
    State(state): State<AppState>,
) -> Result<Json<Vec<DiseaseRecord>>, ApiError> {
    Ok(Json(state.matching.list_records()?))
}

#[utoipa::path(
    post,
    path = "/medicines",
    request_body = NewDiseaseRecord,
    responses(
        (status = 200, description = "Record created", body = CreateMedicineRes),
        (status = 400, description = "Missing or invalid fields", body = ErrorRes),
        (status = 500, description = "Storage failure", body = ErrorRes)
    )
)]
/// Create a new disease/medicine record
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - `diseaseName` is missing or blank,
/// - `minAge` exceeds `maxAge`,
/// - `gender` is not `male`, `female` or `any`.
#[axum::debug_handler]
pub async fn create_medicine(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewDiseaseRecord>,
) -> Result<Json<CreateMedicineRes>, ApiError> {
    let medicine = state.ingestion.add_disease_record(req)?;
    Ok(Json(CreateMedicineRes {
        message: "✅ Medicine record added".into(),
        medicine,
    }))
}

#[utoipa::path(
    get,
    path = "/medicines/{name}",
    params(("name" = String, Path, description = "Medicine name, matched case-insensitively")),
    responses(
        (status = 200, description = "Medicine found", body = MedicineRef),
        (status = 404, description = "Medicine not found", body = ErrorRes)
    )
)]
/// Look up a single medicine by name across all disease records.
#[axum::debug_handler]
pub async fn get_medicine(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MedicineRef>, ApiError> {
    Ok(Json(state.matching.find_medicine(&name)?))
}

#[utoipa::path(
    post,
    path = "/check",
    request_body = CheckReq,
    responses(
        (status = 200, description = "Matched record with suitability annotations", body = CheckRes),
        (status = 400, description = "Input missing or blank", body = ErrorRes),
        (status = 404, description = "No matching disease or symptom", body = ErrorRes),
        (status = 500, description = "Storage failure", body = ErrorRes)
    )
)]
/// Symptom checker
///
/// Matches the input against disease names, then symptoms, and annotates the first match with
/// a suitability verdict for the given age/sex and a duration advisory.
///
/// Note: an omitted `age` or `sex` passes the corresponding suitability check.
pub async fn check(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CheckReq>,
) -> Result<Json<CheckRes>, ApiError> {
    let outcome = state.matching.check(&SymptomCheck::from(req))?;
    Ok(Json(CheckRes::from(outcome)))
}

#[utoipa::path(
    get,
    path = "/preventive",
    responses(
        (status = 200, description = "All preventive tips", body = [PreventiveTip]),
        (status = 500, description = "Storage failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_preventive(
    State(state): State<AppState>,
) -> Result<Json<Vec<PreventiveTip>>, ApiError> {
    Ok(Json(state.tips.list_all()?))
}

#[utoipa::path(
    post,
    path = "/preventive",
    request_body = NewTip,
    responses(
        (status = 200, description = "Tip created", body = CreateTipRes),
        (status = 400, description = "A required field is missing", body = ErrorRes),
        (status = 500, description = "Storage failure", body = ErrorRes)
    )
)]
/// Add a preventive tip. `title`, `category`, `description` and `image` are all required.
#[axum::debug_handler]
pub async fn create_preventive(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewTip>,
) -> Result<Json<CreateTipRes>, ApiError> {
    let tip = state.ingestion.add_tip(req)?;
    Ok(Json(CreateTipRes {
        message: "✅ Preventive tip added successfully".into(),
        tip,
    }))
}

#[utoipa::path(
    get,
    path = "/preventive/search/{query}",
    params(("query" = String, Path, description = "Text searched in title, description and category")),
    responses(
        (status = 200, description = "Stored matches followed by external summaries", body = [TipSearchHit]),
        (status = 404, description = "Nothing found", body = ErrorRes),
        (status = 500, description = "Storage failure", body = ErrorRes)
    )
)]
/// Search preventive tips (store + external providers)
///
/// External provider failures are logged and never fail the request.
#[axum::debug_handler]
pub async fn search_preventive(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<Vec<TipSearchHit>>, ApiError> {
    Ok(Json(state.tips.search_tips(&query).await?))
}

#[utoipa::path(
    get,
    path = "/preventive/tip/random",
    responses(
        (status = 200, description = "One stored tip", body = PreventiveTip),
        (status = 404, description = "No tips stored", body = ErrorRes)
    )
)]
/// Random tip of the day.
#[axum::debug_handler]
pub async fn random_preventive(
    State(state): State<AppState>,
) -> Result<Json<PreventiveTip>, ApiError> {
    let mut rng = state.rng().lock().map_err(|_| MedcareError::LockPoisoned)?;
    let tip = state.tips.random_tip(&mut *rng)?;
    Ok(Json(tip))
}
