use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use medcare_core::{
    IngestionService, MemoryStore, NewDiseaseRecord, NewTip, ProviderError, RecordStore, Summary,
    SummaryProvider,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::*;

struct FailingProvider;

#[async_trait]
impl SummaryProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn lookup(&self, _query: &str) -> Result<Option<Summary>, ProviderError> {
        Err("upstream unavailable".into())
    }
}

struct EchoProvider;

#[async_trait]
impl SummaryProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn lookup(&self, query: &str) -> Result<Option<Summary>, ProviderError> {
        Ok(Some(Summary {
            title: query.to_string(),
            category: "Echo".into(),
            description: format!("About {query}"),
            image: "https://example.org/echo.png".into(),
        }))
    }
}

fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let ingestion = IngestionService::new(store.clone());
    ingestion
        .add_disease_record(NewDiseaseRecord {
            disease_name: Some("Fever".into()),
            symptoms: vec!["high temperature".into(), "chills".into()],
            medicines: vec![medcare_core::MedicineRef {
                name: "Paracetamol".into(),
                image: "https://example.org/paracetamol.png".into(),
                short_info: "Reduces fever and pain".into(),
            }],
            home_remedies: vec!["Rest".into(), "Fluids".into()],
            precautions: Some("See a doctor if above 39C".into()),
            min_age: Some(5),
            max_age: Some(80),
            gender: Some("any".into()),
        })
        .unwrap();
    ingestion
        .add_disease_record(NewDiseaseRecord {
            disease_name: Some("Prostatitis".into()),
            symptoms: vec!["pelvic pain".into()],
            min_age: Some(18),
            gender: Some("male".into()),
            ..Default::default()
        })
        .unwrap();
    store
}

fn app_with(store: Arc<MemoryStore>, providers: Vec<Arc<dyn SummaryProvider>>) -> Router {
    router(AppState::new(store, providers, Some(1)))
}

fn app() -> Router {
    app_with(seeded_store(), vec![Arc::new(FailingProvider)])
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn check_matches_seeded_fever_record() {
    let req = json_request(
        Method::POST,
        "/check",
        json!({"input": "fever", "age": 25, "sex": "male", "duration": 2}),
    );
    let (status, body) = send(app(), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["diseaseName"], "Fever");
    assert_eq!(body["suitability"], true);
    assert_eq!(body["extraNote"], "");
    assert_eq!(
        body["suitabilityReasons"],
        json!({"minAgeOk": true, "maxAgeOk": true, "genderOk": true})
    );
    assert_eq!(body["medicines"][0]["name"], "Paracetamol");
}

#[tokio::test]
async fn check_by_symptom_with_long_duration_adds_advisory() {
    let req = json_request(
        Method::POST,
        "/check",
        json!({"input": "CHILLS", "age": "3", "duration": 5}),
    );
    let (status, body) = send(app(), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["diseaseName"], "Fever");
    assert_eq!(body["suitability"], false);
    assert_eq!(body["suitabilityReasons"]["minAgeOk"], false);
    assert_eq!(
        body["extraNote"],
        medcare_core::constants::DURATION_ADVISORY
    );
}

#[tokio::test]
async fn check_accepts_fractional_age_and_duration() {
    let req = json_request(
        Method::POST,
        "/check",
        json!({"input": "fever", "age": 4.5, "duration": 4.5}),
    );
    let (status, body) = send(app(), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suitability"], false);
    assert_eq!(body["suitabilityReasons"]["minAgeOk"], false);
    assert_eq!(body["suitabilityReasons"]["maxAgeOk"], true);
    assert_eq!(
        body["extraNote"],
        medcare_core::constants::DURATION_ADVISORY
    );

    let req = json_request(
        Method::POST,
        "/check",
        json!({"input": "fever", "age": "25.5", "duration": "2.5"}),
    );
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suitability"], true);
    assert_eq!(body["extraNote"], "");
}

#[tokio::test]
async fn check_rejects_non_numeric_age_with_readable_error() {
    let req = json_request(
        Method::POST,
        "/check",
        json!({"input": "fever", "age": "old"}),
    );
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("age must be a number"), "{message}");
    assert!(!message.contains("untagged"), "{message}");
}

#[tokio::test]
async fn check_flags_sex_mismatch() {
    let req = json_request(
        Method::POST,
        "/check",
        json!({"input": "pelvic", "age": 40, "sex": "Female"}),
    );
    let (status, body) = send(app(), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suitability"], false);
    assert_eq!(body["suitabilityReasons"]["genderOk"], false);
}

#[tokio::test]
async fn check_rejects_blank_or_missing_input() {
    for body in [json!({"input": ""}), json!({"input": "   "}), json!({})] {
        let (status, res) = send(app(), json_request(Method::POST, "/check", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(res["error"].is_string());
    }
}

#[tokio::test]
async fn check_rejects_malformed_json_with_error_body() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/check")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"input\": "))
        .unwrap();
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn check_reports_no_match() {
    let req = json_request(Method::POST, "/check", json!({"input": "malaria"}));
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No matching disease or symptom found.");
}

#[tokio::test]
async fn medicines_round_trip_through_post_and_list() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone(), vec![]);

    let req = json_request(
        Method::POST,
        "/medicines",
        json!({
            "diseaseName": "Migraine",
            "symptoms": ["headache"],
            "medicines": [{"name": "Ibuprofen", "image": "i.png", "shortInfo": "NSAID"}],
            "minAge": 12,
            "gender": "any"
        }),
    );
    let (status, body) = send(app.clone(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["medicine"]["diseaseName"], "Migraine");
    assert!(body["medicine"]["_id"].is_string());

    let (status, body) = send(app.clone(), get("/medicines")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(app, get("/medicines/ibuprofen")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shortInfo"], "NSAID");
    assert_eq!(store.list_diseases().unwrap().len(), 1);
}

#[tokio::test]
async fn post_medicine_validates_fields() {
    let req = json_request(
        Method::POST,
        "/medicines",
        json!({"diseaseName": "Flu", "minAge": 70, "maxAge": 10}),
    );
    let (status, _) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = json_request(Method::POST, "/medicines", json!({"symptoms": ["cough"]}));
    let (status, _) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_medicine_is_not_found() {
    let (status, body) = send(app(), get("/medicines/aspirin")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn preventive_post_requires_every_field() {
    let req = json_request(
        Method::POST,
        "/preventive",
        json!({"title": "Wash hands", "category": "Hygiene", "description": "Soap"}),
    );
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required.");
}

#[tokio::test]
async fn preventive_post_then_list() {
    let app = app();
    let req = json_request(
        Method::POST,
        "/preventive",
        json!({
            "title": "Wash hands",
            "category": "Hygiene",
            "description": "Soap for twenty seconds",
            "image": "https://example.org/hands.png"
        }),
    );
    let (status, body) = send(app.clone(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tip"]["title"], "Wash hands");

    let (status, body) = send(app, get("/preventive")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["category"], "Hygiene");
}

#[tokio::test]
async fn search_with_empty_store_and_failing_providers_is_not_found() {
    let app = app_with(Arc::new(MemoryStore::new()), vec![Arc::new(FailingProvider)]);
    let (status, body) = send(app, get("/preventive/search/xyz123notfound")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No tips found.");
}

#[tokio::test]
async fn search_merges_store_and_provider_results() {
    let store = Arc::new(MemoryStore::new());
    IngestionService::new(store.clone())
        .add_tip(NewTip {
            title: Some("Hand hygiene".into()),
            category: Some("Hygiene".into()),
            description: Some("Wash often".into()),
            image: Some("https://example.org/h.png".into()),
        })
        .unwrap();
    let app = app_with(
        store,
        vec![Arc::new(FailingProvider), Arc::new(EchoProvider)],
    );

    let (status, body) = send(app, get("/preventive/search/hygiene")).await;
    assert_eq!(status, StatusCode::OK);
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["title"], "Hand hygiene");
    assert!(hits[0]["_id"].is_string());
    assert_eq!(hits[1]["category"], "Echo");
}

#[tokio::test]
async fn random_tip_on_empty_store_is_not_found() {
    let app = app_with(Arc::new(MemoryStore::new()), vec![]);
    let (status, _) = send(app, get("/preventive/tip/random")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn random_tip_returns_a_stored_tip() {
    let store = Arc::new(MemoryStore::new());
    let ingestion = IngestionService::new(store.clone());
    for title in ["Sleep", "Walk", "Hydrate"] {
        ingestion
            .add_tip(NewTip {
                title: Some(title.into()),
                category: Some("Lifestyle".into()),
                description: Some(format!("{title} daily")),
                image: Some("https://example.org/x.png".into()),
            })
            .unwrap();
    }
    let titles: Vec<String> = store.list_tips().unwrap().into_iter().map(|t| t.title).collect();
    let app = app_with(store, vec![]);

    for _ in 0..10 {
        let (status, body) = send(app.clone(), get("/preventive/tip/random")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(titles.contains(&body["title"].as_str().unwrap().to_string()));
    }
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = send(app(), get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/check"].is_object());
}
