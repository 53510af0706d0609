//! # MedCare Core
//!
//! Core business logic for the MedCare health information service.
//!
//! This crate contains pure data operations:
//! - Disease/medicine records and preventive tips (`models`)
//! - The record store handle and its memory and JSON file implementations (`store`)
//! - Symptom matching, suitability scoring and duration advisories (`matching`)
//! - Tip listing, search and tip-of-the-day selection (`tips`)
//! - Validated record creation and seeding (`ingestion`)
//!
//! **No API concerns**: HTTP servers, CORS and OpenAPI belong in `api-rest` and `api-shared`;
//! HTTP-backed summary providers live in `medcare-providers`.

pub mod config;
pub mod constants;
pub mod error;
pub mod ingestion;
pub mod matching;
pub mod models;
pub mod provider;
pub mod store;
pub mod tips;

pub use config::{CoreConfig, ProviderKind};
pub use error::{MedcareError, MedcareResult};
pub use ingestion::{IngestionService, SeedBundle};
pub use matching::{
    annotate_duration, evaluate_suitability, CheckOutcome, MatchingService, Suitability,
    SuitabilityReasons, SymptomCheck,
};
pub use medcare_types::NonEmptyText;
pub use models::{
    DiseaseRecord, GenderConstraint, MedicineRef, NewDiseaseRecord, NewTip, PreventiveTip,
    Summary, TipSearchHit,
};
pub use provider::{ProviderError, SummaryProvider};
pub use store::{JsonFileStore, MemoryStore, RecordStore};
pub use tips::TipService;
