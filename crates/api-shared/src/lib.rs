//! # API Shared
//!
//! Shared request/response types for the MedCare APIs.
//!
//! Contains:
//! - JSON payloads (`types` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the `medcare` CLI so both speak the same JSON shapes.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
