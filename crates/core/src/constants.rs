//! Constants used throughout the MedCare core crate.
//!
//! File names, policy thresholds and fixed strings live here so the store, the matching
//! service and the API layer agree on them.

/// Filename for the disease/medicine collection in a file-backed store.
pub const DISEASES_FILENAME: &str = "diseases.json";

/// Filename for the preventive tip collection in a file-backed store.
pub const TIPS_FILENAME: &str = "preventive_tips.json";

/// Symptoms lasting longer than this many days trigger the duration advisory.
pub const DURATION_ADVISORY_THRESHOLD_DAYS: u32 = 3;

/// Advisory attached to a symptom check when the duration threshold is exceeded.
pub const DURATION_ADVISORY: &str =
    "⚠️ Symptoms persisting more than 3 days. Please consult a doctor.";

/// Image used for external search results that carry no picture of their own.
pub const FALLBACK_IMAGE_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/6/65/No-Image-Placeholder.svg";

/// Default REST listen address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:5000";

/// Default per-call timeout for external summary providers.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;
