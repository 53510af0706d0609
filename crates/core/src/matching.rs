//! Symptom matching and suitability scoring.
//!
//! A symptom check resolves free-text input to a single disease record and then scores the
//! record's demographic constraints against the requester's stated age and sex.
//!
//! ## Known sharp edges
//!
//! - Matching is "first match wins": the disease-name search runs first, then the symptom
//!   search, and within each the earliest inserted record is returned. There is no ranking.
//! - An absent age or sex passes every suitability check. "Unknown" is therefore reported the
//!   same way as "compatible"; callers must not read `suitable == true` as a confirmation that
//!   the requester was actually checked.

use std::sync::Arc;

use medcare_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{DURATION_ADVISORY, DURATION_ADVISORY_THRESHOLD_DAYS};
use crate::models::{DiseaseRecord, GenderConstraint, MedicineRef};
use crate::store::RecordStore;
use crate::{MedcareError, MedcareResult};

/// Per-constraint outcome of a suitability evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuitabilityReasons {
    pub min_age_ok: bool,
    pub max_age_ok: bool,
    pub gender_ok: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suitability {
    pub suitable: bool,
    pub reasons: SuitabilityReasons,
}

/// Input of a full symptom check.
///
/// Age and duration are plain numbers as typed by the user, so fractional values are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymptomCheck {
    pub input: Option<String>,
    pub age: Option<f64>,
    pub sex: Option<String>,
    pub duration_days: Option<f64>,
}

/// Result of a full symptom check: the matched record plus its annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub record: DiseaseRecord,
    pub extra_note: String,
    pub suitability: Suitability,
}

/// Resolves symptom/disease input against the record store.
#[derive(Clone)]
pub struct MatchingService {
    store: Arc<dyn RecordStore>,
}

impl MatchingService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// All disease records in store order.
    pub fn list_records(&self) -> MedcareResult<Vec<DiseaseRecord>> {
        self.store.list_diseases()
    }

    /// Finds the first disease record matching `input`.
    ///
    /// The disease-name search runs first; the symptom search only runs when no name matches.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `input` is blank after trimming.
    /// - `NotFound` if neither search yields a record.
    pub fn find_match(&self, input: &str) -> MedcareResult<DiseaseRecord> {
        let needle = NonEmptyText::new(input).map_err(|_| {
            MedcareError::InvalidInput("Please provide a symptom or disease input.".into())
        })?;

        if let Some(record) = self.store.find_disease_by_name(&needle)? {
            tracing::debug!("'{}' matched disease name '{}'", needle, record.disease_name);
            return Ok(record);
        }

        if let Some(record) = self.store.find_disease_by_symptom(&needle)? {
            tracing::debug!("'{}' matched a symptom of '{}'", needle, record.disease_name);
            return Ok(record);
        }

        Err(MedcareError::NotFound(
            "No matching disease or symptom found.".into(),
        ))
    }

    /// Runs a full check: match, suitability and duration advisory.
    pub fn check(&self, request: &SymptomCheck) -> MedcareResult<CheckOutcome> {
        let record = self.find_match(request.input.as_deref().unwrap_or_default())?;
        let suitability = evaluate_suitability(&record, request.age, request.sex.as_deref());
        let extra_note = request
            .duration_days
            .map(annotate_duration)
            .unwrap_or_default();

        Ok(CheckOutcome {
            record,
            extra_note,
            suitability,
        })
    }

    /// Finds a medicine by exact (case-insensitive) name across all disease records.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `name` is blank.
    /// - `NotFound` if no record lists a medicine with that name.
    pub fn find_medicine(&self, name: &str) -> MedcareResult<MedicineRef> {
        let name = NonEmptyText::new(name)
            .map_err(|_| MedcareError::InvalidInput("Medicine name is required.".into()))?;

        self.store
            .list_diseases()?
            .into_iter()
            .flat_map(|record| record.medicines)
            .find(|medicine| name.eq_ignore_case(&medicine.name))
            .ok_or_else(|| MedcareError::NotFound("Medicine not found.".into()))
    }
}

/// Scores a record's demographic constraints against the requester.
///
/// Each check passes when either side of the comparison is unknown. `sex` is compared
/// case-insensitively and `"any"` behaves like an absent value.
pub fn evaluate_suitability(
    record: &DiseaseRecord,
    age: Option<f64>,
    sex: Option<&str>,
) -> Suitability {
    let min_age_ok = match (record.min_age, age) {
        (Some(min), Some(age)) => age >= f64::from(min),
        _ => true,
    };
    let max_age_ok = match (record.max_age, age) {
        (Some(max), Some(age)) => age <= f64::from(max),
        _ => true,
    };

    let sex = sex
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && s != GenderConstraint::Any.as_str());
    let gender_ok = match (record.gender, sex) {
        (None | Some(GenderConstraint::Any), _) | (_, None) => true,
        (Some(constraint), Some(sex)) => constraint.as_str() == sex,
    };

    Suitability {
        suitable: min_age_ok && max_age_ok && gender_ok,
        reasons: SuitabilityReasons {
            min_age_ok,
            max_age_ok,
            gender_ok,
        },
    }
}

/// Returns the consultation advisory when symptoms have lasted longer than the threshold.
pub fn annotate_duration(duration_days: f64) -> String {
    if duration_days > f64::from(DURATION_ADVISORY_THRESHOLD_DAYS) {
        DURATION_ADVISORY.to_string()
    } else {
        String::new()
    }
}
