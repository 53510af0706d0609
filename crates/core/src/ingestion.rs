//! Record ingestion.
//!
//! Validates new-record payloads, assigns identifiers and timestamps, and persists them through
//! the record store. There is no update or delete path and no duplicate detection.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use medcare_types::NonEmptyText;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{parse_gender, DiseaseRecord, NewDiseaseRecord, NewTip, PreventiveTip};
use crate::store::RecordStore;
use crate::{MedcareError, MedcareResult};

/// Creates new disease records and tips.
#[derive(Clone)]
pub struct IngestionService {
    store: Arc<dyn RecordStore>,
}

impl IngestionService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Validates and stores a new disease record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if:
    /// - `diseaseName` is missing or blank,
    /// - `minAge` is greater than `maxAge`,
    /// - `gender` is not one of `male`, `female`, `any`,
    /// - a medicine entry has a blank name.
    ///
    /// Storage failures are propagated unchanged.
    pub fn add_disease_record(&self, data: NewDiseaseRecord) -> MedcareResult<DiseaseRecord> {
        let record = validate_disease(data)?;
        self.store.insert_disease(record.clone())?;
        tracing::info!("added disease record {} ({})", record.id, record.disease_name);
        Ok(record)
    }

    /// Validates and stores a new preventive tip.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any of `title`, `category`, `description`, `image` is missing
    /// or blank.
    pub fn add_tip(&self, data: NewTip) -> MedcareResult<PreventiveTip> {
        let tip = validate_tip(data)?;
        self.store.insert_tip(tip.clone())?;
        tracing::info!("added preventive tip {} ({})", tip.id, tip.title);
        Ok(tip)
    }

    /// Loads a seed bundle into the store, but only into collections that are currently empty.
    ///
    /// Returns the number of diseases and tips inserted.
    pub fn seed(&self, bundle: SeedBundle) -> MedcareResult<(usize, usize)> {
        let mut diseases = 0;
        if self.store.list_diseases()?.is_empty() {
            for data in bundle.diseases {
                self.add_disease_record(data)?;
                diseases += 1;
            }
        } else if !bundle.diseases.is_empty() {
            tracing::info!("disease collection not empty, skipping seed diseases");
        }

        let mut tips = 0;
        if self.store.tip_count()? == 0 {
            for data in bundle.tips {
                self.add_tip(data)?;
                tips += 1;
            }
        } else if !bundle.tips.is_empty() {
            tracing::info!("tip collection not empty, skipping seed tips");
        }

        Ok((diseases, tips))
    }
}

/// YAML bundle of records used to populate a fresh store.
///
/// ```yaml
/// diseases:
///   - diseaseName: Fever
///     symptoms: [high temperature]
///     minAge: 5
/// tips:
///   - title: Wash hands
///     category: Hygiene
///     description: Use soap for twenty seconds.
///     image: https://example.org/hands.png
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct SeedBundle {
    #[serde(default)]
    pub diseases: Vec<NewDiseaseRecord>,
    #[serde(default)]
    pub tips: Vec<NewTip>,
}

impl SeedBundle {
    pub fn from_yaml_str(yaml: &str) -> MedcareResult<Self> {
        serde_yaml::from_str(yaml).map_err(MedcareError::YamlDeserialization)
    }

    pub fn from_yaml_file(path: &Path) -> MedcareResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(MedcareError::StorageRead)?;
        Self::from_yaml_str(&contents)
    }
}

fn required(field: &str, value: Option<String>) -> MedcareResult<String> {
    NonEmptyText::from_option(value)
        .map(NonEmptyText::into_inner)
        .map_err(|_| MedcareError::InvalidInput(format!("{field} is required")))
}

fn validate_disease(data: NewDiseaseRecord) -> MedcareResult<DiseaseRecord> {
    let disease_name = required("diseaseName", data.disease_name)?;

    if let (Some(min), Some(max)) = (data.min_age, data.max_age) {
        if min > max {
            return Err(MedcareError::InvalidInput(format!(
                "minAge ({min}) cannot be greater than maxAge ({max})"
            )));
        }
    }

    if data.medicines.iter().any(|m| m.name.trim().is_empty()) {
        return Err(MedcareError::InvalidInput(
            "medicine name cannot be empty".into(),
        ));
    }

    Ok(DiseaseRecord {
        id: Uuid::new_v4(),
        disease_name,
        symptoms: data.symptoms,
        medicines: data.medicines,
        home_remedies: data.home_remedies,
        precautions: data.precautions.unwrap_or_default(),
        min_age: data.min_age,
        max_age: data.max_age,
        gender: parse_gender(data.gender)?,
        created_at: Utc::now(),
    })
}

fn validate_tip(data: NewTip) -> MedcareResult<PreventiveTip> {
    let fields = [&data.title, &data.category, &data.description, &data.image];
    if fields
        .iter()
        .any(|v| v.as_deref().map_or(true, |s| s.trim().is_empty()))
    {
        return Err(MedcareError::InvalidInput("All fields are required.".into()));
    }

    Ok(PreventiveTip {
        id: Uuid::new_v4(),
        title: required("title", data.title)?,
        category: required("category", data.category)?,
        description: required("description", data.description)?,
        image: required("image", data.image)?,
        created_at: Utc::now(),
    })
}
