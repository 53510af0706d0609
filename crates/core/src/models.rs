//! Stored record types.
//!
//! Two independent collections exist: disease/medicine records and preventive tips. Records
//! are created once through ingestion and never modified afterwards. JSON field names are
//! camelCase because the single-page frontend reads them directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{MedcareError, MedcareResult};

/// Demographic sex a disease record applies to.
///
/// An absent constraint on a record behaves exactly like [`GenderConstraint::Any`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GenderConstraint {
    Male,
    Female,
    Any,
}

impl GenderConstraint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for GenderConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenderConstraint {
    type Err = MedcareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "any" => Ok(Self::Any),
            other => Err(MedcareError::InvalidInput(format!(
                "gender must be one of male, female, any (got '{other}')"
            ))),
        }
    }
}

/// A medicine suggested for a disease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicineRef {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub short_info: String,
}

/// Stored disease record: symptoms, medicines, remedies and applicability constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub disease_name: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub medicines: Vec<MedicineRef>,
    #[serde(default)]
    pub home_remedies: Vec<String>,
    #[serde(default)]
    pub precautions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<GenderConstraint>,
    pub created_at: DateTime<Utc>,
}

/// A preventive-care tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreventiveTip {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated payload for a new disease record.
///
/// Every field is optional at this layer so that missing fields surface as
/// `InvalidInput` from ingestion instead of as a deserialisation failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDiseaseRecord {
    pub disease_name: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub medicines: Vec<MedicineRef>,
    #[serde(default)]
    pub home_remedies: Vec<String>,
    pub precautions: Option<String>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub gender: Option<String>,
}

/// Unvalidated payload for a new preventive tip. All four fields are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTip {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Summary entry contributed by an external informational source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,
}

/// One entry of a tip search: either a stored tip or an external summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum TipSearchHit {
    Stored(PreventiveTip),
    External(Summary),
}

impl TipSearchHit {
    pub fn title(&self) -> &str {
        match self {
            Self::Stored(tip) => &tip.title,
            Self::External(summary) => &summary.title,
        }
    }
}

pub(crate) fn parse_gender(value: Option<String>) -> MedcareResult<Option<GenderConstraint>> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<GenderConstraint>())
        .transpose()
}
