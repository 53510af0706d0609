//! JSON request and response bodies.
//!
//! Field names are camelCase to match what the frontend sends and reads.

use medcare_core::{
    CheckOutcome, DiseaseRecord, PreventiveTip, SuitabilityReasons, SymptomCheck,
};
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// Symptom check request.
///
/// `age` and `duration` accept JSON numbers (fractional values included) or numeric strings.
/// Blank strings and `null` count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CheckReq {
    pub input: Option<String>,
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<f64>,
    pub sex: Option<String>,
    /// Days the symptoms have lasted.
    #[serde(default, deserialize_with = "lenient_duration")]
    pub duration: Option<f64>,
}

impl From<CheckReq> for SymptomCheck {
    fn from(req: CheckReq) -> Self {
        SymptomCheck {
            input: req.input,
            age: req.age,
            sex: req.sex,
            duration_days: req.duration,
        }
    }
}

/// Matched record fields merged with the check annotations.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckRes {
    #[serde(flatten)]
    pub record: DiseaseRecord,
    pub extra_note: String,
    pub suitability: bool,
    pub suitability_reasons: SuitabilityReasons,
}

impl From<CheckOutcome> for CheckRes {
    fn from(outcome: CheckOutcome) -> Self {
        CheckRes {
            record: outcome.record,
            extra_note: outcome.extra_note,
            suitability: outcome.suitability.suitable,
            suitability_reasons: outcome.suitability.reasons,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateMedicineRes {
    pub message: String,
    pub medicine: DiseaseRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateTipRes {
    pub message: String,
    pub tip: PreventiveTip,
}

/// Accepts a number, a numeric string, a blank string or `null` for the named field.
struct LenientNumber(&'static str);

impl LenientNumber {
    fn finite<E: de::Error>(&self, value: f64) -> Result<Option<f64>, E> {
        if value.is_finite() {
            Ok(Some(value))
        } else {
            Err(E::custom(format!("{} must be a number", self.0)))
        }
    }
}

impl<'de> Visitor<'de> for LenientNumber {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a number for `{}`", self.0)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        self.finite(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let v = v.trim();
        if v.is_empty() {
            return Ok(None);
        }
        match v.parse::<f64>() {
            Ok(n) => self.finite(n),
            Err(_) => Err(E::custom(format!("{} must be a number", self.0))),
        }
    }
}

fn lenient_age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    deserializer.deserialize_option(LenientNumber("age"))
}

fn lenient_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    deserializer.deserialize_option(LenientNumber("duration"))
}
