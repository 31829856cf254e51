//! Treatment records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;

/// Treatment types offered by the clinics, as used by the analysis facet.
pub const TREATMENT_TYPES: [&str; 6] = [
    "肉毒素注射",
    "玻尿酸填充",
    "激光美肤",
    "线雕提升",
    "水光针",
    "超声刀",
];

/// A treatment session recorded against a patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Treatment {
    #[serde(alias = "id")]
    pub treatment_id: String,
    pub patient_id: String,
    pub provider_id: String,
    pub treatment_date: NaiveDate,
    pub treatment_type: String,
    pub treatment_area: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_amount: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub photos_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating or replacing a treatment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct TreatmentDraft {
    #[validate(custom(function = "not_blank"))]
    pub patient_id: String,
    #[validate(custom(function = "not_blank"))]
    pub provider_id: String,
    pub treatment_date: NaiveDate,
    #[validate(custom(function = "not_blank"))]
    pub treatment_type: String,
    #[validate(custom(function = "not_blank"))]
    pub treatment_area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Cost must be non-negative"))]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Response of the per-patient treatment listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentsResponse {
    pub patient_id: String,
    pub treatments: Vec<Treatment>,
}
