//! Patient models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::{email_or_blank, not_blank};

/// Skin classification recorded at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinType {
    #[serde(alias = "干性")]
    Dry,
    #[serde(alias = "油性")]
    Oily,
    #[serde(alias = "混合性")]
    Combination,
    #[serde(alias = "敏感性")]
    Sensitive,
    #[serde(alias = "中性")]
    Neutral,
}

impl SkinType {
    pub const ALL: [SkinType; 5] = [
        SkinType::Dry,
        SkinType::Oily,
        SkinType::Combination,
        SkinType::Sensitive,
        SkinType::Neutral,
    ];

    /// Wire value, also used as the facet value.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SkinType::Dry => "dry",
            SkinType::Oily => "oily",
            SkinType::Combination => "combination",
            SkinType::Sensitive => "sensitive",
            SkinType::Neutral => "neutral",
        }
    }

    /// Display label in the dashboard locale.
    pub const fn label(&self) -> &'static str {
        match self {
            SkinType::Dry => "干性",
            SkinType::Oily => "油性",
            SkinType::Combination => "混合性",
            SkinType::Sensitive => "敏感性",
            SkinType::Neutral => "中性",
        }
    }

    /// Parse either the wire value or the display label.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        Self::ALL.into_iter().find(|t| {
            t.as_str().eq_ignore_ascii_case(trimmed) || t.label() == trimmed
        })
    }
}

impl std::fmt::Display for SkinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A patient as returned by the records service.
///
/// `total_treatments` is maintained by the backend and only ever displayed here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: String,
    pub clinic_id: String,
    /// Clinic-internal identifier
    #[serde(default)]
    pub patient_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_skin_type")]
    pub skin_type: Option<SkinType>,
    #[serde(default)]
    pub total_treatments: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Patient {
    /// Create a patient with the required fields only.
    pub fn new(
        id: impl Into<String>,
        clinic_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            clinic_id: clinic_id.into(),
            patient_id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth: None,
            email: None,
            phone: None,
            skin_type: None,
            total_treatments: 0,
            created_at: None,
            updated_at: None,
        }
    }

    /// Name as shown on patient cards and used by the name sort.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The intake form stores an empty string when no skin type was chosen, and
/// older records may carry values outside the current set. Both read as none.
fn lenient_skin_type<'de, D>(deserializer: D) -> Result<Option<SkinType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(SkinType::parse))
}

/// Payload for creating a patient, and for full replacement on update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct PatientDraft {
    #[validate(custom(function = "not_blank"))]
    pub clinic_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "email_or_blank"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<SkinType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
}

/// Partial update; absent fields are left untouched by the backend. Names
/// may be omitted, but not blanked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct PatientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "email_or_blank"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<SkinType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
}

impl PatientPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Response of the clinic patient listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientsResponse {
    pub clinic_id: String,
    pub patients: Vec<Patient>,
    pub total: u32,
}
