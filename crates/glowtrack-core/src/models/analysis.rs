//! Before/after analysis records.
//!
//! Scores and the effect level are produced by the analysis service; the
//! client only lists and displays them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome classification attached to an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectLevel {
    Excellent,
    Good,
    Fair,
    Poor,
    Negative,
}

impl EffectLevel {
    pub const ALL: [EffectLevel; 5] = [
        EffectLevel::Excellent,
        EffectLevel::Good,
        EffectLevel::Fair,
        EffectLevel::Poor,
        EffectLevel::Negative,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            EffectLevel::Excellent => "excellent",
            EffectLevel::Good => "good",
            EffectLevel::Fair => "fair",
            EffectLevel::Poor => "poor",
            EffectLevel::Negative => "negative",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            EffectLevel::Excellent => "优秀",
            EffectLevel::Good => "良好",
            EffectLevel::Fair => "一般",
            EffectLevel::Poor => "较差",
            EffectLevel::Negative => "负面",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(trimmed) || l.label() == trimmed)
    }

    /// Classify an overall improvement percentage with the service's thresholds.
    pub fn from_improvement(pct: f64) -> Self {
        if pct >= 50.0 {
            EffectLevel::Excellent
        } else if pct >= 30.0 {
            EffectLevel::Good
        } else if pct >= 10.0 {
            EffectLevel::Fair
        } else if pct >= 0.0 {
            EffectLevel::Poor
        } else {
            EffectLevel::Negative
        }
    }
}

impl std::fmt::Display for EffectLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How reliable an assessment is given the time since treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingStatus {
    /// Effects have not fully developed yet.
    TooEarly,
    Optimal,
    Acceptable,
    /// Effects may already be fading.
    TooLate,
}

/// Days before which an assessment is considered premature.
const TOO_EARLY_DAYS: i64 = 14;
const OPTIMAL_MIN_DAYS: i64 = 21;
const OPTIMAL_MAX_DAYS: i64 = 90;
/// Days after which effects may have regressed.
const TOO_LATE_DAYS: i64 = 180;

impl TimingStatus {
    pub fn from_days_after(days: i64) -> Self {
        if days < TOO_EARLY_DAYS {
            TimingStatus::TooEarly
        } else if days > TOO_LATE_DAYS {
            TimingStatus::TooLate
        } else if (OPTIMAL_MIN_DAYS..=OPTIMAL_MAX_DAYS).contains(&days) {
            TimingStatus::Optimal
        } else {
            TimingStatus::Acceptable
        }
    }
}

/// One before/after analysis in a clinic's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRecord {
    pub id: String,
    /// Lookup-only reference to the patient
    pub patient_id: String,
    pub patient_name: String,
    pub treatment_type: String,
    pub treatment_area: String,
    pub analysis_date: NaiveDate,
    pub treatment_date: NaiveDate,
    pub days_after: u32,
    /// Percentage; not clamped
    pub overall_improvement: f64,
    pub effect_level: EffectLevel,
    pub wrinkles_score: f64,
    pub skin_quality_score: f64,
    pub contour_score: f64,
    #[serde(default)]
    pub before_image_url: Option<String>,
    #[serde(default)]
    pub after_image_url: Option<String>,
}

impl AnalysisRecord {
    /// Days between treatment and analysis, recomputed from the dates.
    pub fn elapsed_days(&self) -> i64 {
        (self.analysis_date - self.treatment_date).num_days()
    }

    pub fn timing_status(&self) -> TimingStatus {
        TimingStatus::from_days_after(i64::from(self.days_after))
    }

    pub fn has_images(&self) -> bool {
        self.before_image_url.is_some() && self.after_image_url.is_some()
    }
}
