//! GlowTrack Core Library
//!
//! Shared listing logic for the GlowTrack web dashboard and mobile app.
//!
//! # Architecture
//!
//! ```text
//!   Backend JSON ──► records (read-only copy)
//!                          │
//!        QueryController ──┤  search / facets / sort / page
//!                          ▼
//!                  ┌───────────────┐
//!                  │    Filter     │  search text AND every facet
//!                  ├───────────────┤
//!                  │     Sort      │  stable, locale-collated text keys
//!                  ├───────────────┤
//!                  │   Paginate    │  1-based pages, empty past the end
//!                  └───────┬───────┘
//!                          ▼
//!           page items + total_filtered + total_pages
//! ```
//!
//! # Core Principle
//!
//! **The listing is a pure function of (records, query state).** Nothing is
//! cached between renders; the source records are never mutated.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, Treatment, AnalysisRecord)
//! - [`listing`]: Generic filter/sort/paginate pipeline and per-screen presets

pub mod listing;
pub mod models;

// Re-export commonly used types
pub use listing::{
    analyses::analysis_listing, patients::patient_listing, Collation, IcuCollation,
    ListingError, ListingPage, ListingPipeline, PageInfo, QueryController, QueryState,
    SortDirection, SortSpec,
};
pub use models::{
    AnalysisRecord, EffectLevel, Patient, PatientsResponse, SkinType, TimingStatus, Treatment,
    ValidationError,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

use listing::analyses::{ANALYSIS_DATE_FACET, EFFECT_LEVEL_FACET, TREATMENT_TYPE_FACET};
use listing::patients::{SKIN_TYPE_FACET, TREATMENT_COUNT_FACET, TREATMENT_COUNT_RANGES};
use listing::{
    page_window, total_pages, ListingConfig, PageMarker, PAGE_SIZE_OPTIONS,
};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum GlowTrackError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Listing error: {0}")]
    ListingError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ListingError> for GlowTrackError {
    fn from(e: ListingError) -> Self {
        GlowTrackError::ListingError(e.to_string())
    }
}

impl From<ValidationError> for GlowTrackError {
    fn from(e: ValidationError) -> Self {
        GlowTrackError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for GlowTrackError {
    fn from(e: serde_json::Error) -> Self {
        GlowTrackError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for GlowTrackError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        GlowTrackError::Internal(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Listing Session (shared by both screens)
// =========================================================================

/// Records plus query state for one mounted screen. The collator is built
/// once, when the screen is created.
struct ListingSession<T> {
    pipeline: ListingPipeline<T, IcuCollation>,
    records: Vec<T>,
    controller: QueryController,
}

impl<T> ListingSession<T> {
    fn new(config: ListingConfig<T>, collation: IcuCollation, records: Vec<T>) -> Self {
        let pipeline = ListingPipeline::new(config, collation);
        let controller = pipeline.controller();
        Self { pipeline, records, controller }
    }

    fn render(&self) -> ListingPage<'_, T> {
        self.pipeline.run(&self.records, self.controller.state())
    }

    /// Page count for the navigation helpers; ordering is irrelevant here.
    fn total_pages(&self) -> u32 {
        let state = self.controller.state();
        let filtered = self.pipeline.filter(&self.records, state).len();
        total_pages(filtered, state.page_size())
    }

    fn next_page(&mut self) {
        let total = self.total_pages();
        self.controller.next_page(total);
    }

    fn last_page(&mut self) {
        let total = self.total_pages();
        self.controller.last_page(total);
    }
}

/// Both bounds absent clears the facet; one absent bound is left open.
fn open_range<V: Copy>(min: Option<V>, max: Option<V>, lowest: V, highest: V) -> Option<(V, V)> {
    match (min, max) {
        (None, None) => None,
        (min, max) => Some((min.unwrap_or(lowest), max.unwrap_or(highest))),
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, GlowTrackError> {
    value
        .parse()
        .map_err(|e| GlowTrackError::InvalidInput(format!("{}: {}", field, e)))
}

fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, GlowTrackError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| GlowTrackError::InvalidInput(format!("{}: {}", field, e)))
}

// =========================================================================
// Filter Panel Options (exported to FFI)
// =========================================================================

/// Skin type choices for the patient filter panel.
#[uniffi::export]
pub fn skin_type_options() -> Vec<FfiOption> {
    SkinType::ALL
        .iter()
        .map(|t| FfiOption {
            value: t.as_str().to_string(),
            label: t.label().to_string(),
        })
        .collect()
}

/// Effect level choices for the analysis filter panel.
#[uniffi::export]
pub fn effect_level_options() -> Vec<FfiOption> {
    EffectLevel::ALL
        .iter()
        .map(|l| FfiOption {
            value: l.as_str().to_string(),
            label: l.label().to_string(),
        })
        .collect()
}

/// Treatment type choices for the analysis filter panel.
#[uniffi::export]
pub fn treatment_type_options() -> Vec<FfiOption> {
    models::TREATMENT_TYPES
        .iter()
        .map(|t| FfiOption {
            value: t.to_string(),
            label: t.to_string(),
        })
        .collect()
}

/// Treatment-count presets for the patient filter panel.
#[uniffi::export]
pub fn treatment_count_ranges() -> Vec<FfiCountRange> {
    TREATMENT_COUNT_RANGES
        .iter()
        .map(|r| FfiCountRange {
            label: r.label.to_string(),
            min: r.min,
            max: r.max,
        })
        .collect()
}

#[uniffi::export]
pub fn page_size_options() -> Vec<u32> {
    PAGE_SIZE_OPTIONS.to_vec()
}

// =========================================================================
// Patient Listing
// =========================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum PatientPayload {
    Envelope(PatientsResponse),
    Bare(Vec<Patient>),
}

/// Patient list screen state for FFI.
#[derive(uniffi::Object)]
pub struct PatientListing {
    session: Mutex<ListingSession<Patient>>,
}

impl PatientListing {
    fn build(records: Vec<Patient>, locale: String) -> Result<Arc<Self>, GlowTrackError> {
        let collation = IcuCollation::new(&locale)?;
        debug!(records = records.len(), %locale, "patient listing created");
        Ok(Arc::new(Self {
            session: Mutex::new(ListingSession::new(patient_listing(), collation, records)),
        }))
    }
}

#[uniffi::export]
impl PatientListing {
    #[uniffi::constructor]
    pub fn new(records: Vec<FfiPatient>, locale: String) -> Result<Arc<Self>, GlowTrackError> {
        let records = records
            .into_iter()
            .map(Patient::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::build(records, locale)
    }

    /// Accepts the clinic listing response or a bare patient array.
    #[uniffi::constructor]
    pub fn from_json(json: String, locale: String) -> Result<Arc<Self>, GlowTrackError> {
        let records = match serde_json::from_str(&json)? {
            PatientPayload::Envelope(response) => response.patients,
            PatientPayload::Bare(patients) => patients,
        };
        Self::build(records, locale)
    }

    /// Swap in a fresh copy from the backend, keeping the query state.
    pub fn replace_records(&self, records: Vec<FfiPatient>) -> Result<(), GlowTrackError> {
        let records = records
            .into_iter()
            .map(Patient::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        self.session.lock()?.records = records;
        Ok(())
    }

    // =========================================================================
    // Filters
    // =========================================================================

    pub fn set_search(&self, text: String) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.set_search(text);
        Ok(())
    }

    pub fn clear_search(&self) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.clear_search();
        Ok(())
    }

    /// Select or deselect a skin type (`dry`, `oily`, ... or its Chinese label).
    pub fn toggle_skin_type(&self, skin_type: String) -> Result<(), GlowTrackError> {
        let skin_type = SkinType::parse(&skin_type)
            .ok_or_else(|| GlowTrackError::InvalidInput(format!("skin type: {}", skin_type)))?;
        self.session
            .lock()?
            .controller
            .toggle_value(SKIN_TYPE_FACET, skin_type.as_str())?;
        Ok(())
    }

    /// Inclusive treatment-count range; both `None` clears it.
    pub fn set_treatment_count_range(
        &self,
        min: Option<u32>,
        max: Option<u32>,
    ) -> Result<(), GlowTrackError> {
        let range = open_range(min, max, 0, u32::MAX).map(|(a, b)| (f64::from(a), f64::from(b)));
        self.session
            .lock()?
            .controller
            .set_number_range(TREATMENT_COUNT_FACET, range)?;
        Ok(())
    }

    pub fn clear_filters(&self) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.clear_filters();
        Ok(())
    }

    // =========================================================================
    // Sort & Pagination
    // =========================================================================

    pub fn set_sort(&self, key: String, descending: bool) -> Result<(), GlowTrackError> {
        self.session
            .lock()?
            .controller
            .set_sort(&key, SortDirection::from_descending(descending))?;
        Ok(())
    }

    pub fn toggle_sort_direction(&self) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.toggle_sort_direction();
        Ok(())
    }

    pub fn set_page(&self, page: u32) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.set_page(page);
        Ok(())
    }

    pub fn next_page(&self) -> Result<(), GlowTrackError> {
        self.session.lock()?.next_page();
        Ok(())
    }

    pub fn previous_page(&self) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.previous_page();
        Ok(())
    }

    pub fn last_page(&self) -> Result<(), GlowTrackError> {
        self.session.lock()?.last_page();
        Ok(())
    }

    pub fn set_page_size(&self, page_size: u32) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.set_page_size(page_size)?;
        Ok(())
    }

    /// Back to the state the screen mounted with.
    pub fn reset(&self) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.reset();
        Ok(())
    }

    // =========================================================================
    // Output
    // =========================================================================

    pub fn render(&self) -> Result<FfiPatientPage, GlowTrackError> {
        let session = self.session.lock()?;
        let page = session.render();
        Ok(FfiPatientPage {
            items: page.items.iter().map(|p| FfiPatient::from(*p)).collect(),
            total_filtered: page.total_filtered as u64,
            total_pages: page.total_pages,
            window: page_window(page.info.page, page.total_pages)
                .into_iter()
                .map(Into::into)
                .collect(),
            info: page.info.into(),
            query: session.controller.state().into(),
        })
    }

    /// Current query state as JSON, for logging and debugging. The state is
    /// not meant to outlive the screen.
    pub fn query_state_json(&self) -> Result<String, GlowTrackError> {
        let session = self.session.lock()?;
        Ok(serde_json::to_string(session.controller.state())?)
    }
}

// =========================================================================
// Analysis Listing
// =========================================================================

/// Analysis history screen state for FFI.
#[derive(uniffi::Object)]
pub struct AnalysisListing {
    session: Mutex<ListingSession<AnalysisRecord>>,
}

impl AnalysisListing {
    fn build(records: Vec<AnalysisRecord>, locale: String) -> Result<Arc<Self>, GlowTrackError> {
        let collation = IcuCollation::new(&locale)?;
        debug!(records = records.len(), %locale, "analysis listing created");
        Ok(Arc::new(Self {
            session: Mutex::new(ListingSession::new(analysis_listing(), collation, records)),
        }))
    }
}

#[uniffi::export]
impl AnalysisListing {
    #[uniffi::constructor]
    pub fn new(records: Vec<FfiAnalysisRecord>, locale: String) -> Result<Arc<Self>, GlowTrackError> {
        let records = records
            .into_iter()
            .map(AnalysisRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::build(records, locale)
    }

    #[uniffi::constructor]
    pub fn from_json(json: String, locale: String) -> Result<Arc<Self>, GlowTrackError> {
        let records: Vec<AnalysisRecord> = serde_json::from_str(&json)?;
        Self::build(records, locale)
    }

    pub fn replace_records(&self, records: Vec<FfiAnalysisRecord>) -> Result<(), GlowTrackError> {
        let records = records
            .into_iter()
            .map(AnalysisRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        self.session.lock()?.records = records;
        Ok(())
    }

    // =========================================================================
    // Filters
    // =========================================================================

    pub fn set_search(&self, text: String) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.set_search(text);
        Ok(())
    }

    pub fn clear_search(&self) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.clear_search();
        Ok(())
    }

    pub fn toggle_effect_level(&self, level: String) -> Result<(), GlowTrackError> {
        let level = EffectLevel::parse(&level)
            .ok_or_else(|| GlowTrackError::InvalidInput(format!("effect level: {}", level)))?;
        self.session
            .lock()?
            .controller
            .toggle_value(EFFECT_LEVEL_FACET, level.as_str())?;
        Ok(())
    }

    pub fn toggle_treatment_type(&self, treatment_type: String) -> Result<(), GlowTrackError> {
        self.session
            .lock()?
            .controller
            .toggle_value(TREATMENT_TYPE_FACET, &treatment_type)?;
        Ok(())
    }

    /// Inclusive `YYYY-MM-DD` bounds; both `None` clears the range. A start
    /// without an end selects that single day, and an end without a start
    /// is open towards the past.
    pub fn set_date_range(
        &self,
        start: Option<String>,
        end: Option<String>,
    ) -> Result<(), GlowTrackError> {
        let start = start.map(|s| parse_date("start", &s)).transpose()?;
        let end = end.map(|s| parse_date("end", &s)).transpose()?;
        let range = match (start, end) {
            (Some(day), None) => Some((day, day)),
            (start, end) => open_range(start, end, NaiveDate::MIN, NaiveDate::MAX),
        };
        self.session
            .lock()?
            .controller
            .set_date_range(ANALYSIS_DATE_FACET, range)?;
        Ok(())
    }

    pub fn clear_filters(&self) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.clear_filters();
        Ok(())
    }

    // =========================================================================
    // Sort & Pagination
    // =========================================================================

    pub fn set_sort(&self, key: String, descending: bool) -> Result<(), GlowTrackError> {
        self.session
            .lock()?
            .controller
            .set_sort(&key, SortDirection::from_descending(descending))?;
        Ok(())
    }

    pub fn toggle_sort_direction(&self) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.toggle_sort_direction();
        Ok(())
    }

    pub fn set_page(&self, page: u32) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.set_page(page);
        Ok(())
    }

    pub fn next_page(&self) -> Result<(), GlowTrackError> {
        self.session.lock()?.next_page();
        Ok(())
    }

    pub fn previous_page(&self) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.previous_page();
        Ok(())
    }

    pub fn last_page(&self) -> Result<(), GlowTrackError> {
        self.session.lock()?.last_page();
        Ok(())
    }

    pub fn set_page_size(&self, page_size: u32) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.set_page_size(page_size)?;
        Ok(())
    }

    pub fn reset(&self) -> Result<(), GlowTrackError> {
        self.session.lock()?.controller.reset();
        Ok(())
    }

    // =========================================================================
    // Output
    // =========================================================================

    pub fn render(&self) -> Result<FfiAnalysisPage, GlowTrackError> {
        let session = self.session.lock()?;
        let page = session.render();
        Ok(FfiAnalysisPage {
            items: page.items.iter().map(|a| FfiAnalysisRecord::from(*a)).collect(),
            total_filtered: page.total_filtered as u64,
            total_pages: page.total_pages,
            window: page_window(page.info.page, page.total_pages)
                .into_iter()
                .map(Into::into)
                .collect(),
            info: page.info.into(),
            query: session.controller.state().into(),
        })
    }

    pub fn query_state_json(&self) -> Result<String, GlowTrackError> {
        let session = self.session.lock()?;
        Ok(serde_json::to_string(session.controller.state())?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// One choice in a filter panel.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiOption {
    pub value: String,
    pub label: String,
}

/// FFI-safe treatment-count preset.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiCountRange {
    pub label: String,
    pub min: u32,
    pub max: u32,
}

/// FFI-safe patient. Dates are ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub clinic_id: String,
    pub patient_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skin_type: Option<String>,
    pub total_treatments: u32,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<&Patient> for FfiPatient {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            clinic_id: patient.clinic_id.clone(),
            patient_id: patient.patient_id.clone(),
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            date_of_birth: patient.date_of_birth.map(|d| d.to_string()),
            email: patient.email.clone(),
            phone: patient.phone.clone(),
            skin_type: patient.skin_type.map(|t| t.as_str().to_string()),
            total_treatments: patient.total_treatments,
            created_at: patient.created_at.map(|t| t.to_rfc3339()),
            updated_at: patient.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

impl TryFrom<FfiPatient> for Patient {
    type Error = GlowTrackError;

    fn try_from(p: FfiPatient) -> Result<Self, Self::Error> {
        // Blank or unknown values from the backend mean "not recorded".
        let skin_type = p.skin_type.as_deref().and_then(SkinType::parse);

        Ok(Patient {
            id: p.id,
            clinic_id: p.clinic_id,
            patient_id: p.patient_id,
            first_name: p.first_name,
            last_name: p.last_name,
            date_of_birth: p
                .date_of_birth
                .map(|d| parse_date("date_of_birth", &d))
                .transpose()?,
            email: p.email,
            phone: p.phone,
            skin_type,
            total_treatments: p.total_treatments,
            created_at: p
                .created_at
                .map(|t| parse_timestamp("created_at", &t))
                .transpose()?,
            updated_at: p
                .updated_at
                .map(|t| parse_timestamp("updated_at", &t))
                .transpose()?,
        })
    }
}

/// FFI-safe analysis record. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiAnalysisRecord {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub treatment_type: String,
    pub treatment_area: String,
    pub analysis_date: String,
    pub treatment_date: String,
    pub days_after: u32,
    pub overall_improvement: f64,
    pub effect_level: String,
    pub wrinkles_score: f64,
    pub skin_quality_score: f64,
    pub contour_score: f64,
    pub before_image_url: Option<String>,
    pub after_image_url: Option<String>,
}

impl From<&AnalysisRecord> for FfiAnalysisRecord {
    fn from(a: &AnalysisRecord) -> Self {
        Self {
            id: a.id.clone(),
            patient_id: a.patient_id.clone(),
            patient_name: a.patient_name.clone(),
            treatment_type: a.treatment_type.clone(),
            treatment_area: a.treatment_area.clone(),
            analysis_date: a.analysis_date.to_string(),
            treatment_date: a.treatment_date.to_string(),
            days_after: a.days_after,
            overall_improvement: a.overall_improvement,
            effect_level: a.effect_level.as_str().to_string(),
            wrinkles_score: a.wrinkles_score,
            skin_quality_score: a.skin_quality_score,
            contour_score: a.contour_score,
            before_image_url: a.before_image_url.clone(),
            after_image_url: a.after_image_url.clone(),
        }
    }
}

impl TryFrom<FfiAnalysisRecord> for AnalysisRecord {
    type Error = GlowTrackError;

    fn try_from(a: FfiAnalysisRecord) -> Result<Self, Self::Error> {
        let effect_level = EffectLevel::parse(&a.effect_level).ok_or_else(|| {
            GlowTrackError::InvalidInput(format!("effect level: {}", a.effect_level))
        })?;

        Ok(AnalysisRecord {
            analysis_date: parse_date("analysis_date", &a.analysis_date)?,
            treatment_date: parse_date("treatment_date", &a.treatment_date)?,
            id: a.id,
            patient_id: a.patient_id,
            patient_name: a.patient_name,
            treatment_type: a.treatment_type,
            treatment_area: a.treatment_area,
            days_after: a.days_after,
            overall_improvement: a.overall_improvement,
            effect_level,
            wrinkles_score: a.wrinkles_score,
            skin_quality_score: a.skin_quality_score,
            contour_score: a.contour_score,
            before_image_url: a.before_image_url,
            after_image_url: a.after_image_url,
        })
    }
}

/// FFI-safe pagination info.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
    /// 1-based index of the first item shown
    pub range_start: Option<u64>,
    pub range_end: Option<u64>,
    pub shows_controls: bool,
}

impl From<PageInfo> for FfiPageInfo {
    fn from(info: PageInfo) -> Self {
        Self {
            page: info.page,
            page_size: info.page_size,
            total_items: info.total_items as u64,
            total_pages: info.total_pages,
            has_previous: info.has_previous,
            has_next: info.has_next,
            range_start: info.displayed_range.map(|(start, _)| start as u64),
            range_end: info.displayed_range.map(|(_, end)| end as u64),
            shows_controls: info.shows_controls(),
        }
    }
}

/// FFI-safe page-number button.
#[derive(Debug, Clone, Copy, PartialEq, uniffi::Enum)]
pub enum FfiPageMarker {
    Page { number: u32 },
    Ellipsis,
}

impl From<PageMarker> for FfiPageMarker {
    fn from(marker: PageMarker) -> Self {
        match marker {
            PageMarker::Page(number) => FfiPageMarker::Page { number },
            PageMarker::Ellipsis => FfiPageMarker::Ellipsis,
        }
    }
}

/// FFI-safe summary of the query state.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiQueryState {
    pub search: String,
    pub sort_key: String,
    pub sort_descending: bool,
    pub page: u32,
    pub page_size: u32,
    pub active_filter_count: u32,
}

impl From<&QueryState> for FfiQueryState {
    fn from(state: &QueryState) -> Self {
        Self {
            search: state.search().to_string(),
            sort_key: state.sort().key.clone(),
            sort_descending: state.sort().direction.is_descending(),
            page: state.page(),
            page_size: state.page_size(),
            active_filter_count: state.active_filter_count() as u32,
        }
    }
}

/// One rendered page of the patient list.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPatientPage {
    pub items: Vec<FfiPatient>,
    pub total_filtered: u64,
    pub total_pages: u32,
    pub info: FfiPageInfo,
    pub window: Vec<FfiPageMarker>,
    pub query: FfiQueryState,
}

/// One rendered page of the analysis history.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiAnalysisPage {
    pub items: Vec<FfiAnalysisRecord>,
    pub total_filtered: u64,
    pub total_pages: u32,
    pub info: FfiPageInfo,
    pub window: Vec<FfiPageMarker>,
    pub query: FfiQueryState,
}
