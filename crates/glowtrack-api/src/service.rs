//! Cached record access for the list and detail screens.
//!
//! Reads go through the [`RecordCache`]; successful mutations invalidate the
//! lists they affect and refresh or evict the touched detail entry. A failed
//! request never changes the cache.

use std::time::Instant;

use tokio::sync::Mutex;
use tracing::debug;

use glowtrack_core::models::{
    Patient, PatientDraft, PatientPatch, PatientsResponse, Treatment, TreatmentDraft,
    TreatmentsResponse,
};

use crate::cache::{Cached, QueryKey, RecordCache};
use crate::client::{AnalysisResultEnvelope, ApiClient, ListParams};
use crate::config::ApiConfig;
use crate::error::ApiResult;

pub struct RecordsService {
    client: ApiClient,
    cache: Mutex<RecordCache>,
}

impl RecordsService {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let cache = RecordCache::new(config.cache_ttl);
        Ok(Self {
            client: ApiClient::new(config)?,
            cache: Mutex::new(cache),
        })
    }

    pub fn from_env() -> ApiResult<Self> {
        Self::new(ApiConfig::from_env())
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Patients of the configured clinic.
    pub async fn my_clinic_patients(&self, params: ListParams) -> ApiResult<PatientsResponse> {
        let clinic_id = self.client.config().clinic_id.clone();
        self.clinic_patients(&clinic_id, params).await
    }

    pub async fn clinic_patients(
        &self,
        clinic_id: &str,
        params: ListParams,
    ) -> ApiResult<PatientsResponse> {
        let key = QueryKey::PatientList {
            clinic_id: clinic_id.to_string(),
            params,
        };
        if let Some(Cached::PatientList(list)) = self.cached(&key).await {
            return Ok(list);
        }
        let list = self.client.clinic_patients(clinic_id, params).await?;
        self.store(key, Cached::PatientList(list.clone())).await;
        Ok(list)
    }

    pub async fn patient(&self, patient_id: &str) -> ApiResult<Patient> {
        let key = QueryKey::Patient(patient_id.to_string());
        if let Some(Cached::Patient(patient)) = self.cached(&key).await {
            return Ok(patient);
        }
        let patient = self.client.patient(patient_id).await?;
        self.store(key, Cached::Patient(patient.clone())).await;
        Ok(patient)
    }

    pub async fn create_patient(&self, draft: &PatientDraft) -> ApiResult<Patient> {
        let patient = self.client.create_patient(draft).await?;

        let mut cache = self.cache.lock().await;
        cache.invalidate_where(QueryKey::is_patient_list);
        cache.insert(
            QueryKey::Patient(patient.id.clone()),
            Cached::Patient(patient.clone()),
            Instant::now(),
        );
        Ok(patient)
    }

    pub async fn update_patient(&self, patient_id: &str, patch: &PatientPatch) -> ApiResult<Patient> {
        let patient = self.client.update_patient(patient_id, patch).await?;

        let mut cache = self.cache.lock().await;
        cache.insert(
            QueryKey::Patient(patient_id.to_string()),
            Cached::Patient(patient.clone()),
            Instant::now(),
        );
        cache.invalidate_where(QueryKey::is_patient_list);
        Ok(patient)
    }

    pub async fn delete_patient(&self, patient_id: &str) -> ApiResult<()> {
        self.client.delete_patient(patient_id).await?;

        let mut cache = self.cache.lock().await;
        cache.remove(&QueryKey::Patient(patient_id.to_string()));
        cache.invalidate_where(QueryKey::is_patient_list);
        Ok(())
    }

    pub async fn patient_treatments(&self, patient_id: &str) -> ApiResult<TreatmentsResponse> {
        let key = QueryKey::TreatmentList(patient_id.to_string());
        if let Some(Cached::TreatmentList(list)) = self.cached(&key).await {
            return Ok(list);
        }
        let list = self.client.patient_treatments(patient_id).await?;
        self.store(key, Cached::TreatmentList(list.clone())).await;
        Ok(list)
    }

    pub async fn treatment(&self, treatment_id: &str) -> ApiResult<Treatment> {
        let key = QueryKey::Treatment(treatment_id.to_string());
        if let Some(Cached::Treatment(treatment)) = self.cached(&key).await {
            return Ok(treatment);
        }
        let treatment = self.client.treatment(treatment_id).await?;
        self.store(key, Cached::Treatment(treatment.clone())).await;
        Ok(treatment)
    }

    /// The patient's treatment count changes too, so their detail is dropped.
    pub async fn create_treatment(&self, draft: &TreatmentDraft) -> ApiResult<Treatment> {
        let treatment = self.client.create_treatment(draft).await?;

        let mut cache = self.cache.lock().await;
        cache.remove(&QueryKey::TreatmentList(treatment.patient_id.clone()));
        cache.remove(&QueryKey::Patient(treatment.patient_id.clone()));
        cache.insert(
            QueryKey::Treatment(treatment.treatment_id.clone()),
            Cached::Treatment(treatment.clone()),
            Instant::now(),
        );
        Ok(treatment)
    }

    pub async fn update_treatment(
        &self,
        treatment_id: &str,
        draft: &TreatmentDraft,
    ) -> ApiResult<Treatment> {
        let treatment = self.client.update_treatment(treatment_id, draft).await?;

        let mut cache = self.cache.lock().await;
        cache.insert(
            QueryKey::Treatment(treatment_id.to_string()),
            Cached::Treatment(treatment.clone()),
            Instant::now(),
        );
        cache.remove(&QueryKey::TreatmentList(treatment.patient_id.clone()));
        Ok(treatment)
    }

    /// The owning patient is unknown after deletion, so every treatment list
    /// and patient detail is dropped.
    pub async fn delete_treatment(&self, treatment_id: &str) -> ApiResult<()> {
        self.client.delete_treatment(treatment_id).await?;

        let mut cache = self.cache.lock().await;
        cache.remove(&QueryKey::Treatment(treatment_id.to_string()));
        cache.invalidate_where(|key| key.is_treatment_list() || key.is_patient_detail());
        Ok(())
    }

    /// Analysis results are not cached; a run may still be in progress.
    pub async fn analysis_results(&self, analysis_id: &str) -> ApiResult<AnalysisResultEnvelope> {
        self.client.analysis_results(analysis_id).await
    }

    /// Drop everything, e.g. on clinic switch.
    pub async fn clear_cache(&self) {
        let mut cache = self.cache.lock().await;
        let dropped = cache.invalidate_where(|_| true);
        debug!(dropped, "cache cleared");
    }

    async fn cached(&self, key: &QueryKey) -> Option<Cached> {
        let cache = self.cache.lock().await;
        let hit = cache.get(key, Instant::now()).cloned();
        debug!(key = %key, hit = hit.is_some(), "cache lookup");
        hit
    }

    async fn store(&self, key: QueryKey, value: Cached) {
        self.cache.lock().await.insert(key, value, Instant::now());
    }
}
