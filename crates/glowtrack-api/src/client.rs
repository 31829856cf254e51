//! HTTP client for the records service.
//!
//! One method per endpoint. Drafts are validated before anything is sent, and
//! every non-2xx answer becomes [`ApiError::Status`] carrying the server's
//! `detail` message.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use validator::Validate;

use glowtrack_core::models::{
    Patient, PatientDraft, PatientPatch, PatientsResponse, Treatment, TreatmentDraft,
    TreatmentsResponse, ValidationError,
};

use crate::config::ApiConfig;
use crate::error::{extract_detail, ApiError, ApiResult};

/// Offset/limit for the clinic patient listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ListParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl ListParams {
    fn query(&self) -> Vec<(&'static str, u32)> {
        let mut query = Vec::with_capacity(2);
        if let Some(skip) = self.skip {
            query.push(("skip", skip));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit));
        }
        query
    }
}

/// Stored result of an analysis run. `results` is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResultEnvelope {
    pub analysis_id: String,
    pub status: String,
    #[serde(default)]
    pub results: serde_json::Value,
}

pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // =========================================================================
    // Patients
    // =========================================================================

    pub async fn clinic_patients(
        &self,
        clinic_id: &str,
        params: ListParams,
    ) -> ApiResult<PatientsResponse> {
        let path = format!("/api/v1/patients/clinic/{}", clinic_id);
        let req = self.request(Method::GET, &path).query(&params.query());
        decode(self.execute(req, &path).await?).await
    }

    pub async fn patient(&self, patient_id: &str) -> ApiResult<Patient> {
        self.get_json(&format!("/api/v1/patients/{}", patient_id))
            .await
    }

    pub async fn create_patient(&self, draft: &PatientDraft) -> ApiResult<Patient> {
        draft.validate()?;
        self.send_json(Method::POST, "/api/v1/patients/", draft).await
    }

    pub async fn update_patient(&self, patient_id: &str, patch: &PatientPatch) -> ApiResult<Patient> {
        if patch.is_empty() {
            return Err(ValidationError::Invalid {
                field: "patch".to_string(),
                reason: "no fields to update".to_string(),
            }
            .into());
        }
        patch.validate()?;
        self.send_json(Method::PUT, &format!("/api/v1/patients/{}", patient_id), patch)
            .await
    }

    pub async fn delete_patient(&self, patient_id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/v1/patients/{}", patient_id)).await
    }

    // =========================================================================
    // Treatments
    // =========================================================================

    pub async fn patient_treatments(&self, patient_id: &str) -> ApiResult<TreatmentsResponse> {
        self.get_json(&format!("/api/v1/treatments/patient/{}", patient_id))
            .await
    }

    pub async fn treatment(&self, treatment_id: &str) -> ApiResult<Treatment> {
        self.get_json(&format!("/api/v1/treatments/{}", treatment_id))
            .await
    }

    pub async fn create_treatment(&self, draft: &TreatmentDraft) -> ApiResult<Treatment> {
        draft.validate()?;
        self.send_json(Method::POST, "/api/v1/treatments/", draft).await
    }

    pub async fn update_treatment(
        &self,
        treatment_id: &str,
        draft: &TreatmentDraft,
    ) -> ApiResult<Treatment> {
        draft.validate()?;
        self.send_json(Method::PUT, &format!("/api/v1/treatments/{}", treatment_id), draft)
            .await
    }

    pub async fn delete_treatment(&self, treatment_id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/v1/treatments/{}", treatment_id)).await
    }

    // =========================================================================
    // Analysis
    // =========================================================================

    pub async fn analysis_results(&self, analysis_id: &str) -> ApiResult<AnalysisResultEnvelope> {
        self.get_json(&format!("/api/v1/analysis/results/{}", analysis_id))
            .await
    }

    // =========================================================================
    // Transport
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.config.endpoint(path))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let req = self.request(Method::GET, path);
        decode(self.execute(req, path).await?).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.request(method, path).json(body);
        decode(self.execute(req, path).await?).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        let req = self.request(Method::DELETE, path);
        self.execute(req, path).await?;
        Ok(())
    }

    async fn execute(&self, req: RequestBuilder, path: &str) -> ApiResult<Response> {
        debug!("Making request to {}", path);

        let response = req.send().await.map_err(|e| {
            error!("Request to {} failed: {}", path, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
        error!("API error ({}) on {}: {}", status, path, detail);

        Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
