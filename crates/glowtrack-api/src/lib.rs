//! Records-service client for the GlowTrack dashboard.
//!
//! This crate wraps the backend's patient, treatment and analysis endpoints
//! with a reqwest client and a stale-time query cache.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod service;

pub use cache::{Cached, QueryKey, RecordCache};
pub use client::{AnalysisResultEnvelope, ApiClient, ListParams};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, Operation};
pub use service::RecordsService;
