//! Query cache with stale-time expiry.
//!
//! Entries are keyed like the dashboard's query keys. A stale entry is never
//! returned; mutations invalidate whole key families.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use glowtrack_core::models::{Patient, PatientsResponse, Treatment, TreatmentsResponse};

use crate::client::ListParams;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    PatientList { clinic_id: String, params: ListParams },
    Patient(String),
    TreatmentList(String),
    Treatment(String),
}

impl QueryKey {
    pub fn is_patient_list(&self) -> bool {
        matches!(self, QueryKey::PatientList { .. })
    }

    pub fn is_patient_detail(&self) -> bool {
        matches!(self, QueryKey::Patient(_))
    }

    pub fn is_treatment_list(&self) -> bool {
        matches!(self, QueryKey::TreatmentList(_))
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::PatientList { clinic_id, .. } => write!(f, "patients/list/{}", clinic_id),
            QueryKey::Patient(id) => write!(f, "patients/detail/{}", id),
            QueryKey::TreatmentList(id) => write!(f, "treatments/list/{}", id),
            QueryKey::Treatment(id) => write!(f, "treatments/detail/{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cached {
    PatientList(PatientsResponse),
    Patient(Patient),
    TreatmentList(TreatmentsResponse),
    Treatment(Treatment),
}

#[derive(Debug)]
struct Entry {
    value: Cached,
    stored_at: Instant,
}

/// In-memory cache; callers pass `now` so expiry is testable.
#[derive(Debug)]
pub struct RecordCache {
    ttl: Duration,
    entries: HashMap<QueryKey, Entry>,
}

impl RecordCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached value, if younger than the stale time.
    pub fn get(&self, key: &QueryKey, now: Instant) -> Option<&Cached> {
        self.entries
            .get(key)
            .filter(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)
            .map(|entry| &entry.value)
    }

    pub fn insert(&mut self, key: QueryKey, value: Cached, now: Instant) {
        self.entries.insert(key, Entry { value, stored_at: now });
    }

    pub fn remove(&mut self, key: &QueryKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every entry whose key matches; returns how many were dropped.
    pub fn invalidate_where(&mut self, predicate: impl Fn(&QueryKey) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !predicate(key));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
