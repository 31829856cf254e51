//! Environment-driven client configuration.

use std::env;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Analysis requests can take a while; the backend budget is 30 s.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// How long list and detail responses are served from cache.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
/// Tenant used until authentication provides a real clinic.
pub const DEMO_CLINIC_ID: &str = "clinic-demo-001";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub clinic_id: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            clinic_id: DEMO_CLINIC_ID.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value source. Missing or unparsable values fall
    /// back to the defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("GLOWTRACK_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| {
                warn!("GLOWTRACK_API_URL not set, using {}", DEFAULT_API_URL);
                DEFAULT_API_URL.to_string()
            });

        let clinic_id = lookup("GLOWTRACK_CLINIC_ID")
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| {
                warn!("GLOWTRACK_CLINIC_ID not set, using demo clinic");
                DEMO_CLINIC_ID.to_string()
            });

        Self {
            base_url,
            timeout: seconds(&lookup, "GLOWTRACK_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            cache_ttl: seconds(&lookup, "GLOWTRACK_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS),
            clinic_id,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Absolute URL for an `/api/v1/...` path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn seconds(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Duration {
    let secs = match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
            warn!("{} is not a number of seconds ({:?}), using {}", key, raw, default);
            default
        }),
    };
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.clinic_id, "clinic-demo-001");
    }

    #[test]
    fn test_reads_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("GLOWTRACK_API_URL", "https://api.glowtrack.example"),
            ("GLOWTRACK_API_TIMEOUT_SECS", "5"),
            ("GLOWTRACK_CACHE_TTL_SECS", "0"),
            ("GLOWTRACK_CLINIC_ID", "clinic-42"),
        ]));
        assert_eq!(config.base_url, "https://api.glowtrack.example");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.cache_ttl, Duration::ZERO);
        assert_eq!(config.clinic_id, "clinic-42");
    }

    #[test]
    fn test_bad_number_falls_back() {
        let config = ApiConfig::from_lookup(lookup(&[("GLOWTRACK_API_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    proptest! {
        #[test]
        fn prop_endpoint_has_single_separator(slashes in 0usize..4, leading in any::<bool>()) {
            let config = ApiConfig::default()
                .with_base_url(format!("http://localhost:8000{}", "/".repeat(slashes)));
            let path = if leading { "/api/v1/patients/" } else { "api/v1/patients/" };
            prop_assert_eq!(config.endpoint(path), "http://localhost:8000/api/v1/patients/");
        }
    }
}
