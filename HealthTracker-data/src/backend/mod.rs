//! Backend connection settings for the HealthTracker record store
//!
//! Measurements live in a hosted PostgREST-style store. When no backend URL is
//! configured the repository falls back to an in-memory store so the service
//! can still be run locally.

use std::env;
use thiserror::Error;
use tracing::info;

/// Default table holding the measurement rows
pub const DEFAULT_TABLE: &str = "health_data";

/// Default HTTP timeout for backend calls, in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Backend configuration error
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendConfigError {
    /// A required environment variable is missing
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    /// An environment variable holds a value that cannot be used
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Where measurement rows are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Hosted REST store
    Rest,
    /// Process-local list, lost on restart
    InMemory,
}

/// Record store configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Which store to talk to
    pub backend_type: BackendType,
    /// Base URL of the hosted store, e.g. `https://project.supabase.co`
    pub base_url: Option<String>,
    /// API key sent as `apikey` and as bearer token
    pub api_key: Option<String>,
    /// Table holding the measurement rows
    pub table: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            backend_type: BackendType::InMemory,
            base_url: None,
            api_key: None,
            table: DEFAULT_TABLE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl BackendConfig {
    /// Create a REST backend configuration
    pub fn rest(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            backend_type: BackendType::Rest,
            base_url: Some(base_url.into()),
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Create a new backend configuration from environment variables
    pub fn from_env() -> Result<Self, BackendConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BackendConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("HEALTH_BACKEND_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let table = lookup("HEALTH_BACKEND_TABLE")
            .filter(|table| !table.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());

        let timeout_seconds = match lookup("HEALTH_BACKEND_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(BackendConfigError::InvalidValue(
                        "HEALTH_BACKEND_TIMEOUT_SECS".to_string(),
                        "timeout must be at least one second".to_string(),
                    ))
                }
                Ok(seconds) => seconds,
                Err(e) => {
                    return Err(BackendConfigError::InvalidValue(
                        "HEALTH_BACKEND_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    ))
                }
            },
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        let Some(base_url) = base_url else {
            info!("No HEALTH_BACKEND_URL provided, using in-memory record store");
            return Ok(Self {
                table,
                timeout_seconds,
                ..Self::default()
            });
        };

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(BackendConfigError::InvalidValue(
                "HEALTH_BACKEND_URL".to_string(),
                format!("'{}' is not an http(s) URL", base_url),
            ));
        }

        let api_key = lookup("HEALTH_BACKEND_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| BackendConfigError::EnvVarNotFound("HEALTH_BACKEND_KEY".to_string()))?;

        info!("Using hosted record store at {} (table={}, timeout={}s)", base_url, table, timeout_seconds);

        Ok(Self {
            backend_type: BackendType::Rest,
            base_url: Some(base_url),
            api_key: Some(api_key),
            table,
            timeout_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_to_in_memory() {
        let config = BackendConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.backend_type, BackendType::InMemory);
        assert_eq!(config.table, "health_data");
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn test_rest_backend_from_env() {
        let config = BackendConfig::from_lookup(lookup_from(&[
            ("HEALTH_BACKEND_URL", "https://demo.supabase.co/"),
            ("HEALTH_BACKEND_KEY", "anon-key"),
            ("HEALTH_BACKEND_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.backend_type, BackendType::Rest);
        assert_eq!(config.base_url.as_deref(), Some("https://demo.supabase.co"));
        assert_eq!(config.api_key.as_deref(), Some("anon-key"));
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_rest_backend_requires_key() {
        let result = BackendConfig::from_lookup(lookup_from(&[
            ("HEALTH_BACKEND_URL", "https://demo.supabase.co"),
        ]));
        assert_eq!(
            result.unwrap_err(),
            BackendConfigError::EnvVarNotFound("HEALTH_BACKEND_KEY".to_string())
        );
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let result = BackendConfig::from_lookup(lookup_from(&[
            ("HEALTH_BACKEND_TIMEOUT_SECS", "soon"),
        ]));
        assert!(matches!(result, Err(BackendConfigError::InvalidValue(var, _)) if var == "HEALTH_BACKEND_TIMEOUT_SECS"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = BackendConfig::from_lookup(lookup_from(&[
            ("HEALTH_BACKEND_TIMEOUT_SECS", "0"),
        ]));
        assert!(matches!(result, Err(BackendConfigError::InvalidValue(var, _)) if var == "HEALTH_BACKEND_TIMEOUT_SECS"));
    }

    #[test]
    fn test_non_http_url_rejected() {
        let result = BackendConfig::from_lookup(lookup_from(&[
            ("HEALTH_BACKEND_URL", "ftp://example.com"),
            ("HEALTH_BACKEND_KEY", "k"),
        ]));
        assert!(matches!(result, Err(BackendConfigError::InvalidValue(_, _))));
    }
}
