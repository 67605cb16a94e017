//! Server configuration read from the environment

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

use health_tracker_data::backend::{BackendConfig, BackendConfigError};

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable holds a value that cannot be used
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },

    /// The record store settings are unusable
    #[error(transparent)]
    Backend(#[from] BackendConfigError),
}

/// Everything the server binary needs to start
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port, bound on all interfaces
    pub port: u16,

    /// Deployment name reported by the health endpoint
    pub environment: String,

    pub backend: BackendConfig,
}

impl AppConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                name: "PORT".to_string(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let environment = lookup("APP_ENV")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "development".to_string());

        Ok(Self {
            port,
            environment,
            backend: BackendConfig::from_lookup(&lookup)?,
        })
    }

    /// Socket address the server listens on
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use health_tracker_data::backend::BackendType;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, "development");
        assert_eq!(config.backend.backend_type, BackendType::InMemory);
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_rest_backend_from_env() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("APP_ENV", "production"),
            ("HEALTH_BACKEND_URL", "https://example.supabase.co/"),
            ("HEALTH_BACKEND_KEY", "anon-key"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, "production");
        assert_eq!(config.backend.backend_type, BackendType::Rest);
        assert_eq!(config.backend.base_url.as_deref(), Some("https://example.supabase.co"));
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "PORT"));
    }

    #[test]
    fn test_backend_errors_are_propagated() {
        let err = AppConfig::from_lookup(lookup(&[("HEALTH_BACKEND_URL", "https://example.supabase.co")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Backend(BackendConfigError::EnvVarNotFound(_))));
    }
}
