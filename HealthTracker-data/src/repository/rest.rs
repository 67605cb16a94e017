//! Reqwest-backed adapter for the hosted record store.
//!
//! Speaks the PostgREST dialect: rows are read with `select`/`order` query
//! parameters and inserted with `Prefer: return=representation` so the store
//! echoes the created row back.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use tracing::{debug, error};

use crate::backend::{BackendConfig, BackendConfigError};
use crate::models::measurement::{MeasurementRow, NewMeasurementRow};
use super::errors::RepositoryError;
use super::measurement::MeasurementRepositoryTrait;

const MAX_ERROR_BODY_CHARS: usize = 512;

/// Measurement repository backed by the hosted REST store
#[derive(Debug, Clone)]
pub struct RestMeasurementRepository {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl RestMeasurementRepository {
    /// Build an adapter with an explicit request timeout
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RepositoryError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            table: table.into(),
        })
    }

    /// Build an adapter from the backend configuration
    pub fn from_config(config: &BackendConfig) -> Result<Self, RepositoryError> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| BackendConfigError::EnvVarNotFound("HEALTH_BACKEND_URL".to_string()))?;
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| BackendConfigError::EnvVarNotFound("HEALTH_BACKEND_KEY".to_string()))?;

        Self::new(
            base_url,
            api_key,
            config.table.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// Endpoint for the measurement table
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.api_key.as_str())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::ACCEPT, "application/json")
    }
}

#[async_trait]
impl MeasurementRepositoryTrait for RestMeasurementRepository {
    async fn fetch_all(&self) -> Result<Vec<MeasurementRow>, RepositoryError> {
        debug!("Fetching all measurement rows from {}", self.table_url());

        let response = self
            .authorized(self.client.get(self.table_url()))
            .query(&[("select", "*"), ("order", "created_at.asc")])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let err = map_status_error(status, body.as_ref());
            error!("Failed to fetch measurement rows: {}", err);
            return Err(err);
        }

        parse_rows(body.as_ref())
    }

    async fn insert(&self, row: NewMeasurementRow) -> Result<MeasurementRow, RepositoryError> {
        debug!("Inserting measurement row for week {} day {}", row.week, row.day);

        let response = self
            .authorized(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let err = map_status_error(status, body.as_ref());
            error!("Failed to insert measurement row: {}", err);
            return Err(err);
        }

        parse_inserted(body.as_ref())
    }
}

fn parse_rows(body: &[u8]) -> Result<Vec<MeasurementRow>, RepositoryError> {
    Ok(serde_json::from_slice(body)?)
}

fn parse_inserted(body: &[u8]) -> Result<MeasurementRow, RepositoryError> {
    parse_rows(body)?
        .into_iter()
        .next()
        .ok_or_else(|| RepositoryError::Decode("insert response contained no row".to_string()))
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RepositoryError {
    let text = String::from_utf8_lossy(body);
    RepositoryError::Status {
        status: status.as_u16(),
        body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}
