use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::measurement::{MeasurementRow, NewMeasurementRow};
use super::errors::RepositoryError;
use super::measurement::MeasurementRepositoryTrait;

/// In-memory record store, used when no hosted backend is configured
#[derive(Debug, Clone, Default)]
pub struct InMemoryMeasurementRepository {
    /// Rows in insertion order; clones share storage
    rows: Arc<Mutex<Vec<MeasurementRow>>>,
}

impl InMemoryMeasurementRepository {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MeasurementRepositoryTrait for InMemoryMeasurementRepository {
    async fn fetch_all(&self) -> Result<Vec<MeasurementRow>, RepositoryError> {
        let store = self.rows.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;
        Ok(store.clone())
    }

    async fn insert(&self, row: NewMeasurementRow) -> Result<MeasurementRow, RepositoryError> {
        let now = Utc::now();
        let stored = MeasurementRow {
            id: Uuid::new_v4().to_string(),
            weight: Some(row.weight),
            temperature: Some(row.temperature),
            tension: Some(row.tension),
            week: row.week,
            day: row.day,
            date: Some(now.date_naive().to_string()),
            created_at: Some(now.to_rfc3339()),
        };

        let mut store = self.rows.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;
        store.push(stored.clone());
        Ok(stored)
    }
}
