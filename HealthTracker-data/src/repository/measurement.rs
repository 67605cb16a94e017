use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;

use crate::backend::{BackendConfig, BackendType};
use crate::models::measurement::{MeasurementRow, NewMeasurementRow};
use super::errors::RepositoryError;
use super::in_memory::InMemoryMeasurementRepository;
use super::rest::RestMeasurementRepository;

/// Repository trait for measurement rows
#[async_trait]
pub trait MeasurementRepositoryTrait: Send + Sync {
    /// Get every row, oldest first (`created_at` ascending)
    async fn fetch_all(&self) -> Result<Vec<MeasurementRow>, RepositoryError>;

    /// Insert a row and return it as stored, with server-assigned fields
    async fn insert(&self, row: NewMeasurementRow) -> Result<MeasurementRow, RepositoryError>;
}

/// Build the repository selected by the configuration
pub fn create_repository(
    config: &BackendConfig,
) -> Result<Arc<dyn MeasurementRepositoryTrait>, RepositoryError> {
    match config.backend_type {
        BackendType::Rest => {
            info!("Creating REST measurement repository");
            Ok(Arc::new(RestMeasurementRepository::from_config(config)?))
        }
        BackendType::InMemory => {
            info!("Creating in-memory measurement repository");
            Ok(Arc::new(InMemoryMeasurementRepository::new()))
        }
    }
}

/// Mock measurement repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock implementation of the repository that records insert payloads
    pub struct MockMeasurementRepository {
        rows: Mutex<Vec<MeasurementRow>>,
        inserted: Mutex<Vec<NewMeasurementRow>>,
        fail_fetch: bool,
        fail_insert: bool,
    }

    impl Default for MockMeasurementRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockMeasurementRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                inserted: Mutex::new(Vec::new()),
                fail_fetch: false,
                fail_insert: false,
            }
        }

        /// Create a mock repository with predefined rows
        pub fn with_rows(rows: Vec<MeasurementRow>) -> Self {
            Self {
                rows: Mutex::new(rows),
                ..Self::new()
            }
        }

        /// Configure the mock to fail every fetch
        pub fn with_fetch_failure(mut self) -> Self {
            self.fail_fetch = true;
            self
        }

        /// Configure the mock to fail every insert
        pub fn with_insert_failure(mut self) -> Self {
            self.fail_insert = true;
            self
        }

        /// Payloads received by `insert`, in call order
        pub fn inserted(&self) -> Vec<NewMeasurementRow> {
            self.inserted.lock().map(|rows| rows.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl MeasurementRepositoryTrait for MockMeasurementRepository {
        async fn fetch_all(&self) -> Result<Vec<MeasurementRow>, RepositoryError> {
            if self.fail_fetch {
                return Err(RepositoryError::Status {
                    status: 503,
                    body: "mock is configured to fail fetch".to_string(),
                });
            }
            Ok(self.rows.lock()?.clone())
        }

        async fn insert(&self, row: NewMeasurementRow) -> Result<MeasurementRow, RepositoryError> {
            self.inserted.lock()?.push(row.clone());

            if self.fail_insert {
                return Err(RepositoryError::Transport(
                    "mock is configured to fail insert".to_string(),
                ));
            }

            let mut rows = self.rows.lock()?;
            let stored = MeasurementRow {
                id: format!("mock-{}", rows.len() + 1),
                weight: Some(row.weight),
                temperature: Some(row.temperature),
                tension: Some(row.tension),
                week: row.week,
                day: row.day,
                date: Some("2024-01-01".to_string()),
                created_at: Some(format!("2024-01-01T00:00:{:02}+00:00", rows.len())),
            };
            rows.push(stored.clone());
            Ok(stored)
        }
    }

    #[tokio::test]
    async fn test_mock_records_inserts() {
        let repo = MockMeasurementRepository::new();
        let payload = NewMeasurementRow {
            weight: 70.0,
            temperature: 36.6,
            tension: "120/80".to_string(),
            week: 1,
            day: 1,
        };

        let stored = repo.insert(payload.clone()).await.unwrap();
        assert_eq!(stored.id, "mock-1");
        assert_eq!(repo.inserted(), vec![payload]);
        assert_eq!(repo.fetch_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_failures() {
        let repo = MockMeasurementRepository::new()
            .with_fetch_failure()
            .with_insert_failure();

        assert!(repo.fetch_all().await.is_err());
        let result = repo
            .insert(NewMeasurementRow {
                weight: 70.0,
                temperature: 36.6,
                tension: "120/80".to_string(),
                week: 1,
                day: 1,
            })
            .await;
        assert!(matches!(result, Err(RepositoryError::Transport(_))));
    }

    #[test]
    fn test_create_repository_in_memory_by_default() {
        let repo = create_repository(&BackendConfig::default());
        assert!(repo.is_ok());
    }
}
