use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use health_tracker_data::repository::{MeasurementRepositoryTrait, RepositoryError};

use crate::entities::conversions;
use crate::entities::measurement::{
    CreateMeasurementRequest, DashboardSummary, MeasurementForm, MeasurementRecord, Metric, MetricSeries,
};
use crate::services::aggregator;
use crate::services::validation::{self, ValidationError};

/// Health data service errors
#[derive(Debug, Error)]
pub enum HealthDataServiceError {
    /// The submitted measurement was rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The record store failed or refused the request
    #[error("Backend error: {0}")]
    Backend(#[from] RepositoryError),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),
}

impl<T> From<PoisonError<T>> for HealthDataServiceError {
    fn from(error: PoisonError<T>) -> Self {
        HealthDataServiceError::Lock(error.to_string())
    }
}

/// Load state of the in-memory list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    /// At least one load has succeeded
    pub loaded: bool,

    /// Message of the most recent backend failure, cleared by the next success
    pub last_error: Option<String>,
}

/// Trait for the health data aggregator
#[async_trait]
pub trait HealthDataServiceTrait: Send + Sync {
    /// Replace the in-memory list with the store's rows, oldest first
    async fn load(&self) -> Result<usize, HealthDataServiceError>;

    /// Validate, persist and append one measurement
    async fn add_measurement(
        &self,
        request: CreateMeasurementRequest,
    ) -> Result<MeasurementRecord, HealthDataServiceError>;

    /// Copy of the in-memory list
    fn snapshot(&self) -> Result<Vec<MeasurementRecord>, HealthDataServiceError>;

    /// Current load state
    fn status(&self) -> StoreStatus;

    /// Validate the raw form, then add the measurement it describes
    async fn submit_form(&self, form: &MeasurementForm) -> Result<MeasurementRecord, HealthDataServiceError> {
        let request = validation::parse_form(form)?;
        self.add_measurement(request).await
    }

    /// Records of one week, in load order
    fn week_data(&self, week: u8) -> Result<Vec<MeasurementRecord>, HealthDataServiceError> {
        Ok(aggregator::week_data(&self.snapshot()?, week))
    }

    /// Distinct week numbers, ascending
    fn all_weeks(&self) -> Result<Vec<u8>, HealthDataServiceError> {
        Ok(aggregator::all_weeks(&self.snapshot()?))
    }

    /// Dashboard values
    fn summary(&self) -> Result<DashboardSummary, HealthDataServiceError> {
        Ok(aggregator::summarize(&self.snapshot()?))
    }

    /// Chart data for one metric
    fn metric_series(&self, metric: Metric, week: Option<u8>) -> Result<MetricSeries, HealthDataServiceError> {
        Ok(aggregator::metric_series(&self.snapshot()?, metric, week))
    }
}

#[derive(Debug, Default)]
struct StoreState {
    records: Vec<MeasurementRecord>,
    status: StoreStatus,
}

/// Holds the measurement list and keeps it in step with the record store
pub struct HealthDataService {
    repository: Arc<dyn MeasurementRepositoryTrait>,
    state: RwLock<StoreState>,
    /// Held across every store call that changes the list, so a reload
    /// cannot replace the list with rows fetched before a concurrent insert
    sync: Mutex<()>,
}

impl HealthDataService {
    /// Create a service with an empty, not yet loaded list
    pub fn new(repository: Arc<dyn MeasurementRepositoryTrait>) -> Self {
        Self {
            repository,
            state: RwLock::new(StoreState::default()),
            sync: Mutex::new(()),
        }
    }

    fn record_failure(&self, err: &RepositoryError) {
        if err.is_auth_failure() {
            warn!("Record store rejected the configured credentials");
        }
        match self.state.write() {
            Ok(mut state) => state.status.last_error = Some(err.to_string()),
            Err(poisoned) => error!("Could not record backend failure: {}", poisoned),
        }
    }
}

#[async_trait]
impl HealthDataServiceTrait for HealthDataService {
    async fn load(&self) -> Result<usize, HealthDataServiceError> {
        let _sync = self.sync.lock().await;
        let rows = match self.repository.fetch_all().await {
            Ok(rows) => rows,
            Err(e) => {
                error!("Failed to load measurements: {}", e);
                self.record_failure(&e);
                return Err(e.into());
            }
        };

        let records: Vec<MeasurementRecord> = rows.into_iter().map(conversions::convert_to_domain_record).collect();
        let count = records.len();

        let mut state = self.state.write()?;
        state.records = records;
        state.status = StoreStatus {
            loaded: true,
            last_error: None,
        };

        info!("Loaded {} measurements", count);
        Ok(count)
    }

    async fn add_measurement(
        &self,
        request: CreateMeasurementRequest,
    ) -> Result<MeasurementRecord, HealthDataServiceError> {
        validation::validate_create_request(&request)?;

        let _sync = self.sync.lock().await;
        let stored = match self.repository.insert(conversions::convert_to_data_new_row(&request)).await {
            Ok(row) => conversions::convert_to_domain_record(row),
            Err(e) => {
                error!("Failed to save measurement: {}", e);
                self.record_failure(&e);
                return Err(e.into());
            }
        };

        let mut state = self.state.write()?;
        if state.records.iter().any(|record| record.id == stored.id) {
            debug!("Measurement {} is already in the list", stored.id);
        } else {
            state.records.push(stored.clone());
        }
        state.status.last_error = None;

        info!("Saved measurement {} ({})", stored.id, stored.label());
        Ok(stored)
    }

    fn snapshot(&self) -> Result<Vec<MeasurementRecord>, HealthDataServiceError> {
        Ok(self.state.read()?.records.clone())
    }

    fn status(&self) -> StoreStatus {
        match self.state.read() {
            Ok(state) => state.status.clone(),
            Err(poisoned) => StoreStatus {
                loaded: false,
                last_error: Some(poisoned.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_tracker_data::models::measurement::{MeasurementRow, NewMeasurementRow};
    use health_tracker_data::repository::tests::MockMeasurementRepository;
    use tokio::sync::Notify;

    /// Store whose fetch takes its copy of the rows, then waits to be released
    struct GatedRepository {
        inner: MockMeasurementRepository,
        fetch_started: Notify,
        release_fetch: Notify,
    }

    #[async_trait]
    impl MeasurementRepositoryTrait for GatedRepository {
        async fn fetch_all(&self) -> Result<Vec<MeasurementRow>, RepositoryError> {
            let rows = self.inner.fetch_all().await?;
            self.fetch_started.notify_one();
            self.release_fetch.notified().await;
            Ok(rows)
        }

        async fn insert(&self, row: NewMeasurementRow) -> Result<MeasurementRow, RepositoryError> {
            self.inner.insert(row).await
        }
    }

    fn row(id: &str, week: u8, day: u8) -> MeasurementRow {
        MeasurementRow {
            id: id.to_string(),
            weight: Some(70.0),
            temperature: Some(36.6),
            tension: Some("120/80".to_string()),
            week,
            day,
            date: Some("2024-01-01".to_string()),
            created_at: None,
        }
    }

    fn form(weight: &str) -> MeasurementForm {
        MeasurementForm {
            weight: weight.to_string(),
            temperature: "36.6".to_string(),
            tension: "120/80".to_string(),
            week: "1".to_string(),
            day: "1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_replaces_list_in_store_order() {
        let repo = Arc::new(MockMeasurementRepository::with_rows(vec![row("a", 2, 1), row("b", 1, 3)]));
        let service = HealthDataService::new(repo);

        assert!(!service.status().loaded);
        assert_eq!(service.load().await.unwrap(), 2);

        let ids: Vec<String> = service.snapshot().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(service.all_weeks().unwrap(), vec![1, 2]);
        assert_eq!(service.status(), StoreStatus { loaded: true, last_error: None });
    }

    #[tokio::test]
    async fn test_load_failure_keeps_list_and_reports() {
        let repo = Arc::new(MockMeasurementRepository::new().with_fetch_failure());
        let service = HealthDataService::new(repo);

        let err = service.load().await.unwrap_err();
        assert!(matches!(err, HealthDataServiceError::Backend(RepositoryError::Status { status: 503, .. })));
        assert!(service.snapshot().unwrap().is_empty());

        let status = service.status();
        assert!(!status.loaded);
        assert!(status.last_error.is_some());
    }

    #[tokio::test]
    async fn test_submit_form_persists_exact_values_and_appends() {
        let repo = Arc::new(MockMeasurementRepository::with_rows(vec![row("a", 3, 2)]));
        let service = HealthDataService::new(repo.clone());
        service.load().await.unwrap();

        let stored = service.submit_form(&form("70")).await.unwrap();
        assert_eq!(stored.weight, Some(70.0));
        assert_eq!(stored.label(), "W1D1");

        let inserted = repo.inserted();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].temperature, 36.6);
        assert_eq!(inserted[0].tension, "120/80");

        let summary = service.summary().unwrap();
        assert_eq!(summary.total_entries, 2);
        assert_eq!(summary.latest.map(|r| r.id), Some(stored.id));
        assert_eq!(service.all_weeks().unwrap(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_store() {
        let repo = Arc::new(MockMeasurementRepository::new());
        let service = HealthDataService::new(repo.clone());

        let err = service.submit_form(&form("5")).await.unwrap_err();
        assert!(matches!(err, HealthDataServiceError::Validation(ValidationError::OutOfRange { field: "weight", .. })));
        assert!(repo.inserted().is_empty());
        assert!(service.snapshot().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_measurement_rejects_invalid_request() {
        let repo = Arc::new(MockMeasurementRepository::new());
        let service = HealthDataService::new(repo.clone());

        let request = CreateMeasurementRequest {
            weight: 70.0,
            temperature: 36.6,
            tension: "high".to_string(),
            week: 1,
            day: 1,
        };
        let err = service.add_measurement(request).await.unwrap_err();
        assert!(matches!(err, HealthDataServiceError::Validation(ValidationError::BadFormat { .. })));
        assert!(repo.inserted().is_empty());
    }

    #[tokio::test]
    async fn test_failed_insert_leaves_list_unchanged() {
        let repo = Arc::new(MockMeasurementRepository::with_rows(vec![row("a", 1, 1)]).with_insert_failure());
        let service = HealthDataService::new(repo.clone());
        service.load().await.unwrap();

        let err = service.submit_form(&form("70")).await.unwrap_err();
        assert!(matches!(err, HealthDataServiceError::Backend(_)));
        assert_eq!(repo.inserted().len(), 1);
        assert_eq!(service.snapshot().unwrap().len(), 1);
        assert!(service.status().last_error.is_some());
        assert!(service.status().loaded);
    }

    #[tokio::test]
    async fn test_insert_during_reload_stays_in_list() {
        let repo = Arc::new(GatedRepository {
            inner: MockMeasurementRepository::with_rows(vec![row("a", 1, 1)]),
            fetch_started: Notify::new(),
            release_fetch: Notify::new(),
        });
        let service = Arc::new(HealthDataService::new(repo.clone()));

        let loader = tokio::spawn({
            let service = service.clone();
            async move { service.load().await }
        });
        repo.fetch_started.notified().await;

        let writer = tokio::spawn({
            let service = service.clone();
            async move { service.submit_form(&form("70")).await }
        });
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        repo.release_fetch.notify_one();

        loader.await.unwrap().unwrap();
        let stored = writer.await.unwrap().unwrap();

        let ids: Vec<String> = service.snapshot().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a".to_string(), stored.id]);
        assert_eq!(repo.inner.fetch_all().await.unwrap().len(), ids.len());
    }

    #[tokio::test]
    async fn test_reload_after_insert_does_not_duplicate() {
        let repo = Arc::new(MockMeasurementRepository::with_rows(vec![row("a", 1, 1)]));
        let service = HealthDataService::new(repo);
        service.load().await.unwrap();

        service.submit_form(&form("70")).await.unwrap();
        assert_eq!(service.load().await.unwrap(), 2);
        assert_eq!(service.summary().unwrap().total_entries, 2);
    }

    #[tokio::test]
    async fn test_rows_with_missing_values_are_loaded() {
        let mut partial = row("b", 2, 1);
        partial.temperature = None;
        partial.tension = None;
        let repo = Arc::new(MockMeasurementRepository::with_rows(vec![row("a", 1, 1), partial]));
        let service = HealthDataService::new(repo);

        assert_eq!(service.load().await.unwrap(), 2);
        let counts = service.summary().unwrap().metric_counts;
        assert_eq!((counts.weight, counts.temperature, counts.tension), (2, 1, 1));
        assert_eq!(service.metric_series(Metric::Temperature, None).unwrap().points.len(), 1);
    }

    #[tokio::test]
    async fn test_metric_series_uses_loaded_records() {
        let repo = Arc::new(MockMeasurementRepository::with_rows(vec![row("a", 1, 1), row("b", 2, 1)]));
        let service = HealthDataService::new(repo);
        service.load().await.unwrap();

        let series = service.metric_series(Metric::Temperature, Some(2)).unwrap();
        assert_eq!(series.points.len(), 1);
        assert_eq!(series.points[0].value, Some(36.6));
        assert_eq!(service.week_data(1).unwrap().len(), 1);
    }
}
