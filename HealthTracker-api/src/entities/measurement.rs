use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use health_tracker_domain::entities::{DashboardSummary, MeasurementRecord};

/// Measurements, optionally restricted to one week
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeasurementListResponse {
    /// Week filter that was applied, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<u8>,

    /// Number of items returned
    pub count: usize,

    /// Records in load order
    pub data: Vec<MeasurementRecord>,
}

impl MeasurementListResponse {
    pub fn new(week: Option<u8>, data: Vec<MeasurementRecord>) -> Self {
        Self {
            week,
            count: data.len(),
            data,
        }
    }
}

/// Distinct recorded weeks
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WeeksResponse {
    /// Week numbers, ascending
    pub weeks: Vec<u8>,
}

/// Dashboard values together with the load state of the list
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    /// Whether the initial fetch has completed
    pub loaded: bool,

    /// Most recent backend failure, if not yet cleared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,

    pub summary: DashboardSummary,
}

/// Result of a reload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReloadResponse {
    /// Number of records now held
    pub loaded: usize,
}

/// A navigable view of the application
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ViewLink {
    pub name: String,
    pub path: String,
    pub description: String,
}

/// Landing page content
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HomeResponse {
    pub name: String,
    pub version: String,
    pub views: Vec<ViewLink>,
}
