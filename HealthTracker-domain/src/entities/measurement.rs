use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use crate::entities::blood_pressure::{BloodPressureCategory, Tension};

/// Accepted weight range in kilograms, inclusive
pub const WEIGHT_RANGE_KG: (f64, f64) = (10.0, 300.0);

/// Accepted temperature range in degrees Celsius, inclusive
pub const TEMPERATURE_RANGE_C: (f64, f64) = (30.0, 45.0);

/// Accepted week numbers, inclusive
pub const WEEK_RANGE: (u8, u8) = (1, 52);

/// Accepted day numbers, inclusive
pub const DAY_RANGE: (u8, u8) = (1, 7);

/// Domain model for a stored measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct MeasurementRecord {
    /// Store-assigned identifier
    pub id: String,

    /// Body weight in kilograms, absent when the store row has none
    pub weight: Option<f64>,

    /// Body temperature in degrees Celsius
    pub temperature: Option<f64>,

    /// Blood pressure as "systolic/diastolic" in mmHg
    pub tension: Option<String>,

    /// Week number (1-52)
    pub week: u8,

    /// Day of the week (1-7)
    pub day: u8,

    /// Store-assigned date of the measurement
    pub date: Option<String>,
}

impl MeasurementRecord {
    /// Short label used by the dashboard, e.g. `W3D5`
    pub fn label(&self) -> String {
        format!("W{}D{}", self.week, self.day)
    }
}

/// Typed payload for creating a measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct CreateMeasurementRequest {
    /// Body weight in kilograms
    #[validate(range(min = 10.0, max = 300.0, message = "Weight must be between 10kg and 300kg"))]
    pub weight: f64,

    /// Body temperature in degrees Celsius
    #[validate(range(min = 30.0, max = 45.0, message = "Temperature must be between 30°C and 45°C"))]
    pub temperature: f64,

    /// Blood pressure as "systolic/diastolic" in mmHg
    #[validate(custom = "validate_tension_format")]
    pub tension: String,

    /// Week number (1-52)
    #[validate(range(min = 1, max = 52, message = "Week must be between 1 and 52"))]
    pub week: u8,

    /// Day of the week (1-7)
    #[validate(range(min = 1, max = 7, message = "Day must be between 1 and 7"))]
    pub day: u8,
}

fn validate_tension_format(tension: &str) -> Result<(), validator::ValidationError> {
    if Tension::is_well_formed(tension) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("format");
        error.message = Some("Please enter blood pressure in format: 120/80".into());
        Err(error)
    }
}

/// Raw data-entry form fields, exactly as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct MeasurementForm {
    #[serde(default)]
    pub weight: String,

    #[serde(default)]
    pub temperature: String,

    #[serde(default)]
    pub tension: String,

    #[serde(default)]
    pub week: String,

    #[serde(default)]
    pub day: String,
}

/// A metric with its own detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Temperature,
    Tension,
    Weight,
}

impl Metric {
    /// Every metric, in dashboard order
    pub const ALL: [Metric; 3] = [Metric::Temperature, Metric::Tension, Metric::Weight];

    /// Lowercase name used in paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Tension => "tension",
            Metric::Weight => "weight",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "temperature" => Ok(Metric::Temperature),
            "tension" => Ok(Metric::Tension),
            "weight" => Ok(Metric::Weight),
            other => Err(format!("Unknown metric: {}", other)),
        }
    }
}

/// Number of records carrying a value for each metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct MetricCounts {
    pub temperature: usize,
    pub tension: usize,
    pub weight: usize,
}

/// Number of records in one week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct WeekCount {
    pub week: u8,
    pub entries: usize,
}

/// Values shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct DashboardSummary {
    /// Total number of records
    pub total_entries: usize,

    /// Number of distinct weeks
    pub weeks_recorded: usize,

    /// Number of distinct (week, day) pairs
    pub days_recorded: usize,

    /// Most recently appended record
    pub latest: Option<MeasurementRecord>,

    /// `W{week}D{day}` of the latest record, `--` when there is none
    pub latest_label: String,

    /// Per-metric record counts
    pub metric_counts: MetricCounts,

    /// Records per week, ascending by week
    pub weeks: Vec<WeekCount>,
}

/// One point of a metric detail chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct MetricPoint {
    /// Id of the record this point comes from
    pub id: String,

    pub week: u8,

    pub day: u8,

    /// Plotted value; systolic pressure for the tension metric
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Raw "S/D" reading (tension only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub systolic: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<BloodPressureCategory>,
}

/// Chart data for a metric detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct MetricSeries {
    pub metric: Metric,

    /// Selected week filter, if any
    pub week: Option<u8>,

    /// Weeks that can be selected
    pub available_weeks: Vec<u8>,

    pub points: Vec<MetricPoint>,
}
