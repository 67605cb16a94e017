use serde::{Deserialize, Deserializer, Serialize};

/// Storage model for a row of the `health_data` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    /// Server-assigned identifier (uuid or serial, kept opaque)
    #[serde(deserialize_with = "deserialize_opaque_id")]
    pub id: String,

    /// Body weight in kilograms; other clients may leave it null
    #[serde(default)]
    pub weight: Option<f64>,

    /// Body temperature in degrees Celsius
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Blood pressure as "systolic/diastolic" in mmHg
    #[serde(default)]
    pub tension: Option<String>,

    /// Week number the measurement belongs to
    pub week: u8,

    /// Day of the week the measurement belongs to
    pub day: u8,

    /// Server-assigned date of the measurement
    #[serde(default)]
    pub date: Option<String>,

    /// Row creation time, used for ordering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Insert payload; the store assigns `id`, `date` and `created_at`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMeasurementRow {
    /// Body weight in kilograms
    pub weight: f64,

    /// Body temperature in degrees Celsius
    pub temperature: f64,

    /// Blood pressure as "systolic/diastolic" in mmHg
    pub tension: String,

    /// Week number the measurement belongs to
    pub week: u8,

    /// Day of the week the measurement belongs to
    pub day: u8,
}

/// Accept ids encoded either as JSON strings or numbers
fn deserialize_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!("unsupported id value: {}", other))),
    }
}
