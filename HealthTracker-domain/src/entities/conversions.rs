use health_tracker_data::models::measurement::{MeasurementRow, NewMeasurementRow};

use crate::entities::measurement::{CreateMeasurementRequest, MeasurementRecord};

// Conversion functions between domain entities and data models
// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Convert from a stored row to a domain record
pub fn convert_to_domain_record(row: MeasurementRow) -> MeasurementRecord {
    MeasurementRecord {
        id: row.id,
        weight: row.weight,
        temperature: row.temperature,
        tension: row.tension,
        week: row.week,
        day: row.day,
        date: row.date,
    }
}

/// Convert a validated create request to the insert payload
pub fn convert_to_data_new_row(request: &CreateMeasurementRequest) -> NewMeasurementRow {
    NewMeasurementRow {
        weight: request.weight,
        temperature: request.temperature,
        tension: request.tension.clone(),
        week: request.week,
        day: request.day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_to_domain_record_drops_created_at() {
        let row = MeasurementRow {
            id: "abc".to_string(),
            weight: Some(70.0),
            temperature: None,
            tension: Some("120/80".to_string()),
            week: 4,
            day: 2,
            date: Some("2024-02-01".to_string()),
            created_at: Some("2024-02-01T09:00:00+00:00".to_string()),
        };

        let record = convert_to_domain_record(row);
        assert_eq!(record.id, "abc");
        assert_eq!(record.week, 4);
        assert_eq!(record.day, 2);
        assert_eq!(record.date.as_deref(), Some("2024-02-01"));
        assert!(record.temperature.is_none());
    }

    #[test]
    fn test_convert_to_data_new_row_copies_every_field() {
        let request = CreateMeasurementRequest {
            weight: 81.2,
            temperature: 37.1,
            tension: "130/85".to_string(),
            week: 12,
            day: 6,
        };

        let row = convert_to_data_new_row(&request);
        assert_eq!(row.weight, 81.2);
        assert_eq!(row.temperature, 37.1);
        assert_eq!(row.tension, "130/85");
        assert_eq!(row.week, 12);
        assert_eq!(row.day, 6);
    }
}
