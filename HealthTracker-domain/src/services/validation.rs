//! Data-entry validation
//!
//! Turns the raw form fields into a typed [`CreateMeasurementRequest`]. Checks
//! run in a fixed order (presence, weight, temperature, tension, week, day) and
//! the first failure is reported.

use thiserror::Error;
use validator::Validate;

use crate::entities::blood_pressure::Tension;
use crate::entities::measurement::{
    CreateMeasurementRequest, MeasurementForm, DAY_RANGE, TEMPERATURE_RANGE_C, WEEK_RANGE,
    WEIGHT_RANGE_KG,
};

/// Field order used for presence checks and error reporting
const FIELD_ORDER: [&str; 5] = ["weight", "temperature", "tension", "week", "day"];

/// Bad user input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field was left empty
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A numeric field could not be parsed
    #[error("{field} is not a valid number: '{value}'")]
    NotANumber { field: &'static str, value: String },

    /// A numeric field is outside its accepted range
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: &'static str, min: f64, max: f64 },

    /// The tension is not written as "120/80"
    #[error("bad format: {field} must look like 120/80")]
    BadFormat { field: &'static str },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field,
            ValidationError::NotANumber { field, .. } => field,
            ValidationError::OutOfRange { field, .. } => field,
            ValidationError::BadFormat { field } => field,
        }
    }
}

/// Validate the raw form and build the typed request
pub fn parse_form(form: &MeasurementForm) -> Result<CreateMeasurementRequest, ValidationError> {
    let weight = form.weight.trim();
    let temperature = form.temperature.trim();
    let tension = form.tension.trim();
    let week = form.week.trim();
    let day = form.day.trim();

    for (field, value) in FIELD_ORDER.into_iter().zip([weight, temperature, tension, week, day]) {
        if value.is_empty() {
            return Err(ValidationError::MissingField(field));
        }
    }

    let weight = parse_decimal("weight", weight)?;
    check_range("weight", weight, WEIGHT_RANGE_KG)?;

    let temperature = parse_decimal("temperature", temperature)?;
    check_range("temperature", temperature, TEMPERATURE_RANGE_C)?;

    if !Tension::is_well_formed(tension) {
        return Err(ValidationError::BadFormat { field: "tension" });
    }

    let week = parse_bounded_integer("week", week, WEEK_RANGE)?;
    let day = parse_bounded_integer("day", day, DAY_RANGE)?;

    Ok(CreateMeasurementRequest {
        weight,
        temperature,
        tension: tension.to_string(),
        week,
        day,
    })
}

/// Validate an already typed request
pub fn validate_create_request(request: &CreateMeasurementRequest) -> Result<(), ValidationError> {
    let Err(errors) = request.validate() else {
        return Ok(());
    };

    let field_errors = errors.field_errors();
    let field = FIELD_ORDER
        .into_iter()
        .find(|field| field_errors.contains_key(field))
        .unwrap_or("request");

    Err(match field {
        "tension" => ValidationError::BadFormat { field: "tension" },
        "weight" => out_of_range("weight", WEIGHT_RANGE_KG),
        "temperature" => out_of_range("temperature", TEMPERATURE_RANGE_C),
        "week" => out_of_range("week", (f64::from(WEEK_RANGE.0), f64::from(WEEK_RANGE.1))),
        "day" => out_of_range("day", (f64::from(DAY_RANGE.0), f64::from(DAY_RANGE.1))),
        other => ValidationError::MissingField(other),
    })
}

fn out_of_range(field: &'static str, (min, max): (f64, f64)) -> ValidationError {
    ValidationError::OutOfRange { field, min, max }
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber {
            field,
            value: raw.to_string(),
        }),
    }
}

fn check_range(field: &'static str, value: f64, range: (f64, f64)) -> Result<(), ValidationError> {
    if value < range.0 || value > range.1 {
        return Err(out_of_range(field, range));
    }
    Ok(())
}

fn parse_bounded_integer(field: &'static str, raw: &str, (min, max): (u8, u8)) -> Result<u8, ValidationError> {
    let value = raw.parse::<i64>().map_err(|_| ValidationError::NotANumber {
        field,
        value: raw.to_string(),
    })?;

    if value < i64::from(min) || value > i64::from(max) {
        return Err(out_of_range(field, (f64::from(min), f64::from(max))));
    }

    u8::try_from(value).map_err(|_| out_of_range(field, (f64::from(min), f64::from(max))))
}
