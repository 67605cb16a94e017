use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Accepted blood pressure notation: two or three digits, a slash, two or three digits.
/// ASCII digits only.
pub static TENSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2,3}/[0-9]{2,3}$").expect("tension pattern is a valid regex"));

/// A blood pressure reading parsed from its "systolic/diastolic" notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Tension {
    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,
}

impl Tension {
    /// Whether `raw` uses the accepted notation
    pub fn is_well_formed(raw: &str) -> bool {
        TENSION_PATTERN.is_match(raw)
    }

    /// Category of this reading
    pub fn category(&self) -> BloodPressureCategory {
        BloodPressureCategory::from_reading(self.systolic, self.diastolic)
    }
}

impl FromStr for Tension {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if !Self::is_well_formed(raw) {
            return Err(format!("'{}' is not in the form 120/80", raw));
        }
        let (systolic, diastolic) = raw
            .split_once('/')
            .ok_or_else(|| format!("'{}' is missing '/'", raw))?;

        Ok(Tension {
            systolic: systolic.parse().map_err(|_| format!("invalid systolic value in '{}'", raw))?,
            diastolic: diastolic.parse().map_err(|_| format!("invalid diastolic value in '{}'", raw))?,
        })
    }
}

impl fmt::Display for Tension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// Blood pressure category based on measurements
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum BloodPressureCategory {
    /// Normal blood pressure (systolic < 120 and diastolic < 80)
    Normal,

    /// Elevated blood pressure (systolic 120-129 and diastolic < 80)
    Elevated,

    /// Stage 1 Hypertension (systolic 130-139 or diastolic 80-89)
    Hypertension1,

    /// Stage 2 Hypertension (systolic ≥ 140 or diastolic ≥ 90)
    Hypertension2,

    /// Hypertensive crisis (systolic ≥ 180 or diastolic ≥ 120)
    HypertensiveCrisis,
}

impl BloodPressureCategory {
    /// Categorize a single reading
    pub fn from_reading(systolic: u16, diastolic: u16) -> Self {
        if systolic >= 180 || diastolic >= 120 {
            BloodPressureCategory::HypertensiveCrisis
        } else if systolic >= 140 || diastolic >= 90 {
            BloodPressureCategory::Hypertension2
        } else if systolic >= 130 || diastolic >= 80 {
            BloodPressureCategory::Hypertension1
        } else if systolic >= 120 {
            BloodPressureCategory::Elevated
        } else {
            BloodPressureCategory::Normal
        }
    }
}

impl fmt::Display for BloodPressureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BloodPressureCategory::Normal => "Normal",
            BloodPressureCategory::Elevated => "Elevated",
            BloodPressureCategory::Hypertension1 => "Hypertension Stage 1",
            BloodPressureCategory::Hypertension2 => "Hypertension Stage 2",
            BloodPressureCategory::HypertensiveCrisis => "Hypertensive Crisis",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tension_pattern() {
        assert!(Tension::is_well_formed("120/80"));
        assert!(Tension::is_well_formed("99/60"));
        assert!(!Tension::is_well_formed("1200/80"));
        assert!(!Tension::is_well_formed("ab/80"));
        assert!(!Tension::is_well_formed("120-80"));
        assert!(!Tension::is_well_formed("120/80 "));
        // Non-ASCII digits are not accepted
        assert!(!Tension::is_well_formed("١٢٠/80"));
    }

    #[test]
    fn test_parse_tension() {
        let tension: Tension = "135/85".parse().unwrap();
        assert_eq!(tension, Tension { systolic: 135, diastolic: 85 });
        assert_eq!(tension.to_string(), "135/85");
        assert!("135/".parse::<Tension>().is_err());
    }

    #[test]
    fn test_categories() {
        assert_eq!(BloodPressureCategory::from_reading(110, 75), BloodPressureCategory::Normal);
        assert_eq!(BloodPressureCategory::from_reading(125, 75), BloodPressureCategory::Elevated);
        assert_eq!(BloodPressureCategory::from_reading(120, 85), BloodPressureCategory::Hypertension1);
        assert_eq!(BloodPressureCategory::from_reading(145, 75), BloodPressureCategory::Hypertension2);
        assert_eq!(BloodPressureCategory::from_reading(120, 125), BloodPressureCategory::HypertensiveCrisis);
    }

    #[test]
    fn test_category_labels() {
        let tension: Tension = "150/95".parse().unwrap();
        assert_eq!(tension.category().to_string(), "Hypertension Stage 2");
    }
}
