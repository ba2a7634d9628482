use serde::{Deserialize, Serialize};

/// Meters per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE: f64 = 111_319.5;

/// Square feet per square meter.
pub const SQFT_PER_SQM: f64 = 10.764;

/// Feet per meter.
pub const FEET_PER_METER: f64 = 3.28084;

/// Unit system for planar areas computed on raw lng/lat.
///
/// The conversion treats a degree as `METERS_PER_DEGREE` on both axes, which
/// is only exact at the equator. Areas off the equator are overestimated by
/// roughly `1 / cos(latitude)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    SquareDegrees,
    SquareMeters,
    #[default]
    SquareFeet,
}

impl AreaUnit {
    /// Multiplier from square degrees into this unit.
    pub fn factor(self) -> f64 {
        match self {
            AreaUnit::SquareDegrees => 1.0,
            AreaUnit::SquareMeters => METERS_PER_DEGREE * METERS_PER_DEGREE,
            AreaUnit::SquareFeet => METERS_PER_DEGREE * METERS_PER_DEGREE * SQFT_PER_SQM,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AreaUnit::SquareDegrees => "square_degrees",
            AreaUnit::SquareMeters => "square_meters",
            AreaUnit::SquareFeet => "square_feet",
        }
    }
}

/// Unit system for lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearUnit {
    Meters,
    #[default]
    Feet,
}

impl LinearUnit {
    /// Multiplier from meters into this unit.
    pub fn factor(self) -> f64 {
        match self {
            LinearUnit::Meters => 1.0,
            LinearUnit::Feet => FEET_PER_METER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LinearUnit::Meters => "meters",
            LinearUnit::Feet => "feet",
        }
    }
}

/// Units a boundary's measurements are expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementUnits {
    pub area: AreaUnit,
    pub perimeter: LinearUnit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_feet_factor_matches_constants() {
        let expected = 111_319.5_f64.powi(2) * 10.764;
        assert!((AreaUnit::SquareFeet.factor() - expected).abs() < 1e-3);
        assert_eq!(AreaUnit::SquareDegrees.factor(), 1.0);
    }

    #[test]
    fn default_units_are_imperial() {
        assert_eq!(AreaUnit::default(), AreaUnit::SquareFeet);
        assert_eq!(LinearUnit::default(), LinearUnit::Feet);
        assert_eq!(AreaUnit::default().as_str(), "square_feet");

        let units = serde_json::to_value(MeasurementUnits::default()).unwrap();
        assert_eq!(units, serde_json::json!({ "area": "square_feet", "perimeter": "feet" }));
    }

    #[test]
    fn feet_per_meter() {
        assert!((LinearUnit::Feet.factor() * 0.3048 - 1.0).abs() < 1e-5);
        assert_eq!(LinearUnit::Meters.as_str(), "meters");
    }
}
