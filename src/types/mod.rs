mod geo_point;
mod units;

pub use geo_point::GeoPoint;
pub use units::{AreaUnit, LinearUnit, MeasurementUnits, FEET_PER_METER, METERS_PER_DEGREE, SQFT_PER_SQM};
