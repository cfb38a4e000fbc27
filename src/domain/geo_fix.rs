use crate::domain::Coordinate;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single location reading at one instant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeoFix {
    pub coordinate: Coordinate,
    pub altitude: Option<f64>, // In meters
    pub accuracy: Option<f64>, // In meters
    pub speed: Option<f64>,    // In meters per second
    pub heading: Option<f64>,  // In degrees, 0 is north
    pub timestamp: DateTime<Utc>,
}

impl GeoFix {
    pub fn new(coordinate: Coordinate, timestamp: DateTime<Utc>) -> Self {
        GeoFix {
            coordinate,
            altitude: None,
            accuracy: None,
            speed: None,
            heading: None,
            timestamp,
        }
    }
}
