use serde::Serialize;

/// A WGS84 position in degrees.
#[derive(Clone, Copy, Default, Debug, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate { latitude, longitude }
    }

    /// Returns a coordinate moved by the given angular offsets, without any range checks.
    pub fn offset(&self, latitude_delta: f64, longitude_delta: f64) -> Self {
        Coordinate {
            latitude: self.latitude + latitude_delta,
            longitude: self.longitude + longitude_delta,
        }
    }
}
