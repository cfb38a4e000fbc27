use crate::domain::Coordinate;
use serde::de::Error;
use serde::{Deserialize, Deserializer};

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Debug, Deserialize)]
        pub struct Inner {
            latitude: f64,
            longitude: f64,
        }

        let inner = Inner::deserialize(deserializer)?;
        if !(-90.0..=90.0).contains(&inner.latitude) {
            return Err(Error::custom(format!("invalid latitude: {}, must be between -90 and 90", inner.latitude)));
        }

        if !(-180.0..=180.0).contains(&inner.longitude) {
            return Err(Error::custom(format!("invalid longitude: {}, must be between -180 and 180", inner.longitude)));
        }

        Ok(Coordinate::new(inner.latitude, inner.longitude))
    }
}
