use serde::de::Error;
use serde::{Deserialize, Deserializer};

/// Optional sensor reading that must not be negative, such as accuracy or speed.
pub fn non_negative<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    match value {
        Some(value) if !(value >= 0.0) => Err(Error::custom(format!("invalid metric: {}, must not be negative", value))),
        _ => Ok(value),
    }
}

/// Optional compass heading in degrees, 0 inclusive to 360 exclusive.
pub fn heading<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    match value {
        Some(value) if !(0.0..360.0).contains(&value) => Err(Error::custom(format!("invalid heading: {}, must be between 0 and 360", value))),
        _ => Ok(value),
    }
}
