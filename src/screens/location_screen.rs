use crate::domain::{Address, GeoFix, LocationState};
use chrono::Local;
use serde::Serialize;

pub const LOADING_MESSAGE: &str = "Acquiring GPS...";
pub const ADDRESS_NOT_FOUND: &str = "Address not found";
const NOT_AVAILABLE: &str = "N/A";
const MPS_TO_KMH: f64 = 3.6;

/// View model of the screen showing coordinates, metrics and the address.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum LocationScreen {
    Loading { message: &'static str },
    Failed { message: String, retryable: bool },
    Loaded(LocationReport),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocationReport {
    pub latitude: String,
    pub longitude: String,
    pub altitude: String,
    pub accuracy: String,
    pub speed: String,
    pub heading: String,
    pub address_lines: Vec<String>,
    pub address_pending: bool,
    pub last_updated: String,
}

impl LocationScreen {
    pub fn from_state(state: &LocationState) -> Self {
        match state {
            LocationState::Pending => LocationScreen::Loading { message: LOADING_MESSAGE },
            LocationState::Denied { message } => LocationScreen::Failed {
                message: message.clone(),
                retryable: false,
            },
            LocationState::FixUnavailable { message } => LocationScreen::Failed {
                message: message.clone(),
                retryable: true,
            },
            LocationState::FixAcquired { fix } => LocationScreen::Loaded(LocationReport::new(fix, None, true)),
            LocationState::Ready { fix, address } => {
                let address_lines = address.as_ref().filter(|address| !address.is_empty()).map(Address::lines);
                LocationScreen::Loaded(LocationReport::new(fix, address_lines, false))
            }
        }
    }
}

impl LocationReport {
    fn new(fix: &GeoFix, address_lines: Option<Vec<String>>, address_pending: bool) -> Self {
        LocationReport {
            latitude: format!("{:.6}°", fix.coordinate.latitude),
            longitude: format!("{:.6}°", fix.coordinate.longitude),
            altitude: non_zero(fix.altitude).map_or_else(|| NOT_AVAILABLE.to_string(), |altitude| format!("{:.1} m", altitude)),
            accuracy: fix.accuracy.map_or_else(|| NOT_AVAILABLE.to_string(), |accuracy| format!("±{:.1} m", accuracy)),
            speed: non_zero(fix.speed).map_or_else(|| "0 km/h".to_string(), |speed| format!("{:.1} km/h", speed * MPS_TO_KMH)),
            heading: non_zero(fix.heading).map_or_else(|| NOT_AVAILABLE.to_string(), |heading| format!("{:.0}°", heading)),
            address_lines: address_lines.unwrap_or_else(|| vec![ADDRESS_NOT_FOUND.to_string()]),
            address_pending,
            last_updated: fix.timestamp.with_timezone(&Local).format("%H:%M:%S").to_string(),
        }
    }
}

// A zero reading means the sensor did not report the metric.
fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|value| *value != 0.0)
}
