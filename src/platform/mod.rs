mod device;
mod nominatim;
#[cfg(test)]
pub mod scripted;

use crate::domain::{Address, Coordinate, GeoFix};
use async_trait::async_trait;
use reqwest::header;
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;

pub use device::DevicePlatform;
pub use nominatim::{NominatimGeocoder, new_client};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// The permission, position and geocoding services of the host platform.
#[async_trait]
pub trait LocationPlatform: Debug + Send + Sync {
    async fn request_foreground_permission(&self) -> Result<Permission, PlatformError>;

    /// Reads a single current position, no continuous tracking.
    async fn current_fix(&self) -> Result<GeoFix, PlatformError>;

    /// Returns the candidate addresses for the coordinate, possibly none.
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Vec<Address>, PlatformError>;
}

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("location fix unavailable: {0}")]
    FixUnavailable(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
}
