use crate::app_config::{AppConfig, Device};
use crate::domain::{Address, Coordinate, GeoFix};
use crate::platform::{LocationPlatform, NominatimGeocoder, Permission, PlatformError, new_client};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, instrument};

/// Platform backed by the configured device sensor and a Nominatim reverse geocoder.
#[derive(Debug)]
pub struct DevicePlatform {
    device: Device,
    geocoder: NominatimGeocoder,
}

impl DevicePlatform {
    pub fn new(device: Device, geocoder: NominatimGeocoder) -> Self {
        DevicePlatform { device, geocoder }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, PlatformError> {
        let client = new_client(config)?;
        let geocoder = NominatimGeocoder::new(client, config.geocoder().url());
        Ok(DevicePlatform::new(config.device().clone(), geocoder))
    }
}

#[async_trait]
impl LocationPlatform for DevicePlatform {
    #[instrument(skip(self))]
    async fn request_foreground_permission(&self) -> Result<Permission, PlatformError> {
        let permission = if self.device.permission_granted() {
            Permission::Granted
        } else {
            Permission::Denied
        };
        info!(permission = ?permission, "🔐 Foreground location permission answered");
        Ok(permission)
    }

    #[instrument(skip(self))]
    async fn current_fix(&self) -> Result<GeoFix, PlatformError> {
        if !self.device.sensor_available() {
            return Err(PlatformError::FixUnavailable("position sensor is not available".to_string()));
        }

        Ok(GeoFix {
            altitude: self.device.altitude_m(),
            accuracy: self.device.accuracy_m(),
            speed: self.device.speed_mps(),
            heading: self.device.heading_deg(),
            ..GeoFix::new(self.device.position(), Utc::now())
        })
    }

    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Vec<Address>, PlatformError> {
        self.geocoder.reverse(coordinate).await
    }
}
