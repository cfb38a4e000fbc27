use crate::domain::Coordinate;
use crate::geometry::DEFAULT_FOCUS_SPAN;
use crate::metric_deserializer;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    destination: Coordinate,
    map: Map,
    acquisition: Acquisition,
    geocoder: Geocoder,
    device: Device,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("WAYPOINT").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn destination(&self) -> Coordinate {
        self.destination
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn acquisition(&self) -> &Acquisition {
        &self.acquisition
    }

    pub fn geocoder(&self) -> &Geocoder {
        &self.geocoder
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Map {
    #[serde(default = "default_focus_span")]
    focus_span_degrees: f64,
    #[serde(with = "humantime_serde")]
    camera_animation: Duration,
    accuracy_circle_radius_m: f64,
}

fn default_focus_span() -> f64 {
    DEFAULT_FOCUS_SPAN
}

impl Map {
    pub fn focus_span_degrees(&self) -> f64 {
        self.focus_span_degrees
    }

    pub fn camera_animation(&self) -> Duration {
        self.camera_animation
    }

    pub fn accuracy_circle_radius_m(&self) -> f64 {
        self.accuracy_circle_radius_m
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Acquisition {
    #[serde(with = "humantime_serde")]
    permission_timeout: Duration,
    #[serde(with = "humantime_serde")]
    fix_timeout: Duration,
    fix_attempts: usize,
    #[serde(with = "humantime_serde")]
    fix_retry_delay: Duration,
    #[serde(with = "humantime_serde")]
    fix_retry_max_delay: Duration,
    #[serde(with = "humantime_serde")]
    geocode_timeout: Duration,
}

impl Acquisition {
    pub fn permission_timeout(&self) -> Duration {
        self.permission_timeout
    }

    pub fn fix_timeout(&self) -> Duration {
        self.fix_timeout
    }

    /// Total number of fix reads in one acquisition, at least one.
    pub fn fix_attempts(&self) -> usize {
        self.fix_attempts.max(1)
    }

    /// Base wait between fix reads. Retry `n` waits at most `fix_retry_delay * 2^n`, the
    /// actual wait is drawn uniformly below that bound.
    pub fn fix_retry_delay(&self) -> Duration {
        self.fix_retry_delay
    }

    /// Upper bound for a single wait between fix reads.
    pub fn fix_retry_max_delay(&self) -> Duration {
        self.fix_retry_max_delay
    }

    pub fn geocode_timeout(&self) -> Duration {
        self.geocode_timeout
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Geocoder {
    url: String,
    user_agent: String,
}

impl Geocoder {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// The simulated position sensor of the device.
#[derive(Clone, Debug, Deserialize)]
pub struct Device {
    permission_granted: bool,
    #[serde(default = "default_true")]
    sensor_available: bool,
    position: Coordinate,
    altitude_m: Option<f64>,
    #[serde(default, deserialize_with = "metric_deserializer::non_negative")]
    accuracy_m: Option<f64>,
    #[serde(default, deserialize_with = "metric_deserializer::non_negative")]
    speed_mps: Option<f64>,
    #[serde(default, deserialize_with = "metric_deserializer::heading")]
    heading_deg: Option<f64>,
}

fn default_true() -> bool {
    true
}

impl Device {
    pub fn permission_granted(&self) -> bool {
        self.permission_granted
    }

    pub fn sensor_available(&self) -> bool {
        self.sensor_available
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn altitude_m(&self) -> Option<f64> {
        self.altitude_m
    }

    pub fn accuracy_m(&self) -> Option<f64> {
        self.accuracy_m
    }

    pub fn speed_mps(&self) -> Option<f64> {
        self.speed_mps
    }

    pub fn heading_deg(&self) -> Option<f64> {
        self.heading_deg
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                destination: Coordinate::new(-21.5494, -45.4191),
                map: Map {
                    focus_span_degrees: 0.015,
                    camera_animation: Duration::from_millis(1000),
                    accuracy_circle_radius_m: 100.0,
                },
                acquisition: Acquisition {
                    permission_timeout: Duration::from_secs(5),
                    fix_timeout: Duration::from_secs(5),
                    fix_attempts: 1,
                    fix_retry_delay: Duration::from_millis(1),
                    fix_retry_max_delay: Duration::from_millis(10),
                    geocode_timeout: Duration::from_secs(5),
                },
                geocoder: Geocoder {
                    url: "https://geocoder.url".to_string(),
                    user_agent: "waypoint-test".to_string(),
                },
                device: Device {
                    permission_granted: true,
                    sensor_available: true,
                    position: Coordinate::new(-21.55, -45.42),
                    altitude_m: Some(872.4),
                    accuracy_m: Some(12.5),
                    speed_mps: None,
                    heading_deg: None,
                },
            },
        }
    }

    pub fn geocoder_url(mut self, url: String) -> Self {
        self.config.geocoder.url = url;
        self
    }

    pub fn permission_timeout(mut self, timeout: Duration) -> Self {
        self.config.acquisition.permission_timeout = timeout;
        self
    }

    pub fn fix_attempts(mut self, attempts: usize) -> Self {
        self.config.acquisition.fix_attempts = attempts;
        self
    }

    pub fn fix_timeout(mut self, timeout: Duration) -> Self {
        self.config.acquisition.fix_timeout = timeout;
        self
    }

    pub fn geocode_timeout(mut self, timeout: Duration) -> Self {
        self.config.acquisition.geocode_timeout = timeout;
        self
    }

    pub fn permission_granted(mut self, granted: bool) -> Self {
        self.config.device.permission_granted = granted;
        self
    }

    pub fn sensor_available(mut self, available: bool) -> Self {
        self.config.device.sensor_available = available;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
