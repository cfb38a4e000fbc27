mod acquire;
mod handle;

pub use acquire::acquire;
pub use handle::{AcquisitionHandle, RetryError};

use crate::app_config::Acquisition;
use crate::platform::LocationPlatform;
use std::sync::Arc;

/// Acquires the current position and address through a [`LocationPlatform`].
#[derive(Clone, Debug)]
pub struct LocationProvider {
    platform: Arc<dyn LocationPlatform>,
    settings: Acquisition,
}

impl LocationProvider {
    pub fn new(platform: Arc<dyn LocationPlatform>, settings: Acquisition) -> Self {
        LocationProvider { platform, settings }
    }

    /// Spawns a new acquisition. Every handle owns its own state.
    pub fn start(&self) -> AcquisitionHandle {
        AcquisitionHandle::spawn(self.platform.clone(), self.settings.clone())
    }
}
