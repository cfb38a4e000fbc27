use crate::app_config::{AppConfig, Map};
use crate::domain::{Coordinate, LocationState};
use crate::location_provider::{AcquisitionHandle, LocationProvider, RetryError};
use crate::platform::LocationPlatform;
use crate::screens::{LocationScreen, MapScreen, MapView};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ScreenName {
    Main,
    Map,
}

/// The two navigation variants wrapping the same screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Tabs,
    Drawer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenEntry {
    pub name: ScreenName,
    pub label: &'static str,
    pub icon: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationAction {
    Navigate(ScreenName),
    OpenMenu,
}

#[derive(Error, Debug, PartialEq)]
pub enum ShellError {
    #[error("unknown screen '{0}'")]
    UnknownScreen(String),
    #[error("the {0} shell has no side menu")]
    MenuUnavailable(Shell),
}

/// Everything a screen needs, shared by both shells.
#[derive(Clone, Debug)]
pub struct ScreenDeps {
    provider: LocationProvider,
    destination: Coordinate,
    map: Map,
}

impl ScreenDeps {
    pub fn new(platform: Arc<dyn LocationPlatform>, config: &AppConfig) -> Self {
        ScreenDeps {
            provider: LocationProvider::new(platform, config.acquisition().clone()),
            destination: config.destination(),
            map: config.map().clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RenderedScreen {
    Location(LocationScreen),
    Map(MapScreen),
}

impl RenderedScreen {
    /// True when the screen shows a failure that offers a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            RenderedScreen::Location(LocationScreen::Failed { retryable, .. }) => *retryable,
            RenderedScreen::Map(map) => matches!(map.view(), MapView::Failed { retryable: true, .. }),
            _ => false,
        }
    }
}

impl FromStr for ScreenName {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Main" => Ok(ScreenName::Main),
            "Map" => Ok(ScreenName::Map),
            _ => Err(ShellError::UnknownScreen(s.to_string())),
        }
    }
}

impl Display for Shell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Shell::Tabs => write!(f, "tabs"),
            Shell::Drawer => write!(f, "drawer"),
        }
    }
}

impl Shell {
    pub fn screens(&self) -> [ScreenEntry; 2] {
        let (home_icon, map_icon) = match self {
            Shell::Tabs => ("home", "map"),
            Shell::Drawer => ("home-outline", "map-outline"),
        };

        [
            ScreenEntry {
                name: ScreenName::Main,
                label: "Home",
                icon: home_icon,
            },
            ScreenEntry {
                name: ScreenName::Map,
                label: "Map",
                icon: map_icon,
            },
        ]
    }

    pub fn navigate(&self, name: &str) -> Result<NavigationAction, ShellError> {
        let screen = name.parse::<ScreenName>()?;
        debug!(shell = %self, "🧭 Navigating to {:?}", screen);
        Ok(NavigationAction::Navigate(screen))
    }

    pub fn open_menu(&self) -> Result<NavigationAction, ShellError> {
        match self {
            Shell::Drawer => Ok(NavigationAction::OpenMenu),
            Shell::Tabs => Err(ShellError::MenuUnavailable(*self)),
        }
    }

    /// Mounts a screen with its own location acquisition.
    #[instrument(skip(self, deps), fields(shell = %self))]
    pub fn mount(&self, screen: ScreenName, deps: &ScreenDeps) -> MountedScreen {
        info!("📱 Mounting {:?} screen", screen);
        MountedScreen {
            shell: *self,
            screen,
            handle: deps.provider.start(),
            destination: deps.destination,
            map: deps.map.clone(),
        }
    }
}

#[derive(Debug)]
pub struct MountedScreen {
    shell: Shell,
    screen: ScreenName,
    handle: AcquisitionHandle,
    destination: Coordinate,
    map: Map,
}

impl MountedScreen {
    pub fn shell(&self) -> Shell {
        self.shell
    }

    pub fn screen(&self) -> ScreenName {
        self.screen
    }

    pub fn state(&self) -> LocationState {
        self.handle.state()
    }

    pub fn render(&self) -> RenderedScreen {
        let state = self.handle.state();
        match self.screen {
            ScreenName::Main => RenderedScreen::Location(LocationScreen::from_state(&state)),
            ScreenName::Map => RenderedScreen::Map(MapScreen::build(&state, self.destination, &self.map)),
        }
    }

    /// Waits for the acquisition to settle and renders the result.
    pub async fn settle(&mut self) -> RenderedScreen {
        self.handle.settled().await;
        self.render()
    }

    pub fn retry(&mut self) -> Result<(), RetryError> {
        self.handle.retry()
    }

    /// Unmounting cancels whatever the acquisition is still waiting for.
    pub fn unmount(mut self) {
        self.handle.cancel();
    }
}
