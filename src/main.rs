use crate::app_config::AppConfig;
use crate::platform::{DevicePlatform, LocationPlatform};
use crate::screens::MapScreen;
use crate::shell::{MountedScreen, RenderedScreen, ScreenDeps, Shell};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

mod app_config;
mod coordinate_deserializer;
mod domain;
mod geometry;
mod location_provider;
mod metric_deserializer;
mod platform;
mod screens;
mod shell;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let platform: Arc<dyn LocationPlatform> = Arc::new(DevicePlatform::from_config(&config)?);
    let deps = ScreenDeps::new(platform, &config);
    info!("✅  Initialized location platform");

    let shells = [Shell::Tabs, Shell::Drawer];
    for shell in &shells {
        let entries = shell.screens().map(|entry| format!("{} ({})", entry.label, entry.icon));
        debug!(shell = %shell, menu = shell.open_menu().is_ok(), "🧭 Screens {:?}", entries);
    }

    let mut mounted = shells
        .iter()
        .flat_map(|shell| shell.screens().map(|entry| shell.mount(entry.name, &deps)))
        .collect::<Vec<MountedScreen>>();
    info!("✅  Mounted {} screen(s)", mounted.len());

    let rendered = join_all(mounted.iter_mut().map(settle_with_retry)).await;
    for (screen, rendered) in mounted.iter().zip(rendered) {
        info!(shell = %screen.shell(), screen = ?screen.screen(), "📱 {}", serde_json::to_string(&rendered)?);
        let state = screen.state();
        if let Some(message) = state.error_message() {
            warn!(shell = %screen.shell(), screen = ?screen.screen(), "⚠️ Location unavailable: {}", message);
        } else if state.address().is_none() {
            debug!(shell = %screen.shell(), screen = ?screen.screen(), "🏠 No address for the current position");
        }
        match &rendered {
            RenderedScreen::Map(map) => log_focus_actions(map),
            RenderedScreen::Location(_) => {
                let action = screen.shell().navigate("Map")?;
                debug!(action = ?action, "🧭 Open interactive map");
            }
        }
    }

    for screen in mounted {
        screen.unmount();
    }
    info!("🔥 {} is done", env!("CARGO_PKG_NAME"));

    Ok(())
}

/// Retries once when the position could not be read, like a user tapping "retry".
async fn settle_with_retry(screen: &mut MountedScreen) -> RenderedScreen {
    let rendered = screen.settle().await;
    if !rendered.is_retryable() {
        return rendered;
    }

    warn!(shell = %screen.shell(), screen = ?screen.screen(), "🔁 Position unavailable, retrying once");
    match screen.retry() {
        Ok(()) => screen.settle().await,
        Err(error) => {
            warn!("⚠️ Could not retry: {}", error);
            rendered
        }
    }
}

fn log_focus_actions(map: &MapScreen) {
    match map.focus_on_origin() {
        Some(request) => debug!(request = ?request, "🎥 Focus on origin"),
        None => debug!("🎥 Focus on origin unavailable, no position yet"),
    }
    debug!(request = ?map.focus_on_destination(), "🎥 Focus on destination");
}
