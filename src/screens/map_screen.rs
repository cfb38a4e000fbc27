use crate::app_config::Map;
use crate::domain::{Coordinate, LocationState};
use crate::geometry::{Region, build_arrival_area, build_route, compute_focus_region};
use serde::Serialize;

pub const LOCATING_MESSAGE: &str = "Locating you...";

const ROUTE_COLOR: &str = "#4F46E5";
const ROUTE_WIDTH: u32 = 4;
const ACCURACY_FILL: &str = "rgba(79, 70, 229, 0.2)";
const ARRIVAL_AREA_FILL: &str = "rgba(34, 197, 94, 0.2)";
const ARRIVAL_AREA_LEGEND: &str = "rgba(34, 197, 94, 0.5)";
const TRANSPARENT: &str = "transparent";

/// View model of the map screen.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapScreen {
    destination: Coordinate,
    focus_span: f64,
    camera_animation_ms: u64,
    view: MapView,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum MapView {
    Locating { message: &'static str },
    Failed { message: String, retryable: bool },
    Ready(MapScene),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapScene {
    pub origin: Coordinate,
    pub initial_region: Region,
    pub overlays: Vec<Overlay>,
    pub legend: Vec<LegendEntry>,
}

/// Overlay descriptions handed to the map surface, in drawing order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    Circle {
        center: Coordinate,
        radius_m: f64,
        fill_color: &'static str,
        stroke_color: &'static str,
    },
    Marker {
        coordinate: Coordinate,
        title: Option<&'static str>,
        pin_color: Option<&'static str>,
    },
    Polyline {
        coordinates: Vec<Coordinate>,
        stroke_color: &'static str,
        stroke_width: u32,
    },
    Polygon {
        coordinates: Vec<Coordinate>,
        fill_color: &'static str,
        stroke_color: &'static str,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: &'static str,
}

/// Asks the map surface to animate its camera to a region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CameraRequest {
    pub region: Region,
    pub duration_ms: u64,
}

impl MapScreen {
    pub fn build(state: &LocationState, destination: Coordinate, settings: &Map) -> Self {
        let view = match state {
            LocationState::Denied { message } => MapView::Failed {
                message: message.clone(),
                retryable: false,
            },
            LocationState::FixUnavailable { message } => MapView::Failed {
                message: message.clone(),
                retryable: true,
            },
            _ => match state.fix() {
                Some(fix) => MapView::Ready(MapScene::new(fix.coordinate, destination, settings)),
                None => MapView::Locating { message: LOCATING_MESSAGE },
            },
        };

        MapScreen {
            destination,
            focus_span: settings.focus_span_degrees(),
            camera_animation_ms: settings.camera_animation().as_millis() as u64,
            view,
        }
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn scene(&self) -> Option<&MapScene> {
        match &self.view {
            MapView::Ready(scene) => Some(scene),
            _ => None,
        }
    }

    /// Does nothing until the origin is known.
    pub fn focus_on_origin(&self) -> Option<CameraRequest> {
        self.scene().map(|scene| self.camera_request(scene.origin))
    }

    pub fn focus_on_destination(&self) -> CameraRequest {
        self.camera_request(self.destination)
    }

    fn camera_request(&self, point: Coordinate) -> CameraRequest {
        CameraRequest {
            region: compute_focus_region(point, self.focus_span),
            duration_ms: self.camera_animation_ms,
        }
    }
}

impl MapScene {
    fn new(origin: Coordinate, destination: Coordinate, settings: &Map) -> Self {
        let overlays = vec![
            Overlay::Circle {
                center: origin,
                radius_m: settings.accuracy_circle_radius_m(),
                fill_color: ACCURACY_FILL,
                stroke_color: TRANSPARENT,
            },
            Overlay::Marker {
                coordinate: origin,
                title: None,
                pin_color: None,
            },
            Overlay::Marker {
                coordinate: destination,
                title: Some("Destination"),
                pin_color: Some("red"),
            },
            Overlay::Polyline {
                coordinates: build_route(origin, destination).to_vec(),
                stroke_color: ROUTE_COLOR,
                stroke_width: ROUTE_WIDTH,
            },
            Overlay::Polygon {
                coordinates: build_arrival_area(destination).vertices().to_vec(),
                fill_color: ARRIVAL_AREA_FILL,
                stroke_color: TRANSPARENT,
            },
        ];

        MapScene {
            origin,
            initial_region: compute_focus_region(origin, settings.focus_span_degrees()),
            overlays,
            legend: vec![
                LegendEntry {
                    color: ROUTE_COLOR,
                    label: "Route to destination",
                },
                LegendEntry {
                    color: ARRIVAL_AREA_LEGEND,
                    label: "Arrival area",
                },
            ],
        }
    }
}
