//! Overlay geometry derived from the destination and the current origin.

use crate::domain::Coordinate;
use serde::Serialize;

/// Camera span used by the focus actions, in degrees.
pub const DEFAULT_FOCUS_SPAN: f64 = 0.015;

/// Vertex offsets (latitude, longitude) around the destination, in drawing order.
const ARRIVAL_AREA_OFFSETS: [(f64, f64); 5] = [
    (0.0025, 0.0),
    (0.0005, 0.0025),
    (-0.0020, 0.0015),
    (-0.0020, -0.0015),
    (0.0005, -0.0025),
];

/// A closed, non self-intersecting pentagon around the destination.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ArrivalArea([Coordinate; 5]);

impl ArrivalArea {
    pub fn vertices(&self) -> &[Coordinate; 5] {
        &self.0
    }
}

/// A camera viewport centered on a point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Region {
    pub center: Coordinate,
    pub latitude_span: f64,
    pub longitude_span: f64,
}

pub fn build_arrival_area(destination: Coordinate) -> ArrivalArea {
    ArrivalArea(ARRIVAL_AREA_OFFSETS.map(|(latitude_delta, longitude_delta)| destination.offset(latitude_delta, longitude_delta)))
}

/// A straight line, no path finding.
pub fn build_route(origin: Coordinate, destination: Coordinate) -> [Coordinate; 2] {
    [origin, destination]
}

pub fn compute_focus_region(point: Coordinate, span: f64) -> Region {
    Region {
        center: point,
        latitude_span: span,
        longitude_span: span,
    }
}
