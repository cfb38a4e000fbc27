mod address;
mod coordinate;
mod geo_fix;
mod location_state;

pub use address::Address;
pub use coordinate::Coordinate;
pub use geo_fix::GeoFix;
pub use location_state::{LocationState, LocationStatus};
#[cfg(test)]
pub use location_state::PERMISSION_DENIED_MESSAGE;
