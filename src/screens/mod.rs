mod location_screen;
mod map_screen;

pub use location_screen::LocationScreen;
pub use map_screen::{MapScreen, MapView};
