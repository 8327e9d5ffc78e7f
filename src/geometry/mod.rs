pub mod bounds;
pub mod projection;

pub use bounds::LatLngBounds;
pub use projection::{MAX_LATITUDE, WebMercator};
