pub mod fetch;

pub use fetch::{fetch_geojson, load_geojson, parse_feature_collection};
