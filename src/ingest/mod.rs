pub mod parser;

pub use parser::{FeatureError, ParseReport, parse_parks};
