//! Marker styling: acreage grades, circle radius and the legend built from them.

pub mod grades;
pub mod legend;
pub mod marker;

pub use grades::{Grade, GradeError, GradeTable};
pub use legend::{Legend, LegendItem};
pub use marker::{HighlightStyle, MarkerStyle, radius_for};
