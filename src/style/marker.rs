use super::GradeTable;

/// Radius used for parks with no recorded acreage
pub const MIN_RADIUS: f64 = 1.0;

/// Multiplier applied to the square root of the acreage
pub const RADIUS_SCALE: f64 = 2.0;

/// Display radius for a park of the given size
///
/// Marker area grows with acreage rather than marker radius. A zero-acre
/// park still gets a visible marker. Negative sizes are rejected at ingestion
/// and are treated like zero here.
pub fn radius_for(acres: f64) -> f64 {
    if acres > 0.0 {
        RADIUS_SCALE * acres.sqrt()
    } else {
        MIN_RADIUS
    }
}

/// Visual style of a circle marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill_color: String,
    pub stroke_color: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl MarkerStyle {
    /// Base style for a park, from its grade color and scaled radius
    pub fn for_acres(acres: f64, grades: &GradeTable) -> Self {
        Self {
            radius: radius_for(acres),
            fill_color: grades.color_for(acres).to_string(),
            stroke_color: "#000".to_string(),
            weight: 1.0,
            opacity: 1.0,
            fill_opacity: 0.8,
        }
    }
}

/// Fixed style applied while a marker is hovered
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightStyle {
    pub stroke_color: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl HighlightStyle {
    /// Overlay the highlight on `base`, keeping its radius and fill color
    pub fn apply(&self, base: &MarkerStyle) -> MarkerStyle {
        MarkerStyle {
            stroke_color: self.stroke_color.clone(),
            weight: self.weight,
            opacity: self.opacity,
            fill_opacity: self.fill_opacity,
            ..base.clone()
        }
    }
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            stroke_color: "#666".to_string(),
            weight: 5.0,
            opacity: 1.0,
            fill_opacity: 0.7,
        }
    }
}
