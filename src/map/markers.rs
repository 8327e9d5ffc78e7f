use super::{MapView, Popup};
use crate::domain::Park;
use crate::geometry::LatLngBounds;
use crate::style::{GradeTable, HighlightStyle, MarkerStyle};

pub type MarkerId = usize;

/// A styled circle marker for one park
#[derive(Debug, Clone)]
pub struct CircleMarker {
    pub id: MarkerId,
    pub park: Park,
    /// Style computed from the park's acreage
    pub base_style: MarkerStyle,
    /// Style currently drawn
    pub style: MarkerStyle,
    pub popup: Popup,
}

impl CircleMarker {
    pub fn new(id: MarkerId, park: Park, grades: &GradeTable) -> Self {
        let base_style = MarkerStyle::for_acres(park.acres, grades);
        let popup = Popup::for_park(&park);
        Self {
            id,
            park,
            style: base_style.clone(),
            base_style,
            popup,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.style != self.base_style
    }

    /// Whether a screen position falls on the drawn circle, stroke included
    pub fn contains_screen_point(&self, view: &MapView, x: f64, y: f64) -> bool {
        let (cx, cy) = view.to_screen(self.park.position);
        let reach = self.style.radius + self.style.weight / 2.0;
        (x - cx).hypot(y - cy) <= reach
    }
}

/// The park markers, in drawing order
#[derive(Debug, Clone, Default)]
pub struct ParkLayer {
    markers: Vec<CircleMarker>,
    highlight: HighlightStyle,
}

impl ParkLayer {
    pub fn from_parks(parks: Vec<Park>, grades: &GradeTable) -> Self {
        let markers = parks
            .into_iter()
            .enumerate()
            .map(|(id, park)| CircleMarker::new(id, park, grades))
            .collect();

        Self {
            markers,
            highlight: HighlightStyle::default(),
        }
    }

    pub fn markers(&self) -> &[CircleMarker] {
        &self.markers
    }

    pub fn get(&self, id: MarkerId) -> Option<&CircleMarker> {
        self.markers.get(id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn highlight_style(&self) -> &HighlightStyle {
        &self.highlight
    }

    /// Extent of every marker position
    pub fn bounds(&self) -> Option<LatLngBounds> {
        let points: Vec<_> = self.markers.iter().map(|m| m.park.position).collect();
        LatLngBounds::from_points(&points)
    }

    pub fn find_by_name(&self, name: &str) -> Option<MarkerId> {
        let name = name.trim();
        self.markers
            .iter()
            .find(|m| m.park.name.eq_ignore_ascii_case(name))
            .map(|m| m.id)
    }

    /// Apply the hover style. Returns false for unknown ids.
    pub fn highlight(&mut self, id: MarkerId) -> bool {
        match self.markers.get_mut(id) {
            Some(marker) => {
                marker.style = self.highlight.apply(&marker.base_style);
                true
            }
            None => false,
        }
    }

    /// Revert to the computed style. Returns false for unknown ids.
    pub fn reset_style(&mut self, id: MarkerId) -> bool {
        match self.markers.get_mut(id) {
            Some(marker) => {
                marker.style = marker.base_style.clone();
                true
            }
            None => false,
        }
    }

    /// Topmost marker under a screen position
    pub fn hit_test(&self, view: &MapView, x: f64, y: f64) -> Option<MarkerId> {
        self.markers
            .iter()
            .rev()
            .find(|m| m.contains_screen_point(view, x, y))
            .map(|m| m.id)
    }
}
