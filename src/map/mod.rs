//! The map object: view, basemap, park markers and their interaction.

pub mod events;
pub mod markers;
pub mod popup;
pub mod tiles;
pub mod view;

pub use events::{EventPropagation, MapEvent};
pub use markers::{CircleMarker, MarkerId, ParkLayer};
pub use popup::Popup;
pub use tiles::{TileLayer, TileRef};
pub use view::MapView;

use crate::domain::Park;
use crate::geometry::LatLngBounds;
use crate::style::{GradeTable, Legend};

/// Default screen padding kept around fitted bounds
pub const DEFAULT_PADDING: f64 = 20.0;

/// A park map ready to render or interact with
#[derive(Debug, Clone)]
pub struct ParkMap {
    view: MapView,
    tiles: TileLayer,
    layer: ParkLayer,
    legend: Legend,
    padding: f64,
    hovered: Option<MarkerId>,
}

impl ParkMap {
    /// Build the marker layer and legend for `parks`
    ///
    /// The view zoom is capped at the tile layer's maximum zoom.
    pub fn new(mut view: MapView, tiles: TileLayer, parks: Vec<Park>, grades: &GradeTable) -> Self {
        if view.zoom() > tiles.max_zoom() {
            view.set_view(view.center(), tiles.max_zoom());
        }

        Self {
            view,
            layer: ParkLayer::from_parks(parks, grades),
            legend: Legend::from_grades(grades),
            tiles,
            padding: DEFAULT_PADDING,
            hovered: None,
        }
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn tiles(&self) -> &TileLayer {
        &self.tiles
    }

    pub fn layer(&self) -> &ParkLayer {
        &self.layer
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.hovered
    }

    /// Marker id of the park with this name, ignoring case
    pub fn find(&self, name: &str) -> Option<MarkerId> {
        self.layer.find_by_name(name)
    }

    /// Fit the view to every park. Returns false when there are none.
    pub fn fit_all(&mut self) -> bool {
        match self.layer.bounds() {
            Some(bounds) => {
                self.fit(&bounds);
                true
            }
            None => false,
        }
    }

    fn fit(&mut self, bounds: &LatLngBounds) {
        self.view
            .fit_bounds(bounds, self.padding, self.tiles.max_zoom());
    }

    pub fn dispatch(&mut self, event: MapEvent) -> EventPropagation {
        match event {
            MapEvent::PointerOver(id) => {
                if !self.layer.highlight(id) {
                    return EventPropagation::Propagate;
                }
                self.hovered = Some(id);
                EventPropagation::Consume
            }
            MapEvent::PointerOut(id) => {
                if !self.layer.reset_style(id) {
                    return EventPropagation::Propagate;
                }
                if self.hovered == Some(id) {
                    self.hovered = None;
                }
                EventPropagation::Consume
            }
            MapEvent::Click(id) => {
                let Some(marker) = self.layer.get(id) else {
                    return EventPropagation::Propagate;
                };
                let bounds = LatLngBounds::from_point(marker.park.position);
                log::debug!("Zooming to {}", marker.park.name);
                self.fit(&bounds);
                EventPropagation::Consume
            }
            MapEvent::PointerMove { x, y } => {
                let hit = self.layer.hit_test(&self.view, x, y);
                if hit != self.hovered {
                    if let Some(prev) = self.hovered {
                        self.dispatch(MapEvent::PointerOut(prev));
                    }
                    if let Some(id) = hit {
                        self.dispatch(MapEvent::PointerOver(id));
                    }
                }
                match hit {
                    Some(_) => EventPropagation::Consume,
                    None => EventPropagation::Propagate,
                }
            }
        }
    }
}
