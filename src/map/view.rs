use crate::geometry::{LatLngBounds, WebMercator};
use geo::Point;

/// Visible window onto the map: center, integer zoom and pixel size
#[derive(Debug, Clone)]
pub struct MapView {
    center: Point<f64>,
    zoom: u8,
    width: u32,
    height: u32,
    projection: WebMercator,
}

impl MapView {
    pub fn new(center: Point<f64>, zoom: u8, width: u32, height: u32, tile_size: u32) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
            projection: WebMercator::new(tile_size),
        }
    }

    pub fn center(&self) -> Point<f64> {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_view(&mut self, center: Point<f64>, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
    }

    /// World pixel position of the top-left screen corner
    pub(crate) fn origin(&self) -> (f64, f64) {
        let (cx, cy) = self.projection.project(self.center, self.zoom as f64);
        (cx - self.width as f64 / 2.0, cy - self.height as f64 / 2.0)
    }

    /// Screen pixel position of a WGS84 point
    pub fn to_screen(&self, point: Point<f64>) -> (f64, f64) {
        let (x, y) = self.projection.project(point, self.zoom as f64);
        let (ox, oy) = self.origin();
        (x - ox, y - oy)
    }

    /// WGS84 point under a screen pixel position
    pub fn from_screen(&self, x: f64, y: f64) -> Point<f64> {
        let (ox, oy) = self.origin();
        self.projection.unproject(x + ox, y + oy, self.zoom as f64)
    }

    /// Geographic extent currently on screen
    pub fn bounds(&self) -> LatLngBounds {
        let sw = self.from_screen(0.0, self.height as f64);
        let ne = self.from_screen(self.width as f64, 0.0);
        LatLngBounds::new(sw.y(), sw.x(), ne.y(), ne.x())
    }

    /// Largest zoom at which `bounds` fits inside the view minus `padding`
    ///
    /// Zero-size bounds fit at any zoom and yield `max_zoom`.
    pub fn bounds_zoom(&self, bounds: &LatLngBounds, padding: f64, max_zoom: u8) -> u8 {
        let avail_w = self.width as f64 - 2.0 * padding;
        let avail_h = self.height as f64 - 2.0 * padding;
        if avail_w <= 0.0 || avail_h <= 0.0 {
            return 0;
        }

        for zoom in (0..=max_zoom).rev() {
            let (west, north) = self.projection.project(bounds.north_west(), zoom as f64);
            let (east, south) = self.projection.project(bounds.south_east(), zoom as f64);
            if east - west <= avail_w && south - north <= avail_h {
                return zoom;
            }
        }

        0
    }

    /// Center on `bounds` at the largest zoom that shows all of it
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: f64, max_zoom: u8) {
        let zoom = self.bounds_zoom(bounds, padding, max_zoom);
        let (west, north) = self.projection.project(bounds.north_west(), zoom as f64);
        let (east, south) = self.projection.project(bounds.south_east(), zoom as f64);
        let center = self
            .projection
            .unproject((west + east) / 2.0, (north + south) / 2.0, zoom as f64);

        log::debug!(
            "Fitting view to bounds: zoom {} center ({:.5}, {:.5})",
            zoom,
            center.y(),
            center.x()
        );
        self.set_view(center, zoom);
    }
}
