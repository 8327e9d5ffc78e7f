use geo::Point;
use std::f64::consts::PI;

/// Latitude limit of the square Web Mercator world
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

/// Spherical Web Mercator projection into world pixel space
///
/// At zoom `z` the world is a square of `tile_size * 2^z` pixels with the
/// origin at the north-west corner (lon -180, lat MAX_LATITUDE) and y
/// growing southwards, matching the XYZ tile grid.
#[derive(Debug, Clone, Copy)]
pub struct WebMercator {
    tile_size: u32,
}

impl WebMercator {
    pub fn new(tile_size: u32) -> Self {
        Self { tile_size }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Side length of the world square in pixels at `zoom`
    pub fn world_size(&self, zoom: f64) -> f64 {
        self.tile_size as f64 * 2f64.powf(zoom)
    }

    /// Project a WGS84 point (x = lon, y = lat) to world pixels
    pub fn project(&self, point: Point<f64>, zoom: f64) -> (f64, f64) {
        let size = self.world_size(zoom);
        let lat = point.y().clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let sin = lat.to_radians().sin();

        let x = (point.x() + 180.0) / 360.0 * size;
        let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * size;

        (x, y)
    }

    /// Inverse of [`WebMercator::project`]
    pub fn unproject(&self, x: f64, y: f64, zoom: f64) -> Point<f64> {
        let size = self.world_size(zoom);
        let lon = x / size * 360.0 - 180.0;
        let n = PI - 2.0 * PI * y / size;
        let lat = n.sinh().atan().to_degrees();

        Point::new(lon, lat)
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_world_center() {
        let proj = WebMercator::default();
        let (x, y) = proj.project(Point::new(0.0, 0.0), 0.0);
        assert!((x - 128.0).abs() < 1e-9);
        assert!((y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_world_size_doubles_per_zoom() {
        let proj = WebMercator::default();
        assert_eq!(proj.world_size(0.0), 256.0);
        assert_eq!(proj.world_size(3.0), 2048.0);
    }

    #[test]
    fn test_north_pole_is_clamped_to_top_edge() {
        let proj = WebMercator::default();
        let (_, y) = proj.project(Point::new(0.0, 90.0), 2.0);
        assert!(y.abs() < 1e-6);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let proj = WebMercator::default();
        let point = Point::new(-83.9207, 35.9606);
        let (x, y) = proj.project(point, 13.0);
        let back = proj.unproject(x, y, 13.0);
        assert!((back.x() - point.x()).abs() < 1e-9);
        assert!((back.y() - point.y()).abs() < 1e-9);
    }
}
