use geo::{BoundingRect, MultiPoint, Point, Rect, coord};

/// Geographic bounding box in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    rect: Rect<f64>,
}

impl LatLngBounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            rect: Rect::new(coord! { x: west, y: south }, coord! { x: east, y: north }),
        }
    }

    /// Zero-size bounds around a single point
    pub fn from_point(point: Point<f64>) -> Self {
        Self {
            rect: Rect::new(point.0, point.0),
        }
    }

    /// Create bounds from a set of points
    pub fn from_points(points: &[Point<f64>]) -> Option<Self> {
        MultiPoint::from(points.to_vec())
            .bounding_rect()
            .map(|rect| Self { rect })
    }

    /// Grow the bounds to include `point`
    pub fn expand(&mut self, point: Point<f64>) {
        let min = self.rect.min();
        let max = self.rect.max();
        self.rect = Rect::new(
            coord! { x: min.x.min(point.x()), y: min.y.min(point.y()) },
            coord! { x: max.x.max(point.x()), y: max.y.max(point.y()) },
        );
    }

    pub fn south(&self) -> f64 {
        self.rect.min().y
    }

    pub fn west(&self) -> f64 {
        self.rect.min().x
    }

    pub fn north(&self) -> f64 {
        self.rect.max().y
    }

    pub fn east(&self) -> f64 {
        self.rect.max().x
    }

    pub fn south_west(&self) -> Point<f64> {
        Point::new(self.west(), self.south())
    }

    pub fn north_east(&self) -> Point<f64> {
        Point::new(self.east(), self.north())
    }

    pub fn north_west(&self) -> Point<f64> {
        Point::new(self.west(), self.north())
    }

    pub fn south_east(&self) -> Point<f64> {
        Point::new(self.east(), self.south())
    }

    pub fn center(&self) -> Point<f64> {
        self.rect.center().into()
    }

    pub fn contains(&self, point: Point<f64>) -> bool {
        (self.south()..=self.north()).contains(&point.y())
            && (self.west()..=self.east()).contains(&point.x())
    }

    pub fn is_point(&self) -> bool {
        self.rect.width() == 0.0 && self.rect.height() == 0.0
    }
}
