use geo::Point;

/// A park read from the GeoJSON source
#[derive(Debug, Clone, PartialEq)]
pub struct Park {
    pub name: String,
    /// Area in acres, never negative
    pub acres: f64,
    pub location: String,
    /// WGS84 position (x = lon, y = lat)
    pub position: Point<f64>,
}

impl Park {
    pub fn new(name: impl Into<String>, acres: f64, location: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            acres,
            location: location.into(),
            position: Point::new(lon, lat),
        }
    }

    pub fn lat(&self) -> f64 {
        self.position.y()
    }

    pub fn lon(&self) -> f64 {
        self.position.x()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_park_position_axis_order() {
        let park = Park::new("Tyson Park", 12.5, "Kingston Pike", 35.95, -83.94);
        assert_eq!(park.lat(), 35.95);
        assert_eq!(park.lon(), -83.94);
        assert_eq!(park.position.x(), -83.94);
    }
}
