use super::MapView;
use crate::config::{MAX_TILE_ZOOM, TileLayerConfig};

/// A basemap tile placed on screen
#[derive(Debug, Clone, PartialEq)]
pub struct TileRef {
    pub z: u8,
    pub x: u32,
    pub y: u32,
    /// Top-left corner in screen pixels
    pub screen_x: f64,
    pub screen_y: f64,
    pub url: String,
}

/// XYZ raster tile basemap
#[derive(Debug, Clone)]
pub struct TileLayer {
    config: TileLayerConfig,
}

impl TileLayer {
    pub fn new(config: TileLayerConfig) -> Self {
        Self { config }
    }

    pub fn attribution(&self) -> &str {
        &self.config.attribution
    }

    /// Configured maximum zoom, capped to what the tile grid can index
    pub fn max_zoom(&self) -> u8 {
        self.config.max_zoom.min(MAX_TILE_ZOOM)
    }

    pub fn tile_size(&self) -> u32 {
        self.config.tile_size
    }

    /// Fill the URL template for one tile
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        let subdomain = match self.config.subdomains.len() {
            0 => "",
            n => self.config.subdomains[(x as usize + y as usize) % n].as_str(),
        };

        self.config
            .url_template
            .replace("{s}", subdomain)
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }

    /// Every tile intersecting the view, row by row
    ///
    /// Columns wrap around the antimeridian; rows beyond the poles are skipped.
    pub fn visible_tiles(&self, view: &MapView) -> Vec<TileRef> {
        let z = view.zoom();
        let size = self.config.tile_size as f64;
        let count = 1i64 << z;
        let (ox, oy) = view.origin();

        let first_x = (ox / size).floor() as i64;
        let last_x = ((ox + view.width() as f64) / size).ceil() as i64 - 1;
        let first_y = (oy / size).floor() as i64;
        let last_y = ((oy + view.height() as f64) / size).ceil() as i64 - 1;

        let mut tiles = Vec::new();
        for ty in first_y..=last_y {
            if ty < 0 || ty >= count {
                continue;
            }
            for tx in first_x..=last_x {
                let x = tx.rem_euclid(count) as u32;
                let y = ty as u32;
                tiles.push(TileRef {
                    z,
                    x,
                    y,
                    screen_x: tx as f64 * size - ox,
                    screen_y: ty as f64 * size - oy,
                    url: self.tile_url(z, x, y),
                });
            }
        }

        tiles
    }
}
