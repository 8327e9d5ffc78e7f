use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::style::{Grade, GradeTable};

fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    3
}
fn default_retry_backoff_secs() -> u64 {
    2
}
fn default_zoom() -> u8 {
    12
}
fn default_width() -> u32 {
    1024
}
fn default_height() -> u32 {
    768
}
fn default_padding() -> f64 {
    20.0
}
fn default_url_template() -> String {
    "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}
fn default_attribution() -> String {
    "© OpenStreetMap contributors".to_string()
}
fn default_max_zoom() -> u8 {
    19
}
fn default_tile_size() -> u32 {
    256
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub tiles: TileLayerConfig,
    #[serde(default)]
    pub grades: Option<Vec<Grade>>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
}

/// Where park features come from
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Seconds to wait before a retry, multiplied by the attempt number
    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            input: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_secs: default_retry_backoff_secs(),
        }
    }
}

/// Initial view of the map
#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Screen padding kept around fitted bounds, in pixels
    #[serde(default = "default_padding")]
    pub padding: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            lat: None,
            lon: None,
            zoom: default_zoom(),
            width: default_width(),
            height: default_height(),
            padding: default_padding(),
        }
    }
}

/// Raster basemap description
///
/// `url_template` accepts `{s}`, `{z}`, `{x}` and `{y}` placeholders.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TileLayerConfig {
    #[serde(default = "default_url_template")]
    pub url_template: String,
    #[serde(default)]
    pub subdomains: Vec<String>,
    #[serde(default = "default_attribution")]
    pub attribution: String,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
}

impl Default for TileLayerConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            subdomains: Vec::new(),
            attribution: default_attribution(),
            max_zoom: default_max_zoom(),
            tile_size: default_tile_size(),
        }
    }
}

/// Highest zoom whose tile indices fit in `u32`, with headroom for wrapping
pub const MAX_TILE_ZOOM: u8 = 30;

impl TileLayerConfig {
    /// Reject tile settings the tile grid cannot represent
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            bail!("tiles.tile_size must be greater than 0");
        }
        if self.max_zoom > MAX_TILE_ZOOM {
            bail!(
                "tiles.max_zoom must be at most {}, got {}",
                MAX_TILE_ZOOM,
                self.max_zoom
            );
        }
        Ok(())
    }
}

impl FileConfig {
    /// Load the first config file found in the standard locations
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        log::debug!("Loaded config from {}", path.display());
                        return Some(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to parse config file {}: {}", path.display(), e);
                    }
                }
            }
        }
        None
    }

    /// Load a config file the user asked for explicitly
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Validated tile layer settings
    pub fn tile_layer(&self) -> Result<TileLayerConfig> {
        self.tiles
            .validate()
            .context("Invalid tile layer in config")?;
        Ok(self.tiles.clone())
    }

    /// Grade table from the config, or the default park grades
    pub fn grade_table(&self) -> Result<GradeTable> {
        match &self.grades {
            Some(grades) => {
                GradeTable::new(grades.clone()).context("Invalid grade table in config")
            }
            None => Ok(GradeTable::default()),
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("parkmap.toml"));
    paths.push(PathBuf::from(".parkmap.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("parkmap").join("config.toml"));
        paths.push(config_dir.join("parkmap.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".parkmap.toml"));
        paths.push(home.join(".config").join("parkmap").join("config.toml"));
    }

    paths
}
