//! parkmap - Render interactive park maps from remote GeoJSON over a raster basemap

pub mod api;
pub mod config;
pub mod domain;
pub mod geometry;
pub mod ingest;
pub mod map;
pub mod render;
pub mod style;
