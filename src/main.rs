use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use geo::Point;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use parkmap::api::{fetch_geojson, load_geojson};
use parkmap::config::FileConfig;
use parkmap::ingest::parse_parks;
use parkmap::map::{MapEvent, MapView, ParkMap, TileLayer};
use parkmap::render::write_svg;
use parkmap::style::GradeTable;

/// Render an interactive park map from a GeoJSON source
///
/// Examples:
///   # Fetch parks and fit the map to all of them
///   parkmap --url https://example.com/parks.geojson
///
///   # Use a local file and a fixed view
///   parkmap --input parks.geojson --lat 35.96 --lon -83.92 --zoom 13 -o knox.svg
///
///   # Zoom to one park, as if it had been clicked
///   parkmap --input parks.geojson --focus "Tyson Park"
///
///   # Use a config file
///   parkmap --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "parkmap")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches parkmap.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// URL of the GeoJSON feature collection
    #[arg(short = 'u', long, conflicts_with = "input")]
    url: Option<String>,

    /// Local GeoJSON file to read instead of fetching
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output SVG file path (defaults to parks.svg)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Map center latitude (use with --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Map center longitude (use with --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Zoom level used with --lat/--lon
    #[arg(short = 'z', long)]
    zoom: Option<u8>,

    /// Map width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Map height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Zoom the map to the named park
    #[arg(long)]
    focus: Option<String>,

    /// Draw the named park with the hover highlight
    #[arg(long)]
    highlight: Option<String>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    init_logging(args.verbose);

    let file_config = match args.config {
        Some(ref path) => FileConfig::load_from(path)?,
        None => FileConfig::load().unwrap_or_default(),
    };
    if file_config.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let grades = file_config.grade_table()?;
    let tile_config = file_config.tile_layer()?;
    let map_config = &file_config.map;
    let url = args.url.clone().or_else(|| file_config.source.url.clone());
    let input = args.input.clone().or_else(|| file_config.source.input.clone());
    let output_path = args
        .output
        .clone()
        .or_else(|| file_config.output.clone())
        .unwrap_or_else(|| PathBuf::from("parks.svg"));
    let center = match (args.lat.or(map_config.lat), args.lon.or(map_config.lon)) {
        (Some(lat), Some(lon)) => Some(Point::new(lon, lat)),
        _ => None,
    };
    let zoom = args.zoom.unwrap_or(map_config.zoom);
    let width = args.width.unwrap_or(map_config.width);
    let height = args.height.unwrap_or(map_config.height);

    println!("parkmap - Park Map Renderer");
    println!("===========================");
    println!();

    let spinner = create_spinner("Loading park data...");
    let start = Instant::now();
    let collection = match (&input, &url) {
        (Some(path), _) => load_geojson(path)?,
        (None, Some(url)) => fetch_geojson(url, &file_config.source)
            .context("Failed to fetch park GeoJSON")?,
        (None, None) => {
            spinner.finish_and_clear();
            bail!("Must provide --url or --input, or set source.url in parkmap.toml");
        }
    };
    spinner.finish_with_message(format!(
        "Loaded {} features [{:.1}s]",
        collection.features.len(),
        start.elapsed().as_secs_f32()
    ));

    let report = parse_parks(&collection);
    if report.parks.is_empty() {
        bail!("No valid park features found in the GeoJSON source");
    }
    println!(
        "Parsed {} parks ({} features skipped)",
        report.parks.len(),
        report.skipped.len()
    );

    let tiles = TileLayer::new(tile_config);
    let view = MapView::new(
        center.unwrap_or_else(|| Point::new(0.0, 0.0)),
        zoom,
        width,
        height,
        tiles.tile_size(),
    );
    let mut map = ParkMap::new(view, tiles, report.parks, &grades).with_padding(map_config.padding);
    if center.is_none() {
        map.fit_all();
    }

    if let Some(ref name) = args.highlight {
        let id = map
            .find(name)
            .ok_or_else(|| anyhow!("No park named {:?}", name))?;
        map.dispatch(MapEvent::PointerOver(id));
    }
    if let Some(ref name) = args.focus {
        let id = map
            .find(name)
            .ok_or_else(|| anyhow!("No park named {:?}", name))?;
        map.dispatch(MapEvent::Click(id));
    }

    let spinner = create_spinner("Rendering map...");
    let start = Instant::now();
    write_svg(&output_path, &map).context("Failed to write SVG file")?;
    spinner.finish_with_message(format!(
        "Rendered {} tiles and {} markers [{:.1}s]",
        map.tiles().visible_tiles(map.view()).len(),
        map.layer().len(),
        start.elapsed().as_secs_f32()
    ));

    println!();
    print_summary(&map, &grades);
    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!("Output: {}", output_path.display());

    Ok(())
}

/// Debug records pass the logger filter; the global max level decides what is shown
/// unless RUST_LOG is set.
fn init_logging(verbose: bool) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    if !verbose && std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

fn print_summary(map: &ParkMap, grades: &GradeTable) {
    let view = map.view();
    let center = view.center();
    println!(
        "View: ({:.4}, {:.4}) zoom {} at {}x{}px",
        center.y(),
        center.x(),
        view.zoom(),
        view.width(),
        view.height()
    );

    let mut counts = vec![0usize; grades.len()];
    for marker in map.layer().markers() {
        counts[grades.bucket_for(marker.park.acres)] += 1;
    }

    println!("Parks by size:");
    for (item, count) in map.legend().items.iter().zip(counts) {
        println!("  {:>8} acres ({}): {}", item.label, item.color, count);
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
