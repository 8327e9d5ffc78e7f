use crate::map::{CircleMarker, ParkMap};
use crate::style::{HighlightStyle, Legend};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const LEGEND_ROW: f64 = 18.0;
const LEGEND_WIDTH: f64 = 110.0;
const LEGEND_PAD: f64 = 8.0;
const LEGEND_MARGIN: f64 = 10.0;
const ATTRIBUTION_HEIGHT: f64 = 16.0;

/// Render the map as a standalone SVG document
///
/// Layers, bottom to top:
/// - basemap tiles as `<image>` elements
/// - one `<circle>` per park with its popup as `<title>`
/// - legend box and tile attribution
///
/// Hover highlighting is carried by a CSS rule so the document stays
/// interactive without script.
pub fn render_svg(map: &ParkMap) -> String {
    let view = map.view();
    let (width, height) = (view.width() as f64, view.height() as f64);
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
         width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = width,
        h = height
    ));
    svg.push_str(&style_block(map.layer().highlight_style()));

    let tile_size = map.tiles().tile_size();
    svg.push_str("<g class=\"basemap\">\n");
    for tile in map.tiles().visible_tiles(view) {
        svg.push_str(&format!(
            "<image href=\"{}\" x=\"{:.1}\" y=\"{:.1}\" width=\"{}\" height=\"{}\"/>\n",
            xml_escape(&tile.url),
            tile.screen_x,
            tile.screen_y,
            tile_size,
            tile_size
        ));
    }
    svg.push_str("</g>\n");

    svg.push_str("<g class=\"parks\">\n");
    for marker in map.layer().markers() {
        svg.push_str(&circle(map, marker));
    }
    svg.push_str("</g>\n");

    svg.push_str(&legend_group(map.legend(), width, height));
    svg.push_str(&attribution(map.tiles().attribution(), width, height));
    svg.push_str("</svg>\n");

    svg
}

/// Render the map and write it to `path`
pub fn write_svg(path: &Path, map: &ParkMap) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create SVG file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writer.write_all(render_svg(map).as_bytes())?;
    writer.flush()?;

    Ok(())
}

fn style_block(highlight: &HighlightStyle) -> String {
    format!(
        "<style>\n\
         .park-marker {{ cursor: pointer; }}\n\
         .park-marker:hover {{ stroke: {}; stroke-width: {}; stroke-opacity: {}; fill-opacity: {}; }}\n\
         .legend text, .attribution text {{ font: 12px Arial, Helvetica, sans-serif; fill: #333; }}\n\
         .legend .title {{ font-weight: bold; }}\n\
         </style>\n",
        highlight.stroke_color, highlight.weight, highlight.opacity, highlight.fill_opacity
    )
}

fn circle(map: &ParkMap, marker: &CircleMarker) -> String {
    let (cx, cy) = map.view().to_screen(marker.park.position);
    let style = &marker.style;
    let class = if map.hovered() == Some(marker.id) {
        "park-marker hovered"
    } else {
        "park-marker"
    };

    format!(
        "<circle class=\"{}\" data-id=\"{}\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" \
         fill-opacity=\"{}\" stroke=\"{}\" stroke-width=\"{}\" stroke-opacity=\"{}\">\
         <title>{}</title></circle>\n",
        class,
        marker.id,
        cx,
        cy,
        style.radius,
        xml_escape(&style.fill_color),
        style.fill_opacity,
        xml_escape(&style.stroke_color),
        style.weight,
        style.opacity,
        xml_escape(&marker.popup.text())
    )
}

fn legend_group(legend: &Legend, width: f64, height: f64) -> String {
    let box_height = LEGEND_PAD * 2.0 + LEGEND_ROW * (legend.items.len() as f64 + 1.0);
    let x = width - LEGEND_WIDTH - LEGEND_MARGIN;
    let y = height - ATTRIBUTION_HEIGHT - box_height - LEGEND_MARGIN;

    let mut group = format!(
        "<g class=\"legend\" transform=\"translate({:.1},{:.1})\">\n\
         <rect width=\"{}\" height=\"{}\" rx=\"5\" fill=\"white\" fill-opacity=\"0.8\"/>\n\
         <text class=\"title\" x=\"{}\" y=\"{}\">{}</text>\n",
        x,
        y,
        LEGEND_WIDTH,
        box_height,
        LEGEND_PAD,
        LEGEND_PAD + LEGEND_ROW * 0.75,
        xml_escape(&legend.title)
    );

    for (i, item) in legend.items.iter().enumerate() {
        let row_y = LEGEND_PAD + LEGEND_ROW * (i as f64 + 1.0);
        group.push_str(&format!(
            "<g class=\"legend-item\">\
             <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" fill-opacity=\"0.8\"/>\
             <text x=\"{}\" y=\"{}\">{}</text></g>\n",
            LEGEND_PAD,
            row_y,
            LEGEND_ROW - 2.0,
            LEGEND_ROW - 2.0,
            xml_escape(&item.color),
            LEGEND_PAD + LEGEND_ROW + 4.0,
            row_y + LEGEND_ROW * 0.75,
            xml_escape(&item.label)
        ));
    }

    group.push_str("</g>\n");
    group
}

fn attribution(text: &str, width: f64, height: f64) -> String {
    format!(
        "<g class=\"attribution\">\
         <rect x=\"0\" y=\"{:.1}\" width=\"{}\" height=\"{}\" fill=\"white\" fill-opacity=\"0.7\"/>\
         <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{}</text></g>\n",
        height - ATTRIBUTION_HEIGHT,
        width,
        ATTRIBUTION_HEIGHT,
        width - 4.0,
        height - 4.0,
        xml_escape(text)
    )
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TileLayerConfig;
    use crate::domain::Park;
    use crate::map::{MapEvent, MapView, TileLayer};
    use crate::style::GradeTable;
    use geo::Point;
    use tempfile::tempdir;

    fn park_map() -> ParkMap {
        let view = MapView::new(Point::new(-83.92, 35.96), 12, 800, 600, 256);
        ParkMap::new(
            view,
            TileLayer::new(TileLayerConfig::default()),
            vec![
                Park::new("Tyson Park", 26.4, "Kingston Pike", 35.96, -83.92),
                Park::new("Lions & <Tigers>", 0.0, "", 35.95, -83.91),
            ],
            &GradeTable::default(),
        )
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("a & <b> \"c\" 'd'"), "a &amp; &lt;b&gt; &quot;c&quot; &apos;d&apos;");
    }

    #[test]
    fn test_render_contains_layers() {
        let map = park_map();
        let svg = render_svg(&map);

        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle ").count(), 2);
        assert_eq!(
            svg.matches("<image ").count(),
            map.tiles().visible_tiles(map.view()).len()
        );
        assert_eq!(svg.matches("class=\"legend-item\"").count(), 4);
        assert!(svg.contains("50+"));
        assert!(svg.contains("<title>Tyson Park\nAcres: 26.4\nLocation: Kingston Pike</title>"));
        assert!(svg.contains("Lions &amp; &lt;Tigers&gt;"));
        assert!(svg.contains("© OpenStreetMap contributors"));
        assert!(svg.contains(".park-marker:hover { stroke: #666; stroke-width: 5;"));
    }

    #[test]
    fn test_render_marks_hovered_marker() {
        let mut map = park_map();
        map.dispatch(MapEvent::PointerOver(0));
        let svg = render_svg(&map);

        assert!(svg.contains("class=\"park-marker hovered\" data-id=\"0\""));
        assert!(svg.contains("stroke=\"#666\" stroke-width=\"5\""));
    }

    #[test]
    fn test_write_svg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("parks.svg");
        let map = park_map();

        write_svg(&path, &map).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, render_svg(&map));
    }
}
