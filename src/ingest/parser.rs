use crate::domain::Park;
use geojson::{Feature, FeatureCollection, Value};
use serde_json::{Number, Value as JsonValue};
use thiserror::Error;

const NAME_KEY: &str = "parkname";
const ACRES_KEY: &str = "acres";
const LOCATION_KEY: &str = "location";

/// Why a feature could not be turned into a park
#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    #[error("feature has no geometry")]
    MissingGeometry,
    #[error("feature geometry is not a point")]
    NotAPoint,
    #[error("feature is missing the `{0}` property")]
    MissingProperty(&'static str),
    #[error("acreage `{0}` is not a number")]
    InvalidAcres(String),
    #[error("acreage {0} is negative")]
    NegativeAcres(f64),
}

/// Parks parsed from a feature collection plus the features that were skipped
#[derive(Debug, Default)]
pub struct ParseReport {
    pub parks: Vec<Park>,
    /// (feature index, reason)
    pub skipped: Vec<(usize, FeatureError)>,
}

/// Parse a GeoJSON feature collection into parks
///
/// # Algorithm
/// For each feature:
///    - Require a Point geometry with at least (lon, lat)
///    - Read `parkname` and `acres`, `location` defaults to empty
///    - Accept acreage as a JSON number or a numeric string
///
/// Invalid features are recorded in the report and skipped.
pub fn parse_parks(collection: &FeatureCollection) -> ParseReport {
    let mut report = ParseReport::default();

    for (index, feature) in collection.features.iter().enumerate() {
        match parse_feature(feature) {
            Ok(park) => report.parks.push(park),
            Err(err) => {
                log::warn!("Skipping feature {}: {}", index, err);
                report.skipped.push((index, err));
            }
        }
    }

    report
}

fn parse_feature(feature: &Feature) -> Result<Park, FeatureError> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or(FeatureError::MissingGeometry)?;

    let (lon, lat) = match &geometry.value {
        Value::Point(coords) if coords.len() >= 2 => (coords[0], coords[1]),
        _ => return Err(FeatureError::NotAPoint),
    };

    let name = match feature.property(NAME_KEY) {
        Some(JsonValue::String(s)) => s.trim().to_string(),
        Some(JsonValue::Null) | None => return Err(FeatureError::MissingProperty(NAME_KEY)),
        Some(other) => other.to_string(),
    };

    let acres = match feature.property(ACRES_KEY) {
        Some(JsonValue::Null) | None => return Err(FeatureError::MissingProperty(ACRES_KEY)),
        Some(value) => parse_acres(value)?,
    };

    let location = match feature.property(LOCATION_KEY) {
        Some(JsonValue::String(s)) => s.trim().to_string(),
        Some(JsonValue::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Ok(Park::new(name, acres, location, lat, lon))
}

fn parse_acres(value: &JsonValue) -> Result<f64, FeatureError> {
    let acres = match value {
        JsonValue::Number(n) => number_to_f64(n)?,
        JsonValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| FeatureError::InvalidAcres(s.clone()))?,
        other => return Err(FeatureError::InvalidAcres(other.to_string())),
    };

    if !acres.is_finite() {
        return Err(FeatureError::InvalidAcres(acres.to_string()));
    }
    if acres < 0.0 {
        return Err(FeatureError::NegativeAcres(acres));
    }

    Ok(acres)
}

fn number_to_f64(n: &Number) -> Result<f64, FeatureError> {
    n.as_f64()
        .ok_or_else(|| FeatureError::InvalidAcres(n.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parse_feature_collection;

    fn collection(json: &str) -> FeatureCollection {
        parse_feature_collection(json).unwrap()
    }

    #[test]
    fn test_parse_parks() {
        let fc = collection(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [-83.92, 35.96]},
                        "properties": {"parkname": "Tyson Park", "acres": 26.4, "location": "2351 Kingston Pike"}
                    },
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [-83.90, 35.99]},
                        "properties": {"parkname": "Pocket Park", "acres": "0", "location": null}
                    }
                ]
            }"#,
        );

        let report = parse_parks(&fc);
        assert!(report.skipped.is_empty());
        assert_eq!(report.parks.len(), 2);

        let tyson = &report.parks[0];
        assert_eq!(tyson.name, "Tyson Park");
        assert_eq!(tyson.acres, 26.4);
        assert_eq!(tyson.location, "2351 Kingston Pike");
        assert_eq!(tyson.lat(), 35.96);
        assert_eq!(tyson.lon(), -83.92);

        assert_eq!(report.parks[1].acres, 0.0);
        assert_eq!(report.parks[1].location, "");
    }

    #[test]
    fn test_parse_acres_values() {
        assert_eq!(parse_acres(&serde_json::json!(12)), Ok(12.0));
        assert_eq!(parse_acres(&serde_json::json!(" 3.5 ")), Ok(3.5));
        assert_eq!(parse_acres(&serde_json::json!(-0.5)), Err(FeatureError::NegativeAcres(-0.5)));
        assert_eq!(
            parse_acres(&serde_json::json!(true)),
            Err(FeatureError::InvalidAcres("true".to_string()))
        );
        assert_eq!(
            parse_acres(&serde_json::json!("NaN")),
            Err(FeatureError::InvalidAcres("NaN".to_string()))
        );
    }

    #[test]
    fn test_invalid_features_are_skipped() {
        let fc = collection(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "geometry": null, "properties": {"parkname": "A", "acres": 1}},
                    {
                        "type": "Feature",
                        "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]},
                        "properties": {"parkname": "B", "acres": 1}
                    },
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [0, 0]},
                        "properties": {"acres": 1}
                    },
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [0, 0]},
                        "properties": {"parkname": "D", "acres": "lots"}
                    },
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [0, 0]},
                        "properties": {"parkname": "E", "acres": -3}
                    },
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [1, 2]},
                        "properties": {"parkname": "F", "acres": 7}
                    }
                ]
            }"#,
        );

        let report = parse_parks(&fc);
        assert_eq!(report.parks.len(), 1);
        assert_eq!(report.parks[0].name, "F");

        let reasons: Vec<&FeatureError> = report.skipped.iter().map(|(_, e)| e).collect();
        assert_eq!(
            reasons,
            vec![
                &FeatureError::MissingGeometry,
                &FeatureError::NotAPoint,
                &FeatureError::MissingProperty("parkname"),
                &FeatureError::InvalidAcres("lots".to_string()),
                &FeatureError::NegativeAcres(-3.0),
            ]
        );
        assert_eq!(report.skipped[4].0, 4);
    }
}
