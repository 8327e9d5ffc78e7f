use crate::config::SourceConfig;
use anyhow::{Context, Result, anyhow, bail};
use geojson::{FeatureCollection, GeoJson};
use std::path::Path;
use std::time::Duration;

const USER_AGENT: &str = concat!("parkmap/", env!("CARGO_PKG_VERSION"));

/// Fetch a GeoJSON feature collection from a URL
///
/// Retries on 429 and gateway errors up to `config.max_retries` attempts in
/// total, waiting `retry_backoff_secs` times the attempt number in between.
/// Any other non-success status fails immediately.
pub fn fetch_geojson(url: &str, config: &SourceConfig) -> Result<FeatureCollection> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;

    let max_attempts = config.max_retries.max(1);
    let mut last_error = None;

    for attempt in 0..max_attempts {
        if attempt > 0 {
            let wait_secs = config.retry_backoff_secs * attempt as u64;
            log::warn!(
                "Retrying GeoJSON fetch in {} seconds (attempt {}/{})",
                wait_secs,
                attempt + 1,
                max_attempts
            );
            std::thread::sleep(Duration::from_secs(wait_secs));
        }

        let response = client
            .get(url)
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?;

        match response.status().as_u16() {
            200 => {
                let geojson: GeoJson = response
                    .json()
                    .context("Failed to parse GeoJSON response")?;
                log::debug!("Fetched GeoJSON from {}", url);
                return into_feature_collection(geojson);
            }
            429 | 502 | 503 | 504 => {
                last_error = Some(format!(
                    "{} returned status {} (attempt {})",
                    url,
                    response.status(),
                    attempt + 1
                ));
                continue;
            }
            status => {
                bail!("{} returned error status: {}", url, status);
            }
        }
    }

    bail!(
        "GeoJSON fetch failed after {} attempts: {}",
        max_attempts,
        last_error.unwrap_or_else(|| "Unknown error".to_string())
    )
}

/// Read a GeoJSON feature collection from a local file
pub fn load_geojson(path: &Path) -> Result<FeatureCollection> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read GeoJSON file: {}", path.display()))?;
    parse_feature_collection(&contents)
        .with_context(|| format!("Invalid GeoJSON in {}", path.display()))
}

/// Parse GeoJSON text that must hold a FeatureCollection
pub fn parse_feature_collection(text: &str) -> Result<FeatureCollection> {
    let geojson: GeoJson = text.parse().context("Failed to parse GeoJSON")?;
    into_feature_collection(geojson)
}

fn into_feature_collection(geojson: GeoJson) -> Result<FeatureCollection> {
    match geojson {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) => Err(anyhow!("Expected a FeatureCollection, found a Feature")),
        GeoJson::Geometry(_) => Err(anyhow!("Expected a FeatureCollection, found a Geometry")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-83.92, 35.96]},
                "properties": {"parkname": "Tyson Park", "acres": 26.4, "location": "Kingston Pike"}
            }
        ]
    }"#;

    #[test]
    fn test_parse_feature_collection() {
        let collection = parse_feature_collection(SAMPLE).unwrap();
        assert_eq!(collection.features.len(), 1);
    }

    #[test]
    fn test_rejects_bare_geometry() {
        let err = parse_feature_collection(r#"{"type": "Point", "coordinates": [0, 0]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("found a Geometry"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(parse_feature_collection("{ not json").is_err());
    }

    #[test]
    fn test_load_geojson_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("parks.geojson");
        std::fs::write(&path, SAMPLE).unwrap();

        let collection = load_geojson(&path).unwrap();
        assert_eq!(collection.features.len(), 1);
        assert!(load_geojson(&dir.path().join("missing.geojson")).is_err());
    }

    /// Serve one canned response per connection, in order. Joining yields the
    /// number of requests answered.
    fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<usize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/parks.geojson", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let mut served = 0;
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                write!(
                    stream,
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                )
                .unwrap();
                stream.flush().unwrap();
                served += 1;
            }
            served
        });

        (url, handle)
    }

    fn source(max_retries: u32) -> SourceConfig {
        SourceConfig {
            timeout_secs: 5,
            max_retries,
            retry_backoff_secs: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_fetch_retries_transient_statuses() {
        let (url, server) = serve(vec![(503, ""), (429, ""), (504, ""), (200, SAMPLE)]);

        let collection = fetch_geojson(&url, &source(4)).unwrap();
        assert_eq!(collection.features.len(), 1);
        assert_eq!(server.join().unwrap(), 4);
    }

    #[test]
    fn test_fetch_fails_fast_on_client_error() {
        let (url, server) = serve(vec![(404, "not found")]);

        let err = fetch_geojson(&url, &source(3)).unwrap_err();
        assert!(err.to_string().contains("error status: 404"));
        assert_eq!(server.join().unwrap(), 1);
    }

    #[test]
    fn test_fetch_gives_up_after_last_attempt() {
        let (url, server) = serve(vec![(502, ""), (503, "")]);

        let err = fetch_geojson(&url, &source(2)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("failed after 2 attempts"));
        assert!(message.contains("503"));
        assert_eq!(server.join().unwrap(), 2);
    }

    #[test]
    fn test_fetch_rejects_non_collection_body() {
        let (url, server) =
            serve(vec![(200, r#"{"type": "Point", "coordinates": [0, 0]}"#)]);

        let err = fetch_geojson(&url, &source(1)).unwrap_err();
        assert!(err.to_string().contains("found a Geometry"));
        assert_eq!(server.join().unwrap(), 1);
    }
}
