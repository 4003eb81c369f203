//! Geocoordinate snapshot: a cached copy of the radioid.net marker map,
//! used as the fallback position source for repeaters.

use crate::errors::AppError;
use crate::model::value_to_string;
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const SNAPSHOT_URL: &str = "https://radioid.net/static/map.json";

/// One geocoded repeater marker. Locators appear upstream as both JSON
/// strings and numbers, so the raw value is kept and coerced on lookup.
#[derive(Debug, Deserialize)]
pub struct Marker {
    #[serde(default)]
    pub locator: Value,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct MapSnapshot {
    #[serde(default)]
    pub markers: Vec<Marker>,
}

impl MapSnapshot {
    /// Find the first marker whose locator matches `repeater_id` (both sides
    /// compared as text) and return its `(lon, lat)`. No match is `(0, 0)`.
    ///
    /// Note the swapped return order: callers mapping into a channel row
    /// must assign latitude and longitude field by field.
    pub fn lookup(&self, repeater_id: u64) -> (f64, f64) {
        let wanted = repeater_id.to_string();
        for marker in &self.markers {
            if value_to_string(&marker.locator) == wanted {
                return (marker.lng, marker.lat);
            }
        }
        (0.0, 0.0)
    }
}

/// Load the marker snapshot, downloading it to `cache_path` unless a copy
/// less than 24 hours old is already there. The cache keeps repeated runs
/// from hammering the static map endpoint.
pub fn load_snapshot(
    client: &reqwest::blocking::Client,
    cache_path: &Path,
) -> Result<MapSnapshot, AppError> {
    if is_fresh(cache_path) {
        info!(
            "loading snapshot from {} (less than 24h old)",
            cache_path.display()
        );
        return read_snapshot_file(cache_path);
    }

    info!("downloading snapshot from {}", SNAPSHOT_URL);
    let resp = client
        .get(SNAPSHOT_URL)
        .send()
        .map_err(|e| AppError::Http(format!("snapshot download: {}", e)))?;
    if !resp.status().is_success() {
        return Err(AppError::Http(format!(
            "snapshot download: status {}",
            resp.status()
        )));
    }
    let body = resp
        .text()
        .map_err(|e| AppError::Http(format!("snapshot download: {}", e)))?;
    let snapshot: MapSnapshot = serde_json::from_str(&body)
        .map_err(|e| AppError::Parse(format!("snapshot JSON: {}", e)))?;

    if let Err(e) = std::fs::write(cache_path, &body) {
        warn!(
            "could not write snapshot cache {}: {}",
            cache_path.display(),
            e
        );
    } else {
        info!("snapshot saved to {}", cache_path.display());
    }
    Ok(snapshot)
}

pub fn read_snapshot_file(path: &Path) -> Result<MapSnapshot, AppError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| AppError::IO(format!("read snapshot {}: {}", path.display(), e)))?;
    serde_json::from_str(&json)
        .map_err(|e| AppError::Parse(format!("snapshot JSON {}: {}", path.display(), e)))
}

/// A cache file younger than 24 hours is served without re-downloading.
fn is_fresh(path: &Path) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    let Ok(modified) = meta.modified() else {
        return false;
    };
    let modified: chrono::DateTime<chrono::Utc> = modified.into();
    chrono::Utc::now() - modified < chrono::Duration::hours(24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> MapSnapshot {
        MapSnapshot {
            markers: vec![
                Marker { locator: json!(310012), lat: 44.26, lng: -72.58 },
                Marker { locator: json!("313344"), lat: 43.61, lng: -72.97 },
            ],
        }
    }

    #[test]
    fn lookup_matches_numeric_locator() {
        let (lon, lat) = sample().lookup(310012);
        assert_eq!((lon, lat), (-72.58, 44.26));
    }

    #[test]
    fn lookup_matches_string_locator() {
        let (lon, lat) = sample().lookup(313344);
        assert_eq!((lon, lat), (-72.97, 43.61));
    }

    #[test]
    fn lookup_without_match_is_zero_zero() {
        assert_eq!(sample().lookup(999999), (0.0, 0.0));
    }

    #[test]
    fn read_snapshot_file_parses_markers() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("map.json");
        std::fs::write(
            &path,
            r#"{"markers":[{"locator":310012,"lat":44.26,"lng":-72.58}]}"#,
        )
        .unwrap();

        let snapshot = read_snapshot_file(&path).expect("snapshot should parse");
        assert_eq!(snapshot.markers.len(), 1);
        assert_eq!(snapshot.lookup(310012), (-72.58, 44.26));
    }

    #[test]
    fn freshly_written_cache_is_fresh() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("map.json");
        assert!(!is_fresh(&path));
        std::fs::write(&path, "{}").unwrap();
        assert!(is_fresh(&path));
    }
}
