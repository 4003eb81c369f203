//! Repeater position resolution: a live Brandmeister lookup behind a
//! capability trait, with the marker snapshot as fallback.

use crate::errors::AppError;
use crate::network;
use crate::snapshot::MapSnapshot;
use log::warn;
use serde::Deserialize;
use std::time::Duration;

/// Live position lookup keyed by repeater ID.
///
/// Behavior:
/// - A successful lookup returns `(lat, lon)`; `(0, 0)` is a legitimate
///   result meaning the operator never filed coordinates.
/// - A transport or decode failure returns `Err`, which the resolver turns
///   into unknown coordinates rather than a snapshot fallback.
pub trait CoordinateLookup {
    fn locate(&self, repeater_id: u64) -> Result<(f64, f64), AppError>;
}

/// Queries the Brandmeister device endpoint for a repeater's position.
pub struct BrandmeisterLookup {
    client: reqwest::blocking::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct BmDevice {
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lng: f64,
}

impl BrandmeisterLookup {
    pub fn new() -> Result<Self, AppError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Http(format!("build brandmeister client: {}", e)))?;
        Ok(BrandmeisterLookup {
            client,
            base_url: "https://api.brandmeister.network/v2/device".to_string(),
        })
    }
}

impl CoordinateLookup for BrandmeisterLookup {
    fn locate(&self, repeater_id: u64) -> Result<(f64, f64), AppError> {
        let url = format!("{}/{}", self.base_url, repeater_id);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::Http(format!("brandmeister device {}: {}", repeater_id, e)))?;
        if !resp.status().is_success() {
            return Err(AppError::Http(format!(
                "brandmeister device {}: status {}",
                repeater_id,
                resp.status()
            )));
        }
        let device: BmDevice = resp
            .json()
            .map_err(|e| AppError::Parse(format!("brandmeister device {}: {}", repeater_id, e)))?;
        Ok((device.lat, device.lng))
    }
}

/// Resolved coordinates for one channel row. `None` renders as an empty cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Position {
    const ZERO: Position = Position { lat: Some(0.0), lon: Some(0.0) };
    const UNKNOWN: Position = Position { lat: None, lon: None };

    /// True when both coordinates are known and non-zero; drives the
    /// `Use location` column.
    pub fn has_fix(&self) -> bool {
        matches!((self.lat, self.lon), (Some(lat), Some(lon)) if lat != 0.0 && lon != 0.0)
    }
}

/// Resolve a repeater's position. Brandmeister repeaters get the live
/// lookup first, falling back to the snapshot when the live result is the
/// explicit `(0, 0)` placeholder; everything else goes straight to the
/// snapshot. Disabled lookups pin every row to `(0, 0)`.
pub fn resolve_position(
    repeater_id: u64,
    network_norm: &str,
    snapshot: Option<&MapSnapshot>,
    live: Option<&dyn CoordinateLookup>,
    lookup_disabled: bool,
) -> Position {
    if lookup_disabled {
        return Position::ZERO;
    }

    if network::is_bm_family(network_norm) {
        if let Some(live) = live {
            match live.locate(repeater_id) {
                Ok((lat, lon)) if lat == 0.0 && lon == 0.0 => {
                    warn!(
                        "live lookup returned (0, 0) for repeater {}; falling back to snapshot",
                        repeater_id
                    );
                    snapshot_position(repeater_id, snapshot)
                }
                Ok((lat, lon)) => Position { lat: Some(lat), lon: Some(lon) },
                Err(e) => {
                    warn!("live lookup failed for repeater {}: {}", repeater_id, e);
                    Position::UNKNOWN
                }
            }
        } else {
            snapshot_position(repeater_id, snapshot)
        }
    } else {
        snapshot_position(repeater_id, snapshot)
    }
}

fn snapshot_position(repeater_id: u64, snapshot: Option<&MapSnapshot>) -> Position {
    match snapshot {
        Some(map) => {
            // lookup returns (lon, lat)
            let (lon, lat) = map.lookup(repeater_id);
            Position { lat: Some(lat), lon: Some(lon) }
        }
        None => Position::ZERO,
    }
}
