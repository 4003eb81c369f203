//! radioid.net repeater directory client and the ingestion boundary that
//! turns raw API entries into validated records.

use crate::errors::AppError;
use crate::model::{value_to_string, RawRepeater, Repeater};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

const DIRECTORY_URL: &str = "https://radioid.net/api/dmr/repeater/";

#[derive(Debug, Deserialize)]
pub struct DirectoryResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub results: Vec<Value>,
}

pub enum FetchOutcome {
    Matched(DirectoryResponse),
    /// The directory answered 406: nothing matches the filter. A clean,
    /// successful end of the run.
    NoMatches,
}

#[derive(Clone, Debug, Default)]
pub struct DirectoryQuery {
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub countries: Vec<String>,
}

impl DirectoryQuery {
    fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        params.extend(self.states.iter().map(|s| ("state", s.as_str())));
        params.extend(self.cities.iter().map(|c| ("city", c.as_str())));
        params.extend(self.countries.iter().map(|c| ("country", c.as_str())));
        params
    }
}

/// Fetch repeaters matching the query filters.
pub fn fetch_repeaters(
    client: &reqwest::blocking::Client,
    query: &DirectoryQuery,
) -> Result<FetchOutcome, AppError> {
    let resp = client
        .get(DIRECTORY_URL)
        .query(&query.params())
        .send()
        .map_err(|e| AppError::Http(format!("directory fetch: {}", e)))?;

    if resp.status() == reqwest::StatusCode::NOT_ACCEPTABLE {
        return Ok(FetchOutcome::NoMatches);
    }
    if !resp.status().is_success() {
        return Err(AppError::Http(format!(
            "directory fetch: status {}",
            resp.status()
        )));
    }

    let response: DirectoryResponse = resp
        .json()
        .map_err(|e| AppError::Parse(format!("directory JSON: {}", e)))?;
    Ok(FetchOutcome::Matched(response))
}

/// Validate raw directory entries and assign sequential channel numbers
/// starting at `first_channel`. Entries that do not deserialize are skipped
/// with a diagnostic and consume no channel number.
pub fn sequence_records(response: DirectoryResponse, first_channel: u32) -> Vec<Repeater> {
    let mut out = Vec::with_capacity(response.results.len());
    let mut channel_number = first_channel;

    for value in response.results {
        let raw: RawRepeater = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping malformed repeater entry: {}", e);
                continue;
            }
        };

        let repeater = Repeater {
            channel_number,
            id: raw.id,
            callsign: raw.callsign.unwrap_or_default(),
            city: raw.city.unwrap_or_default(),
            state: raw.state.unwrap_or_default(),
            country: raw.country.unwrap_or_default(),
            frequency: value_to_string(&raw.frequency),
            offset: value_to_string(&raw.offset),
            network: raw.ipsc_network,
            trustee: raw.trustee.unwrap_or_default(),
            details: raw
                .details
                .map(|d| d.replace("<br>", "; "))
                .unwrap_or_default(),
            color_code: value_to_string(&raw.color_code),
            ts_linked: value_to_string(&raw.ts_linked),
        };
        debug!(
            "ch {} repeater {} {} ({}, {}) trustee={} ts_linked={} details={}",
            repeater.channel_number,
            repeater.id,
            repeater.callsign,
            repeater.city,
            repeater.country,
            repeater.trustee,
            repeater.ts_linked,
            repeater.details
        );
        out.push(repeater);
        channel_number += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sequence_assigns_channel_numbers_from_seed() {
        let response = DirectoryResponse {
            count: 2,
            results: vec![
                json!({"id": 310012, "callsign": "W1ABC", "city": "Montpelier"}),
                json!({"id": 310013, "callsign": "W1DEF", "city": "Barre"}),
            ],
        };
        let records = sequence_records(response, 10);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].channel_number, 10);
        assert_eq!(records[1].channel_number, 11);
        assert_eq!(records[0].callsign, "W1ABC");
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let response = DirectoryResponse {
            count: 3,
            results: vec![
                json!({"id": 310012, "callsign": "W1ABC"}),
                json!("not a repeater"),
                json!({"callsign": "NO1ID"}),
            ],
        };
        let records = sequence_records(response, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 310012);
    }

    #[test]
    fn stringy_and_numeric_scalars_both_coerce() {
        let response = DirectoryResponse {
            count: 1,
            results: vec![json!({
                "id": 310012,
                "frequency": "449.57500",
                "offset": -5.0,
                "color_code": 1,
                "details": "open repeater<br>EchoLink node"
            })],
        };
        let records = sequence_records(response, 1);
        assert_eq!(records[0].frequency, "449.57500");
        assert_eq!(records[0].offset, "-5.0");
        assert_eq!(records[0].color_code, "1");
        assert_eq!(records[0].details, "open repeater; EchoLink node");
    }
}
