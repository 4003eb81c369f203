use crate::errors::AppError;
use csv::Writer;
use indexmap::IndexMap;
use log::info;
use std::path::Path;

pub const DEFAULT_MAX_CHANNELS: usize = 180;

/// Channel names bucketed by state/region, plus one bucket per matched
/// additional network. Buckets and their members keep first-seen order.
#[derive(Debug, Default)]
pub struct ZoneMap {
    by_region: IndexMap<String, Vec<String>>,
    by_network: IndexMap<String, Vec<String>>,
}

impl ZoneMap {
    pub fn new() -> Self {
        ZoneMap::default()
    }

    pub fn add_region_channel(&mut self, region: &str, channel_name: &str) {
        self.by_region
            .entry(region.to_string())
            .or_default()
            .push(channel_name.to_string());
    }

    pub fn add_network_channel(&mut self, network: &str, channel_name: &str) {
        self.by_network
            .entry(network.to_string())
            .or_default()
            .push(channel_name.to_string());
    }

    pub fn region(&self, name: &str) -> Option<&[String]> {
        self.by_region.get(name).map(Vec::as_slice)
    }

    pub fn network(&self, name: &str) -> Option<&[String]> {
        self.by_network.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.by_region.is_empty() && self.by_network.is_empty()
    }

    /// Write the zone table: region zones first, then additional-network
    /// zones. Every row is exactly `max_channels` channel columns wide;
    /// overlong zones are silently truncated, short ones blank-padded.
    pub fn write_csv(&self, out_path: &Path, max_channels: usize) -> Result<(), AppError> {
        let mut wtr = Writer::from_path(out_path)
            .map_err(|e| AppError::IO(format!("open zone csv '{}': {}", out_path.display(), e)))?;

        let mut header = vec!["Zone Name".to_string()];
        header.extend((1..=max_channels).map(|i| format!("Channel{}", i)));
        wtr.write_record(&header)
            .map_err(|e| AppError::IO(format!("zone csv header: {}", e)))?;

        let zones = self.by_region.iter().chain(self.by_network.iter());
        let mut count = 0usize;
        for (zone, channels) in zones {
            let mut row = Vec::with_capacity(max_channels + 1);
            row.push(zone.clone());
            row.extend(channels.iter().take(max_channels).cloned());
            row.resize(max_channels + 1, String::new());
            wtr.write_record(&row)
                .map_err(|e| AppError::IO(format!("zone csv row '{}': {}", zone, e)))?;
            count += 1;
        }

        wtr.flush()
            .map_err(|e| AppError::IO(format!("zone csv flush: {}", e)))?;
        info!("zone CSV wrote {} zones to {}", count, out_path.display());
        Ok(())
    }
}
