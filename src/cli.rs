use crate::zones::DEFAULT_MAX_CHANNELS;
use argparse::{ArgumentParser, Store, StoreOption, StoreTrue};
use std::path::PathBuf;

pub struct CliArgs {
    pub channels: PathBuf,
    pub zones: PathBuf,
    pub channel_number: u32,
    pub no_location_lookup: bool,
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub countries: Vec<String>,
    pub additional_networks: Vec<String>,
    pub map_cache: PathBuf,
    pub max_zone_channels: usize,
    pub log_level: String,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            channels: PathBuf::from("Channels.csv"),
            zones: PathBuf::from("Zones.csv"),
            channel_number: 1,
            no_location_lookup: false,
            states: vec![],
            cities: vec![],
            countries: vec![],
            additional_networks: vec![],
            map_cache: PathBuf::from("map.json"),
            max_zone_channels: DEFAULT_MAX_CHANNELS,
            log_level: "essential".into(),
        }
    }
}

pub fn parse_cli() -> CliArgs {
    let mut args = CliArgs::default();
    let mut states: Option<String> = None;
    let mut cities: Option<String> = None;
    let mut countries: Option<String> = None;
    let mut additional_networks: Option<String> = None;
    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Fetch DMR repeaters and save them as channel and zone CSVs");
        ap.refer(&mut args.channels)
            .add_option(&["--channels"], Store, "Channels CSV file name");
        ap.refer(&mut args.zones)
            .add_option(&["--zones"], Store, "Zones CSV file name");
        ap.refer(&mut args.channel_number)
            .add_option(&["--channel-number"], Store, "Starting channel number");
        ap.refer(&mut args.no_location_lookup)
            .add_option(&["--no-location-lookup"], StoreTrue, "Disable location lookup");
        ap.refer(&mut states)
            .add_option(&["--states"], StoreOption, "Comma-separated list of states (e.g., Vermont,New York)");
        ap.refer(&mut cities)
            .add_option(&["--cities"], StoreOption, "Comma-separated list of cities (e.g., New York,Los Angeles,Denver)");
        ap.refer(&mut countries)
            .add_option(&["--countries"], StoreOption, "Comma-separated list of countries (e.g., United States,Canada,Mexico)");
        ap.refer(&mut additional_networks)
            .add_option(&["--additional-networks"], StoreOption, "Comma-separated list of additional network names");
        ap.refer(&mut args.map_cache)
            .add_option(&["--map-cache"], Store, "Geocoordinate snapshot cache file");
        ap.refer(&mut args.max_zone_channels)
            .add_option(&["--max-zone-channels"], Store, "Maximum channels per zone row");
        ap.refer(&mut args.log_level)
            .add_option(&["--log"], Store, "Log level (essential|debug|trace|warn|error)");
        ap.parse_args_or_exit();
    }
    args.states = split_list(states.as_deref());
    args.cities = split_list(cities.as_deref());
    args.countries = split_list(countries.as_deref());
    args.additional_networks = split_list(additional_networks.as_deref());
    args
}

/// Split a comma-separated option value, trimming entries and dropping
/// empty ones. `None` (option not given) yields an empty list.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(
            split_list(Some("Vermont, New York ,,Maine")),
            vec!["Vermont", "New York", "Maine"]
        );
        assert_eq!(split_list(Some("")), Vec::<String>::new());
        assert_eq!(split_list(None), Vec::<String>::new());
    }
}
