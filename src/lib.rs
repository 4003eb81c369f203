pub mod cli;
pub mod csv_out;
pub mod directory;
pub mod errors;
pub mod geo;
pub mod mapper;
pub mod model;
pub mod names;
pub mod network;
pub mod snapshot;
pub mod zones;

use crate::cli::CliArgs;
use crate::directory::{DirectoryQuery, FetchOutcome};
use crate::errors::AppError;
use crate::geo::{BrandmeisterLookup, CoordinateLookup};
use crate::mapper::Pipeline;
use log::{info, warn};
use std::time::Duration;

/// Shared blocking client for the directory and snapshot endpoints.
pub fn http_client() -> Result<reqwest::blocking::Client, AppError> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| AppError::Http(format!("build http client: {}", e)))
}

/// One full run: snapshot, directory fetch, per-record mapping, CSV output.
/// "No matches" from the directory ends the run successfully with no files.
pub fn run(args: CliArgs) -> Result<(), AppError> {
    if args.states.is_empty() && args.cities.is_empty() && args.countries.is_empty() {
        return Err(AppError::Usage(
            "at least one of --states, --cities, or --countries must be provided".into(),
        ));
    }

    let client = http_client()?;

    // The snapshot only feeds coordinate fallback; skip it entirely when
    // lookups are disabled, and degrade to no snapshot when it won't load.
    let snapshot = if args.no_location_lookup {
        None
    } else {
        match snapshot::load_snapshot(&client, &args.map_cache) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!("no snapshot available: {}", e);
                None
            }
        }
    };

    let query = DirectoryQuery {
        states: args.states.clone(),
        cities: args.cities.clone(),
        countries: args.countries.clone(),
    };
    let response = match directory::fetch_repeaters(&client, &query)? {
        FetchOutcome::Matched(r) => r,
        FetchOutcome::NoMatches => {
            info!("no repeaters match search");
            return Ok(());
        }
    };
    info!("directory returned {} repeaters", response.count);
    let repeaters = directory::sequence_records(response, args.channel_number);

    let live_lookup = if args.no_location_lookup {
        None
    } else {
        Some(BrandmeisterLookup::new()?)
    };

    let mut pipeline = Pipeline::new();
    for repeater in &repeaters {
        pipeline.map_repeater(
            repeater,
            snapshot.as_ref(),
            live_lookup.as_ref().map(|l| l as &dyn CoordinateLookup),
            args.no_location_lookup,
            &args.additional_networks,
        );
    }
    info!(
        "mapped {} of {} repeaters into channels",
        pipeline.rows.len(),
        repeaters.len()
    );

    csv_out::write_channels(&pipeline.rows, &args.channels)?;
    pipeline.zones.write_csv(&args.zones, args.max_zone_channels)?;
    Ok(())
}
