//! The per-record transform: one validated repeater in, one channel row
//! out (or a logged rejection), with name allocation and zone bookkeeping
//! on the way through.

use crate::geo::{self, CoordinateLookup};
use crate::model::{ChannelRow, Repeater};
use crate::names::NameRegistry;
use crate::network;
use crate::snapshot::MapSnapshot;
use crate::zones::ZoneMap;
use log::info;

/// Tx = Rx + offset. A non-numeric input on either side leaves the field
/// blank rather than failing the record.
pub fn tx_frequency(rx: &str, offset: &str) -> Option<f64> {
    let rx: f64 = rx.trim().parse().ok()?;
    let offset: f64 = offset.trim().parse().ok()?;
    Some(rx + offset)
}

/// Accumulating state for one run: the name registry, the zone buckets,
/// and the accepted channel rows. Single owner, mutated record by record;
/// name allocation depends on prior history, so a parallel rework would
/// have to serialize mutations here.
#[derive(Debug, Default)]
pub struct Pipeline {
    pub names: NameRegistry,
    pub zones: ZoneMap,
    pub rows: Vec<ChannelRow>,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline::default()
    }

    /// Map one repeater into a channel row, or drop it when its network is
    /// not recognized. Classification runs before any coordinate lookup so
    /// rejected records cost no external calls.
    pub fn map_repeater(
        &mut self,
        repeater: &Repeater,
        snapshot: Option<&MapSnapshot>,
        live: Option<&dyn CoordinateLookup>,
        lookup_disabled: bool,
        additional_networks: &[String],
    ) -> Option<&ChannelRow> {
        let base_name = format!("{} {}", repeater.city, repeater.callsign)
            .trim()
            .to_string();
        let channel_name = self.names.allocate(&base_name);

        let tx = tx_frequency(&repeater.frequency, &repeater.offset);

        let classification =
            match network::classify(repeater.network.as_deref(), additional_networks) {
                Some(c) => c,
                None => {
                    info!(
                        "skipping repeater {} ({}): non-matching network {:?}",
                        repeater.id, repeater.callsign, repeater.network
                    );
                    return None;
                }
            };

        let region = if repeater.state.is_empty() {
            "Unknown"
        } else {
            repeater.state.as_str()
        };
        self.zones.add_region_channel(region, &channel_name);
        if let Some(zone) = &classification.additional_zone {
            self.zones.add_network_channel(zone, &channel_name);
        }

        let network_norm = network::normalize(repeater.network.as_deref());
        let position = geo::resolve_position(
            repeater.id,
            &network_norm,
            snapshot,
            live,
            lookup_disabled,
        );

        self.rows.push(ChannelRow {
            channel_number: repeater.channel_number,
            channel_name,
            rx_frequency: repeater.frequency.clone(),
            tx_frequency: tx,
            colour_code: repeater.color_code.clone(),
            tg_list: classification.tg_list,
            latitude: position.lat,
            longitude: position.lon,
            use_location: position.has_fix(),
        });
        self.rows.last()
    }
}
