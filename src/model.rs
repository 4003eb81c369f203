use serde::Deserialize;
use serde_json::Value;

/// One `results` element as delivered by the radioid.net repeater API.
/// Only `id` is required; the API leaves the rest in varying shapes
/// (strings, numbers, nulls), so scalars stay as JSON values here.
#[derive(Debug, Deserialize)]
pub struct RawRepeater {
    pub id: u64,
    #[serde(default)]
    pub callsign: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub frequency: Value,
    #[serde(default)]
    pub offset: Value,
    #[serde(default)]
    pub ipsc_network: Option<String>,
    #[serde(default)]
    pub trustee: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub color_code: Value,
    #[serde(default)]
    pub ts_linked: Value,
}

/// Validated repeater record with its caller-assigned channel number.
#[derive(Clone, Debug)]
pub struct Repeater {
    pub channel_number: u32,
    pub id: u64,
    pub callsign: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub frequency: String,
    pub offset: String,
    pub network: Option<String>,
    pub trustee: String,
    pub details: String,
    pub color_code: String,
    pub ts_linked: String,
}

/// One programmable memory slot in the output channel table.
/// `None` frequency/coordinate fields render as empty cells.
#[derive(Clone, Debug)]
pub struct ChannelRow {
    pub channel_number: u32,
    pub channel_name: String,
    pub rx_frequency: String,
    pub tx_frequency: Option<f64>,
    pub colour_code: String,
    pub tg_list: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub use_location: bool,
}

/// Text form of a JSON scalar; strings come through unquoted, null is empty.
pub fn value_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
