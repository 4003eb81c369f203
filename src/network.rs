/// Substring markers for the recognized DMR network families.
const FAMILY_MARKERS: [&str; 5] = ["bm", "bran", "tgif", "adn", "dmr-plus"];

/// Outcome of a successful classification: the TG list label for the
/// channel row, plus the network-zone key when an operator-supplied
/// additional network matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub tg_list: String,
    pub additional_zone: Option<String>,
}

/// Lower-cased network tag; absent tags normalize to the empty string.
pub fn normalize(network_raw: Option<&str>) -> String {
    network_raw.unwrap_or("").to_lowercase()
}

/// Brandmeister repeaters are labelled `BM` and get the live location lookup.
pub fn is_bm_family(network: &str) -> bool {
    network.contains("bm") || network.contains("bran")
}

/// Decide whether a repeater belongs to a recognized network family or an
/// operator-supplied additional network. `None` means the record is dropped.
pub fn classify(network_raw: Option<&str>, additional_networks: &[String]) -> Option<Classification> {
    let network = normalize(network_raw);

    let additional = additional_networks
        .iter()
        .any(|n| n.to_lowercase() == network)
        .then(|| network.clone());
    let family = FAMILY_MARKERS.iter().any(|m| network.contains(m));
    if !family && additional.is_none() {
        return None;
    }

    let tg_list = if is_bm_family(&network) {
        "BM".to_string()
    } else {
        network.to_uppercase()
    };
    Some(Classification { tg_list, additional_zone: additional })
}
