use crate::errors::AppError;
use crate::model::ChannelRow;
use csv::Writer;
use log::info;
use std::path::Path;

/// Column layout expected by the radio-programming software. Order and
/// spelling are fixed; the blank and constant cells below must match it.
const CHANNEL_HEADER: [&str; 29] = [
    "Channel Number",
    "Channel Name",
    "Channel Type",
    "Rx Frequency",
    "Tx Frequency",
    "Bandwidth (kHz)",
    "Colour Code",
    "Timeslot",
    "Contact",
    "TG List",
    "DMR ID",
    "TS1_TA_Tx",
    "TS2_TA_Tx ID",
    "RX Tone",
    "TX Tone",
    "Squelch",
    "Power",
    "Rx Only",
    "Zone Skip",
    "All Skip",
    "TOT",
    "VOX",
    "No Beep",
    "No Eco",
    "APRS",
    "Latitude",
    "Longitude",
    "Roaming",
    "Use location",
];

fn number_cell(v: Option<f64>) -> String {
    v.map(|n| format!("{}", n)).unwrap_or_default()
}

pub fn write_channels(records: &[ChannelRow], out_path: &Path) -> Result<(), AppError> {
    let mut wtr = Writer::from_path(out_path)
        .map_err(|e| AppError::IO(format!("open channel csv '{}': {}", out_path.display(), e)))?;

    wtr.write_record(&CHANNEL_HEADER)
        .map_err(|e| AppError::IO(format!("channel csv header: {}", e)))?;

    for r in records {
        wtr.write_record(&[
            r.channel_number.to_string(),
            r.channel_name.clone(),
            "Digital".to_string(),
            r.rx_frequency.clone(),
            number_cell(r.tx_frequency),
            String::new(), // Bandwidth: not available from the directory
            r.colour_code.clone(),
            "1".to_string(), // Timeslot settable from the keypad
            "None".to_string(),
            r.tg_list.clone(),
            "None".to_string(),
            "APRS+Text".to_string(),
            "APRS+Text".to_string(),
            String::new(), // RX Tone
            String::new(), // TX Tone
            String::new(), // Squelch
            "Master".to_string(),
            "No".to_string(),
            "No".to_string(),
            "No".to_string(),
            "0".to_string(),
            "Off".to_string(),
            "No".to_string(),
            "No".to_string(),
            "None".to_string(),
            number_cell(r.latitude),
            number_cell(r.longitude),
            "No".to_string(),
            if r.use_location { "Yes" } else { "No" }.to_string(),
        ])
        .map_err(|e| AppError::IO(format!("channel csv row: {}", e)))?;
    }

    wtr.flush()
        .map_err(|e| AppError::IO(format!("channel csv flush: {}", e)))?;
    info!(
        "channel CSV wrote {} rows to {}",
        records.len(),
        out_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ChannelRow {
        ChannelRow {
            channel_number: 1,
            channel_name: "Montpelier W1ABC".to_string(),
            rx_frequency: "446.500".to_string(),
            tx_frequency: Some(451.5),
            colour_code: "1".to_string(),
            tg_list: "BM".to_string(),
            latitude: Some(44.26),
            longitude: Some(-72.58),
            use_location: true,
        }
    }

    #[test]
    fn header_and_row_have_fixed_columns() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("channels.csv");
        write_channels(&[sample_row()], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Channel Number,Channel Name,Channel Type"));
        assert!(header.ends_with("Latitude,Longitude,Roaming,Use location"));
        assert_eq!(header.split(',').count(), 29);

        let row = lines.next().unwrap();
        assert_eq!(row.split(',').count(), 29);
        assert_eq!(
            row,
            "1,Montpelier W1ABC,Digital,446.500,451.5,,1,1,None,BM,None,\
             APRS+Text,APRS+Text,,,,Master,No,No,No,0,Off,No,No,None,\
             44.26,-72.58,No,Yes"
        );
    }

    #[test]
    fn missing_tx_and_coordinates_render_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("channels.csv");
        let mut row = sample_row();
        row.tx_frequency = None;
        row.latitude = None;
        row.longitude = None;
        row.use_location = false;
        write_channels(&[row], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let line = text.lines().nth(1).unwrap();
        let cells: Vec<&str> = line.split(',').collect();
        assert_eq!(cells[4], "");
        assert_eq!(cells[25], "");
        assert_eq!(cells[26], "");
        assert_eq!(cells[28], "No");
    }
}
