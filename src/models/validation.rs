use crate::utils::normalize_station_name;
use serde::{Deserialize, Serialize};

/// One hourly validation-share observation for a station and day type
///
/// `station_key` is derived from the raw label at construction time, so a
/// record always carries a usable join key. `hour` is the integer derived
/// from the bucket label (e.g. "6H-7H" gives 6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub station_name_raw: String,
    pub station_key: String,
    pub day_type: String,
    pub hour_bucket: String,
    pub hour: u8,
    pub validation_pct: f64,
}

impl ValidationRecord {
    pub fn new(
        station_name_raw: String,
        day_type: String,
        hour_bucket: String,
        hour: u8,
        validation_pct: f64,
    ) -> Self {
        let station_key = normalize_station_name(&station_name_raw);
        Self {
            station_name_raw,
            station_key,
            day_type,
            hour_bucket,
            hour,
            validation_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_derived_from_raw_label() {
        let record = ValidationRecord::new(
            "Gare de Lyon (RER)".to_string(),
            "JOHV".to_string(),
            "6H-7H".to_string(),
            6,
            4.25,
        );

        assert_eq!(record.station_key, "gare de lyon rer");
        assert_eq!(record.station_name_raw, "Gare de Lyon (RER)");
        assert_eq!(record.hour, 6);
    }
}
