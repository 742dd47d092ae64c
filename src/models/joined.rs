use serde::{Deserialize, Serialize};

use super::{StationRecord, TransportMode, ValidationRecord};

/// A validation row enriched with its station's geolocation fields
///
/// Produced by the left join; rows whose key matched no station keep null
/// geo fields rather than being dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub station_name_raw: String,
    pub station_key: String,
    pub day_type: String,
    pub hour_bucket: String,
    pub hour: u8,
    pub validation_pct: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub mode: Option<TransportMode>,
    pub operator: Option<String>,
}

impl JoinedRecord {
    pub fn from_parts(validation: &ValidationRecord, station: Option<&StationRecord>) -> Self {
        Self {
            station_name_raw: validation.station_name_raw.clone(),
            station_key: validation.station_key.clone(),
            day_type: validation.day_type.clone(),
            hour_bucket: validation.hour_bucket.clone(),
            hour: validation.hour,
            validation_pct: validation.validation_pct,
            latitude: station.and_then(|s| s.latitude),
            longitude: station.and_then(|s| s.longitude),
            mode: station.map(|s| s.mode),
            operator: station.and_then(|s| s.operator.clone()),
        }
    }

    pub fn is_matched(&self) -> bool {
        self.mode.is_some()
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}
