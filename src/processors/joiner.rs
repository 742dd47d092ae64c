use crate::models::{JoinStats, JoinedRecord, StationRecord, ValidationRecord};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Left-joins validation rows against the station table on the normalized key
///
/// Every validation row yields exactly one output row. Station rows sharing
/// a key are deduplicated before the join, first occurrence in file order
/// winning, so the map view gets at most one marker per key.
pub struct StationJoiner;

impl StationJoiner {
    pub fn new() -> Self {
        Self
    }

    pub fn join(
        &self,
        validations: &[ValidationRecord],
        stations: &[StationRecord],
    ) -> (Vec<JoinedRecord>, JoinStats) {
        let (index, duplicate_station_keys) = self.build_station_index(stations);

        let mut joined = Vec::with_capacity(validations.len());
        let mut stats = JoinStats {
            duplicate_station_keys,
            ..Default::default()
        };

        for validation in validations {
            let station = index.get(validation.station_key.as_str()).copied();
            match station {
                Some(_) => stats.matched_rows += 1,
                None => stats.unmatched_rows += 1,
            }
            joined.push(JoinedRecord::from_parts(validation, station));
        }

        stats.output_rows = joined.len();

        debug!(
            output_rows = stats.output_rows,
            matched = stats.matched_rows,
            unmatched = stats.unmatched_rows,
            duplicate_keys = stats.duplicate_station_keys,
            "joined validations with stations"
        );

        (joined, stats)
    }

    /// Index stations by key, keeping the first occurrence of each key
    fn build_station_index<'a>(
        &self,
        stations: &'a [StationRecord],
    ) -> (HashMap<&'a str, &'a StationRecord>, usize) {
        let mut index = HashMap::with_capacity(stations.len());
        let mut duplicates = 0;

        for station in stations {
            match index.entry(station.station_key.as_str()) {
                Entry::Vacant(slot) => {
                    slot.insert(station);
                }
                Entry::Occupied(_) => duplicates += 1,
            }
        }

        (index, duplicates)
    }
}

impl Default for StationJoiner {
    fn default() -> Self {
        Self::new()
    }
}
