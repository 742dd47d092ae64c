use crate::models::{DashboardSnapshot, JoinStats, LoadStats};
use std::collections::BTreeSet;
use validator::Validate;

/// Unmatched join keys quoted in the report, at most
const UNMATCHED_SAMPLE: usize = 10;

/// Data-quality findings for one snapshot
///
/// Dropped rows and unmatched keys are tolerated by the pipeline; this
/// report is where they become visible.
#[derive(Debug, Clone)]
pub struct QualityReport {
    pub validation_stats: LoadStats,
    pub station_stats: LoadStats,
    pub join_stats: JoinStats,
    /// Stations whose coordinates fall outside valid latitude/longitude
    pub coordinate_violations: usize,
    /// Stations with coordinates outside the Île-de-France bounding box
    pub outside_region: usize,
    pub stations_without_coordinates: usize,
    /// Sample of validation keys that matched no station
    pub unmatched_keys: Vec<String>,
}

impl QualityReport {
    /// True when nothing was dropped, every key matched and no station
    /// carries out-of-range coordinates
    pub fn is_clean(&self) -> bool {
        self.validation_stats.rows_dropped() == 0
            && self.station_stats.rows_dropped() == 0
            && self.join_stats.unmatched_rows == 0
            && self.join_stats.duplicate_station_keys == 0
            && self.coordinate_violations == 0
    }

    pub fn summary(&self) -> String {
        let unmatched = if self.unmatched_keys.is_empty() {
            "none".to_string()
        } else {
            self.unmatched_keys.join(", ")
        };

        format!(
            "Validations: {} read, {} kept ({} missing fields, {} bad hour, {} bad value)\n\
            Stations: {} read, {} kept ({} without key)\n\
            Join: {:.1}% matched, {} unmatched rows, {} duplicate station keys\n\
            Coordinates: {} out of range, {} outside Île-de-France, {} missing\n\
            Unmatched keys: {}",
            self.validation_stats.rows_read,
            self.validation_stats.rows_kept,
            self.validation_stats.dropped_missing_field,
            self.validation_stats.dropped_bad_hour,
            self.validation_stats.dropped_bad_value,
            self.station_stats.rows_read,
            self.station_stats.rows_kept,
            self.station_stats.dropped_missing_field,
            self.join_stats.match_rate() * 100.0,
            self.join_stats.unmatched_rows,
            self.join_stats.duplicate_station_keys,
            self.coordinate_violations,
            self.outside_region,
            self.stations_without_coordinates,
            unmatched,
        )
    }
}

pub struct QualityAnalyzer;

impl QualityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, snapshot: &DashboardSnapshot) -> QualityReport {
        let mut coordinate_violations = 0;
        let mut outside_region = 0;
        let mut stations_without_coordinates = 0;

        for station in &snapshot.stations.records {
            if station.validate().is_err() {
                coordinate_violations += 1;
            } else if station.has_coordinates() && !station.is_within_idf_bounds() {
                outside_region += 1;
            }
            if !station.has_coordinates() {
                stations_without_coordinates += 1;
            }
        }

        let unmatched: BTreeSet<String> = snapshot
            .joined
            .iter()
            .filter(|r| !r.is_matched())
            .map(|r| r.station_key.clone())
            .collect();
        let unmatched_keys: Vec<String> =
            unmatched.into_iter().take(UNMATCHED_SAMPLE).collect();

        QualityReport {
            validation_stats: snapshot.validations.stats.clone(),
            station_stats: snapshot.stations.stats.clone(),
            join_stats: snapshot.join_stats.clone(),
            coordinate_violations,
            outside_region,
            stations_without_coordinates,
            unmatched_keys,
        }
    }
}

impl Default for QualityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ModeFlags, ModeSource, StationRecord, StationTable, TransportMode, ValidationRecord,
        ValidationTable,
    };
    use crate::processors::StationJoiner;
    use std::sync::Arc;

    fn build_snapshot(
        validations: Vec<ValidationRecord>,
        stations: Vec<StationRecord>,
        validation_stats: LoadStats,
    ) -> DashboardSnapshot {
        let (joined, join_stats) = StationJoiner::new().join(&validations, &stations);
        DashboardSnapshot {
            validations: Arc::new(ValidationTable {
                records: validations,
                stats: validation_stats,
            }),
            stations: Arc::new(StationTable {
                records: stations,
                stats: LoadStats::default(),
                mode_source: ModeSource::DerivedFromFlags,
            }),
            joined,
            join_stats,
        }
    }

    fn validation(station: &str) -> ValidationRecord {
        ValidationRecord::new(
            station.to_string(),
            "JOHV".to_string(),
            "8H-9H".to_string(),
            8,
            1.0,
        )
    }

    fn station(key: &str, lat: Option<f64>, lon: Option<f64>) -> StationRecord {
        StationRecord::new(
            key.to_string(),
            lat,
            lon,
            TransportMode::Metro,
            None,
            ModeFlags::default(),
        )
    }

    #[test]
    fn test_clean_snapshot_reports_clean() {
        let snapshot = build_snapshot(
            vec![validation("Châtelet")],
            vec![station("chatelet", Some(48.86), Some(2.35))],
            LoadStats {
                rows_read: 1,
                rows_kept: 1,
                ..Default::default()
            },
        );

        let report = QualityAnalyzer::new().analyze(&snapshot);

        assert!(report.is_clean());
        assert!(report.unmatched_keys.is_empty());
        assert_eq!(report.coordinate_violations, 0);
    }

    #[test]
    fn test_findings_are_counted() {
        let snapshot = build_snapshot(
            vec![validation("Châtelet"), validation("Gare Fantôme")],
            vec![
                station("chatelet", Some(48.86), Some(2.35)),
                station("chatelet", Some(48.80), Some(2.30)),
                station("pole nord", Some(95.0), Some(2.0)),
                station("hors region", Some(45.0), Some(5.0)),
                station("sans position", None, None),
            ],
            LoadStats {
                rows_read: 3,
                rows_kept: 2,
                dropped_bad_hour: 1,
                ..Default::default()
            },
        );

        let report = QualityAnalyzer::new().analyze(&snapshot);

        assert!(!report.is_clean());
        assert_eq!(report.join_stats.duplicate_station_keys, 1);
        assert_eq!(report.coordinate_violations, 1);
        assert_eq!(report.outside_region, 1);
        assert_eq!(report.stations_without_coordinates, 1);
        assert_eq!(report.unmatched_keys, vec!["gare fantome"]);

        let summary = report.summary();
        assert!(summary.contains("1 bad hour"));
        assert!(summary.contains("gare fantome"));
    }
}
