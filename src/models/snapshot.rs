use std::sync::Arc;

use super::{JoinedRecord, ModeSource, StationRecord, ValidationRecord};

/// Row counters accumulated while loading one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Rows missing a required field (station label, day type, bucket)
    pub dropped_missing_field: usize,
    /// Rows whose hour bucket did not parse to an integer hour
    pub dropped_bad_hour: usize,
    /// Rows whose percentage cell did not parse to a number
    pub dropped_bad_value: usize,
}

impl LoadStats {
    pub fn rows_dropped(&self) -> usize {
        self.dropped_missing_field + self.dropped_bad_hour + self.dropped_bad_value
    }
}

/// Parsed validations dataset plus its load counters
#[derive(Debug, Clone)]
pub struct ValidationTable {
    pub records: Vec<ValidationRecord>,
    pub stats: LoadStats,
}

/// Parsed stations dataset, its load counters, and how modes were obtained
#[derive(Debug, Clone)]
pub struct StationTable {
    pub records: Vec<StationRecord>,
    pub stats: LoadStats,
    pub mode_source: ModeSource,
}

/// Counters describing one left join of validations against stations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub output_rows: usize,
    pub matched_rows: usize,
    pub unmatched_rows: usize,
    /// Station rows discarded because an earlier row already claimed the key
    pub duplicate_station_keys: usize,
}

impl JoinStats {
    /// Share of validation rows that found a station, in [0, 1]
    pub fn match_rate(&self) -> f64 {
        if self.output_rows == 0 {
            return 0.0;
        }
        self.matched_rows as f64 / self.output_rows as f64
    }
}

/// Immutable bundle of one full pipeline run
///
/// The tables come from the loader cache as shared snapshots; the joined
/// rows are recomputed per run.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub validations: Arc<ValidationTable>,
    pub stations: Arc<StationTable>,
    pub joined: Vec<JoinedRecord>,
    pub join_stats: JoinStats,
}

impl DashboardSnapshot {
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty()
    }
}
