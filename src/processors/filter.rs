use crate::models::{JoinedRecord, ValidationRecord};
use crate::utils::constants::{HOUR_MAX, HOUR_MIN};
use crate::utils::normalize_station_name;
use std::collections::HashSet;

/// Day-type axis of the query surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayTypeFilter {
    All,
    Only(String),
}

impl DayTypeFilter {
    pub fn matches(&self, day_type: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == day_type,
        }
    }
}

/// Inclusive hour window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    pub from: u8,
    pub to: u8,
}

impl HourRange {
    pub fn new(from: u8, to: u8) -> Self {
        Self { from, to }
    }

    pub fn full() -> Self {
        Self {
            from: HOUR_MIN,
            to: HOUR_MAX,
        }
    }

    pub fn contains(&self, hour: u8) -> bool {
        hour >= self.from && hour <= self.to
    }
}

/// The three query-surface selectors combined into one predicate
///
/// An empty station selection applies no station filter; a non-empty one is
/// an inclusion test on normalized keys.
#[derive(Debug, Clone)]
pub struct ProfileFilter {
    pub day_type: DayTypeFilter,
    pub stations: HashSet<String>,
    pub hours: HourRange,
}

impl ProfileFilter {
    pub fn new() -> Self {
        Self {
            day_type: DayTypeFilter::All,
            stations: HashSet::new(),
            hours: HourRange::full(),
        }
    }

    pub fn with_day_type(mut self, day_type: DayTypeFilter) -> Self {
        self.day_type = day_type;
        self
    }

    /// Select stations by name; labels are normalized so raw and keyed
    /// spellings both work
    pub fn with_stations<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.stations = names
            .into_iter()
            .map(|name| normalize_station_name(name.as_ref()))
            .filter(|key| !key.is_empty())
            .collect();
        self
    }

    pub fn with_hours(mut self, hours: HourRange) -> Self {
        self.hours = hours;
        self
    }

    /// Variant keeping only the station selection, with day type and hours
    /// reset; the heatmap falls back to this when one day type is selected
    /// so the grid stays comparative
    pub fn station_scope(&self) -> Self {
        Self {
            day_type: DayTypeFilter::All,
            stations: self.stations.clone(),
            hours: HourRange::full(),
        }
    }

    fn matches(&self, station_key: &str, day_type: &str, hour: u8) -> bool {
        if !self.day_type.matches(day_type) {
            return false;
        }
        if !self.stations.is_empty() && !self.stations.contains(station_key) {
            return false;
        }
        self.hours.contains(hour)
    }

    pub fn matches_validation(&self, record: &ValidationRecord) -> bool {
        self.matches(&record.station_key, &record.day_type, record.hour)
    }

    pub fn matches_joined(&self, record: &JoinedRecord) -> bool {
        self.matches(&record.station_key, &record.day_type, record.hour)
    }

    pub fn filter_validations(&self, records: &[ValidationRecord]) -> Vec<ValidationRecord> {
        records
            .iter()
            .filter(|r| self.matches_validation(r))
            .cloned()
            .collect()
    }

    pub fn filter_joined(&self, records: &[JoinedRecord]) -> Vec<JoinedRecord> {
        records
            .iter()
            .filter(|r| self.matches_joined(r))
            .cloned()
            .collect()
    }
}

impl Default for ProfileFilter {
    fn default() -> Self {
        Self::new()
    }
}
