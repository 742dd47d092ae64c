use crate::models::{DashboardSnapshot, ValidationRecord};
use crate::processors::ProfileFilter;
use std::collections::HashSet;

/// The three headline counters the dashboard shows above the charts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiStrip {
    /// Selected stations, or all selectable ones when nothing is selected
    pub stations_selected: usize,
    /// Hour-by-station combinations surviving the filter
    pub filtered_rows: usize,
    /// Distinct day types present after filtering
    pub day_types_present: usize,
}

/// Selector domains and headline figures for one snapshot
#[derive(Debug, Clone)]
pub struct DatasetOverview {
    /// Distinct day types, sorted
    pub day_types: Vec<String>,
    /// Stations offered by the station selector: joined keys with a known
    /// transport mode, sorted
    pub selectable_stations: Vec<String>,
    /// Observed (min, max) hour over the validations, if any
    pub hour_domain: Option<(u8, u8)>,
    pub total_rows: usize,
    pub match_rate: f64,
    pub kpis: KpiStrip,
}

pub struct OverviewAnalyzer;

impl OverviewAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Derive domains from the snapshot and KPIs from the filtered rows
    pub fn analyze(
        &self,
        snapshot: &DashboardSnapshot,
        filter: &ProfileFilter,
        filtered: &[ValidationRecord],
    ) -> DatasetOverview {
        let validations = &snapshot.validations.records;

        let mut day_types: Vec<String> = validations
            .iter()
            .map(|r| r.day_type.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        day_types.sort();

        let mut selectable_stations: Vec<String> = snapshot
            .joined
            .iter()
            .filter(|r| r.mode.is_some())
            .map(|r| r.station_key.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        selectable_stations.sort();

        let hour_domain = validations
            .iter()
            .map(|r| r.hour)
            .fold(None, |domain, hour| match domain {
                None => Some((hour, hour)),
                Some((min, max)) => Some((min.min(hour), max.max(hour))),
            });

        let stations_selected = if filter.stations.is_empty() {
            selectable_stations.len()
        } else {
            filter.stations.len()
        };

        let day_types_present = filtered
            .iter()
            .map(|r| r.day_type.as_str())
            .collect::<HashSet<_>>()
            .len();

        DatasetOverview {
            day_types,
            selectable_stations,
            hour_domain,
            total_rows: validations.len(),
            match_rate: snapshot.join_stats.match_rate(),
            kpis: KpiStrip {
                stations_selected,
                filtered_rows: filtered.len(),
                day_types_present,
            },
        }
    }
}

impl Default for OverviewAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetOverview {
    pub fn summary(&self) -> String {
        let hour_domain = match self.hour_domain {
            Some((min, max)) => format!("{}h to {}h", min, max),
            None => "no hours observed".to_string(),
        };

        format!(
            "Rows: {} total, {} after filters\n\
            Day types: {} ({})\n\
            Selectable stations: {}\n\
            Hour domain: {}\n\
            Join match rate: {:.1}%\n\
            Stations selected: {}\n\
            Day types present after filters: {}",
            self.total_rows,
            self.kpis.filtered_rows,
            self.day_types.len(),
            self.day_types.join(", "),
            self.selectable_stations.len(),
            hour_domain,
            self.match_rate * 100.0,
            self.kpis.stations_selected,
            self.kpis.day_types_present,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        LoadStats, ModeFlags, ModeSource, StationRecord, StationTable, TransportMode,
        ValidationTable,
    };
    use crate::processors::StationJoiner;
    use std::sync::Arc;

    fn validation(station: &str, day_type: &str, hour: u8) -> ValidationRecord {
        ValidationRecord::new(
            station.to_string(),
            day_type.to_string(),
            format!("{}H-{}H", hour, hour + 1),
            hour,
            1.0,
        )
    }

    fn snapshot() -> DashboardSnapshot {
        let validations = vec![
            validation("Châtelet", "SAHV", 8),
            validation("Châtelet", "JOHV", 6),
            validation("Nation", "JOHV", 22),
            validation("Gare Fantôme", "JOHV", 12),
        ];
        let stations = vec![
            StationRecord::new(
                "chatelet".to_string(),
                Some(48.86),
                Some(2.35),
                TransportMode::Metro,
                None,
                ModeFlags::default(),
            ),
            StationRecord::new(
                "nation".to_string(),
                Some(48.85),
                Some(2.40),
                TransportMode::Rer,
                None,
                ModeFlags::default(),
            ),
        ];

        let (joined, join_stats) = StationJoiner::new().join(&validations, &stations);

        DashboardSnapshot {
            validations: Arc::new(ValidationTable {
                records: validations,
                stats: LoadStats::default(),
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

    #[test]
    fn test_domains_are_sorted_and_deduplicated() {
        let snapshot = snapshot();
        let filter = ProfileFilter::new();
        let filtered = filter.filter_validations(&snapshot.validations.records);

        let overview = OverviewAnalyzer::new().analyze(&snapshot, &filter, &filtered);

        assert_eq!(overview.day_types, vec!["JOHV", "SAHV"]);
        // The unmatched key has no mode and is not selectable
        assert_eq!(overview.selectable_stations, vec!["chatelet", "nation"]);
        assert_eq!(overview.hour_domain, Some((6, 22)));
        assert_eq!(overview.total_rows, 4);
    }

    #[test]
    fn test_kpis_follow_the_filter() {
        let snapshot = snapshot();
        let filter = ProfileFilter::new().with_stations(["Châtelet"]);
        let filtered = filter.filter_validations(&snapshot.validations.records);

        let overview = OverviewAnalyzer::new().analyze(&snapshot, &filter, &filtered);

        assert_eq!(overview.kpis.stations_selected, 1);
        assert_eq!(overview.kpis.filtered_rows, 2);
        assert_eq!(overview.kpis.day_types_present, 2);
    }

    #[test]
    fn test_empty_selection_counts_all_selectable_stations() {
        let snapshot = snapshot();
        let filter = ProfileFilter::new();
        let filtered = filter.filter_validations(&snapshot.validations.records);

        let overview = OverviewAnalyzer::new().analyze(&snapshot, &filter, &filtered);

        assert_eq!(overview.kpis.stations_selected, 2);
        assert_eq!(overview.kpis.filtered_rows, 4);

        let summary = overview.summary();
        assert!(summary.contains("JOHV, SAHV"));
        assert!(summary.contains("6h to 22h"));
    }
}
