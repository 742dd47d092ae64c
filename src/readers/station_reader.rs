use crate::error::{DashboardError, Result};
use crate::models::{LoadStats, ModeFlags, ModeSource, StationRecord, StationTable, TransportMode};
use crate::utils::constants::{
    COL_GEO_POINT, COL_MODE, COL_OPERATOR, CSV_DELIMITER, MODE_FLAG_COLUMNS,
    STATION_NAME_CANDIDATES,
};
use crate::utils::{normalize_station_name, parse_geo_point, parse_indicator};
use std::path::Path;
use tracing::debug;

use super::source::{find_column, read_text};

/// Column indices negotiated once from the header row
///
/// Only the station name is required; geolocation, mode, operator and the
/// indicator flags are all optional and default to absent.
struct StationLayout {
    name: usize,
    geo: Option<usize>,
    mode: Option<usize>,
    operator: Option<usize>,
    flags: [Option<usize>; 5],
}

impl StationLayout {
    fn detect(headers: &csv::StringRecord, path: &Path) -> Result<Self> {
        let name = STATION_NAME_CANDIDATES
            .iter()
            .find_map(|candidate| find_column(headers, candidate))
            .ok_or_else(|| {
                let file = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("source file")
                    .to_string();
                DashboardError::MissingColumn {
                    file,
                    column: STATION_NAME_CANDIDATES.join("/"),
                }
            })?;

        let mut flags = [None; 5];
        for (slot, column) in flags.iter_mut().zip(MODE_FLAG_COLUMNS) {
            *slot = find_column(headers, column);
        }

        Ok(Self {
            name,
            geo: find_column(headers, COL_GEO_POINT),
            mode: find_column(headers, COL_MODE),
            operator: find_column(headers, COL_OPERATOR),
            flags,
        })
    }

    fn mode_source(&self) -> ModeSource {
        if self.mode.is_some() {
            ModeSource::Explicit
        } else {
            ModeSource::DerivedFromFlags
        }
    }

    /// Indicator cell at precedence position `i`; a missing column is falsy
    fn flag_at(&self, row: &csv::StringRecord, i: usize) -> bool {
        self.flags[i]
            .and_then(|idx| row.get(idx))
            .map(parse_indicator)
            .unwrap_or(false)
    }
}

/// Reader for the station geolocation dataset
pub struct StationReader {
    delimiter: u8,
}

impl StationReader {
    pub fn new() -> Self {
        Self {
            delimiter: CSV_DELIMITER,
        }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read and normalize the stations file
    ///
    /// Geolocation cells that do not hold exactly two comma-separated
    /// numerals yield null coordinates; rows without a derivable station
    /// key are dropped.
    pub fn read(&self, path: &Path) -> Result<StationTable> {
        let text = read_text(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let layout = StationLayout::detect(&headers, path)?;
        let mode_source = layout.mode_source();

        let mut records = Vec::new();
        let mut stats = LoadStats::default();

        for row in reader.records() {
            let row = row?;
            stats.rows_read += 1;

            if let Some(record) = self.parse_row(&row, &layout, &mut stats) {
                stats.rows_kept += 1;
                records.push(record);
            }
        }

        debug!(
            path = %path.display(),
            rows_read = stats.rows_read,
            rows_kept = stats.rows_kept,
            mode_source = %mode_source,
            "loaded stations"
        );

        Ok(StationTable {
            records,
            stats,
            mode_source,
        })
    }

    fn parse_row(
        &self,
        row: &csv::StringRecord,
        layout: &StationLayout,
        stats: &mut LoadStats,
    ) -> Option<StationRecord> {
        let station_key = normalize_station_name(row.get(layout.name).unwrap_or(""));
        if station_key.is_empty() {
            stats.dropped_missing_field += 1;
            return None;
        }

        let (latitude, longitude) = match layout.geo {
            Some(idx) => parse_geo_point(row.get(idx).unwrap_or("")),
            None => (None, None),
        };

        let flags = ModeFlags {
            metro: layout.flag_at(row, 0),
            rer: layout.flag_at(row, 1),
            train: layout.flag_at(row, 2),
            tram: layout.flag_at(row, 3),
            val: layout.flag_at(row, 4),
        };

        let mode = match layout.mode {
            Some(idx) => TransportMode::parse(row.get(idx).unwrap_or("")),
            None => TransportMode::from_flags(&flags),
        };

        let operator = layout
            .operator
            .and_then(|idx| row.get(idx))
            .filter(|s| !s.is_empty())
            .map(String::from);

        Some(StationRecord::new(
            station_key,
            latitude,
            longitude,
            mode,
            operator,
            flags,
        ))
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}
