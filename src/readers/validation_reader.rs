use crate::error::Result;
use crate::models::{LoadStats, ValidationRecord, ValidationTable};
use crate::utils::constants::{
    COL_DAY_TYPE, COL_HOUR_BUCKET, COL_STATION_LABEL, COL_VALIDATION_PCT, CSV_DELIMITER,
};
use crate::utils::{normalize_station_name, parse_hour_bucket, parse_pct};
use std::path::Path;
use tracing::debug;

use super::source::{find_column, missing_column, read_text};

/// Column indices negotiated once from the header row
struct ValidationLayout {
    station: usize,
    day_type: usize,
    hour_bucket: usize,
    pct: usize,
}

impl ValidationLayout {
    fn detect(headers: &csv::StringRecord, path: &Path) -> Result<Self> {
        Ok(Self {
            station: find_column(headers, COL_STATION_LABEL)
                .ok_or_else(|| missing_column(path, COL_STATION_LABEL))?,
            day_type: find_column(headers, COL_DAY_TYPE)
                .ok_or_else(|| missing_column(path, COL_DAY_TYPE))?,
            hour_bucket: find_column(headers, COL_HOUR_BUCKET)
                .ok_or_else(|| missing_column(path, COL_HOUR_BUCKET))?,
            pct: find_column(headers, COL_VALIDATION_PCT)
                .ok_or_else(|| missing_column(path, COL_VALIDATION_PCT))?,
        })
    }
}

/// Reader for the hourly validation-profile dataset
pub struct ValidationReader {
    delimiter: u8,
}

impl ValidationReader {
    pub fn new() -> Self {
        Self {
            delimiter: CSV_DELIMITER,
        }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read and normalize the validations file
    ///
    /// Rows that fail the hour or percentage parse, or that miss a required
    /// field, are dropped and counted; a missing required header is a hard
    /// failure.
    pub fn read(&self, path: &Path) -> Result<ValidationTable> {
        let text = read_text(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let layout = ValidationLayout::detect(&headers, path)?;

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
            dropped = stats.rows_dropped(),
            "loaded validations"
        );

        Ok(ValidationTable { records, stats })
    }

    /// Parse one data row; `None` drops the row with its reason counted
    fn parse_row(
        &self,
        row: &csv::StringRecord,
        layout: &ValidationLayout,
        stats: &mut LoadStats,
    ) -> Option<ValidationRecord> {
        let station_raw = row.get(layout.station).unwrap_or("");
        let day_type = row.get(layout.day_type).unwrap_or("");
        let hour_bucket = row.get(layout.hour_bucket).unwrap_or("");

        if normalize_station_name(station_raw).is_empty()
            || day_type.is_empty()
            || hour_bucket.is_empty()
        {
            stats.dropped_missing_field += 1;
            return None;
        }

        let hour = match parse_hour_bucket(hour_bucket) {
            Some(hour) => hour,
            None => {
                stats.dropped_bad_hour += 1;
                return None;
            }
        };

        let validation_pct = match parse_pct(row.get(layout.pct).unwrap_or("")) {
            Some(pct) => pct,
            None => {
                stats.dropped_bad_value += 1;
                return None;
            }
        };

        Some(ValidationRecord::new(
            station_raw.to_string(),
            day_type.to_string(),
            hour_bucket.to_string(),
            hour,
            validation_pct,
        ))
    }
}

impl Default for ValidationReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_fixture(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_read_validations_file() -> Result<()> {
        let temp_file = write_fixture(&[
            "libelle_arret;cat_jour;trnc_horr_60;pourcentage_validations",
            "Châtelet;JOHV;8H-9H;5,2",
            "Gare de Lyon (RER);JOHV;6H-7H;3.1",
            "Nation;SAHV;14H-15H;2,75",
        ]);

        let reader = ValidationReader::new();
        let table = reader.read(temp_file.path())?;

        assert_eq!(table.records.len(), 3);
        assert_eq!(table.stats.rows_read, 3);
        assert_eq!(table.stats.rows_kept, 3);

        let first = &table.records[0];
        assert_eq!(first.station_key, "chatelet");
        assert_eq!(first.day_type, "JOHV");
        assert_eq!(first.hour, 8);
        assert!((first.validation_pct - 5.2).abs() < f64::EPSILON);

        assert_eq!(table.records[1].station_key, "gare de lyon rer");
        assert_eq!(table.records[1].hour, 6);

        Ok(())
    }

    #[test]
    fn test_malformed_rows_are_dropped_and_counted() -> Result<()> {
        let temp_file = write_fixture(&[
            "libelle_arret;cat_jour;trnc_horr_60;pourcentage_validations",
            "Châtelet;JOHV;8H-9H;5,2",
            "Nation;JOHV;bad-label;1,0",
            "Bastille;JOHV;9H-10H;n/a",
            ";JOHV;10H-11H;2,0",
            "Opéra;;11H-12H;2,0",
        ]);

        let reader = ValidationReader::new();
        let table = reader.read(temp_file.path())?;

        assert_eq!(table.records.len(), 1);
        assert_eq!(table.stats.rows_read, 5);
        assert_eq!(table.stats.rows_kept, 1);
        assert_eq!(table.stats.dropped_bad_hour, 1);
        assert_eq!(table.stats.dropped_bad_value, 1);
        assert_eq!(table.stats.dropped_missing_field, 2);

        // Every kept row carries the full set of required fields
        for record in &table.records {
            assert!(!record.station_key.is_empty());
            assert!(!record.day_type.is_empty());
            assert!(!record.hour_bucket.is_empty());
        }

        Ok(())
    }

    #[test]
    fn test_missing_required_column_is_structural_error() {
        let temp_file = write_fixture(&[
            "libelle_arret;cat_jour;pourcentage_validations",
            "Châtelet;JOHV;5,2",
        ]);

        let reader = ValidationReader::new();
        let err = reader.read(temp_file.path()).unwrap_err();

        match err {
            DashboardError::MissingColumn { column, .. } => {
                assert_eq!(column, "trnc_horr_60");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_delimiter_surfaces_as_structural_error() {
        // Comma-delimited input leaves the expected headers undiscoverable
        let temp_file = write_fixture(&[
            "libelle_arret,cat_jour,trnc_horr_60,pourcentage_validations",
            "Châtelet,JOHV,8H-9H,5.2",
        ]);

        let reader = ValidationReader::new();
        assert!(matches!(
            reader.read(temp_file.path()),
            Err(DashboardError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_insertion_order_is_preserved() -> Result<()> {
        let temp_file = write_fixture(&[
            "libelle_arret;cat_jour;trnc_horr_60;pourcentage_validations",
            "Nation;JOHV;9H-10H;1,0",
            "Bastille;JOHV;6H-7H;2,0",
            "Nation;JOHV;6H-7H;3,0",
        ]);

        let reader = ValidationReader::new();
        let table = reader.read(temp_file.path())?;

        let keys: Vec<&str> = table.records.iter().map(|r| r.station_key.as_str()).collect();
        assert_eq!(keys, vec!["nation", "bastille", "nation"]);

        Ok(())
    }
}
