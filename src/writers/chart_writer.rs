use crate::error::Result;
use crate::models::ValidationRecord;
use crate::processors::{DistributionView, HeatmapView, MapView, ProfileView};
use crate::utils::constants::{
    CSV_DELIMITER, EXPORT_DISTRIBUTION_STEM, EXPORT_HEATMAP_STEM, EXPORT_MAP_STEM,
    EXPORT_PROFILE_STEM, EXPORT_TABLE_STEM,
};
use crate::utils::generate_export_filename;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Writes the chart-ready datasets as JSON files and the filtered table as
/// a semicolon-delimited CSV, date-stamped, into one output directory
pub struct ChartWriter {
    output_dir: PathBuf,
    pretty: bool,
}

impl ChartWriter {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            pretty: true,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn write_profile(&self, view: &ProfileView) -> Result<PathBuf> {
        self.write_json(EXPORT_PROFILE_STEM, view)
    }

    pub fn write_distribution(&self, view: &DistributionView) -> Result<PathBuf> {
        self.write_json(EXPORT_DISTRIBUTION_STEM, view)
    }

    pub fn write_heatmap(&self, view: &HeatmapView) -> Result<PathBuf> {
        self.write_json(EXPORT_HEATMAP_STEM, view)
    }

    pub fn write_map(&self, view: &MapView) -> Result<PathBuf> {
        self.write_json(EXPORT_MAP_STEM, view)
    }

    /// The filtered rows as the dashboard's data table shows them, sorted
    /// by station then hour, under the dataset's canonical column names
    pub fn write_filtered_table(&self, records: &[ValidationRecord]) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = generate_export_filename(&self.output_dir, EXPORT_TABLE_STEM, "csv");

        let mut writer = csv::WriterBuilder::new()
            .delimiter(CSV_DELIMITER)
            .from_path(&path)?;
        writer.write_record(["gare", "type_jour", "tranche_horaire", "heure", "pct_validations"])?;

        let mut sorted: Vec<&ValidationRecord> = records.iter().collect();
        sorted.sort_by(|a, b| {
            a.station_key
                .cmp(&b.station_key)
                .then(a.hour.cmp(&b.hour))
        });

        for record in sorted {
            let hour = record.hour.to_string();
            let pct = record.validation_pct.to_string();
            writer.write_record([
                record.station_key.as_str(),
                record.day_type.as_str(),
                record.hour_bucket.as_str(),
                hour.as_str(),
                pct.as_str(),
            ])?;
        }

        writer.flush()?;
        Ok(path)
    }

    fn write_json<T: Serialize>(&self, stem: &str, payload: &T) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = generate_export_filename(&self.output_dir, stem, "json");

        let file = File::create(&path)?;
        let writer = BufWriter::new(file);
        if self.pretty {
            serde_json::to_writer_pretty(writer, payload)?;
        } else {
            serde_json::to_writer(writer, payload)?;
        }

        Ok(path)
    }
}
