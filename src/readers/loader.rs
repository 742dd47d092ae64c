use crate::error::Result;
use crate::models::{StationTable, ValidationTable};
use std::path::Path;
use std::sync::Arc;

use super::cache::TableCache;
use super::station_reader::StationReader;
use super::validation_reader::ValidationReader;

/// The loading component: both readers plus their memoization caches
///
/// Repeated loads of unchanged files hand back the cached snapshots, so a
/// caller can re-run the pipeline per interaction without re-parsing.
pub struct DatasetLoader {
    validation_reader: ValidationReader,
    station_reader: StationReader,
    validations: TableCache<ValidationTable>,
    stations: TableCache<StationTable>,
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            validation_reader: ValidationReader::new(),
            station_reader: StationReader::new(),
            validations: TableCache::new(),
            stations: TableCache::new(),
        }
    }

    pub fn load_validations(&mut self, path: &Path) -> Result<Arc<ValidationTable>> {
        let reader = &self.validation_reader;
        self.validations.get_or_load(path, |p| reader.read(p))
    }

    pub fn load_stations(&mut self, path: &Path) -> Result<Arc<StationTable>> {
        let reader = &self.station_reader;
        self.stations.get_or_load(path, |p| reader.read(p))
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}
