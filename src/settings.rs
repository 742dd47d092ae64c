use crate::error::{DashboardError, Result};
use crate::utils::constants::{
    DEFAULT_DATA_DIR, DEFAULT_EXPORT_DIR, STATIONS_FILE, VALIDATIONS_FILE,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved configuration: defaults, then an optional TOML file, then
/// `IDF_DASHBOARD_*` environment variables; CLI flags override on top
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub validations_file: String,
    pub stations_file: String,
}

impl Settings {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let builder = config::Config::builder()
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .set_default("export_dir", DEFAULT_EXPORT_DIR)?
            .set_default("validations_file", VALIDATIONS_FILE)?
            .set_default("stations_file", STATIONS_FILE)?;

        let builder = match config_path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name("idf-dashboard").required(false)),
        };

        let settings = builder
            .add_source(config::Environment::with_prefix("IDF_DASHBOARD"))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }

    pub fn with_export_dir(mut self, export_dir: PathBuf) -> Self {
        self.export_dir = export_dir;
        self
    }

    /// Where the validations dataset should be, found case-insensitively
    pub fn validations_path(&self) -> PathBuf {
        locate_case_insensitive(&self.data_dir, &self.validations_file)
    }

    /// Where the stations dataset should be, found case-insensitively
    pub fn stations_path(&self) -> PathBuf {
        locate_case_insensitive(&self.data_dir, &self.stations_file)
    }

    /// One diagnostic per dataset that cannot be found on disk
    pub fn missing_sources(&self) -> Vec<DashboardError> {
        let mut missing = Vec::new();
        if !self.validations_path().exists() {
            missing.push(DashboardError::MissingSource {
                name: self.validations_file.clone(),
                expected: self.data_dir.display().to_string(),
            });
        }
        if !self.stations_path().exists() {
            missing.push(DashboardError::MissingSource {
                name: self.stations_file.clone(),
                expected: self.data_dir.display().to_string(),
            });
        }
        missing
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            validations_file: VALIDATIONS_FILE.to_string(),
            stations_file: STATIONS_FILE.to_string(),
        }
    }
}

/// Resolve `name` inside `dir`, ignoring case
///
/// Falls back to the exact join when nothing matches, so callers still get
/// the expected location for diagnostics.
pub fn locate_case_insensitive(dir: &Path, name: &str) -> PathBuf {
    let exact = dir.join(name);
    if exact.exists() {
        return exact;
    }

    let wanted = name.to_lowercase();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            if entry.file_name().to_string_lossy().to_lowercase() == wanted {
                return entry.path();
            }
        }
    }

    exact
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();

        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.validations_file, VALIDATIONS_FILE);
        assert_eq!(settings.stations_file, STATIONS_FILE);
    }

    #[test]
    fn test_load_from_toml_file() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join("dashboard.toml");
        let mut file = fs::File::create(&config_path)?;
        writeln!(file, "data_dir = \"/srv/idf\"")?;
        writeln!(file, "validations_file = \"profils.csv\"")?;

        let settings = Settings::load(Some(&config_path))?;

        assert_eq!(settings.data_dir, PathBuf::from("/srv/idf"));
        assert_eq!(settings.validations_file, "profils.csv");
        // Unset keys keep their defaults
        assert_eq!(settings.stations_file, STATIONS_FILE);

        Ok(())
    }

    #[test]
    fn test_cli_overrides() {
        let settings = Settings::default()
            .with_data_dir(PathBuf::from("/tmp/jeu"))
            .with_export_dir(PathBuf::from("/tmp/sorties"));

        assert_eq!(settings.data_dir, PathBuf::from("/tmp/jeu"));
        assert_eq!(settings.export_dir, PathBuf::from("/tmp/sorties"));
    }

    #[test]
    fn test_locate_case_insensitive() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("Emplacement-Des-Gares.CSV"), "x")?;

        let found = locate_case_insensitive(dir.path(), "emplacement-des-gares.csv");
        assert!(found.exists());

        let missing = locate_case_insensitive(dir.path(), "absent.csv");
        assert!(!missing.exists());
        assert_eq!(missing, dir.path().join("absent.csv"));

        Ok(())
    }

    #[test]
    fn test_dataset_paths_resolve_in_data_dir() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join(VALIDATIONS_FILE.to_uppercase()), "x")?;

        let settings = Settings::default().with_data_dir(dir.path().to_path_buf());

        assert!(settings.validations_path().exists());
        // Stations file is absent; the expected location comes back anyway
        assert_eq!(
            settings.stations_path(),
            dir.path().join(STATIONS_FILE)
        );

        Ok(())
    }

    #[test]
    fn test_missing_sources_name_each_absent_file() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join(VALIDATIONS_FILE), "x")?;

        let settings = Settings::default().with_data_dir(dir.path().to_path_buf());
        let missing = settings.missing_sources();

        assert_eq!(missing.len(), 1);
        assert!(missing[0].to_string().contains(STATIONS_FILE));

        fs::write(dir.path().join(STATIONS_FILE), "x")?;
        assert!(settings.missing_sources().is_empty());

        Ok(())
    }
}
