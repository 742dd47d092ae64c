/// Dataset file names
pub const VALIDATIONS_FILE: &str =
    "validations-reseau-ferre-profils-horaires-par-jour-type-1er-trimestre.csv";
pub const STATIONS_FILE: &str = "emplacement-des-gares-idf-data-generalisee.csv";

/// Both datasets are semicolon-delimited
pub const CSV_DELIMITER: u8 = b';';

/// Source columns, validations dataset
pub const COL_STATION_LABEL: &str = "libelle_arret";
pub const COL_DAY_TYPE: &str = "cat_jour";
pub const COL_HOUR_BUCKET: &str = "trnc_horr_60";
pub const COL_VALIDATION_PCT: &str = "pourcentage_validations";

/// Source columns, stations dataset
pub const STATION_NAME_CANDIDATES: [&str; 3] = ["nom_long", "gare", "nom"];
pub const COL_GEO_POINT: &str = "geo_point_2d";
pub const COL_MODE: &str = "mode";
pub const COL_OPERATOR: &str = "exploitant";

/// Mode indicator columns, in derivation precedence order
pub const MODE_FLAG_COLUMNS: [&str; 5] = ["termetro", "terrer", "tertrain", "tertram", "terval"];

/// Hour domain of the hourly buckets
pub const HOUR_MIN: u8 = 0;
pub const HOUR_MAX: u8 = 23;

/// Île-de-France geographic bounds
pub const IDF_MIN_LAT: f64 = 48.1;
pub const IDF_MAX_LAT: f64 = 49.3;
pub const IDF_MIN_LON: f64 = 1.4;
pub const IDF_MAX_LON: f64 = 3.6;

/// Export file stems
pub const EXPORT_PROFILE_STEM: &str = "profile";
pub const EXPORT_DISTRIBUTION_STEM: &str = "mode-distribution";
pub const EXPORT_HEATMAP_STEM: &str = "heatmap";
pub const EXPORT_MAP_STEM: &str = "map";
pub const EXPORT_TABLE_STEM: &str = "filtered-table";

/// Default directories
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_EXPORT_DIR: &str = "exports";
