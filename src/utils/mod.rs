pub mod constants;
pub mod filename;
pub mod names;
pub mod parse;
pub mod progress;

pub use constants::*;
pub use filename::generate_export_filename;
pub use names::{normalize_station_name, normalize_station_name_opt};
pub use parse::{parse_geo_point, parse_hour_bucket, parse_indicator, parse_pct};
pub use progress::ProgressReporter;
