use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

/// Generate a date-stamped export filename with format: idf-{stem}-{YYMMDD}.{ext}
pub fn generate_export_filename(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("idf-{}-{:02}{:02}{:02}.{}", stem, year, month, day, extension);
    dir.join(filename)
}
