use crate::error::{DashboardError, Result};
use encoding_rs::WINDOWS_1252;
use std::fs;
use std::path::Path;

/// Read a source file as text
///
/// The open-data exports circulate both as UTF-8 and as Windows-1252; bytes
/// that are not valid UTF-8 are decoded with the legacy code page so accented
/// station labels survive. A leading BOM is stripped.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => WINDOWS_1252.decode(err.as_bytes()).0.into_owned(),
    };

    match text.strip_prefix('\u{feff}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(text),
    }
}

/// Locate a column by name, ignoring case and padding
pub fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Error for a header the dataset must carry
pub fn missing_column(path: &Path, column: &str) -> DashboardError {
    let file = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("source file")
        .to_string();
    DashboardError::MissingColumn {
        file,
        column: column.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_text_utf8() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "gare;ville\nChâtelet;Paris\n")?;

        let text = read_text(temp_file.path())?;
        assert!(text.contains("Châtelet"));

        Ok(())
    }

    #[test]
    fn test_read_text_windows_1252_fallback() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        // "Châtelet" with 0xE2 for the circumflex a, as legacy exports encode it
        temp_file.write_all(b"gare\nCh\xE2telet\n")?;

        let text = read_text(temp_file.path())?;
        assert!(text.contains("Châtelet"));

        Ok(())
    }

    #[test]
    fn test_read_text_strips_bom() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"\xEF\xBB\xBFgare\nChatelet\n")?;

        let text = read_text(temp_file.path())?;
        assert!(text.starts_with("gare"));

        Ok(())
    }

    #[test]
    fn test_find_column() {
        let headers = csv::StringRecord::from(vec!["LIBELLE_ARRET", " cat_jour ", "trnc_horr_60"]);

        assert_eq!(find_column(&headers, "libelle_arret"), Some(0));
        assert_eq!(find_column(&headers, "cat_jour"), Some(1));
        assert_eq!(find_column(&headers, "absent"), None);
    }
}
