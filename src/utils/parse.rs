/// Derive the integer hour from an hour-bucket label
///
/// Labels look like "6H-7H" or "14H-15H"; the hour is the numeral before the
/// first hyphen with its trailing "H" marker stripped. Anything that does not
/// parse yields `None`, which drops the row upstream.
///
/// # Examples
/// ```
/// use idf_rail_dashboard::utils::parse_hour_bucket;
///
/// assert_eq!(parse_hour_bucket("6H-7H"), Some(6));
/// assert_eq!(parse_hour_bucket("14H-15H"), Some(14));
/// assert_eq!(parse_hour_bucket("bad-label"), None);
/// ```
pub fn parse_hour_bucket(label: &str) -> Option<u8> {
    let head = label.split('-').next().unwrap_or(label);
    let digits: String = head
        .chars()
        .filter(|c| !c.eq_ignore_ascii_case(&'h') && !c.is_whitespace())
        .collect();

    if digits.is_empty() {
        return None;
    }

    digits.parse::<u8>().ok()
}

/// Parse a percentage cell, tolerating the decimal comma of French exports
///
/// Unparsable or non-finite values become `None` (coerce-to-missing, not an
/// error).
pub fn parse_pct(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    match candidate.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Split a combined "lat,lon" cell into coordinates
///
/// The cell must hold exactly two comma-separated numerals; any other shape
/// (missing part, extra part, unparsable part) yields a null pair rather than
/// a partial coordinate.
pub fn parse_geo_point(text: &str) -> (Option<f64>, Option<f64>) {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 2 {
        return (None, None);
    }

    let lat = parts[0].trim().parse::<f64>();
    let lon = parts[1].trim().parse::<f64>();

    match (lat, lon) {
        (Ok(lat), Ok(lon)) if lat.is_finite() && lon.is_finite() => (Some(lat), Some(lon)),
        _ => (None, None),
    }
}

/// Read a binary mode-indicator cell; anything non-positive or unparsable is falsy
pub fn parse_indicator(text: &str) -> bool {
    match parse_pct(text) {
        Some(v) => v > 0.0,
        None => false,
    }
}
