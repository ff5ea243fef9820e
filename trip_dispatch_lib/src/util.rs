use chrono::{DateTime, NaiveDateTime};

/// Backend timestamps arrive with or without an offset depending on the
/// column. Falls back to the raw string when neither form parses.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_offset_and_naive_timestamps() {
        assert_eq!(format_timestamp("2025-05-22T12:09:14.274Z"), "22/05/2025 12:09");
        assert_eq!(format_timestamp("2025-05-22T12:09:14.274"), "22/05/2025 12:09");
        assert_eq!(format_timestamp("2025-05-22T12:09:14"), "22/05/2025 12:09");
    }

    #[test]
    fn passes_through_garbage() {
        assert_eq!(format_timestamp("-"), "-");
        assert_eq!(format_timestamp(""), "");
    }
}
