use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses the date formats the backend and the form controls emit.
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let date_str = date_str.trim();

    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Some(date);
    }

    // ISO 8601 with an offset, e.g. "2024-03-05T10:30:00Z"
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }

    None
}

/// Formats a calendar date as `MM/DD/YYYY`.
///
/// Empty input yields empty output; text that is not a recognisable date is
/// returned unchanged.
pub fn format_date(date_str: &str) -> String {
    if date_str.trim().is_empty() {
        return String::new();
    }

    match parse_date(date_str) {
        Some(date) => date.format("%m/%d/%Y").to_string(),
        None => date_str.to_string(),
    }
}

/// Formats a calendar date as `March 5, 2024`.
pub fn format_long_date(date_str: &str) -> String {
    if date_str.trim().is_empty() {
        return String::new();
    }

    match parse_date(date_str) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => date_str.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_empty() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("   "), "");
    }

    #[test]
    fn test_format_date_calendar_date() {
        assert_eq!(format_date("2024-03-05"), "03/05/2024");
        assert_eq!(format_date("2023-12-31"), "12/31/2023");
    }

    #[test]
    fn test_format_date_with_time_components() {
        assert_eq!(format_date("2024-03-05T10:30:00Z"), "03/05/2024");
        assert_eq!(format_date("2024-03-05T10:30:00"), "03/05/2024");
        assert_eq!(format_date("2024-03-05 10:30:00"), "03/05/2024");
    }

    #[test]
    fn test_format_date_invalid_returns_original() {
        assert_eq!(format_date("not-a-date"), "not-a-date");
        assert_eq!(format_date("2024-13-01"), "2024-13-01");
    }

    #[test]
    fn test_format_long_date() {
        assert_eq!(format_long_date("2024-03-05"), "March 5, 2024");
        assert_eq!(format_long_date(""), "");
        assert_eq!(format_long_date("soon"), "soon");
    }
}
