use chrono::{DateTime, NaiveDate};

/// Render a backend timestamp as a long date, e.g. `January 5, 2024`.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates; anything else
/// is returned unchanged.
pub fn format_date(value: &str) -> String {
    let date = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => value.to_string(),
    }
}

/// Format large numbers with K/M suffixes.
pub fn compact_number(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_rfc3339() {
        assert_eq!(format_date("2011-01-26T19:01:12Z"), "January 26, 2011");
        assert_eq!(format_date("2024-03-05T23:59:59+00:00"), "March 5, 2024");
    }

    #[test]
    fn test_format_plain_date() {
        assert_eq!(format_date("2024-02-01"), "February 1, 2024");
    }

    #[test]
    fn test_format_unparseable_passthrough() {
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_compact_number() {
        assert_eq!(compact_number(12.0), "12");
        assert_eq!(compact_number(1_500.0), "1.5K");
        assert_eq!(compact_number(2_340_000.0), "2.3M");
        assert_eq!(compact_number(-4_000.0), "-4.0K");
    }
}
