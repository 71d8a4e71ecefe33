// src/utils.rs
use chrono::{DateTime, Utc};

/// True when the value is empty or whitespace only
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// ISO-8601 timestamp without offset, microsecond precision
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Quote a worksheet title for use in an A1 range
pub fn a1_sheet_range(worksheet: &str) -> String {
    format!("'{}'!A1", worksheet.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \n\t"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_iso_timestamp() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(iso_timestamp(at), "2025-03-07T09:05:01.000000");
    }

    #[test]
    fn test_a1_sheet_range() {
        assert_eq!(a1_sheet_range("JobPosts"), "'JobPosts'!A1");
        assert_eq!(a1_sheet_range("Bob's"), "'Bob''s'!A1");
    }
}
