use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

// ── DateParser ────────────────────────────────────────────────────────────────

/// Parses calendar dates from the variety of formats found in sales
/// exports.
pub struct DateParser;

impl DateParser {
    /// Attempt to parse a raw field into a [`NaiveDate`].
    ///
    /// Handles, in order:
    /// * ISO dates (`2024-01-15`) and slashed variants.
    /// * Day-first and month-first slashed dates.
    /// * Date-time strings (ISO 8601 / RFC 3339 and space-separated),
    ///   reduced to their date component.
    ///
    /// Returns `None` for anything unrecognised; the caller drops the row.
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y"];
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Some(date);
            }
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(dt.date_naive());
        }

        const DATETIME_FORMATS: &[&str] = &[
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S",
        ];
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Some(dt.date());
            }
        }

        debug!("DateParser: could not parse date field \"{}\"", trimmed);
        None
    }
}

// ── NumericParser ─────────────────────────────────────────────────────────────

/// Coerces raw fields to numbers; anything non-numeric becomes missing,
/// never zero.
pub struct NumericParser;

impl NumericParser {
    /// Attempt to parse a raw field into an `f64`.
    ///
    /// Empty and non-numeric fields return `None`.
    pub fn parse(raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                debug!("NumericParser: could not parse numeric field \"{}\"", trimmed);
                None
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── DateParser ────────────────────────────────────────────────────────

    #[test]
    fn test_date_parser_iso() {
        assert_eq!(DateParser::parse("2024-01-15"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_date_parser_slashed() {
        assert_eq!(DateParser::parse("2024/01/15"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_date_parser_day_first() {
        assert_eq!(DateParser::parse("15/01/2024"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_date_parser_datetime_reduced_to_date() {
        assert_eq!(
            DateParser::parse("2024-01-15T10:30:00"),
            Some(date(2024, 1, 15))
        );
        assert_eq!(
            DateParser::parse("2024-01-15 10:30:00"),
            Some(date(2024, 1, 15))
        );
    }

    #[test]
    fn test_date_parser_rfc3339() {
        assert_eq!(
            DateParser::parse("2024-01-15T10:30:00+05:00"),
            Some(date(2024, 1, 15))
        );
    }

    #[test]
    fn test_date_parser_whitespace_trimmed() {
        assert_eq!(DateParser::parse("  2024-01-15  "), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_date_parser_garbage_returns_none() {
        assert_eq!(DateParser::parse("not-a-date"), None);
        assert_eq!(DateParser::parse(""), None);
        assert_eq!(DateParser::parse("2024-13-45"), None);
    }

    // ── NumericParser ─────────────────────────────────────────────────────

    #[test]
    fn test_numeric_parser_basic() {
        assert_eq!(NumericParser::parse("249.99"), Some(249.99));
        assert_eq!(NumericParser::parse("3"), Some(3.0));
        assert_eq!(NumericParser::parse(" 12.5 "), Some(12.5));
    }

    #[test]
    fn test_numeric_parser_negative() {
        assert_eq!(NumericParser::parse("-4.5"), Some(-4.5));
    }

    #[test]
    fn test_numeric_parser_non_numeric_is_missing_not_zero() {
        assert_eq!(NumericParser::parse("n/a"), None);
        assert_eq!(NumericParser::parse(""), None);
        assert_eq!(NumericParser::parse("$12.00"), None);
    }

    #[test]
    fn test_numeric_parser_rejects_non_finite() {
        assert_eq!(NumericParser::parse("NaN"), None);
        assert_eq!(NumericParser::parse("inf"), None);
    }
}
