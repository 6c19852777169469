//! Code for parsing and formatting calendar dates.
//!
//! Input files and the CLI accept day-first dates with any of three
//! separators. Formats are tried in a fixed order and the first match wins.
use anyhow::{Context, Result};
use chrono::NaiveDate;

/// The accepted input formats, in trial order.
const DATE_FORMATS: [&str; 3] = ["%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y"];

/// The format used when rendering dates in output files and tables.
const OUTPUT_FORMAT: &str = "%d-%m-%Y";

/// Parse a day-first date string (`DD-MM-YYYY`, `DD/MM/YYYY` or `DD.MM.YYYY`).
///
/// Surrounding whitespace is ignored.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .with_context(|| {
            format!("Invalid date format: '{s}'. Use DD-MM-YYYY, DD/MM/YYYY or DD.MM.YYYY")
        })
}

/// Render a date as `DD-MM-YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(OUTPUT_FORMAT).to_string()
}

/// The day before `date`.
///
/// Boundary layers use this to turn a departure date into the last night of
/// the stay; the pricing engine itself is inclusive of both bounds.
pub fn eve_of(date: NaiveDate) -> Result<NaiveDate> {
    date.pred_opt()
        .with_context(|| format!("No day before {}", format_date(date)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use rstest::rstest;

    #[rstest]
    #[case("01-07-2026")]
    #[case("01/07/2026")]
    #[case("01.07.2026")]
    #[case("  01-07-2026  ")] // whitespace should be stripped
    fn test_parse_date_valid(#[case] input: &str) {
        assert_eq!(
            parse_date(input).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
        );
    }

    #[rstest]
    #[case("2026-07-01")] // ISO order is not accepted
    #[case("01-13-2026")] // month out of range
    #[case("32-01-2026")] // day out of range
    #[case("01 07 2026")]
    #[case("")]
    fn test_parse_date_invalid(#[case] input: &str) {
        assert_error!(
            parse_date(input),
            format!(
                "Invalid date format: '{}'. Use DD-MM-YYYY, DD/MM/YYYY or DD.MM.YYYY",
                input.trim()
            )
        );
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        assert_eq!(format_date(date), "01-07-2026");
    }

    #[test]
    fn test_eve_of() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(eve_of(date).unwrap(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert!(eve_of(NaiveDate::MIN).is_err());
    }

    #[test]
    fn test_round_trip() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        assert_eq!(parse_date(&format_date(date)).unwrap(), date);
    }
}
