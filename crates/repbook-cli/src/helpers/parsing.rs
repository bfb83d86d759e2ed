//! Parsing helpers for dates, positions and result pairs.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::errors::CliError;

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CliError::invalid_input(format!("Invalid date (expected YYYY-MM-DD): {}", value)).into()
    })
}

/// Parse a local point in time: `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM`,
/// or a bare `YYYY-MM-DD` (midnight).
pub fn parse_when(value: &str) -> anyhow::Result<DateTime<Local>> {
    let value = value.trim();
    let naive = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| {
            CliError::invalid_input(format!(
                "Invalid date/time (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM): {}",
                value
            ))
        })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| {
            CliError::invalid_input(format!("Time does not exist in the local timezone: {}", value))
                .into()
        })
}

/// Convert a 1-based position from the command line into an index.
pub fn parse_position(position: usize, what: &str) -> anyhow::Result<usize> {
    position.checked_sub(1).ok_or_else(|| {
        CliError::invalid_input(format!("{} positions start at 1", what)).into()
    })
}

/// Parse a user-supplied number, accepting `,` as the decimal separator.
pub fn parse_number(value: &str, what: &str) -> anyhow::Result<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| CliError::invalid_input(format!("Invalid {}: {}", what, value)).into())
}

/// Parse repeated `EXERCISE=SUMMARY` arguments.
pub fn parse_result_pairs(values: &[String]) -> anyhow::Result<BTreeMap<String, String>> {
    let mut results = BTreeMap::new();
    for value in values {
        let (exercise, summary) = value.split_once('=').ok_or_else(|| {
            CliError::invalid_input(format!(
                "Invalid result (expected EXERCISE=SUMMARY): {}",
                value
            ))
        })?;
        let exercise = exercise.trim();
        let summary = summary.trim();
        if exercise.is_empty() || summary.is_empty() {
            return Err(CliError::invalid_input(format!(
                "Invalid result (expected EXERCISE=SUMMARY): {}",
                value
            ))
            .into());
        }
        results.insert(exercise.to_string(), summary.to_string());
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_date() {
        let date = parse_date("2025-03-10").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2025, 3, 10));
        assert!(parse_date("10.03.2025").is_err());
    }

    #[test]
    fn test_parse_when_formats() {
        let at = parse_when("2025-03-04T18:47").unwrap();
        assert_eq!((at.hour(), at.minute()), (18, 47));

        let at = parse_when("2025-03-04 07:05").unwrap();
        assert_eq!((at.hour(), at.minute()), (7, 5));

        let at = parse_when("2025-03-04").unwrap();
        assert_eq!((at.day(), at.hour()), (4, 0));

        assert!(parse_when("yesterday").is_err());
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position(1, "Entry").unwrap(), 0);
        assert_eq!(parse_position(3, "Entry").unwrap(), 2);
        assert!(parse_position(0, "Entry").is_err());
    }

    #[test]
    fn test_parse_number_accepts_comma() {
        assert_eq!(parse_number("102,5", "weight").unwrap(), 102.5);
        assert_eq!(parse_number(" 80 ", "weight").unwrap(), 80.0);
        assert!(parse_number("abc", "weight").is_err());
        assert!(parse_number("inf", "weight").is_err());
    }

    #[test]
    fn test_parse_result_pairs() {
        let pairs = vec!["f_1=100kg x 5 | 8p".to_string(), "f_2 = 12p".to_string()];
        let results = parse_result_pairs(&pairs).unwrap();
        assert_eq!(results["f_1"], "100kg x 5 | 8p");
        assert_eq!(results["f_2"], "12p");

        assert!(parse_result_pairs(&["f_1".to_string()]).is_err());
        assert!(parse_result_pairs(&["=8p".to_string()]).is_err());
    }
}
