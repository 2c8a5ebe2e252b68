//! Small helpers for hand-rolled flag parsing.
//!
//! Commands take `--name value` style flags; positional arguments are only
//! used where a single id or query is natural.

use anyhow::Result;
use chrono::{Local, NaiveDate};

/// Value of `--name value`, if present.
pub fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// Value of a required `--name value` flag.
pub fn require_flag<'a>(args: &'a [String], name: &str) -> Result<&'a str> {
    flag_value(args, name).ok_or_else(|| anyhow::anyhow!("missing required flag {}", name))
}

/// Whether a bare `--name` flag is present.
pub fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

/// Parse a `YYYY-MM-DD` date, defaulting to today when absent.
pub fn parse_date(value: Option<&str>) -> Result<NaiveDate> {
    match value {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("invalid date {:?}, expected YYYY-MM-DD", s)),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn parse_f64(value: &str, name: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("{} must be a number, got {:?}", name, value))
}

pub fn parse_i32(value: &str, name: &str) -> Result<i32> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("{} must be an integer, got {:?}", name, value))
}

pub fn parse_u32(value: &str, name: &str) -> Result<u32> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("{} must be a positive integer, got {:?}", name, value))
}

pub fn parse_id(value: &str) -> Result<i64> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("expected a numeric id, got {:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flag_value_finds_pairs() {
        let a = args(&["--sets", "3", "--reps", "10"]);
        assert_eq!(flag_value(&a, "--sets"), Some("3"));
        assert_eq!(flag_value(&a, "--reps"), Some("10"));
        assert_eq!(flag_value(&a, "--weight"), None);
    }

    #[test]
    fn flag_value_at_end_without_value() {
        let a = args(&["--notes"]);
        assert_eq!(flag_value(&a, "--notes"), None);
    }

    #[test]
    fn require_flag_reports_the_flag_name() {
        let a = args(&[]);
        let err = require_flag(&a, "--title").unwrap_err();
        assert!(err.to_string().contains("--title"));
    }

    #[test]
    fn parse_date_accepts_iso_and_defaults_to_today() {
        let d = parse_date(Some("2026-08-05")).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 8, 5).unwrap());
        assert!(parse_date(Some("08/05/2026")).is_err());
        assert!(parse_date(None).is_ok());
    }

    #[test]
    fn numeric_parsers_reject_junk() {
        assert!(parse_f64("82.5", "--weight").is_ok());
        assert!(parse_f64("heavy", "--weight").is_err());
        assert!(parse_u32("-3", "--sets").is_err());
        assert_eq!(parse_id("17").unwrap(), 17);
    }
}
