/// Case-insensitive substring test, used by library search and list filters.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Truncate a string to a maximum length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Format a date string to a more readable form.
/// Accepts RFC 3339 timestamps or plain YYYY-MM-DD dates.
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y").to_string()
    } else if let Ok(d) = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        d.format("%b %d, %Y").to_string()
    } else {
        date.to_string()
    }
}

/// Format an optional numeric value for table output, with a dash for None.
pub fn format_opt_f64(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Bench Press", "bench"));
        assert!(contains_ignore_case("Bench Press", "PRESS"));
        assert!(!contains_ignore_case("Bench Press", "squat"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World", 8), "Hello...");
        assert_eq!(truncate("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-08-01"), "Aug 01, 2026");
        assert_eq!(format_date("2026-08-01T17:02:11+00:00"), "Aug 01, 2026");
        assert_eq!(format_date("whenever"), "whenever");
    }

    #[test]
    fn test_format_opt_f64() {
        assert_eq!(format_opt_f64(Some(82.53)), "82.5");
        assert_eq!(format_opt_f64(None), "-");
    }
}
