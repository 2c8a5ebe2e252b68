use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A logged workout: one exercise performed on one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    /// Weight in the user's unit. The backend stores this as a decimal and
    /// serializes it as a string, so accept both forms.
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<f64>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Workout {
    /// One-line description for list output, e.g. "Bench Press 3x10 @ 135".
    pub fn summary(&self) -> String {
        match self.weight {
            Some(w) => format!("{} {}x{} @ {}", self.exercise, self.sets, self.reps, w),
            None => format!("{} {}x{}", self.exercise, self.sets, self.reps),
        }
    }
}

/// Time window accepted by the workout history endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Week,
    Month,
    Year,
}

impl TimeRange {
    /// Query-parameter value expected by the backend.
    pub fn as_param(&self) -> &'static str {
        match self {
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "week" => Some(TimeRange::Week),
            "month" => Some(TimeRange::Month),
            "year" => Some(TimeRange::Year),
            _ => None,
        }
    }
}

/// Accept a float, a numeric string ("135.00"), or null.
pub(crate) fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Num(f64),
        Text(String),
        None,
    }

    match Lenient::deserialize(deserializer)? {
        Lenient::Num(n) => Ok(Some(n)),
        Lenient::Text(s) if s.trim().is_empty() => Ok(None),
        Lenient::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        Lenient::None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_workout_with_decimal_string_weight() {
        let json = r#"{
            "id": 7,
            "exercise": "Bench Press",
            "sets": 3,
            "reps": 10,
            "weight": "135.00",
            "date": "2026-08-01",
            "notes": null,
            "created_at": "2026-08-01T17:02:11Z"
        }"#;

        let w: Workout = serde_json::from_str(json).expect("workout should parse");
        assert_eq!(w.id, Some(7));
        assert_eq!(w.weight, Some(135.0));
        assert_eq!(w.date, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert_eq!(w.summary(), "Bench Press 3x10 @ 135");
    }

    #[test]
    fn parse_workout_without_weight() {
        let json = r#"{"exercise": "Plank", "sets": 3, "reps": 1, "date": "2026-08-01"}"#;
        let w: Workout = serde_json::from_str(json).expect("workout should parse");
        assert_eq!(w.weight, None);
        assert_eq!(w.summary(), "Plank 3x1");
    }

    #[test]
    fn serialize_skips_absent_fields() {
        let w = Workout {
            id: None,
            exercise: "Squats".to_string(),
            sets: 5,
            reps: 5,
            weight: Some(225.0),
            date: NaiveDate::from_ymd_opt(2026, 8, 2).unwrap(),
            notes: None,
            created_at: None,
        };
        let json = serde_json::to_value(&w).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("notes").is_none());
        assert_eq!(json["weight"], 225.0);
    }

    #[test]
    fn time_range_roundtrip() {
        assert_eq!(TimeRange::parse("WEEK"), Some(TimeRange::Week));
        assert_eq!(TimeRange::Month.as_param(), "month");
        assert_eq!(TimeRange::parse("fortnight"), None);
    }
}
