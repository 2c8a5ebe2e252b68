use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Weight,
    Workout,
    Nutrition,
    Measurement,
}

impl GoalCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "weight" => Some(GoalCategory::Weight),
            "workout" => Some(GoalCategory::Workout),
            "nutrition" => Some(GoalCategory::Nutrition),
            "measurement" => Some(GoalCategory::Measurement),
            _ => None,
        }
    }
}

impl std::fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalCategory::Weight => write!(f, "Weight"),
            GoalCategory::Workout => write!(f, "Workout"),
            GoalCategory::Nutrition => write!(f, "Nutrition"),
            GoalCategory::Measurement => write!(f, "Measurement"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Failed,
}

impl GoalStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "not_started" => Some(GoalStatus::NotStarted),
            "in_progress" => Some(GoalStatus::InProgress),
            "completed" => Some(GoalStatus::Completed),
            "failed" => Some(GoalStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalStatus::NotStarted => write!(f, "Not Started"),
            GoalStatus::InProgress => write!(f, "In Progress"),
            GoalStatus::Completed => write!(f, "Completed"),
            GoalStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// A tracked fitness goal with a numeric target and current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: GoalCategory,
    pub target: f64,
    #[serde(default)]
    pub current: f64,
    pub unit: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Goal {
    /// Completion percentage clamped to 0..=100. A zero target reads as 0%.
    pub fn progress_percent(&self) -> f64 {
        if self.target == 0.0 {
            return 0.0;
        }
        (self.current / self.target * 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_goal() -> Goal {
        Goal {
            id: Some(1),
            title: "Bench bodyweight".to_string(),
            description: String::new(),
            category: GoalCategory::Workout,
            target: 180.0,
            current: 135.0,
            unit: "lbs".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            status: GoalStatus::InProgress,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn progress_percent_clamps() {
        let mut goal = sample_goal();
        assert_eq!(goal.progress_percent(), 75.0);

        goal.current = 400.0;
        assert_eq!(goal.progress_percent(), 100.0);

        goal.target = 0.0;
        assert_eq!(goal.progress_percent(), 0.0);
    }

    #[test]
    fn category_and_status_wire_format() {
        let goal = sample_goal();
        let json = serde_json::to_value(&goal).unwrap();
        assert_eq!(json["category"], "workout");
        assert_eq!(json["status"], "in_progress");

        let parsed: Goal = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.category, GoalCategory::Workout);
        assert_eq!(parsed.status, GoalStatus::InProgress);
    }

    #[test]
    fn status_defaults_to_not_started() {
        let json = r#"{
            "title": "Cut to 80kg",
            "category": "weight",
            "target": 80.0,
            "unit": "kg",
            "start_date": "2026-08-01",
            "end_date": "2026-11-01"
        }"#;
        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.status, GoalStatus::NotStarted);
        assert_eq!(goal.current, 0.0);
    }
}
