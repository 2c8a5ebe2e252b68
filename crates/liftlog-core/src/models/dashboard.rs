use serde::{Deserialize, Serialize};

/// Summary numbers from the dashboard stats endpoint. The backend emits
/// camelCase keys here, unlike the rest of the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub today_workouts: i64,
    #[serde(default)]
    pub calories: i64,
    #[serde(default)]
    pub weekly_workouts: i64,
    #[serde(default)]
    pub active_minutes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_camel_case_stats() {
        let json = r#"{"todayWorkouts": 2, "calories": 1840, "weeklyWorkouts": 5, "activeMinutes": 145}"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.today_workouts, 2);
        assert_eq!(stats.weekly_workouts, 5);
        assert_eq!(stats.active_minutes, 145);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let stats: DashboardStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats.calories, 0);
    }
}
