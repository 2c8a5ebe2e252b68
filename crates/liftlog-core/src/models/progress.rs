use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::workout::deserialize_lenient_f64;

/// A daily progress entry as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_consumed: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workouts_completed: Option<i32>,
}

/// A dated set of body measurements. All fields optional - users rarely
/// measure everything at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyMeasurement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hips: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biceps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thighs: Option<f64>,
}

// History endpoints return narrow per-date projections rather than full
// entries; one point type per series.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightPoint {
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub calories_consumed: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub workouts_completed: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub chest: Option<f64>,
    #[serde(default)]
    pub waist: Option<f64>,
    #[serde(default)]
    pub hips: Option<f64>,
    #[serde(default)]
    pub biceps: Option<f64>,
    #[serde(default)]
    pub thighs: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_weight_history_point() {
        let json = r#"[{"date": "2026-07-01", "weight": 82.5}, {"date": "2026-07-08", "weight": null}]"#;
        let points: Vec<WeightPoint> = serde_json::from_str(json).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].weight, Some(82.5));
        assert_eq!(points[1].weight, None);
    }

    #[test]
    fn parse_measurement_history_point() {
        let json = r#"{"date": "2026-07-01", "chest": 101.0, "waist": 84.0}"#;
        let point: MeasurementPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.chest, Some(101.0));
        assert_eq!(point.hips, None);
    }

    #[test]
    fn progress_entry_skips_absent_fields_on_create() {
        let entry = ProgressEntry {
            id: None,
            date: NaiveDate::from_ymd_opt(2026, 8, 4).unwrap(),
            weight: Some(81.9),
            calories_consumed: None,
            workouts_completed: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("calories_consumed").is_none());
        assert_eq!(json["weight"], 81.9);
    }
}
