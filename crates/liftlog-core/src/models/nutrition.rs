use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Meal slot. The backend stores these capitalized, so the wire format
/// matches the variant names directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        }
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MealType::Breakfast => write!(f, "Breakfast"),
            MealType::Lunch => write!(f, "Lunch"),
            MealType::Dinner => write!(f, "Dinner"),
            MealType::Snack => write!(f, "Snack"),
        }
    }
}

/// A logged meal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub food: String,
    pub calories: i32,
    pub meal_type: MealType,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_type_wire_format_is_capitalized() {
        let meal = Meal {
            id: None,
            food: "Oatmeal".to_string(),
            calories: 320,
            meal_type: MealType::Breakfast,
            date: NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
            notes: String::new(),
            created_at: None,
        };
        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(json["meal_type"], "Breakfast");
    }

    #[test]
    fn meal_type_parse_is_case_insensitive() {
        assert_eq!(MealType::parse("dinner"), Some(MealType::Dinner));
        assert_eq!(MealType::parse("SNACK"), Some(MealType::Snack));
        assert_eq!(MealType::parse("brunch"), None);
    }

    #[test]
    fn parse_meal_from_backend_shape() {
        let json = r#"{
            "id": 12,
            "food": "Chicken salad",
            "calories": 540,
            "meal_type": "Lunch",
            "date": "2026-08-03",
            "notes": "",
            "created_at": "2026-08-03T12:30:00Z"
        }"#;
        let meal: Meal = serde_json::from_str(json).unwrap();
        assert_eq!(meal.meal_type, MealType::Lunch);
        assert_eq!(meal.calories, 540);
    }
}
