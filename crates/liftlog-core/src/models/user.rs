use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Login form contents.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration form contents. The backend requires all five fields but
/// accepts empty name strings.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// The authenticated user's profile, fetched and updated via the profile
/// endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub fitness_goal: String,
    #[serde(default)]
    pub activity_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
}

impl UserProfile {
    /// "First Last" when names are set, otherwise the username.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_username() {
        let mut profile = UserProfile {
            username: "ada".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "ada");

        profile.first_name = "Ada".to_string();
        profile.last_name = "Lovelace".to_string();
        assert_eq!(profile.display_name(), "Ada Lovelace");
    }

    #[test]
    fn parse_profile_with_sparse_fields() {
        let json = r#"{"username": "ada", "email": "ada@example.com", "weight": 62.0}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.weight, Some(62.0));
        assert_eq!(profile.age, None);
        assert_eq!(profile.gender, "");
    }
}
