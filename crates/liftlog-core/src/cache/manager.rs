use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    DashboardStats, Goal, Meal, MeasurementPoint, NutritionPoint, UserProfile, WeightPoint,
    Workout, WorkoutPoint,
};

/// Consider cache stale after 30 minutes.
/// Short enough that the dashboard stays honest, long enough to make
/// repeated commands snappy.
const CACHE_STALE_MINUTES: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Covers clock skew (negative ages) too
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }

    pub fn is_stale(&self) -> bool {
        self.age_minutes() > CACHE_STALE_MINUTES
    }
}

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedData<T>>> {
        let path = self.cache_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        Ok(Some(cached))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let cached = CachedData::new(data);
        let path = self.cache_path(name);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    // ===== Workouts =====

    pub fn load_workouts(&self) -> Result<Option<CachedData<Vec<Workout>>>> {
        self.load("workouts")
    }

    pub fn save_workouts(&self, workouts: &[Workout]) -> Result<()> {
        self.save("workouts", &workouts)
    }

    // ===== Meals =====

    pub fn load_meals(&self) -> Result<Option<CachedData<Vec<Meal>>>> {
        self.load("meals")
    }

    pub fn save_meals(&self, meals: &[Meal]) -> Result<()> {
        self.save("meals", &meals)
    }

    // ===== Goals =====

    pub fn load_goals(&self) -> Result<Option<CachedData<Vec<Goal>>>> {
        self.load("goals")
    }

    pub fn save_goals(&self, goals: &[Goal]) -> Result<()> {
        self.save("goals", &goals)
    }

    // ===== Dashboard =====

    pub fn load_dashboard(&self) -> Result<Option<CachedData<DashboardStats>>> {
        self.load("dashboard")
    }

    pub fn save_dashboard(&self, stats: &DashboardStats) -> Result<()> {
        self.save("dashboard", stats)
    }

    // ===== Profile =====

    pub fn load_profile(&self) -> Result<Option<CachedData<UserProfile>>> {
        self.load("profile")
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.save("profile", profile)
    }

    // ===== Remote progress histories =====

    pub fn load_weight_history(&self) -> Result<Option<CachedData<Vec<WeightPoint>>>> {
        self.load("weight_history")
    }

    pub fn save_weight_history(&self, points: &[WeightPoint]) -> Result<()> {
        self.save("weight_history", &points)
    }

    pub fn load_nutrition_history(&self) -> Result<Option<CachedData<Vec<NutritionPoint>>>> {
        self.load("nutrition_history")
    }

    pub fn save_nutrition_history(&self, points: &[NutritionPoint]) -> Result<()> {
        self.save("nutrition_history", &points)
    }

    pub fn load_workout_counts(&self) -> Result<Option<CachedData<Vec<WorkoutPoint>>>> {
        self.load("workout_counts")
    }

    pub fn save_workout_counts(&self, points: &[WorkoutPoint]) -> Result<()> {
        self.save("workout_counts", &points)
    }

    pub fn load_measurement_history(&self) -> Result<Option<CachedData<Vec<MeasurementPoint>>>> {
        self.load("measurement_history")
    }

    pub fn save_measurement_history(&self, points: &[MeasurementPoint]) -> Result<()> {
        self.save("measurement_history", &points)
    }

    // ===== Cache age information =====

    /// Helper to load cache and log errors without failing
    fn load_age<T>(
        &self,
        name: &str,
        loader: impl FnOnce() -> Result<Option<CachedData<T>>>,
    ) -> Option<String> {
        match loader() {
            Ok(Some(cached)) => Some(cached.age_display()),
            Ok(None) => None,
            Err(e) => {
                debug!(cache = name, error = %e, "Failed to load cache for age display");
                None
            }
        }
    }

    pub fn get_cache_ages(&self) -> CacheAges {
        CacheAges {
            workouts: self.load_age("workouts", || self.load_workouts()),
            meals: self.load_age("meals", || self.load_meals()),
            goals: self.load_age("goals", || self.load_goals()),
            dashboard: self.load_age("dashboard", || self.load_dashboard()),
        }
    }

    /// Helper to check staleness and log errors without failing
    fn is_cache_stale<T>(
        &self,
        name: &str,
        loader: impl FnOnce() -> Result<Option<CachedData<T>>>,
    ) -> bool {
        match loader() {
            Ok(Some(cached)) => cached.is_stale(),
            Ok(None) => true,
            Err(e) => {
                debug!(cache = name, error = %e, "Failed to load cache for staleness check");
                true
            }
        }
    }

    /// Check if any of the core cached data is stale
    pub fn any_stale(&self) -> bool {
        let stale_checks = [
            self.is_cache_stale("workouts", || self.load_workouts()),
            self.is_cache_stale("meals", || self.load_meals()),
            self.is_cache_stale("goals", || self.load_goals()),
            self.is_cache_stale("dashboard", || self.load_dashboard()),
        ];
        stale_checks.iter().any(|&stale| stale)
    }
}

#[derive(Debug, Default)]
pub struct CacheAges {
    pub workouts: Option<String>,
    pub meals: Option<String>,
    pub goals: Option<String>,
    pub dashboard: Option<String>,
}

impl CacheAges {
    /// The most recently updated age string, for a one-line status display
    pub fn last_updated(&self) -> String {
        let ages = [&self.workouts, &self.meals, &self.goals, &self.dashboard];
        for a in ages.iter().copied().flatten() {
            return a.clone();
        }
        "never".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

    fn temp_cache() -> CacheManager {
        let dir = std::env::temp_dir().join(format!(
            "liftlog-cache-test-{}-{}",
            std::process::id(),
            DIR_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        CacheManager::new(dir).unwrap()
    }

    #[test]
    fn fresh_cache_is_not_stale() {
        let cached = CachedData::new(vec![1, 2, 3]);
        assert!(!cached.is_stale());
        assert_eq!(cached.age_display(), "just now");
    }

    #[test]
    fn old_cache_is_stale() {
        let mut cached = CachedData::new(vec![1]);
        cached.cached_at = Utc::now() - Duration::minutes(CACHE_STALE_MINUTES + 1);
        assert!(cached.is_stale());
    }

    #[test]
    fn age_display_tiers() {
        let mut cached = CachedData::new(());
        cached.cached_at = Utc::now() - Duration::minutes(5);
        assert_eq!(cached.age_display(), "5m ago");

        cached.cached_at = Utc::now() - Duration::minutes(125);
        assert_eq!(cached.age_display(), "2h ago");

        cached.cached_at = Utc::now() - Duration::days(3);
        assert_eq!(cached.age_display(), "3d ago");
    }

    #[test]
    fn goals_roundtrip_through_cache() {
        let cache = temp_cache();
        assert!(cache.load_goals().unwrap().is_none());

        let goals = vec![Goal {
            id: Some(1),
            title: "Run 5k".to_string(),
            description: String::new(),
            category: crate::models::GoalCategory::Workout,
            target: 5.0,
            current: 2.0,
            unit: "km".to_string(),
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            status: crate::models::GoalStatus::InProgress,
            created_at: None,
            updated_at: None,
        }];
        cache.save_goals(&goals).unwrap();

        let loaded = cache.load_goals().unwrap().unwrap();
        assert_eq!(loaded.data.len(), 1);
        assert_eq!(loaded.data[0].title, "Run 5k");
        assert!(!loaded.is_stale());
    }

    #[test]
    fn cache_ages_last_updated() {
        let ages = CacheAges {
            workouts: Some("5m ago".to_string()),
            ..Default::default()
        };
        assert_eq!(ages.last_updated(), "5m ago");
        assert_eq!(CacheAges::default().last_updated(), "never");
    }

    #[test]
    fn empty_cache_reads_as_stale() {
        let cache = temp_cache();
        assert!(cache.any_stale());
    }
}
