//! Data models for liftlog entities.
//!
//! This module contains the data structures exchanged with the fitness
//! backend and used throughout the client:
//!
//! - `Workout`: a logged exercise session with sets/reps/weight
//! - `Meal`, `MealType`: nutrition log entries
//! - `Goal`, `GoalCategory`, `GoalStatus`: tracked fitness goals
//! - Progress types: `ProgressEntry`, `BodyMeasurement`, history points
//! - `UserProfile`, `Credentials`, `Registration`: account types
//! - `Exercise`: library catalog entries
//! - `DashboardStats`: the summary numbers shown on the dashboard

pub mod dashboard;
pub mod exercise;
pub mod goal;
pub mod nutrition;
pub mod progress;
pub mod user;
pub mod workout;

pub use dashboard::DashboardStats;
pub use exercise::Exercise;
pub use goal::{Goal, GoalCategory, GoalStatus};
pub use nutrition::{Meal, MealType};
pub use progress::{
    BodyMeasurement, MeasurementPoint, NutritionPoint, ProgressEntry, WeightPoint, WorkoutPoint,
};
pub use user::{Credentials, Registration, UserProfile};
pub use workout::{TimeRange, Workout};
