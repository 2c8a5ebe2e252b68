//! Client-local persistence.
//!
//! Two distinct stores live here:
//!
//! - `CacheManager`: an offline-friendly cache of backend responses
//!   (workouts, meals, goals, dashboard stats, ...) with staleness tracking
//! - `ProgressJournal`: the progress view's own local log of weight,
//!   calorie, workout-count, and measurement series, independent of the
//!   backend

pub mod manager;
pub mod progress;

pub use manager::{CacheAges, CacheManager, CachedData};
pub use progress::{ProgressJournal, ProgressLog, ProgressPoint, ProgressSeries};
