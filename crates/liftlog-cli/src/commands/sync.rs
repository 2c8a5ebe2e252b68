//! Full cache refresh: fetch every cached resource concurrently and write
//! the results to disk, so the other commands (and offline reads) start
//! from fresh data.

use anyhow::Result;
use tracing::{info, warn};

use liftlog_core::api::ApiError;

use crate::app::App;

pub async fn run(app: &mut App) -> Result<()> {
    app.ensure_session().await?;
    info!("Starting full cache refresh");

    // Clones share the connection pool and token store, so parallel
    // requests are cheap.
    let api = app.api.clone();
    let (workouts, meals, goals, dashboard, profile, weight, nutrition, counts, measurements) = tokio::join!(
        api.fetch_workouts(),
        api.fetch_meals(),
        api.fetch_goals(),
        api.fetch_dashboard_stats(),
        api.fetch_profile(),
        api.fetch_weight_history(),
        api.fetch_nutrition_history(),
        api.fetch_workout_counts(),
        api.fetch_measurement_history(),
    );

    let mut refreshed = 0usize;
    let mut failed = 0usize;
    let mut unauthorized = false;

    // One failure shouldn't abandon the rest of the refresh, but an
    // unauthorized response ends the session as a whole.
    let mut note = |name: &str, outcome: Result<(), ApiError>| match outcome {
        Ok(()) => refreshed += 1,
        Err(ApiError::Unauthorized) => unauthorized = true,
        Err(e) => {
            warn!(resource = name, error = %e, "Refresh failed");
            failed += 1;
        }
    };

    note(
        "workouts",
        workouts.map(|data| {
            if let Err(e) = app.cache.save_workouts(&data) {
                warn!(error = %e, "Failed to cache workouts");
            }
        }),
    );
    note(
        "meals",
        meals.map(|data| {
            if let Err(e) = app.cache.save_meals(&data) {
                warn!(error = %e, "Failed to cache meals");
            }
        }),
    );
    note(
        "goals",
        goals.map(|data| {
            if let Err(e) = app.cache.save_goals(&data) {
                warn!(error = %e, "Failed to cache goals");
            }
        }),
    );
    note(
        "dashboard",
        dashboard.map(|data| {
            if let Err(e) = app.cache.save_dashboard(&data) {
                warn!(error = %e, "Failed to cache dashboard stats");
            }
        }),
    );
    note(
        "profile",
        profile.map(|data| {
            if let Err(e) = app.cache.save_profile(&data) {
                warn!(error = %e, "Failed to cache profile");
            }
        }),
    );
    note(
        "weight history",
        weight.map(|data| {
            if let Err(e) = app.cache.save_weight_history(&data) {
                warn!(error = %e, "Failed to cache weight history");
            }
        }),
    );
    note(
        "nutrition history",
        nutrition.map(|data| {
            if let Err(e) = app.cache.save_nutrition_history(&data) {
                warn!(error = %e, "Failed to cache nutrition history");
            }
        }),
    );
    note(
        "workout counts",
        counts.map(|data| {
            if let Err(e) = app.cache.save_workout_counts(&data) {
                warn!(error = %e, "Failed to cache workout counts");
            }
        }),
    );
    note(
        "measurement history",
        measurements.map(|data| {
            if let Err(e) = app.cache.save_measurement_history(&data) {
                warn!(error = %e, "Failed to cache measurement history");
            }
        }),
    );

    if unauthorized {
        return Err(app.auth_failure(ApiError::Unauthorized));
    }

    let ages = app.cache.get_cache_ages();
    println!(
        "Refreshed {} resource(s){}. Last updated {}.",
        refreshed,
        if failed > 0 {
            format!(", {} failed", failed)
        } else {
            String::new()
        },
        ages.last_updated()
    );
    Ok(())
}
