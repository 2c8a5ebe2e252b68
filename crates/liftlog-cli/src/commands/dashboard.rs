//! Dashboard summary command. Cache-first: shows cached numbers
//! immediately when fresh, refreshes from the backend when stale.

use anyhow::Result;
use tracing::warn;

use liftlog_core::models::DashboardStats;

use crate::app::App;

pub async fn run(app: &mut App) -> Result<()> {
    let cached = app.cache.load_dashboard().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load cached dashboard");
        None
    });

    let (stats, age) = match cached {
        Some(cached) if !cached.is_stale() => {
            let age = cached.age_display();
            (cached.data, age)
        }
        _ => {
            app.ensure_session().await?;
            let stats = app
                .run_api(|api| async move { api.fetch_dashboard_stats().await })
                .await?;
            if let Err(e) = app.cache.save_dashboard(&stats) {
                warn!(error = %e, "Failed to cache dashboard stats");
            }
            (stats, "just now".to_string())
        }
    };

    print_stats(&stats, &age);
    Ok(())
}

fn print_stats(stats: &DashboardStats, age: &str) {
    println!("Today's workouts:   {}", stats.today_workouts);
    println!("Today's calories:   {} kcal", stats.calories);
    println!("Workouts this week: {}", stats.weekly_workouts);
    println!("Active minutes:     {}", stats.active_minutes);
    println!("\n(updated {})", age);
}
