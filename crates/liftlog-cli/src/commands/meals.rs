//! Meal planner commands.

use anyhow::Result;
use tracing::warn;

use liftlog_core::models::{Meal, MealType};
use liftlog_core::utils::truncate;

use crate::app::App;

use super::args::{flag_value, parse_date, parse_i32, parse_id, require_flag};

pub async fn run(app: &mut App, args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("add") => add(app, &args[1..]).await,
        Some("list") | None => list(app).await,
        Some("delete") => delete(app, &args[1..]).await,
        Some(other) => {
            anyhow::bail!(
                "unknown meal subcommand {:?}\n\
                 usage: liftlog meal add --food NAME --calories N --type breakfast|lunch|dinner|snack \
                 [--date YYYY-MM-DD] [--notes TEXT]\n\
                 \x20       liftlog meal list | delete ID",
                other
            );
        }
    }
}

async fn add(app: &mut App, args: &[String]) -> Result<()> {
    let meal_type = MealType::parse(require_flag(args, "--type")?)
        .ok_or_else(|| anyhow::anyhow!("--type must be breakfast, lunch, dinner, or snack"))?;

    let meal = Meal {
        id: None,
        food: require_flag(args, "--food")?.to_string(),
        calories: parse_i32(require_flag(args, "--calories")?, "--calories")?,
        meal_type,
        date: parse_date(flag_value(args, "--date"))?,
        notes: flag_value(args, "--notes").unwrap_or_default().to_string(),
        created_at: None,
    };

    app.ensure_session().await?;
    let created = app
        .run_api(|api| async move { api.create_meal(&meal).await })
        .await?;
    println!(
        "Logged {} ({} kcal) as {} on {}.",
        created.food, created.calories, created.meal_type, created.date
    );
    Ok(())
}

async fn list(app: &mut App) -> Result<()> {
    app.ensure_session().await?;
    let meals = app
        .run_api(|api| async move { api.fetch_meals().await })
        .await?;

    if let Err(e) = app.cache.save_meals(&meals) {
        warn!(error = %e, "Failed to cache meals");
    }

    if meals.is_empty() {
        println!("No meals recorded.");
        return Ok(());
    }

    println!(
        "{:<6} {:<12} {:<10} {:<28} {:>8}  {}",
        "ID", "DATE", "TYPE", "FOOD", "KCAL", "NOTES"
    );
    let mut total = 0i64;
    for meal in &meals {
        total += i64::from(meal.calories);
        println!(
            "{:<6} {:<12} {:<10} {:<28} {:>8}  {}",
            meal.id.map(|i| i.to_string()).unwrap_or_default(),
            meal.date.to_string(),
            meal.meal_type.to_string(),
            truncate(&meal.food, 28),
            meal.calories,
            truncate(&meal.notes, 24),
        );
    }
    println!("\n{} meal(s), {} kcal total.", meals.len(), total);
    Ok(())
}

async fn delete(app: &mut App, args: &[String]) -> Result<()> {
    let id = parse_id(
        args.first()
            .ok_or_else(|| anyhow::anyhow!("usage: liftlog meal delete ID"))?,
    )?;

    app.ensure_session().await?;
    app.run_api(|api| async move { api.delete_meal(id).await })
        .await?;
    println!("Deleted meal {}.", id);
    Ok(())
}
