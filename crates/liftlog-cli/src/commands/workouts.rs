//! Workout log commands.

use anyhow::Result;
use tracing::warn;

use liftlog_core::models::{TimeRange, Workout};
use liftlog_core::utils::truncate;

use crate::app::App;

use super::args::{flag_value, parse_date, parse_id, parse_u32, require_flag};

pub async fn run(app: &mut App, args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("add") => add(app, &args[1..]).await,
        Some("list") | None => list(app).await,
        Some("history") => history(app, &args[1..]).await,
        Some("delete") => delete(app, &args[1..]).await,
        Some(other) => {
            anyhow::bail!(
                "unknown workout subcommand {:?}\n\
                 usage: liftlog workout add --exercise NAME --sets N --reps N \
                 [--weight W] [--date YYYY-MM-DD] [--notes TEXT]\n\
                 \x20       liftlog workout list | history [--range week|month|year] | delete ID",
                other
            );
        }
    }
}

async fn add(app: &mut App, args: &[String]) -> Result<()> {
    let workout = Workout {
        id: None,
        exercise: require_flag(args, "--exercise")?.to_string(),
        sets: parse_u32(require_flag(args, "--sets")?, "--sets")?,
        reps: parse_u32(require_flag(args, "--reps")?, "--reps")?,
        weight: flag_value(args, "--weight")
            .map(|w| super::args::parse_f64(w, "--weight"))
            .transpose()?,
        date: parse_date(flag_value(args, "--date"))?,
        notes: flag_value(args, "--notes").map(str::to_string),
        created_at: None,
    };

    app.ensure_session().await?;
    let created = app
        .run_api(|api| async move { api.create_workout(&workout).await })
        .await?;
    println!("Logged: {} on {}", created.summary(), created.date);
    Ok(())
}

async fn list(app: &mut App) -> Result<()> {
    app.ensure_session().await?;
    let workouts = app
        .run_api(|api| async move { api.fetch_workouts().await })
        .await?;

    if let Err(e) = app.cache.save_workouts(&workouts) {
        warn!(error = %e, "Failed to cache workouts");
    }

    print_workouts(&workouts);
    Ok(())
}

async fn history(app: &mut App, args: &[String]) -> Result<()> {
    let range = match flag_value(args, "--range") {
        Some(value) => TimeRange::parse(value)
            .ok_or_else(|| anyhow::anyhow!("--range must be week, month, or year"))?,
        None => TimeRange::Month,
    };

    app.ensure_session().await?;
    let workouts = app
        .run_api(|api| async move { api.fetch_workout_history(range).await })
        .await?;

    println!("Workout history ({}):", range.as_param());
    print_workouts(&workouts);
    Ok(())
}

async fn delete(app: &mut App, args: &[String]) -> Result<()> {
    let id = parse_id(
        args.first()
            .ok_or_else(|| anyhow::anyhow!("usage: liftlog workout delete ID"))?,
    )?;

    app.ensure_session().await?;
    app.run_api(|api| async move { api.delete_workout(id).await })
        .await?;
    println!("Deleted workout {}.", id);
    Ok(())
}

fn print_workouts(workouts: &[Workout]) {
    if workouts.is_empty() {
        println!("No workouts recorded.");
        return;
    }

    println!(
        "{:<6} {:<12} {:<24} {:>5} {:>5} {:>8}  {}",
        "ID", "DATE", "EXERCISE", "SETS", "REPS", "WEIGHT", "NOTES"
    );
    for w in workouts {
        println!(
            "{:<6} {:<12} {:<24} {:>5} {:>5} {:>8}  {}",
            w.id.map(|i| i.to_string()).unwrap_or_default(),
            w.date.to_string(),
            truncate(&w.exercise, 24),
            w.sets,
            w.reps,
            liftlog_core::utils::format_opt_f64(w.weight),
            truncate(w.notes.as_deref().unwrap_or(""), 30),
        );
    }
    println!("\n{} workout(s).", workouts.len());
}
