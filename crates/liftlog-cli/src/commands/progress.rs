//! Progress tracking commands.
//!
//! `add` and `show` work against the local progress journal; `pull`
//! refreshes the remote history series into the response cache. `add
//! --remote` additionally posts the entry to the backend so it shows up in
//! the server-side histories.

use anyhow::Result;
use futures::future::join4;
use tracing::warn;

use liftlog_core::cache::{ProgressJournal, ProgressSeries};
use liftlog_core::models::{MeasurementPoint, ProgressEntry};
use liftlog_core::utils::format_opt_f64;

use crate::app::App;

use super::args::{flag_value, has_flag, parse_date, parse_f64, require_flag};

pub async fn run(app: &mut App, args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("add") => add(app, &args[1..]).await,
        Some("show") | None => show(app, &args[1..]),
        Some("pull") => pull(app).await,
        Some(other) => {
            anyhow::bail!(
                "unknown progress subcommand {:?}\n\
                 usage: liftlog progress add --series weight|calories|workouts --value N \
                 [--date YYYY-MM-DD] [--remote]\n\
                 \x20       liftlog progress add --series measurements [--chest N] [--waist N] \
                 [--hips N] [--biceps N] [--thighs N] [--date YYYY-MM-DD]\n\
                 \x20       liftlog progress show [--series NAME] | pull",
                other
            );
        }
    }
}

async fn add(app: &mut App, args: &[String]) -> Result<()> {
    let series = ProgressSeries::parse(require_flag(args, "--series")?).ok_or_else(|| {
        anyhow::anyhow!("--series must be weight, calories, workouts, or measurements")
    })?;
    let date = parse_date(flag_value(args, "--date"))?;

    let mut journal = ProgressJournal::open(app.cache_dir())?;

    match series {
        ProgressSeries::Measurements => {
            let point = MeasurementPoint {
                date,
                chest: opt_measure(args, "--chest")?,
                waist: opt_measure(args, "--waist")?,
                hips: opt_measure(args, "--hips")?,
                biceps: opt_measure(args, "--biceps")?,
                thighs: opt_measure(args, "--thighs")?,
            };
            if point.chest.is_none()
                && point.waist.is_none()
                && point.hips.is_none()
                && point.biceps.is_none()
                && point.thighs.is_none()
            {
                anyhow::bail!("pass at least one measurement flag (e.g. --waist 84)");
            }
            journal.add_measurement(point);
        }
        other => {
            let value = parse_f64(require_flag(args, "--value")?, "--value")?;
            match other {
                ProgressSeries::Weight => journal.add_weight(date, value),
                ProgressSeries::Calories => journal.add_calories(date, value),
                ProgressSeries::Workouts => journal.add_workouts(date, value),
                ProgressSeries::Measurements => unreachable!(),
            }
        }
    }

    journal.save()?;
    println!("Recorded {} entry for {}.", series_name(series), date);

    // Optionally mirror the entry to the backend's progress log
    if has_flag(args, "--remote") && series != ProgressSeries::Measurements {
        let value = parse_f64(require_flag(args, "--value")?, "--value")?;
        let entry = ProgressEntry {
            id: None,
            date,
            weight: (series == ProgressSeries::Weight).then_some(value),
            calories_consumed: (series == ProgressSeries::Calories).then_some(value as i32),
            workouts_completed: (series == ProgressSeries::Workouts).then_some(value as i32),
        };
        app.ensure_session().await?;
        app.run_api(|api| async move { api.create_progress_entry(&entry).await })
            .await?;
        println!("Synced to backend.");
    }
    Ok(())
}

fn show(app: &mut App, args: &[String]) -> Result<()> {
    let journal = ProgressJournal::open(app.cache_dir())?;
    let filter = flag_value(args, "--series")
        .map(|s| {
            ProgressSeries::parse(s).ok_or_else(|| {
                anyhow::anyhow!("--series must be weight, calories, workouts, or measurements")
            })
        })
        .transpose()?;

    let wants = |s: ProgressSeries| filter.is_none() || filter == Some(s);

    if wants(ProgressSeries::Weight) {
        print_series("Weight", &journal.log.weight);
    }
    if wants(ProgressSeries::Calories) {
        print_series("Calories", &journal.log.calories);
    }
    if wants(ProgressSeries::Workouts) {
        print_series("Workouts", &journal.log.workouts);
    }
    if wants(ProgressSeries::Measurements) {
        println!("Measurements:");
        if journal.log.measurements.is_empty() {
            println!("  (no entries)");
        } else {
            println!(
                "  {:<4} {:<12} {:>7} {:>7} {:>7} {:>7} {:>7}",
                "#", "DATE", "CHEST", "WAIST", "HIPS", "BICEPS", "THIGHS"
            );
            for (i, m) in journal.log.measurements.iter().enumerate() {
                println!(
                    "  {:<4} {:<12} {:>7} {:>7} {:>7} {:>7} {:>7}",
                    i,
                    m.date.to_string(),
                    format_opt_f64(m.chest),
                    format_opt_f64(m.waist),
                    format_opt_f64(m.hips),
                    format_opt_f64(m.biceps),
                    format_opt_f64(m.thighs),
                );
            }
        }
    }
    Ok(())
}

/// Fetch all four remote history series and cache them.
async fn pull(app: &mut App) -> Result<()> {
    app.ensure_session().await?;

    let api = app.api.clone();
    let (weight, nutrition, workouts, measurements) = join4(
        api.fetch_weight_history(),
        api.fetch_nutrition_history(),
        api.fetch_workout_counts(),
        api.fetch_measurement_history(),
    )
    .await;

    let mut pulled = 0usize;
    match weight {
        Ok(points) => {
            println!("Weight history: {} point(s)", points.len());
            if let Err(e) = app.cache.save_weight_history(&points) {
                warn!(error = %e, "Failed to cache weight history");
            }
            pulled += 1;
        }
        Err(e) => return Err(app.auth_failure(e)),
    }
    match nutrition {
        Ok(points) => {
            println!("Nutrition history: {} point(s)", points.len());
            if let Err(e) = app.cache.save_nutrition_history(&points) {
                warn!(error = %e, "Failed to cache nutrition history");
            }
            pulled += 1;
        }
        Err(e) => return Err(app.auth_failure(e)),
    }
    match workouts {
        Ok(points) => {
            println!("Workout counts: {} point(s)", points.len());
            if let Err(e) = app.cache.save_workout_counts(&points) {
                warn!(error = %e, "Failed to cache workout counts");
            }
            pulled += 1;
        }
        Err(e) => return Err(app.auth_failure(e)),
    }
    match measurements {
        Ok(points) => {
            println!("Measurement history: {} point(s)", points.len());
            if let Err(e) = app.cache.save_measurement_history(&points) {
                warn!(error = %e, "Failed to cache measurement history");
            }
            pulled += 1;
        }
        Err(e) => return Err(app.auth_failure(e)),
    }

    println!("Pulled {} series.", pulled);
    Ok(())
}

fn opt_measure(args: &[String], name: &str) -> Result<Option<f64>> {
    flag_value(args, name).map(|v| parse_f64(v, name)).transpose()
}

fn series_name(series: ProgressSeries) -> &'static str {
    match series {
        ProgressSeries::Weight => "weight",
        ProgressSeries::Calories => "calories",
        ProgressSeries::Workouts => "workouts",
        ProgressSeries::Measurements => "measurements",
    }
}

fn print_series(title: &str, points: &[liftlog_core::cache::ProgressPoint]) {
    println!("{}:", title);
    if points.is_empty() {
        println!("  (no entries)");
        return;
    }
    for (i, p) in points.iter().enumerate() {
        println!("  {:<4} {:<12} {:>10}", i, p.date.to_string(), p.value);
    }
}
