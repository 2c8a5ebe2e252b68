//! Goal tracker commands.

use anyhow::Result;
use tracing::warn;

use liftlog_core::models::{Goal, GoalCategory, GoalStatus};
use liftlog_core::utils::truncate;

use crate::app::App;

use super::args::{flag_value, parse_date, parse_f64, parse_id, require_flag};

pub async fn run(app: &mut App, args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("add") => add(app, &args[1..]).await,
        Some("list") | None => list(app).await,
        Some("update") => update(app, &args[1..]).await,
        Some("delete") => delete(app, &args[1..]).await,
        Some(other) => {
            anyhow::bail!(
                "unknown goal subcommand {:?}\n\
                 usage: liftlog goal add --title TEXT --category weight|workout|nutrition|measurement \
                 --target N --unit TEXT --end YYYY-MM-DD [--start YYYY-MM-DD] [--description TEXT]\n\
                 \x20       liftlog goal list | update ID [--current N] [--status STATUS] | delete ID",
                other
            );
        }
    }
}

async fn add(app: &mut App, args: &[String]) -> Result<()> {
    let category = GoalCategory::parse(require_flag(args, "--category")?).ok_or_else(|| {
        anyhow::anyhow!("--category must be weight, workout, nutrition, or measurement")
    })?;

    let goal = Goal {
        id: None,
        title: require_flag(args, "--title")?.to_string(),
        description: flag_value(args, "--description")
            .unwrap_or_default()
            .to_string(),
        category,
        target: parse_f64(require_flag(args, "--target")?, "--target")?,
        current: flag_value(args, "--current")
            .map(|v| parse_f64(v, "--current"))
            .transpose()?
            .unwrap_or(0.0),
        unit: require_flag(args, "--unit")?.to_string(),
        start_date: parse_date(flag_value(args, "--start"))?,
        end_date: parse_date(Some(require_flag(args, "--end")?))?,
        status: GoalStatus::NotStarted,
        created_at: None,
        updated_at: None,
    };

    if goal.end_date < goal.start_date {
        anyhow::bail!("--end must not be before --start");
    }

    app.ensure_session().await?;
    let created = app
        .run_api(|api| async move { api.create_goal(&goal).await })
        .await?;
    println!(
        "Added goal \"{}\": {} {} by {}.",
        created.title, created.target, created.unit, created.end_date
    );
    Ok(())
}

async fn list(app: &mut App) -> Result<()> {
    app.ensure_session().await?;
    let goals = app
        .run_api(|api| async move { api.fetch_goals().await })
        .await?;

    if let Err(e) = app.cache.save_goals(&goals) {
        warn!(error = %e, "Failed to cache goals");
    }

    if goals.is_empty() {
        println!("No goals yet.");
        return Ok(());
    }

    println!(
        "{:<6} {:<28} {:<12} {:<20} {:>6} {:<13} {}",
        "ID", "TITLE", "CATEGORY", "PROGRESS", "%", "STATUS", "DUE"
    );
    for goal in &goals {
        let progress = format!("{}/{} {}", goal.current, goal.target, goal.unit);
        println!(
            "{:<6} {:<28} {:<12} {:<20} {:>5.0}% {:<13} {}",
            goal.id.map(|i| i.to_string()).unwrap_or_default(),
            truncate(&goal.title, 28),
            goal.category.to_string(),
            truncate(&progress, 20),
            goal.progress_percent(),
            goal.status.to_string(),
            goal.end_date,
        );
    }
    println!("\n{} goal(s).", goals.len());
    Ok(())
}

/// Update a goal's current value and/or status. The backend expects a full
/// object on PUT, so fetch the goal first and apply the changes to it.
async fn update(app: &mut App, args: &[String]) -> Result<()> {
    let id = parse_id(
        args.first()
            .ok_or_else(|| anyhow::anyhow!("usage: liftlog goal update ID [--current N] [--status STATUS]"))?,
    )?;

    let new_current = flag_value(args, "--current")
        .map(|v| parse_f64(v, "--current"))
        .transpose()?;
    let new_status = flag_value(args, "--status")
        .map(|v| {
            GoalStatus::parse(v).ok_or_else(|| {
                anyhow::anyhow!("--status must be not_started, in_progress, completed, or failed")
            })
        })
        .transpose()?;

    if new_current.is_none() && new_status.is_none() {
        anyhow::bail!("nothing to update - pass --current and/or --status");
    }

    app.ensure_session().await?;
    let goals = app
        .run_api(|api| async move { api.fetch_goals().await })
        .await?;
    let mut goal = goals
        .into_iter()
        .find(|g| g.id == Some(id))
        .ok_or_else(|| anyhow::anyhow!("no goal with id {}", id))?;

    if let Some(current) = new_current {
        goal.current = current;
        // Reaching the target counts as done unless the caller says otherwise
        if new_status.is_none() && goal.current >= goal.target {
            goal.status = GoalStatus::Completed;
        } else if new_status.is_none() && goal.status == GoalStatus::NotStarted && goal.current > 0.0
        {
            goal.status = GoalStatus::InProgress;
        }
    }
    if let Some(status) = new_status {
        goal.status = status;
    }

    let updated = app
        .run_api(|api| async move { api.update_goal(id, &goal).await })
        .await?;
    println!(
        "Updated \"{}\": {}/{} {} ({:.0}%), {}.",
        updated.title,
        updated.current,
        updated.target,
        updated.unit,
        updated.progress_percent(),
        updated.status
    );
    Ok(())
}

async fn delete(app: &mut App, args: &[String]) -> Result<()> {
    let id = parse_id(
        args.first()
            .ok_or_else(|| anyhow::anyhow!("usage: liftlog goal delete ID"))?,
    )?;

    app.ensure_session().await?;
    app.run_api(|api| async move { api.delete_goal(id).await })
        .await?;
    println!("Deleted goal {}.", id);
    Ok(())
}
