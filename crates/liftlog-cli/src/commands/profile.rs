//! User profile commands.

use anyhow::Result;
use tracing::warn;

use liftlog_core::models::UserProfile;
use liftlog_core::utils::format_opt_f64;

use crate::app::App;

use super::args::{flag_value, parse_f64, parse_i32};

pub async fn run(app: &mut App, args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("show") | None => show(app).await,
        Some("update") => update(app, &args[1..]).await,
        Some(other) => {
            anyhow::bail!(
                "unknown profile subcommand {:?}\n\
                 usage: liftlog profile show\n\
                 \x20       liftlog profile update [--email E] [--first-name N] [--last-name N] \
                 [--age N] [--weight N] [--height N] [--gender G] [--goal TEXT] [--activity TEXT]",
                other
            );
        }
    }
}

async fn show(app: &mut App) -> Result<()> {
    app.ensure_session().await?;
    let profile = app
        .run_api(|api| async move { api.fetch_profile().await })
        .await?;

    if let Err(e) = app.cache.save_profile(&profile) {
        warn!(error = %e, "Failed to cache profile");
    }

    print_profile(&profile);
    Ok(())
}

/// The profile endpoint takes a full object on PUT, so fetch, apply the
/// changed fields, and send it back.
async fn update(app: &mut App, args: &[String]) -> Result<()> {
    app.ensure_session().await?;
    let mut profile = app
        .run_api(|api| async move { api.fetch_profile().await })
        .await?;

    let mut changed = false;
    if let Some(v) = flag_value(args, "--email") {
        profile.email = v.to_string();
        changed = true;
    }
    if let Some(v) = flag_value(args, "--first-name") {
        profile.first_name = v.to_string();
        changed = true;
    }
    if let Some(v) = flag_value(args, "--last-name") {
        profile.last_name = v.to_string();
        changed = true;
    }
    if let Some(v) = flag_value(args, "--age") {
        profile.age = Some(parse_i32(v, "--age")?);
        changed = true;
    }
    if let Some(v) = flag_value(args, "--weight") {
        profile.weight = Some(parse_f64(v, "--weight")?);
        changed = true;
    }
    if let Some(v) = flag_value(args, "--height") {
        profile.height = Some(parse_f64(v, "--height")?);
        changed = true;
    }
    if let Some(v) = flag_value(args, "--gender") {
        profile.gender = v.to_string();
        changed = true;
    }
    if let Some(v) = flag_value(args, "--goal") {
        profile.fitness_goal = v.to_string();
        changed = true;
    }
    if let Some(v) = flag_value(args, "--activity") {
        profile.activity_level = v.to_string();
        changed = true;
    }

    if !changed {
        anyhow::bail!("nothing to update - pass at least one field flag");
    }

    let updated = app
        .run_api(|api| async move { api.update_profile(&profile).await })
        .await?;
    if let Err(e) = app.cache.save_profile(&updated) {
        warn!(error = %e, "Failed to cache profile");
    }
    println!("Profile updated.\n");
    print_profile(&updated);
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    println!("{} (@{})", profile.display_name(), profile.username);
    println!("Email:          {}", profile.email);
    if let Some(age) = profile.age {
        println!("Age:            {}", age);
    }
    println!("Weight:         {}", format_opt_f64(profile.weight));
    println!("Height:         {}", format_opt_f64(profile.height));
    if !profile.gender.is_empty() {
        println!("Gender:         {}", profile.gender);
    }
    if !profile.fitness_goal.is_empty() {
        println!("Fitness goal:   {}", profile.fitness_goal);
    }
    if !profile.activity_level.is_empty() {
        println!("Activity level: {}", profile.activity_level);
    }
}
