//! Exercise library browsing. Works entirely offline.

use anyhow::Result;

use liftlog_core::library;
use liftlog_core::models::Exercise;

use super::args::{flag_value, has_flag};

pub fn run(args: &[String]) -> Result<()> {
    if has_flag(args, "--groups") {
        println!("Muscle groups:");
        for group in library::muscle_groups() {
            println!("  {}", group);
        }
        return Ok(());
    }

    // A numeric argument shows one exercise in full
    if let Some(id) = args.first().and_then(|a| a.parse::<u32>().ok()) {
        let exercise = library::by_id(id)
            .ok_or_else(|| anyhow::anyhow!("no exercise with id {} - try `liftlog exercises`", id))?;
        print_detail(exercise);
        return Ok(());
    }

    let results = if let Some(group) = flag_value(args, "--muscle") {
        library::by_muscle(group)
    } else {
        let query = args
            .iter()
            .filter(|a| !a.starts_with("--"))
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        library::search(&query)
    };

    if results.is_empty() {
        println!("No matching exercises. `liftlog exercises --groups` lists muscle groups.");
        return Ok(());
    }

    println!(
        "{:<4} {:<22} {:<12} {:<14} {}",
        "ID", "NAME", "MUSCLE", "DIFFICULTY", "EQUIPMENT"
    );
    for e in &results {
        println!(
            "{:<4} {:<22} {:<12} {:<14} {}",
            e.id, e.name, e.muscle, e.difficulty, e.equipment
        );
    }
    println!(
        "\n{} exercise(s). `liftlog exercises ID` shows instructions.",
        results.len()
    );
    Ok(())
}

fn print_detail(exercise: &Exercise) {
    println!("{} ({})", exercise.name, exercise.muscle);
    println!("Difficulty: {}", exercise.difficulty);
    println!("Equipment:  {}", exercise.equipment);
    println!("\nInstructions:");
    for (i, step) in exercise.instructions.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
}
