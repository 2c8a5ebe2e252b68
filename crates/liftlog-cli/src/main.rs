//! Liftlog - a terminal client for a personal fitness-tracking backend.
//!
//! Log workouts and meals, track goals and body progress, and browse the
//! exercise library, all from the command line. Data lives on the remote
//! backend; a local cache keeps the common views fast and usable offline.

mod app;
mod commands;

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG to control the log level (e.g. RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    println!(
        "liftlog - personal fitness tracking from the terminal

Usage: liftlog <command> [options]

Account:
  login [--user NAME]      Sign in and store the session
  logout                   Sign out and discard the session
  register                 Create an account, then sign in
  status                   Show the current session state

Tracking:
  workout add|list|history|delete
  meal    add|list|delete
  goal    add|list|update|delete
  progress add|show|pull   Local progress journal + remote histories

Other:
  exercises [QUERY] [--muscle GROUP] [--groups]
  dashboard                Today's summary numbers
  profile show|update
  sync                     Refresh all cached data from the backend
  help                     Show this message

Run a subcommand without arguments for its options (e.g. `liftlog workout`)."
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let command = match args.get(1) {
        Some(c) => c.as_str(),
        None => {
            print_usage();
            return Ok(());
        }
    };

    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return Ok(());
    }

    // The library needs no backend or session
    if command == "exercises" {
        return commands::exercises::run(&args[2..]);
    }

    info!(command, "liftlog starting");
    let mut app = App::new()?;

    match command {
        "login" => commands::auth::login(&mut app, &args[2..]).await,
        "logout" => commands::auth::logout(&mut app).await,
        "register" => commands::auth::register(&mut app).await,
        "status" => commands::auth::status(&mut app).await,
        "workout" => commands::workouts::run(&mut app, &args[2..]).await,
        "meal" => commands::meals::run(&mut app, &args[2..]).await,
        "goal" => commands::goals::run(&mut app, &args[2..]).await,
        "progress" => commands::progress::run(&mut app, &args[2..]).await,
        "dashboard" => commands::dashboard::run(&mut app).await,
        "profile" => commands::profile::run(&mut app, &args[2..]).await,
        "sync" => commands::sync::run(&mut app).await,
        other => {
            eprintln!("Unknown command: {}\n", other);
            print_usage();
            std::process::exit(2);
        }
    }
}
