//! Account commands: login, logout, register, status.

use anyhow::Result;

use crate::app::App;

use super::args::flag_value;

pub async fn login(app: &mut App, args: &[String]) -> Result<()> {
    let username = flag_value(args, "--user").map(str::to_string);
    app.login_interactive(username).await
}

pub async fn logout(app: &mut App) -> Result<()> {
    app.session.logout().await;
    println!("Signed out.");
    Ok(())
}

pub async fn register(app: &mut App) -> Result<()> {
    app.register_interactive().await
}

/// Run the silent session check and report the outcome.
pub async fn status(app: &mut App) -> Result<()> {
    let authenticated = app.session.check_auth_status().await;
    println!("Session: {}", app.state_display());
    if let Some(ref username) = app.config.last_username {
        println!("Account: {}", username);
    }
    println!("Backend: {}", app.config.api_base_url());
    if !authenticated {
        println!("\nRun `liftlog login` to sign in.");
    }
    Ok(())
}
