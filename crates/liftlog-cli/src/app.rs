//! Application coordinator for the liftlog CLI.
//!
//! Wires the config, token store, session manager, API client, and cache
//! together, and centralizes the two cross-cutting session behaviors:
//! re-establishing a session before authenticated commands, and ending the
//! session when any request comes back unauthorized.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use liftlog_core::api::{ApiClient, ApiError};
use liftlog_core::auth::{CredentialStore, SessionManager, SessionState, TokenStore};
use liftlog_core::cache::CacheManager;
use liftlog_core::config::Config;
use liftlog_core::models::{Credentials, Registration};

pub struct App {
    pub config: Config,
    pub session: SessionManager<ApiClient>,
    pub api: ApiClient,
    pub cache: CacheManager,
    cache_dir: PathBuf,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        // Tokens are app-level; cached resources are per-user.
        let base_dir = Config::base_cache_dir().unwrap_or_else(|_| PathBuf::from("./cache"));
        let cache_dir = config.cache_dir().unwrap_or_else(|_| base_dir.clone());
        debug!(?cache_dir, "Cache directory configured");

        let tokens = Arc::new(TokenStore::open(base_dir));
        let api = ApiClient::new(config.api_base_url(), tokens.clone())?;
        let session = SessionManager::new(api.clone(), tokens);
        let cache = CacheManager::new(cache_dir.clone())?;

        Ok(Self {
            config,
            session,
            api,
            cache,
            cache_dir,
        })
    }

    pub fn cache_dir(&self) -> &PathBuf {
        &self.cache_dir
    }

    // =========================================================================
    // Session handling
    // =========================================================================

    /// Make sure we hold a valid session before an authenticated command:
    /// run the silent check, then fall back to a stored-password login.
    pub async fn ensure_session(&mut self) -> Result<()> {
        if self.session.check_auth_status().await {
            return Ok(());
        }

        if let Some(username) = self.config.last_username.clone() {
            if let Ok(password) = CredentialStore::get_password(&username) {
                let credentials = Credentials { username, password };
                match self.session.login(&credentials).await {
                    Ok(_) => {
                        info!("Session re-established from stored credentials");
                        return Ok(());
                    }
                    Err(e) => debug!(error = %e, "Stored-credential login failed"),
                }
            }
        }

        anyhow::bail!("not logged in - run `liftlog login` first")
    }

    /// Single place that reacts to an unauthorized response: end the
    /// session locally and tell the user how to recover. Every other error
    /// passes through unchanged.
    pub fn auth_failure(&mut self, err: ApiError) -> anyhow::Error {
        if matches!(err, ApiError::Unauthorized) {
            self.session.notify_unauthorized();
            anyhow::anyhow!("session expired - run `liftlog login` to sign in again")
        } else {
            anyhow::Error::new(err)
        }
    }

    /// Run one API call against a client clone, routing unauthorized
    /// responses through `auth_failure`.
    pub async fn run_api<T, F, Fut>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: std::future::Future<Output = Result<T, ApiError>>,
    {
        let api = self.api.clone();
        match f(api).await {
            Ok(value) => Ok(value),
            Err(e) => Err(self.auth_failure(e)),
        }
    }

    // =========================================================================
    // Interactive login / registration
    // =========================================================================

    pub async fn login_interactive(&mut self, username_arg: Option<String>) -> Result<()> {
        let username = match username_arg {
            Some(u) => u,
            None => {
                let env_user = std::env::var("LIFTLOG_USERNAME").ok();
                match env_user {
                    Some(u) if !u.is_empty() => u,
                    _ => Self::prompt_username(self.config.last_username.as_deref())?,
                }
            }
        };

        let password = match std::env::var("LIFTLOG_PASSWORD") {
            Ok(p) if !p.is_empty() => p,
            _ => {
                if CredentialStore::has_credentials(&username) {
                    print!("Use stored password? [Y/n]: ");
                    io::stdout().flush()?;
                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;
                    if input.trim().to_lowercase() != "n" {
                        CredentialStore::get_password(&username)?
                    } else {
                        Self::prompt_password()?
                    }
                } else {
                    Self::prompt_password()?
                }
            }
        };

        println!("Signing in...");
        let credentials = Credentials {
            username: username.clone(),
            password: password.clone(),
        };
        self.session.login(&credentials).await?;

        self.after_login(&username, &password)?;
        println!("Login successful.");
        Ok(())
    }

    pub async fn register_interactive(&mut self) -> Result<()> {
        println!("Create a new account\n");
        let username = Self::prompt_line("Username: ")?;
        let email = Self::prompt_line("Email: ")?;
        let first_name = Self::prompt_line("First name (optional): ")?;
        let last_name = Self::prompt_line("Last name (optional): ")?;
        let password = Self::prompt_password()?;

        let registration = Registration {
            username: username.clone(),
            email,
            password: password.clone(),
            first_name,
            last_name,
        };

        println!("Registering...");
        self.session.register(&registration).await?;

        self.after_login(&username, &password)?;
        println!("Account created and signed in.");
        Ok(())
    }

    /// Shared post-login bookkeeping: remember the username, point the
    /// cache at the user's directory, and offer the password to the
    /// keychain. None of these failures should undo a successful login.
    fn after_login(&mut self, username: &str, password: &str) -> Result<()> {
        if let Err(e) = CredentialStore::store(username, password) {
            warn!(error = %e, "Failed to store credentials in keychain");
        }

        self.config.last_username = Some(username.to_string());
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }

        match self.config.cache_dir() {
            Ok(dir) => {
                self.cache_dir = dir.clone();
                self.cache = CacheManager::new(dir)?;
            }
            Err(e) => warn!(error = %e, "Failed to resolve per-user cache directory"),
        }
        Ok(())
    }

    fn prompt_username(default: Option<&str>) -> Result<String> {
        let prompt = match default {
            Some(d) => format!("Username [{}]: ", d),
            None => "Username: ".to_string(),
        };
        let input = Self::prompt_line(&prompt)?;
        if input.is_empty() {
            match default {
                Some(d) => Ok(d.to_string()),
                None => anyhow::bail!("username is required"),
            }
        } else {
            Ok(input)
        }
    }

    fn prompt_line(prompt: &str) -> Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    fn prompt_password() -> Result<String> {
        let password = rpassword::prompt_password("Password: ")?;
        Ok(password)
    }

    /// Human-readable session state for the status command
    pub fn state_display(&self) -> &'static str {
        match self.session.state() {
            SessionState::Unknown => "unknown",
            SessionState::Authenticated => "authenticated",
            SessionState::Unauthenticated => "not authenticated",
        }
    }
}
