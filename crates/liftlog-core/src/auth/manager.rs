use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::ApiError;
use crate::models::{Credentials, Registration};

use super::error::AuthError;
use super::store::{TokenPair, TokenStore};

/// Derived authentication state. Never persisted - recomputed from the
/// stored credential pair at every process start and after every
/// login/logout/refresh transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Before the first check of this process
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// The remote auth operations the session manager depends on. Implemented
/// by `ApiClient` for the real backend and by scripted fakes in tests.
#[allow(async_fn_in_trait)]
pub trait AuthService {
    async fn verify_token(&self, token: &str) -> Result<(), ApiError>;
    async fn refresh_token(&self, refresh: &str) -> Result<String, ApiError>;
    async fn obtain_token(&self, credentials: &Credentials) -> Result<TokenPair, AuthError>;
    async fn register_account(&self, registration: &Registration) -> Result<(), AuthError>;
    async fn logout(&self) -> Result<(), ApiError>;
}

/// Owns the credential pair and decides whether the current session is
/// valid, renewing it silently when possible.
///
/// The steady-state check is fail-closed: any ambiguity about token
/// validity - a rejected verify, an unreachable auth service, a storage
/// failure - resolves to "not authenticated", never the reverse.
pub struct SessionManager<A: AuthService> {
    service: A,
    store: Arc<TokenStore>,
    state: SessionState,
}

impl<A: AuthService> SessionManager<A> {
    pub fn new(service: A, store: Arc<TokenStore>) -> Self {
        Self {
            service,
            store,
            state: SessionState::Unknown,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// Silent session check: verify the stored access token, falling back to
    /// one refresh attempt. Never returns an error; all failure modes
    /// resolve to `false` and leave the state machine in `Unauthenticated`.
    ///
    /// With no stored access token this returns `false` without touching the
    /// network, even if a refresh token is present.
    pub async fn check_auth_status(&mut self) -> bool {
        let access = match self.store.access_token() {
            Some(token) => token,
            None => {
                debug!("No stored access token, session is unauthenticated");
                self.state = SessionState::Unauthenticated;
                return false;
            }
        };

        match self.service.verify_token(&access).await {
            Ok(()) => {
                debug!("Access token verified");
                self.state = SessionState::Authenticated;
                true
            }
            Err(e) => {
                debug!(error = %e, "Access token rejected, attempting refresh");
                self.try_refresh().await
            }
        }
    }

    async fn try_refresh(&mut self) -> bool {
        let refresh = match self.store.refresh_token() {
            Some(token) => token,
            None => {
                self.state = SessionState::Unauthenticated;
                return false;
            }
        };

        match self.service.refresh_token(&refresh).await {
            Ok(new_access) => {
                if let Err(e) = self.store.set_access(&new_access) {
                    // Can't uphold "authenticated implies stored token", so
                    // fail closed.
                    warn!(error = %e, "Failed to persist refreshed access token");
                    self.state = SessionState::Unauthenticated;
                    return false;
                }
                debug!("Access token refreshed");
                self.state = SessionState::Authenticated;
                true
            }
            Err(e) => {
                debug!(error = %e, "Refresh failed, clearing stored tokens");
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "Failed to clear token store");
                }
                self.state = SessionState::Unauthenticated;
                false
            }
        }
    }

    /// Log in and persist the issued credential pair. Persistence happens
    /// here, not at call sites, so no caller can forget it.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<TokenPair, AuthError> {
        let pair = self.service.obtain_token(credentials).await?;
        self.store
            .set_pair(&pair)
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        self.state = SessionState::Authenticated;
        Ok(pair)
    }

    /// Register a new account, then immediately log in with the same
    /// credentials to establish a session.
    pub async fn register(&mut self, registration: &Registration) -> Result<TokenPair, AuthError> {
        self.service.register_account(registration).await?;
        let credentials = Credentials {
            username: registration.username.clone(),
            password: registration.password.clone(),
        };
        self.login(&credentials).await
    }

    /// Best-effort remote logout, then unconditional local credential
    /// removal. Stale tokens must never outlive a logout, even when the
    /// network call fails.
    pub async fn logout(&mut self) {
        if let Err(e) = self.service.logout().await {
            debug!(error = %e, "Remote logout failed, clearing local session anyway");
        }
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear token store");
        }
        self.state = SessionState::Unauthenticated;
    }

    /// Called by the top-level coordinator when any request observes an
    /// unauthorized response: end the session locally. Presentation reacts
    /// to the state change separately.
    pub fn notify_unauthorized(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear token store");
        }
        self.state = SessionState::Unauthenticated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "liftlog-session-test-{}-{}",
            std::process::id(),
            DIR_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Scripted auth service: fixed outcomes per operation plus a call log.
    #[derive(Default)]
    struct FakeAuth {
        verify_ok: bool,
        refresh_result: Option<String>,
        login_result: Option<TokenPair>,
        logout_fails: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    impl FakeAuth {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AuthService for &FakeAuth {
        async fn verify_token(&self, _token: &str) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push("verify");
            if self.verify_ok {
                Ok(())
            } else {
                Err(ApiError::Unauthorized)
            }
        }

        async fn refresh_token(&self, _refresh: &str) -> Result<String, ApiError> {
            self.calls.lock().unwrap().push("refresh");
            match &self.refresh_result {
                Some(access) => Ok(access.clone()),
                None => Err(ApiError::Unauthorized),
            }
        }

        async fn obtain_token(&self, _credentials: &Credentials) -> Result<TokenPair, AuthError> {
            self.calls.lock().unwrap().push("login");
            match &self.login_result {
                Some(pair) => Ok(pair.clone()),
                None => Err(AuthError::InvalidCredentials),
            }
        }

        async fn register_account(&self, _registration: &Registration) -> Result<(), AuthError> {
            self.calls.lock().unwrap().push("register");
            Ok(())
        }

        async fn logout(&self) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push("logout");
            if self.logout_fails {
                Err(ApiError::ServerError("gateway timeout".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn manager_with<'a>(
        service: &'a FakeAuth,
        dir: PathBuf,
    ) -> (SessionManager<&'a FakeAuth>, Arc<TokenStore>) {
        let store = Arc::new(TokenStore::open(dir));
        (SessionManager::new(service, store.clone()), store)
    }

    fn stored_pair(store: &TokenStore, access: &str, refresh: &str) {
        store
            .set_pair(&TokenPair {
                access: access.to_string(),
                refresh: refresh.to_string(),
            })
            .unwrap();
    }

    #[tokio::test]
    async fn no_stored_tokens_is_unauthenticated_without_network() {
        let fake = FakeAuth::default();
        let (mut session, _store) = manager_with(&fake, temp_dir());

        assert_eq!(session.state(), SessionState::Unknown);
        assert!(!session.check_auth_status().await);
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn valid_access_token_checks_clean_twice() {
        let fake = FakeAuth {
            verify_ok: true,
            ..Default::default()
        };
        let (mut session, store) = manager_with(&fake, temp_dir());
        stored_pair(&store, "a1", "r1");

        assert!(session.check_auth_status().await);
        assert!(session.check_auth_status().await);
        assert_eq!(session.state(), SessionState::Authenticated);
        // Verify twice, never refresh; refresh token untouched.
        assert_eq!(fake.calls(), vec!["verify", "verify"]);
        assert_eq!(store.refresh_token().as_deref(), Some("r1"));
        assert_eq!(store.access_token().as_deref(), Some("a1"));
    }

    #[tokio::test]
    async fn expired_access_renews_via_refresh() {
        let fake = FakeAuth {
            verify_ok: false,
            refresh_result: Some("new-a2".to_string()),
            ..Default::default()
        };
        let (mut session, store) = manager_with(&fake, temp_dir());
        stored_pair(&store, "expired", "valid-r1");

        assert!(session.check_auth_status().await);
        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(store.access_token().as_deref(), Some("new-a2"));
        assert_eq!(store.refresh_token().as_deref(), Some("valid-r1"));
        assert_eq!(fake.calls(), vec!["verify", "refresh"]);
    }

    #[tokio::test]
    async fn failed_refresh_clears_both_tokens() {
        let fake = FakeAuth {
            verify_ok: false,
            refresh_result: None,
            ..Default::default()
        };
        let (mut session, store) = manager_with(&fake, temp_dir());
        stored_pair(&store, "expired", "also-expired");

        assert!(!session.check_auth_status().await);
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
    }

    #[tokio::test]
    async fn refresh_token_alone_is_never_consulted() {
        // A refresh token without an access token can only come from a
        // partial write; the check short-circuits without network access.
        let dir = temp_dir();
        std::fs::write(dir.join("tokens.json"), r#"{"refresh_token": "valid-r1"}"#).unwrap();

        let fake = FakeAuth {
            refresh_result: Some("a9".to_string()),
            ..Default::default()
        };
        let (mut session, store) = manager_with(&fake, dir);

        assert!(!session.check_auth_status().await);
        assert!(fake.calls().is_empty());
        assert_eq!(store.refresh_token().as_deref(), Some("valid-r1"));
    }

    #[tokio::test]
    async fn login_persists_the_issued_pair() {
        let fake = FakeAuth {
            login_result: Some(TokenPair {
                access: "a1".to_string(),
                refresh: "r1".to_string(),
            }),
            ..Default::default()
        };
        let (mut session, store) = manager_with(&fake, temp_dir());

        let credentials = Credentials {
            username: "u".to_string(),
            password: "p".to_string(),
        };
        let pair = session.login(&credentials).await.unwrap();
        assert_eq!(pair.access, "a1");
        assert!(session.is_authenticated());
        assert_eq!(store.access_token().as_deref(), Some("a1"));
        assert_eq!(store.refresh_token().as_deref(), Some("r1"));
    }

    #[tokio::test]
    async fn rejected_login_leaves_store_empty() {
        let fake = FakeAuth::default();
        let (mut session, store) = manager_with(&fake, temp_dir());

        let credentials = Credentials {
            username: "u".to_string(),
            password: "wrong".to_string(),
        };
        let err = session.login(&credentials).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!session.is_authenticated());
        assert_eq!(store.access_token(), None);
    }

    #[tokio::test]
    async fn register_logs_in_with_the_same_credentials() {
        let fake = FakeAuth {
            login_result: Some(TokenPair {
                access: "a1".to_string(),
                refresh: "r1".to_string(),
            }),
            ..Default::default()
        };
        let (mut session, store) = manager_with(&fake, temp_dir());

        let registration = Registration {
            username: "new-user".to_string(),
            email: "new@example.com".to_string(),
            password: "p".to_string(),
            first_name: String::new(),
            last_name: String::new(),
        };
        session.register(&registration).await.unwrap();
        assert_eq!(fake.calls(), vec!["register", "login"]);
        assert!(session.is_authenticated());
        assert_eq!(store.refresh_token().as_deref(), Some("r1"));
    }

    #[tokio::test]
    async fn logout_clears_tokens_even_when_remote_call_fails() {
        let fake = FakeAuth {
            verify_ok: true,
            logout_fails: true,
            ..Default::default()
        };
        let (mut session, store) = manager_with(&fake, temp_dir());
        stored_pair(&store, "a1", "r1");

        assert!(session.check_auth_status().await);
        session.logout().await;

        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
        assert!(fake.calls().contains(&"logout"));
    }

    #[tokio::test]
    async fn unauthorized_notification_ends_the_session() {
        let fake = FakeAuth {
            verify_ok: true,
            ..Default::default()
        };
        let (mut session, store) = manager_with(&fake, temp_dir());
        stored_pair(&store, "a1", "r1");
        assert!(session.check_auth_status().await);

        session.notify_unauthorized();
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
    }
}
