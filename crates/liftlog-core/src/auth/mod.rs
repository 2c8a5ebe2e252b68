//! Session and credential management.
//!
//! This module owns the authentication lifecycle:
//!
//! - `TokenStore`: the durable access/refresh token pair
//! - `SessionManager`: silent verification and renewal, login, logout
//! - `CredentialStore`: optional OS-keychain password storage
//! - `AuthError`: the login/registration error taxonomy
//!
//! The session check is fail-closed: a token is never trusted after a
//! process restart without being re-verified, and any uncertain outcome
//! reads as "not authenticated".

pub mod credentials;
pub mod error;
pub mod manager;
pub mod store;

pub use credentials::CredentialStore;
pub use error::{AuthError, FieldErrors};
pub use manager::{AuthService, SessionManager, SessionState};
pub use store::{TokenPair, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
