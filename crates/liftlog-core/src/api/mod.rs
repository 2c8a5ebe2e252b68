//! REST API client module for the fitness backend.
//!
//! This module provides the `ApiClient` for talking to the backend's JSON
//! API: JWT auth endpoints plus the workout, nutrition, goal, progress,
//! dashboard, and profile resources.
//!
//! Authentication uses a short-lived bearer token obtained from the token
//! endpoint; the client attaches it to every request by reading the shared
//! token store at send time.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
