//! Core library for liftlog, a terminal client for a personal
//! fitness-tracking backend.
//!
//! This crate provides:
//! - `api`: the REST client for the backend's JWT auth and resource
//!   endpoints
//! - `auth`: token storage, the session manager (silent verify/refresh),
//!   and keychain credential storage
//! - `cache`: offline response cache and the local progress journal
//! - `config`: config file and directory resolution
//! - `library`: the built-in exercise catalog
//! - `models`: the data types exchanged with the backend

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod library;
pub mod models;
pub mod utils;
