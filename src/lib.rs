//! Dispatch Admin API - client library for the dispatch platform back office.
//!
//! This crate provides a typed, async client for the admin REST backend:
//! JWT login with transparent refresh-and-retry, persisted sessions with
//! keychain-backed credentials, paginated resource methods for users,
//! drivers, orders, and point accounting, and the multipart driver
//! document upload.
//!
//! The entry point is [`ApiClient`]; construct one with
//! [`ApiClient::from_config`] for persisted sessions or [`ApiClient::new`]
//! with an in-memory [`SessionManager`] for tests and one-off scripts.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError, ApiResult};
pub use auth::SessionManager;
pub use config::Config;
