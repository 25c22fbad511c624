//! Authentication support: session state and credential storage.
//!
//! This module provides:
//! - `SessionManager`: the access/refresh token pair with disk persistence
//! - `CredentialStore`: secure OS-level credential storage via keyring
//!
//! Sessions persist across runs; the access token is short-lived and gets
//! replaced through the refresh flow in `api::client`.

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::{SessionData, SessionManager};
