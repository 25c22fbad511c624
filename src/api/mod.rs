//! REST API client module for the dispatch backend.
//!
//! This module provides the `ApiClient` for communicating with the admin
//! REST API: users, drivers, orders, point accounting, review queues, and
//! bot configuration.
//!
//! The API uses JWT bearer token authentication with a refresh-token
//! rotation handled transparently inside the client.

pub mod client;
pub mod error;
pub mod filters;

pub use client::{ApiClient, TokenPairResponse};
pub use error::{ApiError, ApiResult};
pub use filters::{
    DeportCheckRequestFilters, DriverFilters, OrderFilters, PointPurchaseRequestFilters,
    PointTransactionFilters, UserFilters,
};
