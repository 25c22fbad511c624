//! Data models for the dispatch backend resources.
//!
//! This module contains all the data structures exchanged with the REST
//! API, including:
//!
//! - `User`, `AuthUser`: bot users and the staff account
//! - `Driver` with its onboarding draft and roster filtering
//! - `Order`: dispatch orders across taxi/package/plane/train types
//! - Point economy: `PointTransaction`, `PointPrice`, `PointPurchaseRequest`
//! - `BotSettings`, `Country`, `Card`, `DeportCheckRequest`
//! - `OrderStatistics` and the shared `PaginatedResponse` envelope
//!
//! Everything is a pass-through snapshot of backend state; derived fields
//! such as `*_display` and `final_price` come from the server.

pub mod card;
pub mod country;
pub mod deport;
pub mod driver;
pub mod order;
pub mod pagination;
pub mod points;
pub mod settings;
pub mod statistics;
pub mod user;

pub use card::{Card, CreateCardPayload, UpdateCardPayload};
pub use country::{Country, CreateCountryPayload, UpdateCountryPayload};
pub use deport::{DeportCheckRequest, DeportStatus, UpdateDeportCheckRequestPayload};
pub use driver::{CreateDriverPayload, DocumentFile, Driver, RosterFilter, UpdateDriverPayload};
pub use order::{Order, UpdateOrderPayload};
pub use pagination::PaginatedResponse;
pub use points::{
    CreatePointPricePayload, CreatePointTransactionPayload, PointPrice, PointPurchaseRequest,
    PointService, PointTransaction, PurchaseStatus, TransactionType,
    UpdatePointPricePayload, UpdatePointPurchaseRequestPayload, UpdatePointTransactionPayload,
};
pub use settings::{BotSettings, InviteLinkResponse, UpdateBotSettingsPayload};
pub use statistics::{DailyOrderCount, OrderStatistics};
pub use user::{AuthUser, CreateUserPayload, User};
