//! Point economy: balance transactions, purchasable packages, and purchase
//! requests awaiting review.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::driver::Driver;

/// Direction of a balance adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Add,
    Subtract,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Add => "add",
            TransactionType::Subtract => "subtract",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointTransaction {
    pub id: i64,
    pub driver: Driver,
    /// Write-side echo of the driver id; some serializer versions omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<i64>,
    pub amount: i64,
    pub transaction_type: TransactionType,
    pub transaction_type_display: String,
    pub reason: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePointTransactionPayload {
    pub driver_id: i64,
    pub amount: i64,
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePointTransactionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Service a point package applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointService {
    TaxiPackage,
    Cargo,
}

impl PointService {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointService::TaxiPackage => "taxi_package",
            PointService::Cargo => "cargo",
        }
    }
}

impl fmt::Display for PointService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchasable point package. `final_price` is computed server-side from the
/// price and discount; the client never derives it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointPrice {
    pub id: i64,
    pub name: String,
    pub service: PointService,
    pub service_display: String,
    pub point_amount: i64,
    pub price: f64,
    pub discount_percentage: f64,
    pub order_number: i64,
    pub is_active: bool,
    pub is_popular: bool,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub final_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePointPricePayload {
    pub name: String,
    pub service: PointService,
    pub point_amount: i64,
    pub price: f64,
    pub discount_percentage: f64,
    pub order_number: i64,
    pub is_active: bool,
    pub is_popular: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePointPricePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<PointService>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_popular: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Review state of a point purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Pending,
    Approved,
    Rejected,
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Pending => "pending",
            PurchaseStatus::Approved => "approved",
            PurchaseStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Driver-submitted purchase with its payment receipt, waiting for an admin
/// decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointPurchaseRequest {
    pub id: i64,
    pub driver: Driver,
    pub point_price: PointPrice,
    pub card_number: String,
    /// Write-only on the serializer; reads use `receipt_photo_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_photo: Option<String>,
    pub receipt_photo_url: String,
    pub status: PurchaseStatus,
    pub status_display: String,
    pub admin_comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Review decision. `admin_comment` distinguishes "leave unchanged"
/// (`None`), "clear" (`Some(None)`), and "set" (`Some(Some(text))`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePointPurchaseRequestPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PurchaseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_comment: Option<Option<String>>,
}
