use serde::{Deserialize, Serialize};

use super::user::User;

/// Singleton bot configuration: the Telegram group ids the bot posts into,
/// the deport-check price, and the admin roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    pub id: i64,
    pub driver_request_group_id: String,
    pub taxi_group_id: String,
    pub gruz_group_id: String,
    pub avia_group_id: String,
    pub point_purchase_group_id: Option<String>,
    pub deport_check_group_id: Option<String>,
    pub deport_price: Option<f64>,
    pub admin_username: Option<String>,
    pub admins: Vec<User>,
}

/// Partial settings update. The nullable group/price fields are tri-state:
/// `None` leaves the value unchanged, `Some(None)` clears it on the backend,
/// `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateBotSettingsPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_request_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxi_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gruz_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avia_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_purchase_group_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deport_check_group_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deport_price: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_ids: Option<Vec<i64>>,
}

/// Result of the invite-link create/revoke actions. `invite_link` is only
/// present on a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteLinkResponse {
    pub success: bool,
    #[serde(default)]
    pub invite_link: Option<String>,
    pub message: String,
}
