use std::fmt;

use serde::{Deserialize, Serialize};

use super::user::User;

/// Processing state of a deportation-record check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeportStatus {
    Pending,
    Processing,
    Completed,
    Rejected,
}

impl DeportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeportStatus::Pending => "pending",
            DeportStatus::Processing => "processing",
            DeportStatus::Completed => "completed",
            DeportStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for DeportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-submitted request to check a passport against deportation records.
/// The admin attaches a screenshot of the result when completing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeportCheckRequest {
    pub id: i64,
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_photo: Option<String>,
    pub passport_photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_screenshot: Option<String>,
    pub admin_screenshot_url: Option<String>,
    pub status: DeportStatus,
    pub status_display: String,
    pub admin_comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Review decision. `admin_comment` is tri-state: `None` leaves it
/// unchanged, `Some(None)` clears it, `Some(Some(text))` sets it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDeportCheckRequestPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeportStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_comment: Option<Option<String>>,
}
