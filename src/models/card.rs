use serde::{Deserialize, Serialize};

/// Payment card shown to drivers buying points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub card_number: String,
    pub card_holder_name: String,
    pub bank_name: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCardPayload {
    pub card_number: String,
    pub card_holder_name: String,
    pub bank_name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCardPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_holder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
