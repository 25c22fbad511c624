use serde::{Deserialize, Serialize};

use super::driver::Driver;
use super::user::User;

/// Dispatch order as listed in the back office.
///
/// Route and cargo fields depend on the order type (taxi, package, plane,
/// train), so most of them are nullable; display strings come precomputed
/// from the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub order_number: Option<i64>,
    pub user: User,
    pub driver: Option<Box<Driver>>,
    #[serde(default)]
    pub claimed_by: Option<Box<Driver>>,
    #[serde(default)]
    pub claimed_at: Option<String>,
    pub order_type: String,
    pub order_type_display: String,
    pub full_name: String,
    pub phone_number: String,
    pub from_country: Option<String>,
    pub from_location: Option<String>,
    pub from_region: Option<String>,
    pub to_country: Option<String>,
    pub to_location: Option<String>,
    pub to_region: Option<String>,
    pub order_date: Option<String>,
    #[serde(default)]
    pub num_passengers: Option<i64>,
    #[serde(default)]
    pub item_description: Option<String>,
    #[serde(default)]
    pub weight_tons: Option<f64>,
    #[serde(default)]
    pub payment_amount: Option<String>,
    #[serde(default)]
    pub terms: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    pub status: String,
    pub status_display: String,
    pub passport: Option<Vec<String>>,
    pub passport_urls: Option<Vec<String>>,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial order update. `driver_id` assigns a driver; the rest adjust the
/// order in place. Unset fields are omitted from the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOrderPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_taxi_order_without_cargo_fields() {
        let json = r#"{
            "id": 31,
            "order_number": 1031,
            "user": {
                "id": 4,
                "telegram_id": 900000004,
                "full_name": "Mijoz",
                "phone_number": "+998900000004",
                "language": "ru",
                "created_at": "2025-02-01T00:00:00Z",
                "updated_at": "2025-02-01T00:00:00Z"
            },
            "driver": null,
            "order_type": "taxi",
            "order_type_display": "Taxi",
            "full_name": "Mijoz",
            "phone_number": "+998900000004",
            "from_country": "UZ",
            "from_location": "Tashkent",
            "from_region": "Chilonzor",
            "to_country": "UZ",
            "to_location": "Samarkand",
            "to_region": null,
            "order_date": "2025-02-03",
            "num_passengers": 3,
            "status": "pending",
            "status_display": "Pending",
            "passport": null,
            "passport_urls": null,
            "created_at": "2025-02-01T08:00:00Z",
            "updated_at": "2025-02-01T08:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_number, Some(1031));
        assert!(order.driver.is_none());
        assert_eq!(order.num_passengers, Some(3));
        assert!(order.weight_tons.is_none());
        assert!(order.claimed_by.is_none());
    }

    #[test]
    fn test_update_payload_serializes_only_set_fields() {
        let payload = UpdateOrderPayload {
            status: Some("completed".to_string()),
            driver_id: Some(7),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "completed", "driver_id": 7})
        );
    }
}
