//! Shared fixtures for the wiremock-backed integration tests.

use dispatch_admin_api::auth::SessionManager;
use dispatch_admin_api::ApiClient;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Client bound to the mock server with a seeded token pair.
pub fn authenticated_client(server: &MockServer, access: &str, refresh: &str) -> ApiClient {
    let session = SessionManager::in_memory();
    session.set_pair(access.to_string(), refresh.to_string());
    ApiClient::new(server.uri(), session).unwrap()
}

/// Standard paginated list envelope.
pub fn page(count: i64, next: Option<String>, results: Value) -> Value {
    json!({
        "count": count,
        "next": next,
        "previous": null,
        "results": results,
    })
}

/// A complete driver record as the backend serializes it.
pub fn driver_json(id: i64) -> Value {
    json!({
        "id": id,
        "user": {
            "id": id + 100,
            "telegram_id": 900_000_000 + id,
            "full_name": format!("Driver {id}"),
            "phone_number": format!("+9989012345{id:02}"),
            "language": "uz",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        },
        "passport_photo": "drivers/passport.jpg",
        "passport_photo_url": "http://localhost:8000/media/drivers/passport.jpg",
        "direction": "taxi",
        "direction_display": "Taxi",
        "driver_license_photo": "drivers/license.jpg",
        "driver_license_photo_url": "http://localhost:8000/media/drivers/license.jpg",
        "sts_photo": "drivers/sts.jpg",
        "sts_photo_url": "http://localhost:8000/media/drivers/sts.jpg",
        "car_photo": "drivers/car.jpg",
        "car_photo_url": "http://localhost:8000/media/drivers/car.jpg",
        "is_approved": false,
        "points": 0,
        "rating": 0.0,
        "created_at": "2025-01-02T00:00:00Z",
        "updated_at": "2025-01-02T00:00:00Z"
    })
}
