//! Driver records and the driver onboarding draft.
//!
//! Drivers are bot users promoted through document review: onboarding
//! uploads four document scans, and the backend holds the record with
//! `is_approved == false` until an admin approves it.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: i64,
    pub user: User,
    pub passport_photo: String,
    pub passport_photo_url: String,
    pub direction: String,
    pub direction_display: String,
    pub driver_license_photo: String,
    pub driver_license_photo_url: String,
    pub sts_photo: String,
    pub sts_photo_url: String,
    pub car_photo: String,
    pub car_photo_url: String,
    pub is_approved: bool,
    pub points: i64,
    pub rating: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// One document scan held in memory for upload.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a document from disk, keeping the file name for the multipart
    /// part.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow::anyhow!("Document path has no file name: {}", path.display()))?
            .to_string();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read document {}", path.display()))?;
        Ok(Self { file_name, bytes })
    }

    /// MIME type guessed from the file extension. The backend only needs a
    /// plausible image/document type; unknown extensions fall back to the
    /// generic binary type.
    pub fn mime_type(&self) -> &'static str {
        let extension = Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("heic") => "image/heic",
            Some("pdf") => "application/pdf",
            _ => "application/octet-stream",
        }
    }
}

/// Driver onboarding draft. Fields are optional while the form is being
/// filled; `ApiClient::create_driver` checks completeness before anything is
/// sent.
#[derive(Debug, Clone, Default)]
pub struct CreateDriverPayload {
    pub user_id: Option<i64>,
    pub direction: String,
    pub passport_photo: Option<DocumentFile>,
    pub driver_license_photo: Option<DocumentFile>,
    pub sts_photo: Option<DocumentFile>,
    pub car_photo: Option<DocumentFile>,
}

impl CreateDriverPayload {
    /// The four documents paired with their multipart field names, or a
    /// description of what is missing.
    pub(crate) fn documents(&self) -> std::result::Result<[(&'static str, &DocumentFile); 4], String> {
        match (
            self.passport_photo.as_ref(),
            self.driver_license_photo.as_ref(),
            self.sts_photo.as_ref(),
            self.car_photo.as_ref(),
        ) {
            (Some(passport), Some(license), Some(sts), Some(car)) => Ok([
                ("passport_photo", passport),
                ("driver_license_photo", license),
                ("sts_photo", sts),
                ("car_photo", car),
            ]),
            _ => {
                let mut missing = Vec::new();
                if self.passport_photo.is_none() {
                    missing.push("passport_photo");
                }
                if self.driver_license_photo.is_none() {
                    missing.push("driver_license_photo");
                }
                if self.sts_photo.is_none() {
                    missing.push("sts_photo");
                }
                if self.car_photo.is_none() {
                    missing.push("car_photo");
                }
                Err(format!("Missing document files: {}", missing.join(", ")))
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDriverPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl UpdateDriverPayload {
    /// Payload for the approve/reject action, the most common driver update.
    pub fn approval(is_approved: bool) -> Self {
        Self {
            is_approved: Some(is_approved),
            ..Default::default()
        }
    }
}

/// Search and status filter applied to a fully materialized roster.
///
/// The term matches case-insensitively against the driver's name, phone,
/// telegram id, and driver id. Filtering happens client-side after
/// `fetch_all_drivers` so the admin can slice the roster without further
/// round-trips.
#[derive(Debug, Clone, Default)]
pub struct RosterFilter {
    pub search: Option<String>,
    pub approval: Option<bool>,
}

impl RosterFilter {
    pub fn matches(&self, driver: &Driver) -> bool {
        if let Some(expected) = self.approval {
            if driver.is_approved != expected {
                return false;
            }
        }

        let Some(term) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
        else {
            return true;
        };
        let term = term.to_lowercase();

        let name = driver
            .user
            .full_name
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        let phone = driver
            .user
            .phone_number
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        name.contains(&term)
            || phone.contains(&term)
            || driver.user.telegram_id.to_string().contains(&term)
            || driver.id.to_string().contains(&term)
    }

    /// Keep only matching drivers, preserving order.
    pub fn apply(&self, drivers: Vec<Driver>) -> Vec<Driver> {
        drivers
            .into_iter()
            .filter(|driver| self.matches(driver))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_driver(id: i64, name: &str, phone: &str, approved: bool) -> Driver {
        Driver {
            id,
            user: User {
                id: id + 100,
                telegram_id: 900_000_000 + id,
                full_name: Some(name.to_string()),
                phone_number: Some(phone.to_string()),
                language: Some("uz".to_string()),
                created_at: "2025-01-01T00:00:00Z".to_string(),
                updated_at: "2025-01-01T00:00:00Z".to_string(),
            },
            passport_photo: "drivers/passport.jpg".to_string(),
            passport_photo_url: "http://localhost:8000/media/drivers/passport.jpg".to_string(),
            direction: "taxi".to_string(),
            direction_display: "Taxi".to_string(),
            driver_license_photo: "drivers/license.jpg".to_string(),
            driver_license_photo_url: "http://localhost:8000/media/drivers/license.jpg".to_string(),
            sts_photo: "drivers/sts.jpg".to_string(),
            sts_photo_url: "http://localhost:8000/media/drivers/sts.jpg".to_string(),
            car_photo: "drivers/car.jpg".to_string(),
            car_photo_url: "http://localhost:8000/media/drivers/car.jpg".to_string(),
            is_approved: approved,
            points: 10,
            rating: 4.5,
            created_at: "2025-01-02T00:00:00Z".to_string(),
            updated_at: "2025-01-02T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_parse_driver_with_embedded_user() {
        let json = r#"{
            "id": 7,
            "user": {
                "id": 107,
                "telegram_id": 900000007,
                "full_name": "Alisher Usmonov",
                "phone_number": "+998901112233",
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
        }"#;
        let driver: Driver = serde_json::from_str(json).unwrap();
        assert_eq!(driver.user.full_name.as_deref(), Some("Alisher Usmonov"));
        assert!(!driver.is_approved);
        assert_eq!(driver.direction, "taxi");
    }

    #[test]
    fn test_documents_reports_missing_fields() {
        let mut payload = CreateDriverPayload {
            user_id: Some(5),
            direction: "taxi".to_string(),
            ..Default::default()
        };
        let err = payload.documents().unwrap_err();
        assert!(err.contains("passport_photo"));
        assert!(err.contains("car_photo"));

        payload.passport_photo = Some(DocumentFile::new("p.jpg", vec![1]));
        payload.driver_license_photo = Some(DocumentFile::new("l.jpg", vec![2]));
        payload.sts_photo = Some(DocumentFile::new("s.jpg", vec![3]));
        payload.car_photo = Some(DocumentFile::new("c.jpg", vec![4]));
        let documents = payload.documents().unwrap();
        assert_eq!(documents[0].0, "passport_photo");
        assert_eq!(documents[3].0, "car_photo");
    }

    #[test]
    fn test_mime_type_guess() {
        assert_eq!(DocumentFile::new("scan.JPG", vec![]).mime_type(), "image/jpeg");
        assert_eq!(DocumentFile::new("scan.png", vec![]).mime_type(), "image/png");
        assert_eq!(DocumentFile::new("scan.pdf", vec![]).mime_type(), "application/pdf");
        assert_eq!(
            DocumentFile::new("scan", vec![]).mime_type(),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_roster_filter_search_fields() {
        let drivers = vec![
            sample_driver(1, "Alisher Usmonov", "+998901112233", true),
            sample_driver(2, "Bobur Karimov", "+998909998877", false),
        ];

        let by_name = RosterFilter {
            search: Some("alisher".to_string()),
            ..Default::default()
        };
        assert_eq!(by_name.apply(drivers.clone()).len(), 1);

        let by_phone = RosterFilter {
            search: Some("99988".to_string()),
            ..Default::default()
        };
        let matched = by_phone.apply(drivers.clone());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 2);

        let by_telegram = RosterFilter {
            search: Some("900000001".to_string()),
            ..Default::default()
        };
        assert_eq!(by_telegram.apply(drivers.clone())[0].id, 1);

        let by_driver_id = RosterFilter {
            search: Some("2".to_string()),
            ..Default::default()
        };
        assert!(by_driver_id.apply(drivers.clone()).iter().any(|d| d.id == 2));

        let blank = RosterFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.apply(drivers).len(), 2);
    }

    #[test]
    fn test_roster_filter_approval() {
        let drivers = vec![
            sample_driver(1, "Alisher Usmonov", "+998901112233", true),
            sample_driver(2, "Bobur Karimov", "+998909998877", false),
        ];

        let approved_only = RosterFilter {
            approval: Some(true),
            ..Default::default()
        };
        let matched = approved_only.apply(drivers.clone());
        assert_eq!(matched.len(), 1);
        assert!(matched[0].is_approved);

        let pending_only = RosterFilter {
            approval: Some(false),
            ..Default::default()
        };
        assert_eq!(pending_only.apply(drivers)[0].id, 2);
    }
}
