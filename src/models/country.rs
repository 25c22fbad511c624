use serde::{Deserialize, Serialize};

/// Destination country with its per-language display names. `name_uz` and
/// `name_ru` are the two languages the bot always offers; the rest are
/// optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub code: String,
    pub name_uz: String,
    pub name_ru: String,
    pub name_en: Option<String>,
    pub name_cy: Option<String>,
    pub name_tj: Option<String>,
    pub name_kz: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCountryPayload {
    pub code: String,
    pub name_uz: String,
    pub name_ru: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_cy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_tj: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_kz: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCountryPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_uz: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_ru: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_cy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_tj: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_kz: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_country_with_partial_names() {
        let json = r#"{
            "id": 3,
            "code": "RU",
            "name_uz": "Rossiya",
            "name_ru": "Россия",
            "name_en": "Russia",
            "name_cy": null,
            "name_tj": null,
            "name_kz": null,
            "created_at": "2025-01-10T00:00:00Z",
            "updated_at": "2025-01-10T00:00:00Z"
        }"#;
        let country: Country = serde_json::from_str(json).unwrap();
        assert_eq!(country.code, "RU");
        assert_eq!(country.name_uz, "Rossiya");
        assert_eq!(country.name_en.as_deref(), Some("Russia"));
        assert!(country.name_tj.is_none());
    }

    #[test]
    fn test_update_payload_skips_unset_names() {
        let payload = UpdateCountryPayload {
            name_ru: Some("Казахстан".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"name_ru": "Казахстан"})
        );
    }
}
