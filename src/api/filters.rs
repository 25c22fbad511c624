//! Recognized filter sets for the list endpoints.
//!
//! Each list endpoint accepts a fixed set of query parameters; these structs
//! are those sets, so an unrecognized key cannot be expressed at all. The
//! `query_pairs` methods emit `page` plus every set field, skipping string
//! values that are empty after trimming. Pairs feed straight into
//! `reqwest::RequestBuilder::query`.

use crate::models::{DeportStatus, PurchaseStatus, TransactionType};

fn push_trimmed(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        let value = value.trim();
        if !value.is_empty() {
            pairs.push((key, value.to_string()));
        }
    }
}

/// Filters for `GET /users/`.
#[derive(Debug, Clone, Default)]
pub struct UserFilters {
    pub query: Option<String>,
    pub telegram_id: Option<i64>,
}

impl UserFilters {
    pub fn query_pairs(&self, page: i64) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", page.to_string())];
        push_trimmed(&mut pairs, "query", self.query.as_deref());
        if let Some(telegram_id) = self.telegram_id {
            pairs.push(("telegram_id", telegram_id.to_string()));
        }
        pairs
    }
}

/// Filters for `GET /drivers/`. `page_size` is how the roster
/// materialization asks for larger pages.
#[derive(Debug, Clone, Default)]
pub struct DriverFilters {
    pub is_approved: Option<bool>,
    pub direction: Option<String>,
    pub search: Option<String>,
    pub page_size: Option<i64>,
}

impl DriverFilters {
    pub fn query_pairs(&self, page: i64) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", page.to_string())];
        // false is a meaningful value here (pending drivers), so booleans are
        // sent whenever set
        if let Some(is_approved) = self.is_approved {
            pairs.push(("is_approved", is_approved.to_string()));
        }
        push_trimmed(&mut pairs, "direction", self.direction.as_deref());
        push_trimmed(&mut pairs, "search", self.search.as_deref());
        if let Some(page_size) = self.page_size {
            pairs.push(("page_size", page_size.to_string()));
        }
        pairs
    }
}

/// Filters for `GET /orders/`. Dates are `YYYY-MM-DD` strings as the
/// backend expects.
#[derive(Debug, Clone, Default)]
pub struct OrderFilters {
    pub order_type: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub order_number: Option<String>,
}

impl OrderFilters {
    pub fn query_pairs(&self, page: i64) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", page.to_string())];
        push_trimmed(&mut pairs, "order_type", self.order_type.as_deref());
        push_trimmed(&mut pairs, "status", self.status.as_deref());
        push_trimmed(&mut pairs, "date_from", self.date_from.as_deref());
        push_trimmed(&mut pairs, "date_to", self.date_to.as_deref());
        push_trimmed(&mut pairs, "order_number", self.order_number.as_deref());
        pairs
    }
}

/// Filters for `GET /point-transactions/`.
#[derive(Debug, Clone, Default)]
pub struct PointTransactionFilters {
    pub driver_id: Option<i64>,
    pub transaction_type: Option<TransactionType>,
}

impl PointTransactionFilters {
    pub fn query_pairs(&self, page: i64) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", page.to_string())];
        if let Some(driver_id) = self.driver_id {
            pairs.push(("driver_id", driver_id.to_string()));
        }
        if let Some(transaction_type) = self.transaction_type {
            pairs.push(("transaction_type", transaction_type.as_str().to_string()));
        }
        pairs
    }
}

/// Filters for `GET /point-purchase-requests/`.
#[derive(Debug, Clone, Default)]
pub struct PointPurchaseRequestFilters {
    pub status: Option<PurchaseStatus>,
    pub driver_id: Option<i64>,
}

impl PointPurchaseRequestFilters {
    pub fn query_pairs(&self, page: i64) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", page.to_string())];
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(driver_id) = self.driver_id {
            pairs.push(("driver_id", driver_id.to_string()));
        }
        pairs
    }
}

/// Filters for `GET /deport-check-requests/`.
#[derive(Debug, Clone, Default)]
pub struct DeportCheckRequestFilters {
    pub status: Option<DeportStatus>,
    pub user_id: Option<i64>,
}

impl DeportCheckRequestFilters {
    pub fn query_pairs(&self, page: i64) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", page.to_string())];
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(user_id) = self.user_id {
            pairs.push(("user_id", user_id.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(pairs: &[(&'static str, String)]) -> Vec<&'static str> {
        pairs.iter().map(|(key, _)| *key).collect()
    }

    #[test]
    fn test_default_filters_emit_only_page() {
        assert_eq!(
            UserFilters::default().query_pairs(1),
            vec![("page", "1".to_string())]
        );
        assert_eq!(
            DriverFilters::default().query_pairs(3),
            vec![("page", "3".to_string())]
        );
        assert_eq!(
            OrderFilters::default().query_pairs(2),
            vec![("page", "2".to_string())]
        );
    }

    #[test]
    fn test_user_filters_full_set() {
        let filters = UserFilters {
            query: Some("alisher".to_string()),
            telegram_id: Some(900000001),
        };
        let pairs = filters.query_pairs(1);
        assert_eq!(keys(&pairs), vec!["page", "query", "telegram_id"]);
        assert_eq!(pairs[2].1, "900000001");
    }

    #[test]
    fn test_blank_strings_are_omitted() {
        let filters = OrderFilters {
            order_type: Some("  ".to_string()),
            status: Some("pending".to_string()),
            order_number: Some(String::new()),
            ..Default::default()
        };
        let pairs = filters.query_pairs(1);
        assert_eq!(keys(&pairs), vec!["page", "status"]);
    }

    #[test]
    fn test_string_values_are_trimmed() {
        let filters = DriverFilters {
            search: Some("  Alisher ".to_string()),
            ..Default::default()
        };
        let pairs = filters.query_pairs(1);
        assert_eq!(pairs[1], ("search", "Alisher".to_string()));
    }

    #[test]
    fn test_driver_filters_send_false_approval() {
        let filters = DriverFilters {
            is_approved: Some(false),
            ..Default::default()
        };
        let pairs = filters.query_pairs(1);
        assert!(pairs.contains(&("is_approved", "false".to_string())));
    }

    #[test]
    fn test_each_recognized_key_appears_once() {
        let filters = DriverFilters {
            is_approved: Some(true),
            direction: Some("taxi".to_string()),
            search: Some("98".to_string()),
            page_size: Some(50),
        };
        let pairs = filters.query_pairs(2);
        let mut keys = keys(&pairs);
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), pairs.len());
        assert_eq!(pairs.len(), 5);
    }

    #[test]
    fn test_enum_filters_use_wire_names() {
        let transactions = PointTransactionFilters {
            driver_id: Some(4),
            transaction_type: Some(TransactionType::Subtract),
        };
        assert!(transactions
            .query_pairs(1)
            .contains(&("transaction_type", "subtract".to_string())));

        let purchases = PointPurchaseRequestFilters {
            status: Some(PurchaseStatus::Pending),
            driver_id: None,
        };
        assert_eq!(
            purchases.query_pairs(1),
            vec![
                ("page", "1".to_string()),
                ("status", "pending".to_string())
            ]
        );

        let deports = DeportCheckRequestFilters {
            status: Some(DeportStatus::Processing),
            user_id: Some(9),
        };
        assert_eq!(
            keys(&deports.query_pairs(1)),
            vec!["page", "status", "user_id"]
        );
    }
}
