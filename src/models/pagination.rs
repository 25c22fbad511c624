use serde::{Deserialize, Serialize};

/// Page envelope returned by every list endpoint.
///
/// `next`/`previous` are opaque cursor URLs supplied by the backend; the
/// client only ever checks them for presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// True when the backend reports a following page
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}
