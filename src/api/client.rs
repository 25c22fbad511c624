//! API client for the dispatch backend.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests against the admin REST API: login and token refresh, the typed
//! resource methods, and the multipart driver onboarding upload.
//!
//! Every authenticated call goes through `execute_with_refresh`, which owns
//! the 401 policy: at most one token refresh and one replay per call, with
//! concurrent refreshes collapsed into a single network exchange.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::{CredentialStore, SessionManager};
use crate::config::Config;
use crate::models::{
    AuthUser, BotSettings, Card, Country, CreateCardPayload, CreateCountryPayload,
    CreateDriverPayload, CreatePointPricePayload, CreatePointTransactionPayload,
    CreateUserPayload, DeportCheckRequest, DocumentFile, Driver, InviteLinkResponse, Order,
    OrderStatistics, PaginatedResponse, PointPrice, PointPurchaseRequest, PointTransaction,
    UpdateBotSettingsPayload, UpdateCardPayload, UpdateCountryPayload,
    UpdateDeportCheckRequestPayload, UpdateDriverPayload, UpdateOrderPayload,
    UpdatePointPricePayload, UpdatePointPurchaseRequestPayload, UpdatePointTransactionPayload,
    User,
};

use super::error::{ApiError, ApiResult};
use super::filters::{
    DeportCheckRequestFilters, DriverFilters, OrderFilters, PointPurchaseRequestFilters,
    PointTransactionFilters, UserFilters,
};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow backend responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Page size requested while materializing the driver roster.
/// 50 keeps the page count low for a fleet of a few hundred drivers without
/// pushing past the backend's page size cap.
const ROSTER_PAGE_SIZE: i64 = 50;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Token pair issued by `POST /token/`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Typed client for the dispatch backend REST API.
/// Clone is cheap: reqwest::Client pools connections behind an Arc and the
/// session manager is shared, so clones observe the same login state.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<SessionManager>,
}

impl ApiClient {
    /// Create a client for the given base URL with an injected session.
    /// No network traffic happens here; token validity is discovered lazily
    /// on the first authenticated call.
    pub fn new(base_url: impl Into<String>, session: SessionManager) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: Arc::new(session),
        })
    }

    /// Wire up a client from the saved config, with the session persisted
    /// under the platform data directory. The default for interactive use.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let session = SessionManager::persistent(config.data_dir()?);
        Ok(Self::new(config.api_base_url(), session)?)
    }

    /// The session behind this client, for callers that need raw token
    /// state.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// True iff an access token is held. A liveness hint only; an expired
    /// token is still "authenticated" until a 401 proves otherwise.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ===== Auth Flow =====

    /// Authenticate with username and password, storing the issued pair in
    /// the session. Bad credentials surface with the server's message.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenPairResponse> {
        let response = self
            .client
            .post(self.url("/token/"))
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        let pair: TokenPairResponse = response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse login response: {e}"))
        })?;

        self.session
            .set_pair(pair.access.clone(), pair.refresh.clone());
        debug!(username, "Logged in");
        Ok(pair)
    }

    /// Login and keep the password in the OS keychain for
    /// `login_remembered`. A keychain failure is logged but does not undo a
    /// login the backend accepted.
    pub async fn login_and_remember(
        &self,
        username: &str,
        password: &str,
    ) -> ApiResult<TokenPairResponse> {
        let pair = self.login(username, password).await?;
        if let Err(e) = CredentialStore::store(username, password) {
            warn!(error = %e, "Failed to store credentials in keychain");
        }
        Ok(pair)
    }

    /// Login with the password previously stored in the OS keychain.
    pub async fn login_remembered(&self, username: &str) -> ApiResult<TokenPairResponse> {
        let password = CredentialStore::get_password(username).map_err(|e| {
            ApiError::Validation(format!("No stored credentials for {username}: {e}"))
        })?;
        self.login(username, &password).await
    }

    /// Exchange the refresh token for a new access token, keeping the
    /// refresh token as is.
    ///
    /// Returns false when no refresh token is held or when the exchange
    /// fails for any reason; errors never propagate past this boundary, so
    /// callers get a plain yes/no on whether a retry is worthwhile.
    pub async fn refresh_access_token(&self) -> bool {
        let Some(refresh) = self.session.refresh_token() else {
            return false;
        };

        match self.request_token_refresh(&refresh).await {
            Ok(access) => {
                self.session.set_access(access);
                debug!("Access token refreshed");
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to refresh access token");
                false
            }
        }
    }

    async fn request_token_refresh(&self, refresh: &str) -> ApiResult<String> {
        let response = self
            .client
            .post(self.url("/token/refresh/"))
            .json(&RefreshRequest { refresh })
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        let parsed: RefreshResponse = response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse refresh response: {e}"))
        })?;
        Ok(parsed.access)
    }

    /// Refresh under the single-flight gate. `stale` is the access token the
    /// failed request was sent with; if the session holds a different token
    /// by the time the gate opens, another task refreshed while we waited
    /// and no network call is needed. A session another task already cleared
    /// falls through to the failure path instead.
    async fn ensure_fresh_access_token(&self, stale: Option<&str>) -> bool {
        let _gate = self.session.lock_refresh().await;
        let current = self.session.access_token();
        if current.is_some() && current.as_deref() != stale {
            debug!("Access token already refreshed by a concurrent request");
            return true;
        }
        self.refresh_access_token().await
    }

    /// Clear the session and wipe persisted tokens. Idempotent; safe to
    /// call when already logged out. Where the UI goes next is up to the
    /// caller.
    pub fn logout(&self) {
        self.session.clear();
        debug!("Logged out");
    }

    // ===== Request Engine =====

    /// Send an authenticated request, transparently refreshing the access
    /// token on a 401.
    ///
    /// `build` produces a fresh RequestBuilder per attempt; bodies such as
    /// multipart forms cannot be reused after a send, so the closure rebuilds
    /// them. The bearer header is attached here from current session state.
    /// At most one refresh and one replay happen per call: whatever the
    /// replay returns is the final answer, and a 401 that cannot be
    /// refreshed tears the session down.
    async fn execute_with_refresh<F>(&self, build: F) -> ApiResult<reqwest::Response>
    where
        F: Fn() -> ApiResult<RequestBuilder>,
    {
        let token_used = self.session.access_token();
        let mut request = build()?;
        if let Some(ref token) = token_used {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        if self.session.refresh_token().is_none() {
            warn!("Unauthorized with no refresh token, clearing session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }

        if self.ensure_fresh_access_token(token_used.as_deref()).await {
            debug!("Replaying request with refreshed access token");
            let mut replay = build()?;
            if let Some(token) = self.session.access_token() {
                replay = replay.bearer_auth(token);
            }
            Ok(replay.send().await?)
        } else {
            warn!("Token refresh failed, clearing session");
            self.session.clear();
            Err(ApiError::Unauthorized)
        }
    }

    /// Check a response for success, consuming the body into an error if
    /// not.
    async fn check_response(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Authenticated JSON request, decoding the response body.
    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let response = self
            .execute_with_refresh(|| {
                let mut builder = self.client.request(method.clone(), &url);
                if let Some(body) = body {
                    builder = builder.json(body);
                }
                Ok(builder)
            })
            .await?;
        let response = Self::check_response(response).await?;
        response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {path}: {e}"))
        })
    }

    /// Authenticated request where no response body is expected (deletes).
    /// Any 2xx is success; the body, if present, is discarded.
    async fn request_no_content(&self, method: Method, path: &str) -> ApiResult<()> {
        let url = self.url(path);
        let response = self
            .execute_with_refresh(|| Ok(self.client.request(method.clone(), &url)))
            .await?;
        Self::check_response(response).await?;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    /// Authenticated GET with query pairs, for the list endpoints.
    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        pairs: &[(&'static str, String)],
    ) -> ApiResult<T> {
        let url = self.url(path);
        let response = self
            .execute_with_refresh(|| Ok(self.client.get(&url).query(pairs)))
            .await?;
        let response = Self::check_response(response).await?;
        response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {path}: {e}"))
        })
    }

    fn document_part(document: &DocumentFile) -> ApiResult<Part> {
        let part = Part::bytes(document.bytes.clone())
            .file_name(document.file_name.clone())
            .mime_str(document.mime_type())?;
        Ok(part)
    }

    // ===== Auth User =====

    /// Fetch the staff account behind the current session.
    pub async fn current_auth_user(&self) -> ApiResult<AuthUser> {
        self.get_json("/auth/user/").await
    }

    // ===== Users =====

    pub async fn get_users(
        &self,
        page: i64,
        filters: &UserFilters,
    ) -> ApiResult<PaginatedResponse<User>> {
        self.get_with_query("/users/", &filters.query_pairs(page))
            .await
    }

    /// Search users by name, phone, or telegram id. A blank query browses
    /// the full list.
    pub async fn search_users(
        &self,
        query: &str,
        page: i64,
    ) -> ApiResult<PaginatedResponse<User>> {
        let mut pairs = vec![("page", page.to_string())];
        let trimmed = query.trim();
        if !trimmed.is_empty() {
            pairs.push(("query", trimmed.to_string()));
        }
        self.get_with_query("/users/search/", &pairs).await
    }

    pub async fn create_user(&self, payload: &CreateUserPayload) -> ApiResult<User> {
        self.request(Method::POST, "/users/", Some(payload)).await
    }

    pub async fn get_user(&self, id: i64) -> ApiResult<User> {
        self.get_json(&format!("/users/{id}/")).await
    }

    pub async fn delete_user(&self, id: i64) -> ApiResult<()> {
        self.request_no_content(Method::DELETE, &format!("/users/{id}/"))
            .await
    }

    // ===== Drivers =====

    pub async fn get_drivers(
        &self,
        page: i64,
        filters: &DriverFilters,
    ) -> ApiResult<PaginatedResponse<Driver>> {
        self.get_with_query("/drivers/", &filters.query_pairs(page))
            .await
    }

    /// Register a driver with their four document scans.
    ///
    /// Validates the draft locally first: a missing user or missing
    /// documents fail with `ApiError::Validation` before any bytes are
    /// sent. The multipart form is rebuilt per attempt inside the closure,
    /// and the refresh-and-replay policy matches the JSON paths exactly.
    pub async fn create_driver(&self, payload: &CreateDriverPayload) -> ApiResult<Driver> {
        let user_id = payload.user_id.ok_or_else(|| {
            ApiError::Validation("Select a user before creating a driver".to_string())
        })?;
        let documents = payload.documents().map_err(ApiError::Validation)?;

        let url = self.url("/drivers/");
        let response = self
            .execute_with_refresh(|| {
                let mut form = Form::new()
                    .text("user_id", user_id.to_string())
                    .text("direction", payload.direction.clone());
                for (field, document) in &documents {
                    form = form.part(*field, Self::document_part(document)?);
                }
                Ok(self.client.post(&url).multipart(form))
            })
            .await?;
        let response = Self::check_response(response).await?;
        response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse driver response: {e}"))
        })
    }

    pub async fn get_driver(&self, id: i64) -> ApiResult<Driver> {
        self.get_json(&format!("/drivers/{id}/")).await
    }

    pub async fn update_driver(
        &self,
        id: i64,
        payload: &UpdateDriverPayload,
    ) -> ApiResult<Driver> {
        self.request(Method::PATCH, &format!("/drivers/{id}/"), Some(payload))
            .await
    }

    pub async fn delete_driver(&self, id: i64) -> ApiResult<()> {
        self.request_no_content(Method::DELETE, &format!("/drivers/{id}/"))
            .await
    }

    /// Materialize the complete driver roster.
    ///
    /// Walks pages sequentially until the backend reports no next page,
    /// preserving server order. Any page failure aborts the whole fetch; a
    /// partial roster is never returned. Apply a `RosterFilter` to the
    /// result for client-side search and status slicing.
    pub async fn fetch_all_drivers(&self, filters: &DriverFilters) -> ApiResult<Vec<Driver>> {
        let mut filters = filters.clone();
        if filters.page_size.is_none() {
            filters.page_size = Some(ROSTER_PAGE_SIZE);
        }

        let mut drivers = Vec::new();
        let mut page = 1;
        loop {
            let response = self.get_drivers(page, &filters).await?;
            let has_next = response.has_next();
            drivers.extend(response.results);
            if !has_next {
                break;
            }
            page += 1;
        }

        debug!(count = drivers.len(), pages = page, "Materialized driver roster");
        Ok(drivers)
    }

    // ===== Orders =====

    pub async fn get_orders(
        &self,
        page: i64,
        filters: &OrderFilters,
    ) -> ApiResult<PaginatedResponse<Order>> {
        self.get_with_query("/orders/", &filters.query_pairs(page))
            .await
    }

    pub async fn get_order(&self, id: i64) -> ApiResult<Order> {
        self.get_json(&format!("/orders/{id}/")).await
    }

    pub async fn update_order(&self, id: i64, payload: &UpdateOrderPayload) -> ApiResult<Order> {
        self.request(Method::PATCH, &format!("/orders/{id}/"), Some(payload))
            .await
    }

    pub async fn delete_order(&self, id: i64) -> ApiResult<()> {
        self.request_no_content(Method::DELETE, &format!("/orders/{id}/"))
            .await
    }

    // ===== Point transactions =====

    pub async fn get_point_transactions(
        &self,
        page: i64,
        filters: &PointTransactionFilters,
    ) -> ApiResult<PaginatedResponse<PointTransaction>> {
        self.get_with_query("/point-transactions/", &filters.query_pairs(page))
            .await
    }

    pub async fn create_point_transaction(
        &self,
        payload: &CreatePointTransactionPayload,
    ) -> ApiResult<PointTransaction> {
        self.request(Method::POST, "/point-transactions/", Some(payload))
            .await
    }

    pub async fn get_point_transaction(&self, id: i64) -> ApiResult<PointTransaction> {
        self.get_json(&format!("/point-transactions/{id}/")).await
    }

    pub async fn update_point_transaction(
        &self,
        id: i64,
        payload: &UpdatePointTransactionPayload,
    ) -> ApiResult<PointTransaction> {
        self.request(
            Method::PATCH,
            &format!("/point-transactions/{id}/"),
            Some(payload),
        )
        .await
    }

    pub async fn delete_point_transaction(&self, id: i64) -> ApiResult<()> {
        self.request_no_content(Method::DELETE, &format!("/point-transactions/{id}/"))
            .await
    }

    // ===== Bot settings (singleton) =====

    pub async fn get_bot_settings(&self) -> ApiResult<BotSettings> {
        self.get_json("/bot-settings/").await
    }

    pub async fn update_bot_settings(
        &self,
        payload: &UpdateBotSettingsPayload,
    ) -> ApiResult<BotSettings> {
        self.request(Method::PATCH, "/bot-settings/", Some(payload))
            .await
    }

    // ===== Statistics =====

    /// Dashboard counters. The backend wraps the single snapshot in its
    /// standard page envelope; that shape is relayed as-is.
    pub async fn get_order_statistics(&self) -> ApiResult<PaginatedResponse<OrderStatistics>> {
        self.get_json("/statistics/").await
    }

    // ===== Invite links =====

    pub async fn create_invite_link(&self, group_id: &str) -> ApiResult<InviteLinkResponse> {
        self.request(
            Method::POST,
            "/invite-links/create/",
            Some(&serde_json::json!({ "group_id": group_id })),
        )
        .await
    }

    pub async fn revoke_invite_link(
        &self,
        group_id: &str,
        invite_link: &str,
    ) -> ApiResult<InviteLinkResponse> {
        self.request(
            Method::POST,
            "/invite-links/revoke/",
            Some(&serde_json::json!({ "group_id": group_id, "invite_link": invite_link })),
        )
        .await
    }

    // ===== Countries =====

    pub async fn get_countries(&self, page: i64) -> ApiResult<PaginatedResponse<Country>> {
        self.get_with_query("/countries/", &[("page", page.to_string())])
            .await
    }

    pub async fn create_country(&self, payload: &CreateCountryPayload) -> ApiResult<Country> {
        self.request(Method::POST, "/countries/", Some(payload))
            .await
    }

    pub async fn update_country(
        &self,
        id: i64,
        payload: &UpdateCountryPayload,
    ) -> ApiResult<Country> {
        self.request(Method::PATCH, &format!("/countries/{id}/"), Some(payload))
            .await
    }

    pub async fn delete_country(&self, id: i64) -> ApiResult<()> {
        self.request_no_content(Method::DELETE, &format!("/countries/{id}/"))
            .await
    }

    // ===== Point prices =====

    pub async fn get_point_prices(&self, page: i64) -> ApiResult<PaginatedResponse<PointPrice>> {
        self.get_with_query("/point-prices/", &[("page", page.to_string())])
            .await
    }

    pub async fn create_point_price(
        &self,
        payload: &CreatePointPricePayload,
    ) -> ApiResult<PointPrice> {
        self.request(Method::POST, "/point-prices/", Some(payload))
            .await
    }

    pub async fn update_point_price(
        &self,
        id: i64,
        payload: &UpdatePointPricePayload,
    ) -> ApiResult<PointPrice> {
        self.request(Method::PATCH, &format!("/point-prices/{id}/"), Some(payload))
            .await
    }

    pub async fn delete_point_price(&self, id: i64) -> ApiResult<()> {
        self.request_no_content(Method::DELETE, &format!("/point-prices/{id}/"))
            .await
    }

    // ===== Cards =====

    pub async fn get_cards(&self, page: i64) -> ApiResult<PaginatedResponse<Card>> {
        self.get_with_query("/cards/", &[("page", page.to_string())])
            .await
    }

    pub async fn create_card(&self, payload: &CreateCardPayload) -> ApiResult<Card> {
        self.request(Method::POST, "/cards/", Some(payload)).await
    }

    pub async fn update_card(&self, id: i64, payload: &UpdateCardPayload) -> ApiResult<Card> {
        self.request(Method::PATCH, &format!("/cards/{id}/"), Some(payload))
            .await
    }

    pub async fn delete_card(&self, id: i64) -> ApiResult<()> {
        self.request_no_content(Method::DELETE, &format!("/cards/{id}/"))
            .await
    }

    // ===== Point purchase requests =====

    pub async fn get_point_purchase_requests(
        &self,
        page: i64,
        filters: &PointPurchaseRequestFilters,
    ) -> ApiResult<PaginatedResponse<PointPurchaseRequest>> {
        self.get_with_query("/point-purchase-requests/", &filters.query_pairs(page))
            .await
    }

    pub async fn get_point_purchase_request(&self, id: i64) -> ApiResult<PointPurchaseRequest> {
        self.get_json(&format!("/point-purchase-requests/{id}/"))
            .await
    }

    pub async fn update_point_purchase_request(
        &self,
        id: i64,
        payload: &UpdatePointPurchaseRequestPayload,
    ) -> ApiResult<PointPurchaseRequest> {
        self.request(
            Method::PATCH,
            &format!("/point-purchase-requests/{id}/"),
            Some(payload),
        )
        .await
    }

    pub async fn delete_point_purchase_request(&self, id: i64) -> ApiResult<()> {
        self.request_no_content(Method::DELETE, &format!("/point-purchase-requests/{id}/"))
            .await
    }

    // ===== Deport check requests =====

    pub async fn get_deport_check_requests(
        &self,
        page: i64,
        filters: &DeportCheckRequestFilters,
    ) -> ApiResult<PaginatedResponse<DeportCheckRequest>> {
        self.get_with_query("/deport-check-requests/", &filters.query_pairs(page))
            .await
    }

    pub async fn get_deport_check_request(&self, id: i64) -> ApiResult<DeportCheckRequest> {
        self.get_json(&format!("/deport-check-requests/{id}/"))
            .await
    }

    pub async fn update_deport_check_request(
        &self,
        id: i64,
        payload: &UpdateDeportCheckRequestPayload,
    ) -> ApiResult<DeportCheckRequest> {
        self.request(
            Method::PATCH,
            &format!("/deport-check-requests/{id}/"),
            Some(payload),
        )
        .await
    }

    pub async fn delete_deport_check_request(&self, id: i64) -> ApiResult<()> {
        self.request_no_content(Method::DELETE, &format!("/deport-check-requests/{id}/"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_pair_response() {
        let json = r#"{"access": "A1", "refresh": "R1"}"#;
        let pair: TokenPairResponse = serde_json::from_str(json).unwrap();
        assert_eq!(pair.access, "A1");
        assert_eq!(pair.refresh, "R1");
    }

    #[test]
    fn test_parse_refresh_response() {
        let json = r#"{"access": "A2"}"#;
        let parsed: RefreshResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access, "A2");
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client =
            ApiClient::new("http://localhost:8000/api/", SessionManager::in_memory()).unwrap();
        assert_eq!(client.url("/users/"), "http://localhost:8000/api/users/");

        let client =
            ApiClient::new("http://localhost:8000/api", SessionManager::in_memory()).unwrap();
        assert_eq!(client.url("/users/"), "http://localhost:8000/api/users/");
    }
}
