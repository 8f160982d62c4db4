//! API client for communicating with the Revoo REST API.
//!
//! Every call is resolved against one configured origin, carries
//! `Content-Type: application/json`, and gets `Authorization: Bearer <token>`
//! when the token store holds a credential. The store is read when the
//! request is dispatched, not when the client is built, so a `save` or
//! `clear` that completes before a call starts is always observed.

use std::sync::Arc;

use reqwest::{header, Client, Method, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::{StorageError, TokenStore};
use crate::config::Config;
use crate::models::{
    Habit, HabitInput, ListResponse, NewProgressRecord, NewWeeklyGoal, ValidationError, WeeklyGoal,
};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

const LOGIN_PATH: &str = "/auth/login";
const HABITS_PATH: &str = "/habitos";
const WEEKLY_GOALS_PATH: &str = "/metas-semanais";
const PROGRESS_PATH: &str = "/registros-progresso";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// API client for the Revoo backend.
/// Clone is cheap - reqwest::Client and the token store are both behind Arcs.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for `config.base_url` reading credentials from `store`
    pub fn new(config: &Config, store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| ApiError::Config(format!("invalid base URL '{}': {}", config.base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "base URL must be http or https, got '{}'",
                base_url.scheme()
            )));
        }

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store this client reads credentials from
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Resolve a path against the base origin with exactly one slash between them
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // ===== Pipeline =====

    /// Read the store and build the authorization headers for one request.
    /// A read failure aborts the request before anything is sent.
    async fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        let token = self.store.read().await.map_err(|e| {
            warn!(error = %e, "Token read failed, request not sent");
            e
        })?;

        match token.as_deref() {
            Some(token) if !token.is_empty() => {
                let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|_| {
                        StorageError::Corrupt(
                            "stored token contains characters not allowed in a header".to_string(),
                        )
                    })?;
                value.set_sensitive(true);
                headers.insert(header::AUTHORIZATION, value);
            }
            Some(_) => debug!("Stored token is empty, sending unauthenticated"),
            None => debug!("No stored token, sending unauthenticated"),
        }
        Ok(headers)
    }

    /// Build a request for `path` with the current credential attached.
    ///
    /// The returned builder has its headers finalized; callers may add a
    /// body and send it, or call `build()` to inspect it.
    pub async fn prepare(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let headers = self.auth_headers().await?;
        Ok(self.client.request(method, self.url(path)).headers(headers))
    }

    /// Send one request through the pipeline. Non-success statuses come back
    /// as `ApiError::Http` with the status untouched.
    pub async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.prepare(method.clone(), path).await?;
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, path, "Sending request");
        let response = request.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "Request failed");
            ApiError::Network(e)
        })?;

        Self::check_response(response).await
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let url = response.url().clone();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %url, "Request rejected by backend");
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("unexpected body from {}: {}", path, e)))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        Self::decode(response, path).await
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let list: ListResponse<T> = self.get(path).await?;
        Ok(list.into_items())
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send(Method::PUT, path, Some(body)).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }

    // ===== Session =====

    /// Log in and persist the issued token.
    ///
    /// Returns only after the token has been saved, so requests issued
    /// afterwards carry it.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::new("email", "is required").into());
        }
        if password.is_empty() {
            return Err(ValidationError::new("password", "is required").into());
        }

        let response = self
            .send(Method::POST, LOGIN_PATH, Some(&LoginRequest { email, password }))
            .await?;
        let body: Value = Self::decode(response, LOGIN_PATH).await?;

        let token = body
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingToken)?;

        self.store.save(token).await?;
        info!(email, "Logged in");
        Ok(())
    }

    /// Forget the stored token. Safe to call when already logged out.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.store.clear().await?;
        info!("Logged out");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self
            .store
            .read()
            .await?
            .is_some_and(|token| !token.is_empty()))
    }

    // ===== Habits =====

    pub async fn list_habits(&self) -> Result<Vec<Habit>, ApiError> {
        self.get_list(HABITS_PATH).await
    }

    pub async fn get_habit(&self, id: i64) -> Result<Habit, ApiError> {
        self.get(&format!("{}/{}", HABITS_PATH, id)).await
    }

    pub async fn create_habit(&self, habit: &HabitInput) -> Result<(), ApiError> {
        self.post(HABITS_PATH, habit).await
    }

    pub async fn update_habit(&self, id: i64, habit: &HabitInput) -> Result<(), ApiError> {
        self.put(&format!("{}/{}", HABITS_PATH, id), habit).await
    }

    pub async fn delete_habit(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("{}/{}", HABITS_PATH, id)).await
    }

    // ===== Weekly goals =====

    pub async fn list_weekly_goals(&self) -> Result<Vec<WeeklyGoal>, ApiError> {
        self.get_list(WEEKLY_GOALS_PATH).await
    }

    pub async fn create_weekly_goal(&self, goal: &NewWeeklyGoal) -> Result<(), ApiError> {
        self.post(WEEKLY_GOALS_PATH, goal).await
    }

    // ===== Progress =====

    pub async fn record_progress(&self, record: &NewProgressRecord) -> Result<(), ApiError> {
        self.post(PROGRESS_PATH, record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;

    fn client_with(base_url: &str, store: MemoryTokenStore) -> ApiClient {
        let config = Config {
            base_url: base_url.to_string(),
            ..Config::default()
        };
        ApiClient::new(&config, Arc::new(store)).unwrap()
    }

    #[test]
    fn test_url_joining() {
        let client = client_with("http://host:8080/api/", MemoryTokenStore::new());
        assert_eq!(client.base_url(), "http://host:8080/api");
        assert_eq!(client.url("/habitos"), "http://host:8080/api/habitos");
        assert_eq!(client.url("habitos/3"), "http://host:8080/api/habitos/3");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        for bad in ["not a url", "ftp://host/api"] {
            let config = Config {
                base_url: bad.to_string(),
                ..Config::default()
            };
            let result = ApiClient::new(&config, Arc::new(MemoryTokenStore::new()));
            assert!(matches!(result, Err(ApiError::Config(_))), "accepted {:?}", bad);
        }
    }

    #[tokio::test]
    async fn test_prepare_attaches_bearer_token() {
        let client = client_with("http://host:8080/api", MemoryTokenStore::with_token("abc123"));
        let request = client
            .prepare(Method::GET, "/habitos")
            .await
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "http://host:8080/api/habitos");
        assert_eq!(request.headers()[header::AUTHORIZATION], "Bearer abc123");
    }

    #[tokio::test]
    async fn test_prepare_omits_header_without_token() {
        let client = client_with("http://host:8080/api", MemoryTokenStore::new());
        let request = client
            .prepare(Method::GET, "/habitos")
            .await
            .unwrap()
            .build()
            .unwrap();
        assert!(!request.headers().contains_key(header::AUTHORIZATION));
    }

    #[tokio::test]
    async fn test_prepare_omits_header_for_empty_token() {
        let client = client_with("http://host:8080/api", MemoryTokenStore::with_token(""));
        let request = client
            .prepare(Method::GET, "/habitos")
            .await
            .unwrap()
            .build()
            .unwrap();
        assert!(!request.headers().contains_key(header::AUTHORIZATION));
        assert!(!client.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_prepare_rejects_token_with_newline() {
        let client = client_with("http://host:8080/api", MemoryTokenStore::with_token("abc\n123"));
        let result = client.prepare(Method::GET, "/habitos").await;
        assert!(matches!(result, Err(ApiError::Storage(StorageError::Corrupt(_)))));
    }

    #[tokio::test]
    async fn test_token_read_per_request() {
        let store = Arc::new(MemoryTokenStore::new());
        let client = ApiClient::new(&Config::default(), store.clone()).unwrap();

        store.save("first").await.unwrap();
        let first = client.prepare(Method::GET, "/habitos").await.unwrap().build().unwrap();
        store.save("second").await.unwrap();
        let second = client.prepare(Method::GET, "/habitos").await.unwrap().build().unwrap();

        assert_eq!(first.headers()[header::AUTHORIZATION], "Bearer first");
        assert_eq!(second.headers()[header::AUTHORIZATION], "Bearer second");
    }

    #[tokio::test]
    async fn test_login_validates_before_sending() {
        // Port 9 is never contacted: validation fails first
        let client = client_with("http://127.0.0.1:9/api", MemoryTokenStore::new());
        let err = client.login("  ", "secret").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref v) if v.field == "email"));
        let err = client.login("ana@revoo.dev", "").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref v) if v.field == "password"));
    }
}
