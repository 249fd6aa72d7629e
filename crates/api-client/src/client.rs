//! Main API client implementation

use crate::config::{ClientConfig, USER_AGENT as CLIENT_USER_AGENT};
use crate::endpoints::{AuthApi, DashboardApi, EventsApi, RegistrationsApi, RemindersApi};
use crate::error::{ApiError, ApiResult, ErrorContext};
use crate::middleware::{truncate, HttpLogger};
use crate::models::{flatten_errors, BaseResponse, RefreshTokenRequest, TokenRefreshResponse};
use crate::session::SessionStore;
use eventmanager_core::config::ConfigSchema;
use eventmanager_core::retry::{CircuitBreaker, CircuitState};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Token refresh endpoint
pub(crate) const REFRESH_PATH: &str = "auth/token/refresh/";

/// Longest raw (non-JSON) error body kept in an error message
const MAX_ERROR_TEXT: usize = 200;

/// Whether a request carries the session's bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    /// Sign-up, login and password reset; never sends a token
    Public,
    /// Needs a session; fails fast without one
    Required,
}

/// Event Manager API client with built-in resilience patterns
///
/// This client wraps `reqwest` and adds:
/// - `Authorization: Bearer` from the session store, with one transparent
///   token refresh on 401
/// - Automatic retry with exponential backoff
/// - Circuit breaker to prevent hammering an unreachable server
/// - Request correlation IDs for tracing
#[derive(Clone)]
pub struct EventManagerClient {
    inner: Client,
    config: Arc<ClientConfig>,
    session: Arc<SessionStore>,
    circuit_breaker: Arc<CircuitBreaker>,
    logger: HttpLogger,
}

impl EventManagerClient {
    /// Create a client with an in-memory session
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        Self::new(config, SessionStore::in_memory())
    }

    /// Create a client from the loaded configuration, opening the session file
    pub fn from_schema(schema: &ConfigSchema) -> ApiResult<Self> {
        let session = match schema.session.resolved_path() {
            Some(path) => SessionStore::open(path)?,
            None => {
                warn!("No data directory available, session will not be saved");
                SessionStore::in_memory()
            }
        };
        Self::new(ClientConfig::from_schema(schema), session)
    }

    /// Create a client with specific configuration and session store
    pub fn new(config: ClientConfig, session: SessionStore) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let inner = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        let circuit_breaker = Arc::new(CircuitBreaker::new(config.circuit_breaker.clone()));
        let logger = HttpLogger::new(config.log_bodies);

        Ok(Self {
            inner,
            config: Arc::new(config),
            session: Arc::new(session),
            circuit_breaker,
            logger,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The login session
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Get circuit breaker state
    #[must_use]
    pub fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.state()
    }

    /// Reset the circuit breaker
    pub fn reset_circuit(&self) {
        self.circuit_breaker.reset();
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access authentication endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access event endpoints
    #[must_use]
    pub fn events(&self) -> EventsApi {
        EventsApi::new(self.clone())
    }

    /// Access event registration endpoints
    #[must_use]
    pub fn registrations(&self) -> RegistrationsApi {
        RegistrationsApi::new(self.clone())
    }

    /// Access reminder endpoints
    #[must_use]
    pub fn reminders(&self) -> RemindersApi {
        RemindersApi::new(self.clone())
    }

    /// Access dashboard endpoints
    #[must_use]
    pub fn dashboard(&self) -> DashboardApi {
        DashboardApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods with resilience
    // -------------------------------------------------------------------------

    /// Authenticated GET
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::GET, path, Option::<&()>::None, Auth::Required)
            .await
    }

    /// Authenticated POST
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request(Method::POST, path, Some(body), Auth::Required)
            .await
    }

    /// Authenticated PUT
    #[instrument(skip(self, body))]
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request(Method::PUT, path, Some(body), Auth::Required)
            .await
    }

    /// Authenticated DELETE
    #[instrument(skip(self))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::DELETE, path, Option::<&()>::None, Auth::Required)
            .await
    }

    /// POST without credentials (sign-up, login, password reset)
    #[instrument(skip(self, body))]
    pub async fn post_public<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request(Method::POST, path, Some(body), Auth::Public)
            .await
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// A refresh token the server refuses clears the session.
    pub(crate) async fn refresh_access_token(&self) -> ApiResult<TokenRefreshResponse> {
        let Some(refresh) = self.session.refresh_token() else {
            self.session.logout()?;
            return Err(ApiError::NotAuthenticated);
        };

        let body = serde_json::to_value(RefreshTokenRequest { refresh })?;
        let url = self.config.url_for(REFRESH_PATH);
        let result = self
            .execute_with_retry(&Method::POST, &url, Some(&body), Auth::Public)
            .await
            .and_then(|value| Ok(serde_json::from_value::<TokenRefreshResponse>(value)?));

        match result {
            Ok(tokens) => {
                self.session
                    .update_tokens(&tokens.access, tokens.refresh.as_deref())?;
                info!(rotated = tokens.refresh.is_some(), "Access token refreshed");
                Ok(tokens)
            }
            Err(e) if e.is_client_error() || matches!(e, ApiError::Json(_)) => {
                warn!(error = %e, "Token refresh rejected, clearing session");
                self.session.logout()?;
                Err(ApiError::NotAuthenticated)
            }
            Err(e) => Err(e),
        }
    }

    /// Execute a request with full resilience patterns
    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: Auth,
    ) -> ApiResult<T> {
        if auth == Auth::Required && !self.session.is_logged_in() {
            return Err(ApiError::NotAuthenticated);
        }

        let url = self.config.url_for(path);
        let body = body.map(serde_json::to_value).transpose()?;

        let value = match self
            .execute_with_retry(&method, &url, body.as_ref(), auth)
            .await
        {
            Err(e) if auth == Auth::Required && e.status() == Some(401) => {
                debug!(url = %url, "Access token rejected, refreshing");
                self.refresh_access_token().await?;
                self.execute_with_retry(&method, &url, body.as_ref(), auth)
                    .await
                    .map_err(|e| {
                        if e.status() == Some(401) {
                            ApiError::NotAuthenticated
                        } else {
                            e
                        }
                    })?
            }
            other => other?,
        };

        decode(value)
    }

    /// Execute request with retry logic
    async fn execute_with_retry(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        auth: Auth,
    ) -> ApiResult<Value> {
        let request_id = Uuid::new_v4().to_string();

        if !self.circuit_breaker.can_execute() {
            warn!(
                request_id = %request_id,
                url = %url,
                "Circuit breaker is open, rejecting request"
            );
            return Err(ApiError::CircuitOpen);
        }

        let retry_config = &self.config.retry;
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..retry_config.max_attempts {
            if attempt > 0 {
                let delay = retry_config.delay_for_attempt(attempt);
                debug!(
                    request_id = %request_id,
                    attempt = attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            let result = self
                .execute_single_request(&request_id, method, url, body, auth)
                .await;
            let elapsed = start.elapsed();

            match result {
                Ok(value) => {
                    self.circuit_breaker.record_success();
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        elapsed_ms = elapsed.as_millis(),
                        "Request succeeded"
                    );
                    return Ok(value);
                }
                Err(e) if e.is_retryable() => {
                    self.circuit_breaker.record_failure();
                    let context = ErrorContext {
                        request_id: Some(request_id.clone()),
                        endpoint: url.to_string(),
                        method: method.to_string(),
                    };
                    debug!(context = %context, attempt = attempt + 1, error = %e, "Request failed");
                    last_error = Some(e);
                }
                Err(e) => {
                    // The server answered, so it is reachable
                    self.circuit_breaker.record_success();
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Request failed, not retrying"
                    );
                    return Err(e);
                }
            }
        }

        match last_error {
            Some(e) if retry_config.max_attempts <= 1 => Err(e),
            last => Err(ApiError::RetriesExhausted {
                attempts: retry_config.max_attempts,
                last_error: last.map_or_else(|| "Unknown error".to_string(), |e| e.to_string()),
            }),
        }
    }

    /// Execute a single request without retry
    async fn execute_single_request(
        &self,
        request_id: &str,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        auth: Auth,
    ) -> ApiResult<Value> {
        let mut request = self
            .inner
            .request(method.clone(), url)
            .header(X_REQUEST_ID, request_id);

        if auth == Auth::Required {
            if let Some(token) = self.session.access_token() {
                request = request.bearer_auth(token);
            }
        }

        if let Some(b) = body {
            request = request.json(b);
        }

        self.logger.request(request_id, method, url, body);
        let start = Instant::now();

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.config.timeout)
            } else {
                ApiError::Request(e)
            }
        })?;

        self.handle_response(request_id, response, start).await
    }

    /// Handle HTTP response and parse the JSON body
    async fn handle_response(
        &self,
        request_id: &str,
        response: Response,
        start: Instant,
    ) -> ApiResult<Value> {
        let status = response.status();
        let text = response.text().await?;
        self.logger.response(request_id, status, start.elapsed(), &text);

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Object(serde_json::Map::new()));
            }
            Ok(serde_json::from_str(&text)?)
        } else {
            Err(ApiError::api_response(status.as_u16(), error_message(status, &text)))
        }
    }
}

/// Turn a parsed body into `T`, mapping `success: false` to `Rejected`
fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    if value.get("success") == Some(&Value::Bool(false)) {
        let base: BaseResponse = serde_json::from_value(value)?;
        let summary = base.error_summary();
        return Err(ApiError::Rejected(if summary.is_empty() {
            "The server did not accept the request".to_string()
        } else {
            summary
        }));
    }
    Ok(serde_json::from_value(value)?)
}

/// Message for an error response: `message`, else `detail`, else the raw
/// text, followed by any field errors
fn error_message(status: reqwest::StatusCode, text: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string()
    };

    let Ok(Value::Object(body)) = serde_json::from_str::<Value>(text) else {
        let text = text.trim();
        return if text.is_empty() {
            fallback()
        } else {
            truncate(text, MAX_ERROR_TEXT)
        };
    };

    let mut message = body
        .get("message")
        .or_else(|| body.get("detail"))
        .and_then(Value::as_str)
        .map_or_else(fallback, str::to_string);

    if let Some(errors) = body.get("errors") {
        let details = flatten_errors(errors);
        if !details.is_empty() {
            message.push_str(": ");
            message.push_str(&details.join("; "));
        }
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageResponse;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = EventManagerClient::with_config(ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ClientConfig::default().with_base_url("localhost:8000");
        assert!(EventManagerClient::with_config(config).is_err());
    }

    #[test]
    fn test_authenticated_call_needs_session() {
        let client = EventManagerClient::with_config(ClientConfig::default()).unwrap();
        let result = tokio_test::block_on(client.get::<MessageResponse>("dashboard/"));
        assert!(matches!(result, Err(ApiError::NotAuthenticated)));
    }

    #[test]
    fn test_error_message_prefers_message() {
        let text = r#"{"success": false, "message": "Event not found"}"#;
        assert_eq!(error_message(StatusCode::NOT_FOUND, text), "Event not found");
    }

    #[test]
    fn test_error_message_detail_and_errors() {
        let text = r#"{"detail": "Given token not valid for any token type", "code": "token_not_valid"}"#;
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, text),
            "Given token not valid for any token type"
        );

        let text = r#"{"success": false, "message": "Login failed", "errors": {"non_field_errors": ["Invalid email or password"]}}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, text),
            "Login failed: Invalid email or password"
        );
    }

    #[test]
    fn test_error_message_raw_text() {
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down"), "upstream down");
    }

    #[test]
    fn test_decode_rejected() {
        let value = json!({"success": false, "message": "Reminder already set for this event"});
        let err = decode::<MessageResponse>(value).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Rejected(ref m) if m == "Reminder already set for this event"
        ));
    }

    #[test]
    fn test_decode_success() {
        let value = json!({"success": true, "message": "Registration cancelled successfully"});
        let response: MessageResponse = decode(value).unwrap();
        assert!(response.base.success);
    }
}
