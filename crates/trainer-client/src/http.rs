//! HTTP transport for the Brain Trainer service
//!
//! Request/response types, error handling and the reqwest-backed client.
//! Endpoint knowledge lives in [`crate::api`]; this module only knows how to
//! move bytes.

use reqwest::{Client as ReqwestClient, Response as ReqwestResponse};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

// =============================================================================
// Error Types
// =============================================================================

/// Error returned by the service or the transport
///
/// Transport failures (connection refused, timeouts, unreadable bodies) use
/// status `0`.
///
/// # Examples
/// ```
/// use trainer_client::http::ApiError;
///
/// let error = ApiError::new(404, "NotFound", "User not found");
/// assert_eq!(error.status(), 404);
/// assert!(!error.is_network_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: u16,
    error: String,
    message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
        }
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Short error code
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the failure is transient (transport or overload)
    pub fn is_network_error(&self) -> bool {
        matches!(self.status, 0 | 408 | 425 | 429 | 500 | 502 | 503 | 504)
    }

    /// Whether the request was rejected for bad or missing credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API error {}: {} - {}", self.status, self.error, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Request Types
// =============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PATCH
    Patch,
}

impl HttpMethod {
    /// Method name
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// Content type for form bodies
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Content type for JSON bodies
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A request to one endpoint
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Path below the service URL, starting with `/`
    pub path: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body
    pub body: Option<Vec<u8>>,
    /// Body content type
    pub content_type: Option<String>,
}

impl ApiRequest {
    /// Create a request without a body
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HashMap::new(),
            body: None,
            content_type: None,
        }
    }

    /// GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// PATCH request
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add an `Authorization` header
    pub fn bearer(self, authorization: impl Into<String>) -> Self {
        self.header("Authorization", authorization)
    }

    /// Set a JSON body
    pub fn json_body<T: Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(value)?);
        self.content_type = Some(JSON_CONTENT_TYPE.to_string());
        Ok(self)
    }

    /// Set an already encoded form body
    pub fn form_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into().into_bytes());
        self.content_type = Some(FORM_CONTENT_TYPE.to_string());
        self
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Decoded response
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// HTTP status code
    pub status: u16,
    /// Response data
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Create a new response
    pub fn new(status: u16, data: T) -> Self {
        Self { status, data }
    }
}

/// Error body shapes the service emits
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    /// `{"error": "...", "message": "..."}`
    Coded { error: String, message: String },
    /// `{"detail": "..."}`
    Detail { detail: String },
}

impl ErrorBody {
    fn into_error(self, status: u16) -> ApiError {
        match self {
            ErrorBody::Coded { error, message } => ApiError::new(status, error, message),
            ErrorBody::Detail { detail } => ApiError::new(status, "Detail", detail),
        }
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for [`ApiClient`]
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base service URL without a trailing slash
    pub service_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("Brain-Trainer/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl ApiClientConfig {
    /// Create a new config with a service URL
    pub fn new(service_url: impl Into<String>) -> Self {
        let service_url: String = service_url.into();
        Self {
            service_url: service_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// Client
// =============================================================================

/// HTTP client bound to one service
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: ReqwestClient,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Build a client from configuration
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ApiError::new(0, "ClientBuild", format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Execute a request and decode a JSON response
    pub async fn send<T>(&self, request: ApiRequest) -> Result<ApiResponse<T>, ApiError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.config.service_url, request.path);
        tracing::debug!(method = request.method.as_str(), %url, "Sending request");

        let mut req = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
        };

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        for (key, value) in &request.headers {
            req = req.header(key, value);
        }

        if let Some(body) = request.body {
            if let Some(content_type) = &request.content_type {
                req = req.header("Content-Type", content_type);
            }
            req = req.body(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ApiError::new(0, "NetworkError", format!("Request failed: {}", e)))?;

        self.parse_response(response).await
    }

    async fn parse_response<T>(&self, response: ReqwestResponse) -> Result<ApiResponse<T>, ApiError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status().as_u16();

        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let error = match serde_json::from_str::<ErrorBody>(&error_body) {
                Ok(body) => body.into_error(status),
                Err(_) => ApiError::new(status, "Unknown", format!("HTTP {}: {}", status, error_body)),
            };
            tracing::debug!(%error, "Request rejected");
            return Err(error);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::new(0, "ParseError", format!("Failed to read response: {}", e)))?;

        let data: T = serde_json::from_str(&body)
            .map_err(|e| ApiError::new(0, "ParseError", format!("Failed to parse JSON: {}", e)))?;

        Ok(ApiResponse::new(status, data))
    }

    /// Get the client configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Get the service URL
    pub fn service_url(&self) -> &str {
        &self.config.service_url
    }
}

// =============================================================================
// Tests
// =============================================================================
