//! HTTP client for ServiceDesk Plus API.
//!
//! This module provides the `SdpClient` struct for making authenticated
//! requests to the ServiceDesk Plus REST API.
//!
//! Each operation performs exactly one outbound call and hands back the
//! backend's decoded JSON body unchanged. Status codes are only interpreted
//! where a documented rule says so (404 on a single request); the backend's
//! own error envelope is otherwise passed through for the caller to read.
//!
//! There is no retry: a failed call is reported once.
//!
//! # Security
//!
//! The API key is never logged. All error messages are sanitized before logging.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::error::{truncate_chars, SdpError, MAX_RAW_BODY_CHARS};
use crate::models::{
    encode_input_data, ListEnvelope, ListInfo, NewRequest, RequestEnvelope, RequestUpdate,
    INPUT_DATA_PARAM,
};

/// The Accept header value for SDP API v3.
pub const SDP_ACCEPT_HEADER: &str = "application/vnd.manageengine.sdp.v3+json";

/// Header carrying the technician API key.
pub const AUTH_HEADER: &str = "authtoken";

/// `response_status.status_code` reported by SDP on success.
const SDP_SUCCESS_CODE: u64 = 2000;

/// Status and body of a completed HTTP exchange.
#[derive(Debug)]
struct RawResponse {
    status: StatusCode,
    body: String,
}

/// HTTP client for ServiceDesk Plus API.
///
/// Handles authentication, request formatting, and response parsing
/// for all SDP API operations. Holds no mutable state, so one instance
/// can serve concurrent tool calls.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = SdpClient::new(&config)?;
///
/// let latest = client.list_requests(10).await?;
/// ```
#[derive(Clone)]
pub struct SdpClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Base URL for the SDP API (e.g., `https://servicedesk.example.com/api/v3`).
    base_url: String,

    /// API key for authentication.
    /// SECURITY: Never log this value!
    api_key: String,

    /// Timeout applied to every call, kept for error reporting.
    timeout: Duration,
}

impl SdpClient {
    /// Creates a new SDP client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `SdpError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, SdpError> {
        if !config.verify_ssl {
            tracing::warn!("TLS certificate verification is disabled (VERIFY_SSL)");
        }

        let http = Self::http_builder(config)
            .build()
            .map_err(SdpError::HttpClient)?;

        Ok(Self {
            http,
            base_url: Self::api_base_url(&config.base_url),
            api_key: config.api_key().to_string(),
            timeout: config.request_timeout,
        })
    }

    /// HTTP client settings derived from configuration: timeout and TLS checks.
    fn http_builder(config: &Config) -> ClientBuilder {
        Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(!config.verify_ssl)
    }

    /// Appends the v3 API path to the configured base URL.
    ///
    /// The base is used as given (already stripped of trailing slashes by
    /// [`Config`]), so a base that itself ends in `/api` keeps that prefix.
    fn api_base_url(base_url: &str) -> String {
        format!("{}/api/v3", base_url)
    }

    /// Returns a reference to the API key for sanitization purposes.
    ///
    /// This should ONLY be used for sanitizing error messages, never for logging.
    pub fn api_key_for_sanitization(&self) -> &str {
        &self.api_key
    }

    /// Builds the headers sent with every call.
    ///
    /// The key is sent as-is; a missing key yields an empty `authtoken`
    /// that the backend rejects.
    ///
    /// # Errors
    ///
    /// Returns `SdpError::InvalidHeader` if the key contains characters
    /// that are not allowed in a header value.
    pub fn headers(&self) -> Result<HeaderMap, SdpError> {
        let mut token =
            HeaderValue::from_str(&self.api_key).map_err(|_| SdpError::InvalidHeader(AUTH_HEADER))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, token);
        headers.insert(ACCEPT, HeaderValue::from_static(SDP_ACCEPT_HEADER));
        Ok(headers)
    }

    /// URL of the requests collection.
    fn requests_url(&self) -> String {
        format!("{}/requests", self.base_url)
    }

    /// URL of a single request. The ID is encoded as one path segment.
    fn request_url(&self, id: &str) -> String {
        format!("{}/requests/{}", self.base_url, urlencoding::encode(id))
    }

    /// Tests connectivity to the SDP server.
    ///
    /// Lists a single request and checks the backend's `response_status`.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or `SdpError::ConnectionTest` when the
    /// backend answers but reports a failure (typically a bad API key).
    pub async fn test_connection(&self) -> Result<(), SdpError> {
        tracing::debug!("Testing connection to SDP server");

        let data = self.list_requests(1).await?;

        // List responses carry response_status as an array, single-resource
        // responses as an object.
        let status = match data.get("response_status") {
            Some(Value::Array(items)) => items.first(),
            other => other,
        };

        match status
            .and_then(|s| s.get("status_code"))
            .and_then(Value::as_u64)
        {
            Some(SDP_SUCCESS_CODE) | None => {
                tracing::info!("Connection test successful");
                Ok(())
            }
            Some(code) => Err(SdpError::connection_test(format!(
                "SDP rejected the request with status code {} - verify SDP_API_KEY",
                code
            ))),
        }
    }

    /// Sends one request to the SDP API and reads the whole body.
    ///
    /// `input_data` goes in the query string for GET and as a
    /// form-encoded body otherwise.
    async fn send(
        &self,
        method: Method,
        url: &str,
        input_data: Option<String>,
    ) -> Result<RawResponse, SdpError> {
        tracing::info!(method = %method, url = %url, "Sending SDP request");

        let mut req = self.http.request(method.clone(), url).headers(self.headers()?);

        if let Some(input_json) = input_data {
            if method == Method::GET {
                req = req.query(&[(INPUT_DATA_PARAM, &input_json)]);
            } else {
                req = req
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(format!(
                        "{}={}",
                        INPUT_DATA_PARAM,
                        urlencoding::encode(&input_json)
                    ));
            }
        }

        let response = req
            .send()
            .await
            .map_err(|e| self.transport_error(e, &method, url))?;
        let status = response.status();

        tracing::info!(status = status.as_u16(), "SDP response status");

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e, &method, url))?;

        tracing::trace!(body = %body, "SDP API response");

        Ok(RawResponse { status, body })
    }

    fn transport_error(&self, e: reqwest::Error, method: &Method, url: &str) -> SdpError {
        if e.is_timeout() {
            return SdpError::timeout(self.timeout, format!("{} {}", method, url));
        }
        SdpError::Http(e)
    }

    /// Lists the newest requests.
    ///
    /// # Arguments
    ///
    /// * `row_count` - Number of requests to ask for (one page only)
    ///
    /// # Returns
    ///
    /// The backend's JSON body, unchanged.
    pub async fn list_requests(&self, row_count: u32) -> Result<Value, SdpError> {
        let input_data = encode_input_data(&ListEnvelope {
            list_info: ListInfo::latest(row_count),
        })?;

        let response = self
            .send(Method::GET, &self.requests_url(), Some(input_data))
            .await?;

        let data: Value = serde_json::from_str(&response.body)?;

        let count = data
            .get("requests")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        tracing::info!(count, "Successfully retrieved {} requests", count);

        Ok(data)
    }

    /// Creates a new request/ticket.
    ///
    /// # Returns
    ///
    /// The backend's JSON body whatever the status code; a 400 with a JSON
    /// error envelope comes back as that envelope.
    ///
    /// # Errors
    ///
    /// - `SdpError::EmptyResponse` if the body is empty
    /// - `SdpError::InvalidServerJson` if the body is not JSON
    /// - transport errors
    pub async fn create_request(&self, request: &NewRequest) -> Result<Value, SdpError> {
        let input_data = encode_input_data(&RequestEnvelope { request })?;

        tracing::debug!(input_data = %input_data, "Create request payload");

        let response = self
            .send(Method::POST, &self.requests_url(), Some(input_data))
            .await?;

        if response.body.is_empty() {
            tracing::error!("SDP returned an empty response body");
            return Err(SdpError::EmptyResponse);
        }

        let data: Value = serde_json::from_str(&response.body).map_err(|e| {
            tracing::error!(
                error = %e,
                raw = %self.excerpt(&response.body),
                "Failed to decode JSON from SDP"
            );
            SdpError::invalid_server_json(&response.body)
        })?;

        if matches!(response.status, StatusCode::OK | StatusCode::CREATED) {
            tracing::info!("Ticket created successfully");
        } else {
            tracing::warn!(
                status = response.status.as_u16(),
                details = %self.excerpt(&response.body),
                "Ticket creation failed"
            );
        }

        Ok(data)
    }

    /// Gets full details of a single request.
    ///
    /// # Errors
    ///
    /// Returns `SdpError::NotFound` on HTTP 404 without looking at the body.
    pub async fn get_request(&self, id: &str) -> Result<Value, SdpError> {
        let response = self.send(Method::GET, &self.request_url(id), None).await?;

        if response.status == StatusCode::NOT_FOUND {
            return Err(SdpError::not_found(id));
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    /// Updates an existing request/ticket.
    ///
    /// # Errors
    ///
    /// - `SdpError::NoUpdateFields` if `update` is empty; nothing is sent
    /// - `SdpError::InvalidJson` if the body is not JSON
    /// - transport errors
    pub async fn update_request(
        &self,
        id: &str,
        update: &RequestUpdate,
    ) -> Result<Value, SdpError> {
        if update.is_empty() {
            return Err(SdpError::NoUpdateFields);
        }

        let input_data = encode_input_data(&RequestEnvelope { request: update })?;

        let response = self
            .send(Method::PUT, &self.request_url(id), Some(input_data))
            .await?;

        serde_json::from_str(&response.body).map_err(|e| {
            tracing::error!(error = %e, "Failed to decode update response");
            SdpError::invalid_json(&response.body)
        })
    }

    /// Closes a request/ticket.
    ///
    /// Delegates to [`update_request`](Self::update_request) with
    /// [`RequestUpdate::closure`]: status `Closed` and the description
    /// replaced by the closure comments.
    pub async fn close_request(&self, id: &str, closure_comments: &str) -> Result<Value, SdpError> {
        self.update_request(id, &RequestUpdate::closure(closure_comments))
            .await
    }

    /// Short, sanitized excerpt of a body for logging.
    fn excerpt(&self, body: &str) -> String {
        SdpError::sanitize_message(&truncate_chars(body, MAX_RAW_BODY_CHARS), &self.api_key)
    }
}
