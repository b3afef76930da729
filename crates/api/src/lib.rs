//! Care Inbox status API client.
//!
//! This module provides a lightweight client for the demo backend that the
//! control panel talks to. It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Validating configured endpoints for safety
//! - Sending the ngrok interstitial bypass header on tunnelled endpoints
//! - Decoding the small JSON payloads the backend returns
//!
//! The primary entry point is [`StatusClient`]. Create an instance via
//! [`StatusClient::new`] and call one of the typed request helpers. Callers
//! that only need to read status (the notification poller, the welcome
//! fetch) should depend on the [`StatusSource`] trait instead so tests can
//! substitute a fake.
//!
//! # Example
//!
//! ```ignore
//! use care_inbox_api::{StatusClient, StatusEndpoints};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = StatusClient::new(StatusEndpoints::default())?;
//!     let status = client.emergency_status().await?;
//!     println!("active: {}", status.emergency_active);
//!     Ok(())
//! }
//! ```

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use care_inbox_types::{EmergencyStatus, ResetAck, RootGreeting};
use reqwest::{Client, RequestBuilder, StatusCode, Url, header};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Root endpoint serving the welcome greeting.
pub const DEFAULT_ROOT_URL: &str = "http://localhost:8000/";
/// Endpoint reporting whether the agent flagged an emergency.
pub const DEFAULT_EMERGENCY_STATUS_URL: &str = "https://nonperjured-shakeable-aurore.ngrok-free.dev/emergency/status";

/// Header that tells ngrok to skip its browser warning page.
pub const NGROK_SKIP_WARNING_HEADER: &str = "ngrok-skip-browser-warning";
/// Any value works for the bypass header; this one matches the backend docs.
pub const NGROK_SKIP_WARNING_VALUE: &str = "69420";

/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Error returned by every status request.
#[derive(Debug, Error)]
pub enum StatusError {
    /// A configured endpoint failed validation.
    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
    /// The body was not the JSON shape we expected.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The three backend endpoints the control panel uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEndpoints {
    pub root_url: String,
    pub emergency_status_url: String,
    pub emergency_reset_url: String,
}

impl StatusEndpoints {
    /// Build endpoints from a root URL and an emergency status URL. The reset
    /// endpoint lives beside the status endpoint.
    pub fn new(root_url: impl Into<String>, emergency_status_url: impl Into<String>) -> Self {
        let emergency_status_url = emergency_status_url.into();
        let emergency_reset_url = derive_reset_url(&emergency_status_url);
        Self {
            root_url: root_url.into(),
            emergency_status_url,
            emergency_reset_url,
        }
    }

    /// Validate every endpoint.
    pub fn validate(&self) -> Result<(), StatusError> {
        validate_endpoint(&self.root_url)?;
        validate_endpoint(&self.emergency_status_url)?;
        validate_endpoint(&self.emergency_reset_url)?;
        Ok(())
    }
}

impl Default for StatusEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_URL, DEFAULT_EMERGENCY_STATUS_URL)
    }
}

/// Read-only view of the backend used by the poller and the shell.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch the root greeting.
    async fn greeting(&self) -> Result<RootGreeting, StatusError>;
    /// Fetch the current emergency flag.
    async fn emergency_status(&self) -> Result<EmergencyStatus, StatusError>;
}

#[derive(Debug, Clone)]
/// Thin wrapper around a configured `reqwest::Client` for the status backend.
pub struct StatusClient {
    pub endpoints: StatusEndpoints,
    pub http: Client,
    pub user_agent: String,
}

impl StatusClient {
    /// Construct a [`StatusClient`] for the given endpoints.
    ///
    /// Non-localhost endpoints must use HTTPS.
    pub fn new(endpoints: StatusEndpoints) -> Result<Self, StatusError> {
        endpoints.validate()?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            endpoints,
            http,
            user_agent: format!("care-inbox/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    /// Build a `reqwest::RequestBuilder` for a method and absolute URL with
    /// the configured User-Agent and the ngrok bypass header.
    pub fn request(&self, method: reqwest::Method, url: &str) -> RequestBuilder {
        debug!(%url, %method, "building request");

        self.http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent)
            .header(NGROK_SKIP_WARNING_HEADER, NGROK_SKIP_WARNING_VALUE)
    }

    /// Clear the backend emergency flag.
    pub async fn reset_emergency(&self) -> Result<ResetAck, StatusError> {
        let builder = self.request(reqwest::Method::POST, &self.endpoints.emergency_reset_url);
        send_json(builder).await
    }
}

#[async_trait]
impl StatusSource for StatusClient {
    async fn greeting(&self) -> Result<RootGreeting, StatusError> {
        let builder = self
            .http
            .get(&self.endpoints.root_url)
            .header(header::USER_AGENT, &self.user_agent);
        send_json(builder).await
    }

    async fn emergency_status(&self) -> Result<EmergencyStatus, StatusError> {
        let builder = self.request(reqwest::Method::GET, &self.endpoints.emergency_status_url);
        send_json(builder).await
    }
}

/// Send a request and decode a JSON body, treating non-2xx as an error.
async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, StatusError> {
    let response = builder.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(StatusError::Status(status));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// `.../emergency/status` becomes `.../emergency/reset`; any other path gets
/// `/reset` appended.
fn derive_reset_url(status_url: &str) -> String {
    match status_url.strip_suffix("/status") {
        Some(prefix) => format!("{prefix}/reset"),
        None => format!("{}/reset", status_url.trim_end_matches('/')),
    }
}

/// Validate that an endpoint is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
fn validate_endpoint(endpoint: &str) -> Result<(), StatusError> {
    let invalid = |reason: String| StatusError::InvalidEndpoint {
        url: endpoint.to_string(),
        reason,
    };
    let parsed_url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;

    let host_name = parsed_url.host_str().ok_or_else(|| invalid("missing host".to_string()))?;

    // Local development allowances: localhost/127.0.0.1 with any scheme.
    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(());
    }

    if parsed_url.scheme() != "https" {
        return Err(invalid(format!(
            "must use https for non-localhost hosts; got '{}://'",
            parsed_url.scheme()
        )));
    }

    Ok(())
}
