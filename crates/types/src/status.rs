//! Wire payloads returned by the status backend.

use serde::{Deserialize, Serialize};

/// Body of `GET /`: a one-line greeting used as the dashboard welcome text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootGreeting {
    #[serde(rename = "Hello")]
    pub hello: String,
}

/// Body of `GET /emergency/status`.
///
/// Only `emergency_active` is inspected by the poller; the remaining fields
/// are informational and surface in the `status` CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmergencyStatus {
    pub emergency_active: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub last_thread_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /emergency/reset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetAck {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}
