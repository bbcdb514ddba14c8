// API target config model types

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

fn default_active() -> bool {
    true
}

/// A named upstream endpoint definition the gateway proxies requests to.
///
/// `name` is the unique key: create rejects duplicates server-side, and
/// update/delete/test address the entity by it. It is immutable after
/// creation; edit flows must keep it locked.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiTargetConfig {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub base_url: String,
    #[serde(default)]
    pub auth_type: String,
    #[serde(default)]
    pub auth_value: String,
    /// Upstream request timeout in seconds.
    #[serde(default, rename = "timeout")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub rate_limit: u64,
    /// Extra headers as raw JSON object text, or empty.
    #[serde(default, rename = "headers")]
    pub custom_headers: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_test_status: Option<String>,
    #[serde(default)]
    pub last_test_time: Option<DateTime<Utc>>,
}

impl ApiTargetConfig {
    /// Client-side validation, run before any create/update is dispatched.
    ///
    /// Violations keep the operation local: the request is never sent.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("API name must not be empty".to_string());
        }
        if self.base_url.trim().is_empty() {
            return Err("base URL must not be empty".to_string());
        }

        match Url::parse(&self.base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => {
                return Err(format!("unsupported base URL scheme: {}", url.scheme()));
            }
            Err(e) => return Err(format!("invalid base URL: {}", e)),
        }

        if !self.custom_headers.trim().is_empty()
            && serde_json::from_str::<HashMap<String, String>>(&self.custom_headers).is_err()
        {
            return Err(
                "custom headers must be a JSON object of string values, or empty".to_string(),
            );
        }

        Ok(())
    }
}

/// Result of an on-demand connectivity probe against one API target.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TestOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: u16,
    /// Probe round-trip in milliseconds.
    #[serde(default)]
    pub response_time: i64,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
}
