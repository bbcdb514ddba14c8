// Request log model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One proxied request as recorded by the gateway. Read-only for the
/// console.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RequestLogRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub api_name: String,
    #[serde(default)]
    pub request_method: String,
    #[serde(default)]
    pub request_path: String,
    #[serde(default)]
    pub response_status: i32,
    /// Upstream round-trip in milliseconds.
    #[serde(default, rename = "response_time")]
    pub response_time_ms: i64,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub user_ip: String,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub has_error: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl RequestLogRecord {
    /// Error view of the record; older gateway versions omit `has_error`.
    pub fn is_error(&self) -> bool {
        self.has_error || self.response_status >= 400 || !self.error_message.is_empty()
    }
}

/// Filter criteria for the paginated log query. Empty fields are omitted
/// from the request; filtering itself happens server-side.
#[derive(Clone, Debug, Default, Serialize)]
pub struct LogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_error: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

/// One page of the log query result.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LogPage {
    #[serde(default)]
    pub logs: Vec<RequestLogRecord>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub pages: u64,
}
