// Common model types

use serde::Deserialize;

/// Generic gateway response envelope.
///
/// The gateway is not uniform about its envelope: some handlers emit a
/// boolean `success` flag, others a numeric `code`, and failure messages
/// may arrive under `error`, `message` or `msg`. A response counts as
/// successful when it carries `success == true` or `code == 200`;
/// everything else is an application failure.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.success == Some(true) || self.code == Some(200)
    }

    /// Failure message, preferring the most specific field present.
    pub fn failure_message(&self) -> String {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .or(self.msg.as_deref())
            .filter(|m| !m.is_empty())
            .unwrap_or("request rejected by the gateway")
            .to_string()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
