// Statistics model types

use serde::{Deserialize, Serialize};

/// Aggregate counters shown on the dashboard and statistics pages.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SummarySnapshot {
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub success_requests: u64,
    #[serde(default)]
    pub error_requests: u64,
    /// Percentage in [0, 100].
    #[serde(default)]
    pub success_rate: f64,
    /// Milliseconds.
    #[serde(default)]
    pub avg_response_time: f64,
    #[serde(default)]
    pub active_apis: u64,
}

/// One per-API row of the statistics table.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiStatRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub success_requests: u64,
    #[serde(default)]
    pub error_requests: u64,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub avg_response_time: f64,
    #[serde(default)]
    pub active: bool,
}

/// Sliding-window counters for one API, from the realtime endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RealTimeStat {
    #[serde(default)]
    pub api_name: String,
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub success_count: u64,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub error_rate: f64,
    #[serde(default)]
    pub avg_resp_time: f64,
}
