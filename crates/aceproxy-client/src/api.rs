// GatewayAdminClient - facade for all admin API operations

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    config::ConsoleClientConfig,
    constants::{admin_api_path, api_config_item},
    credential::CredentialStore,
    error::Result,
    http::GatewayHttpClient,
    model::{
        ApiStatRow, ApiTargetConfig, Envelope, LogPage, LogQuery, RealTimeStat, SummarySnapshot,
        TestOutcome,
    },
    notify::Notifier,
};

/// Typed admin client for the aceproxy gateway.
pub struct GatewayAdminClient {
    http: GatewayHttpClient,
}

impl GatewayAdminClient {
    /// Create a new client over the given credential store and notifier.
    pub fn new(
        config: ConsoleClientConfig,
        credentials: Arc<CredentialStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let http = GatewayHttpClient::new(config, credentials, notifier)?;
        Ok(Self { http })
    }

    /// The credential store requests authenticate from.
    pub fn credentials(&self) -> Arc<CredentialStore> {
        self.http.credentials()
    }

    /// The notification sink failures are reported to.
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.http.notifier()
    }

    // ============================================================================
    // API target config APIs
    // ============================================================================

    pub async fn config_list(&self) -> Result<Vec<ApiTargetConfig>> {
        let response: Envelope<Vec<ApiTargetConfig>> =
            self.http.get(admin_api_path::API_CONFIG).await?;
        self.http.accept_or_default(response)
    }

    pub async fn config_get(&self, name: &str) -> Result<ApiTargetConfig> {
        let response: Envelope<ApiTargetConfig> =
            self.http.get(&api_config_item(name)).await?;
        self.http.accept(response)
    }

    pub async fn config_create(&self, config: &ApiTargetConfig) -> Result<()> {
        let response: Envelope<serde_json::Value> = self
            .http
            .post_json(admin_api_path::API_CONFIG, config)
            .await?;
        self.http.accept_ok(response)
    }

    /// Update the config stored under `name`. The name is the immutable
    /// key; the addressed entity must already exist server-side.
    pub async fn config_update(&self, name: &str, config: &ApiTargetConfig) -> Result<()> {
        let response: Envelope<serde_json::Value> =
            self.http.put_json(&api_config_item(name), config).await?;
        self.http.accept_ok(response)
    }

    pub async fn config_delete(&self, name: &str) -> Result<()> {
        let response: Envelope<serde_json::Value> =
            self.http.delete(&api_config_item(name)).await?;
        self.http.accept_ok(response)
    }

    /// Run a connectivity probe against the named target.
    pub async fn config_test(&self, name: &str) -> Result<TestOutcome> {
        #[derive(Serialize)]
        struct Body<'a> {
            name: &'a str,
        }

        let response: Envelope<TestOutcome> = self
            .http
            .post_json(admin_api_path::API_CONFIG_TEST, &Body { name })
            .await?;
        self.http.accept(response)
    }

    // ============================================================================
    // Request log APIs
    // ============================================================================

    pub async fn logs_query(&self, filters: &LogQuery, page: u64, size: u64) -> Result<LogPage> {
        let response: Envelope<LogPage> = self
            .http
            .get_with_query(admin_api_path::LOGS, &PagedLogQuery::new(filters, page, size))
            .await?;
        self.http.accept(response)
    }

    /// Download the filtered logs as a CSV file.
    pub async fn logs_export(&self, filters: &LogQuery) -> Result<Vec<u8>> {
        let query = serde_urlencoded::to_string(filters)
            .map_err(|e| anyhow::anyhow!("failed to encode export query: {}", e))?;

        let path = if query.is_empty() {
            admin_api_path::LOGS_EXPORT.to_string()
        } else {
            format!("{}?{}", admin_api_path::LOGS_EXPORT, query)
        };

        self.http.get_bytes(&path).await
    }

    /// Purge the logs matching the filters. Returns the deleted count.
    pub async fn logs_clear(&self, filters: &LogQuery) -> Result<u64> {
        #[derive(Default, Deserialize)]
        struct ClearResult {
            #[serde(default)]
            count: u64,
        }

        let response: Envelope<ClearResult> = self
            .http
            .post_with_query(admin_api_path::LOGS_CLEAR, filters)
            .await?;
        Ok(self.http.accept_or_default(response)?.count)
    }

    // ============================================================================
    // Statistics APIs
    // ============================================================================

    pub async fn stats_summary(&self) -> Result<SummarySnapshot> {
        let response: Envelope<SummarySnapshot> = self.http.get(admin_api_path::STATS).await?;
        self.http.accept(response)
    }

    pub async fn stats_api_table(&self) -> Result<Vec<ApiStatRow>> {
        let response: Envelope<Vec<ApiStatRow>> =
            self.http.get(admin_api_path::STATS_API_TABLE).await?;
        self.http.accept_or_default(response)
    }

    pub async fn stats_realtime(&self) -> Result<Vec<RealTimeStat>> {
        let response: Envelope<Vec<RealTimeStat>> =
            self.http.get(admin_api_path::STATS_REALTIME).await?;
        self.http.accept_or_default(response)
    }

    // ============================================================================
    // Login probe
    // ============================================================================

    /// Check a candidate token against the config-list endpoint without
    /// storing it or emitting notifications. Returns the raw HTTP status.
    pub async fn validate_token(&self, token: &str) -> Result<u16> {
        self.http.probe(admin_api_path::API_CONFIG, token).await
    }
}

/// Log query with its page window, as the gateway's log endpoint takes it.
#[derive(Serialize)]
struct PagedLogQuery<'a> {
    page: u64,
    size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_method: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    has_error: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_time: Option<DateTime<Utc>>,
}

impl<'a> PagedLogQuery<'a> {
    fn new(filters: &'a LogQuery, page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            api_name: filters.api_name.as_deref(),
            request_method: filters.request_method.as_deref(),
            status_code: filters.status_code,
            has_error: filters.has_error,
            start_time: filters.start_time,
            end_time: filters.end_time,
        }
    }
}
