// API target config list state

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use aceproxy_client::GatewayAdminClient;
use aceproxy_client::model::ApiTargetConfig;
use aceproxy_client::notify::Notifier;

use crate::error::{ConsoleError, Result};
use crate::format::format_response_time;
use crate::test_status::{TestStatus, TestStatusTracker};
use crate::view::ConfirmPrompt;

/// Receiver for config list re-renders.
pub trait ConfigListRenderer: Send + Sync + 'static {
    fn render(&self, rows: &[ConfigRow]);
}

/// One config joined with its live connectivity-test status.
#[derive(Clone, Debug)]
pub struct ConfigRow {
    pub config: ApiTargetConfig,
    pub status: TestStatus,
}

/// List state for API target configs.
///
/// The displayed list always reflects the last confirmed server state:
/// every mutation awaits the gateway's success signal and then reloads
/// the full collection. Nothing is mutated optimistically, and a failed
/// reload keeps the previous collection on screen.
pub struct ConfigStore {
    client: Arc<GatewayAdminClient>,
    tracker: Arc<TestStatusTracker>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn ConfirmPrompt>,
    items: RwLock<Vec<ApiTargetConfig>>,
    renderers: RwLock<Vec<Arc<dyn ConfigListRenderer>>>,
}

impl ConfigStore {
    pub fn new(
        client: Arc<GatewayAdminClient>,
        tracker: Arc<TestStatusTracker>,
        confirm: Arc<dyn ConfirmPrompt>,
    ) -> Self {
        let notifier = client.notifier();
        Self {
            client,
            tracker,
            notifier,
            confirm,
            items: RwLock::new(Vec::new()),
            renderers: RwLock::new(Vec::new()),
        }
    }

    /// Register a renderer and immediately paint the current rows into it.
    pub fn add_renderer(&self, renderer: Arc<dyn ConfigListRenderer>) {
        renderer.render(&self.rows());
        self.renderers.write().push(renderer);
    }

    /// Current collection joined with test statuses.
    pub fn rows(&self) -> Vec<ConfigRow> {
        self.items
            .read()
            .iter()
            .map(|config| ConfigRow {
                status: self.tracker.status(&config.name),
                config: config.clone(),
            })
            .collect()
    }

    fn render_now(&self) {
        let rows = self.rows();
        for renderer in self.renderers.read().iter() {
            renderer.render(&rows);
        }
    }

    /// Replace the collection from the gateway and re-render.
    ///
    /// On failure the previous collection stays on screen; the request
    /// client has already surfaced the failure.
    pub async fn reload(&self) -> Result<()> {
        let configs = self.client.config_list().await?;
        *self.items.write() = configs;
        self.render_now();
        Ok(())
    }

    pub async fn create(&self, config: ApiTargetConfig) -> Result<()> {
        self.validate(&config)?;
        self.client.config_create(&config).await?;
        self.notifier
            .success(&format!("API config \"{}\" created", config.name));
        self.reload_after_mutation().await;
        Ok(())
    }

    /// Update the entity addressed by its immutable name key.
    pub async fn update(&self, config: ApiTargetConfig) -> Result<()> {
        self.validate(&config)?;
        self.client.config_update(&config.name, &config).await?;
        self.notifier
            .success(&format!("API config \"{}\" updated", config.name));
        self.reload_after_mutation().await;
        Ok(())
    }

    /// Delete after explicit confirmation. Returns false when the user
    /// declined; nothing is sent in that case.
    pub async fn delete(&self, name: &str) -> Result<bool> {
        let prompt = format!("Delete API config \"{}\"?", name);
        if !self.confirm.confirm(&prompt) {
            return Ok(false);
        }

        self.client.config_delete(name).await?;
        self.tracker.forget(name);
        self.notifier
            .success(&format!("API config \"{}\" deleted", name));
        self.reload_after_mutation().await;
        Ok(true)
    }

    /// Run a connectivity test against one target.
    ///
    /// Status flips to `Pending` and re-renders before the request goes
    /// out; the terminal status only lands if no newer test superseded
    /// this one in the meantime.
    pub async fn invoke_test(&self, name: &str) -> Result<TestStatus> {
        let generation = self.tracker.begin(name);
        self.render_now();

        let status = match self.client.config_test(name).await {
            Ok(outcome) if outcome.success => {
                self.notifier.success(&format!(
                    "\"{}\" responded in {}",
                    name,
                    format_response_time(outcome.response_time)
                ));
                TestStatus::Success
            }
            Ok(outcome) => {
                // The envelope was fine but the probe itself failed, so
                // the request client had nothing to report.
                let detail = if outcome.error.is_empty() {
                    outcome.message
                } else {
                    outcome.error
                };
                self.notifier
                    .error(&format!("test failed for \"{}\": {}", name, detail));
                TestStatus::Failure
            }
            Err(e) => {
                debug!("Connectivity test request for {} failed: {}", name, e);
                TestStatus::Failure
            }
        };

        if self.tracker.complete(name, generation, status) {
            self.render_now();
        }
        Ok(status)
    }

    /// Discard page-owned state. The test tracker survives: it has
    /// session lifetime and is shared across pages.
    pub fn reset(&self) {
        self.items.write().clear();
        self.renderers.write().clear();
    }

    fn validate(&self, config: &ApiTargetConfig) -> Result<()> {
        config.validate().map_err(|message| {
            self.notifier.error(&message);
            ConsoleError::Validation(message)
        })
    }

    async fn reload_after_mutation(&self) {
        // The mutation itself succeeded; a failed refresh keeps the
        // previous collection and was already surfaced by the client.
        if let Err(e) = self.reload().await {
            debug!("Reload after mutation failed: {}", e);
        }
    }
}
