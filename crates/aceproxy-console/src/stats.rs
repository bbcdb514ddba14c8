// Dashboard and statistics view state

use std::sync::Arc;

use parking_lot::RwLock;

use aceproxy_client::GatewayAdminClient;
use aceproxy_client::model::{ApiStatRow, SummarySnapshot};

use crate::error::Result;

/// Receiver for summary-counter re-renders.
pub trait SummaryRenderer: Send + Sync + 'static {
    fn render(&self, summary: &SummarySnapshot);
}

/// Receiver for per-API stat table re-renders.
pub trait StatsTableRenderer: Send + Sync + 'static {
    fn render(&self, rows: &[ApiStatRow]);
}

/// Aggregate counters shown on the dashboard.
pub struct DashboardView {
    client: Arc<GatewayAdminClient>,
    summary: RwLock<Option<SummarySnapshot>>,
    renderers: RwLock<Vec<Arc<dyn SummaryRenderer>>>,
}

impl DashboardView {
    pub fn new(client: Arc<GatewayAdminClient>) -> Self {
        Self {
            client,
            summary: RwLock::new(None),
            renderers: RwLock::new(Vec::new()),
        }
    }

    pub fn add_renderer(&self, renderer: Arc<dyn SummaryRenderer>) {
        if let Some(summary) = self.summary.read().as_ref() {
            renderer.render(summary);
        }
        self.renderers.write().push(renderer);
    }

    pub fn summary(&self) -> Option<SummarySnapshot> {
        self.summary.read().clone()
    }

    /// Fetch fresh counters and fan them out. This is the path the
    /// polling scheduler re-runs; on failure the previous counters stay.
    pub async fn refresh(&self) -> Result<()> {
        let summary = self.client.stats_summary().await?;
        for renderer in self.renderers.read().iter() {
            renderer.render(&summary);
        }
        *self.summary.write() = Some(summary);
        Ok(())
    }

    /// Discard page-owned state.
    pub fn reset(&self) {
        *self.summary.write() = None;
        self.renderers.write().clear();
    }
}

/// Statistics page: the same aggregate counters plus the per-API table.
pub struct StatsView {
    client: Arc<GatewayAdminClient>,
    summary: RwLock<Option<SummarySnapshot>>,
    rows: RwLock<Vec<ApiStatRow>>,
    summary_renderers: RwLock<Vec<Arc<dyn SummaryRenderer>>>,
    table_renderers: RwLock<Vec<Arc<dyn StatsTableRenderer>>>,
}

impl StatsView {
    pub fn new(client: Arc<GatewayAdminClient>) -> Self {
        Self {
            client,
            summary: RwLock::new(None),
            rows: RwLock::new(Vec::new()),
            summary_renderers: RwLock::new(Vec::new()),
            table_renderers: RwLock::new(Vec::new()),
        }
    }

    pub fn add_summary_renderer(&self, renderer: Arc<dyn SummaryRenderer>) {
        if let Some(summary) = self.summary.read().as_ref() {
            renderer.render(summary);
        }
        self.summary_renderers.write().push(renderer);
    }

    pub fn add_table_renderer(&self, renderer: Arc<dyn StatsTableRenderer>) {
        renderer.render(&self.rows.read());
        self.table_renderers.write().push(renderer);
    }

    pub fn summary(&self) -> Option<SummarySnapshot> {
        self.summary.read().clone()
    }

    pub fn rows(&self) -> Vec<ApiStatRow> {
        self.rows.read().clone()
    }

    /// Fetch counters and table independently: a failure in one never
    /// blocks the other from refreshing. The first failure is returned
    /// after both attempts.
    pub async fn refresh(&self) -> Result<()> {
        let mut first_failure = None;

        match self.client.stats_summary().await {
            Ok(summary) => {
                for renderer in self.summary_renderers.read().iter() {
                    renderer.render(&summary);
                }
                *self.summary.write() = Some(summary);
            }
            Err(e) => first_failure = Some(e),
        }

        match self.client.stats_api_table().await {
            Ok(rows) => {
                for renderer in self.table_renderers.read().iter() {
                    renderer.render(&rows);
                }
                *self.rows.write() = rows;
            }
            Err(e) => {
                if first_failure.is_none() {
                    first_failure = Some(e);
                }
            }
        }

        match first_failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Discard page-owned state.
    pub fn reset(&self) {
        *self.summary.write() = None;
        self.rows.write().clear();
        self.summary_renderers.write().clear();
        self.table_renderers.write().clear();
    }
}
