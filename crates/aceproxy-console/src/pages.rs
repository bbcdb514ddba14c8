// Page controllers: wiring between the router and the view state

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::configs::ConfigStore;
use crate::error::Result;
use crate::logs::LogView;
use crate::poller::PollScheduler;
use crate::router::PageController;
use crate::stats::{DashboardView, StatsView};

/// Default refresh cadence for the pages that poll.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// API config page: loads the target list. No polling; the list only
/// changes through operator actions, which reload it themselves.
pub struct ApiConfigPage {
    store: Arc<ConfigStore>,
}

impl ApiConfigPage {
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PageController for ApiConfigPage {
    async fn init(&self) -> Result<()> {
        self.store.reload().await
    }

    fn teardown(&self) {
        self.store.reset();
    }
}

/// Request log page: loads page 1 and keeps the current page fresh.
pub struct RequestLogsPage {
    view: Arc<LogView>,
    poller: Arc<PollScheduler>,
    interval: Duration,
}

impl RequestLogsPage {
    pub fn new(view: Arc<LogView>, poller: Arc<PollScheduler>) -> Self {
        Self {
            view,
            poller,
            interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

#[async_trait]
impl PageController for RequestLogsPage {
    async fn init(&self) -> Result<()> {
        self.view.load_page(1).await?;

        let view = self.view.clone();
        self.poller.start(self.interval, move || {
            let view = view.clone();
            async move { view.refresh().await }
        });
        Ok(())
    }

    fn teardown(&self) {
        self.view.reset();
    }
}

/// Dashboard page: summary counters, periodically refreshed.
pub struct DashboardPage {
    view: Arc<DashboardView>,
    poller: Arc<PollScheduler>,
    interval: Duration,
}

impl DashboardPage {
    pub fn new(view: Arc<DashboardView>, poller: Arc<PollScheduler>) -> Self {
        Self {
            view,
            poller,
            interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

#[async_trait]
impl PageController for DashboardPage {
    async fn init(&self) -> Result<()> {
        self.view.refresh().await?;

        let view = self.view.clone();
        self.poller.start(self.interval, move || {
            let view = view.clone();
            async move { view.refresh().await }
        });
        Ok(())
    }

    fn teardown(&self) {
        self.view.reset();
    }
}

/// Statistics page: summary counters plus the per-API table.
pub struct StatisticsPage {
    view: Arc<StatsView>,
    poller: Arc<PollScheduler>,
    interval: Duration,
}

impl StatisticsPage {
    pub fn new(view: Arc<StatsView>, poller: Arc<PollScheduler>) -> Self {
        Self {
            view,
            poller,
            interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

#[async_trait]
impl PageController for StatisticsPage {
    async fn init(&self) -> Result<()> {
        self.view.refresh().await?;

        let view = self.view.clone();
        self.poller.start(self.interval, move || {
            let view = view.clone();
            async move { view.refresh().await }
        });
        Ok(())
    }

    fn teardown(&self) {
        self.view.reset();
    }
}
