//! State and orchestration layer of the aceproxy admin console
//!
//! This crate holds everything between the gateway's admin REST surface
//! (see `aceproxy-client`) and whatever renders the console: the page
//! router, the entity list stores, the pagination/filter model for
//! request logs, the per-target connectivity test tracker, and the
//! polling scheduler that keeps summary views current while they are
//! visible. Presentation is reached only through the renderer and sink
//! traits; no markup lives here.

pub mod actions;
pub mod configs;
pub mod error;
pub mod format;
pub mod logging;
pub mod logs;
pub mod pages;
pub mod poller;
pub mod router;
pub mod session;
pub mod stats;
pub mod test_status;
pub mod view;

pub use actions::ActionRegistry;
pub use configs::{ConfigListRenderer, ConfigRow, ConfigStore};
pub use error::{ConsoleError, Result};
pub use logging::{LoggingConfig, LoggingGuard, init_logging};
pub use logs::{LOG_PAGE_SIZE, LogFilters, LogListRenderer, LogView, PageLink, PageState};
pub use pages::{
    ApiConfigPage, DEFAULT_REFRESH_INTERVAL, DashboardPage, RequestLogsPage, StatisticsPage,
};
pub use poller::PollScheduler;
pub use router::{Page, PageController, Router};
pub use session::Session;
pub use stats::{DashboardView, StatsTableRenderer, StatsView, SummaryRenderer};
pub use test_status::{TestStatus, TestStatusTracker};
pub use view::{ConfirmPrompt, ContentSink};
