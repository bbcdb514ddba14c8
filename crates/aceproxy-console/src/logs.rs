// Request log view: pagination and filter model

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use aceproxy_client::GatewayAdminClient;
use aceproxy_client::model::{LogQuery, RequestLogRecord};
use aceproxy_client::notify::Notifier;

use crate::error::{ConsoleError, Result};
use crate::format::parse_time_flexible;
use crate::view::ConfirmPrompt;

/// Fixed page size of the request log table.
pub const LOG_PAGE_SIZE: u64 = 20;

/// Pagination state of the log table. `current_page` is 1-based and
/// stays within `[1, total_pages]` after every successful reload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u64,
    pub page_size: u64,
    pub total_count: u64,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: LOG_PAGE_SIZE,
            total_count: 0,
        }
    }
}

impl PageState {
    /// Number of pages; never less than one so page 1 always exists.
    pub fn total_pages(&self) -> u64 {
        if self.total_count == 0 {
            1
        } else {
            self.total_count.div_ceil(self.page_size)
        }
    }

    /// Clamp a requested page into the known valid range.
    pub fn clamp(&self, requested: u64) -> u64 {
        requested.clamp(1, self.total_pages())
    }
}

/// Filter fields as entered in the log filter form. Values stay raw
/// here; `to_query` parses them and rejects malformed input before
/// anything is dispatched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogFilters {
    pub api_name: String,
    pub request_method: String,
    pub status_code: String,
    pub has_error: Option<bool>,
    pub start_time: String,
    pub end_time: String,
}

impl LogFilters {
    /// Assemble the server-side query, omitting empty fields.
    pub fn to_query(&self) -> std::result::Result<LogQuery, String> {
        let mut query = LogQuery::default();

        let api_name = self.api_name.trim();
        if !api_name.is_empty() {
            query.api_name = Some(api_name.to_string());
        }

        let request_method = self.request_method.trim();
        if !request_method.is_empty() {
            query.request_method = Some(request_method.to_uppercase());
        }

        let status_code = self.status_code.trim();
        if !status_code.is_empty() {
            let code: i32 = status_code
                .parse()
                .map_err(|_| format!("invalid status code filter: {}", status_code))?;
            query.status_code = Some(code);
        }

        query.has_error = self.has_error;

        let start_time = self.start_time.trim();
        if !start_time.is_empty() {
            query.start_time = Some(
                parse_time_flexible(start_time)
                    .ok_or_else(|| format!("invalid start time: {}", start_time))?,
            );
        }

        let end_time = self.end_time.trim();
        if !end_time.is_empty() {
            query.end_time = Some(
                parse_time_flexible(end_time)
                    .ok_or_else(|| format!("invalid end time: {}", end_time))?,
            );
        }

        Ok(query)
    }
}

/// One entry of the rendered pagination strip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageLink {
    Previous { target: u64, enabled: bool },
    Number { page: u64, current: bool },
    Next { target: u64, enabled: bool },
}

/// Receiver for log table re-renders.
pub trait LogListRenderer: Send + Sync + 'static {
    fn render(&self, records: &[RequestLogRecord], links: &[PageLink]);
}

/// Paginated, filterable view over the gateway's request log.
///
/// A failed load leaves the previously displayed page untouched:
/// stale-but-consistent beats blank. Filters are only assembled here;
/// the gateway applies them.
pub struct LogView {
    client: Arc<GatewayAdminClient>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn ConfirmPrompt>,
    state: RwLock<PageState>,
    filters: RwLock<LogFilters>,
    records: RwLock<Vec<RequestLogRecord>>,
    renderers: RwLock<Vec<Arc<dyn LogListRenderer>>>,
}

impl LogView {
    pub fn new(client: Arc<GatewayAdminClient>, confirm: Arc<dyn ConfirmPrompt>) -> Self {
        let notifier = client.notifier();
        Self {
            client,
            notifier,
            confirm,
            state: RwLock::new(PageState::default()),
            filters: RwLock::new(LogFilters::default()),
            records: RwLock::new(Vec::new()),
            renderers: RwLock::new(Vec::new()),
        }
    }

    pub fn add_renderer(&self, renderer: Arc<dyn LogListRenderer>) {
        renderer.render(&self.records.read(), &self.page_links());
        self.renderers.write().push(renderer);
    }

    pub fn page_state(&self) -> PageState {
        self.state.read().clone()
    }

    pub fn filters(&self) -> LogFilters {
        self.filters.read().clone()
    }

    pub fn records(&self) -> Vec<RequestLogRecord> {
        self.records.read().clone()
    }

    /// Load one page of results. Out-of-range requests are clamped
    /// before dispatch, so they are never sent.
    pub async fn load_page(&self, requested: u64) -> Result<()> {
        let query = self.current_query()?;
        let (target, size) = {
            let state = self.state.read();
            (state.clamp(requested), state.page_size)
        };

        let page = self.client.logs_query(&query, target, size).await?;

        {
            let mut state = self.state.write();
            state.total_count = page.total;
            state.current_page = target.min(state.total_pages());
        }
        *self.records.write() = page.logs;
        self.render_now();
        Ok(())
    }

    /// Re-run the fetch for whatever page is currently displayed. This
    /// is the path the polling scheduler re-runs.
    pub async fn refresh(&self) -> Result<()> {
        let current = self.state.read().current_page;
        self.load_page(current).await
    }

    /// Replace the filter criteria and reload from page 1; changing
    /// the criteria invalidates the old position.
    pub async fn apply_filters(&self, filters: LogFilters) -> Result<()> {
        // Reject malformed input before committing anything.
        if let Err(message) = filters.to_query() {
            self.notifier.error(&message);
            return Err(ConsoleError::Validation(message));
        }

        *self.filters.write() = filters;
        self.load_page(1).await
    }

    /// Clear every filter field and reload page 1.
    pub async fn reset_filters(&self) -> Result<()> {
        *self.filters.write() = LogFilters::default();
        self.load_page(1).await
    }

    /// Pagination strip: previous, one entry per page, next. The ends
    /// are disabled (non-actionable) at their respective boundaries.
    pub fn page_links(&self) -> Vec<PageLink> {
        let state = self.state.read();
        let total_pages = state.total_pages();
        let current = state.current_page;

        let mut links = Vec::with_capacity(total_pages as usize + 2);
        links.push(PageLink::Previous {
            target: current.saturating_sub(1).max(1),
            enabled: current > 1,
        });
        for page in 1..=total_pages {
            links.push(PageLink::Number {
                page,
                current: page == current,
            });
        }
        links.push(PageLink::Next {
            target: (current + 1).min(total_pages),
            enabled: current < total_pages,
        });
        links
    }

    /// Download the filtered logs as CSV bytes.
    pub async fn export(&self) -> Result<Vec<u8>> {
        let query = self.current_query()?;
        Ok(self.client.logs_export(&query).await?)
    }

    /// Purge the logs matching the current filters, after confirmation.
    /// Returns the deleted count, or `None` when the user declined.
    pub async fn clear(&self) -> Result<Option<u64>> {
        if !self.confirm.confirm("Delete the request logs matching the current filters?") {
            return Ok(None);
        }

        let query = self.current_query()?;
        let count = self.client.logs_clear(&query).await?;
        self.notifier
            .success(&format!("{} request logs deleted", count));

        if let Err(e) = self.load_page(1).await {
            debug!("Reload after log purge failed: {}", e);
        }
        Ok(Some(count))
    }

    /// Discard page-owned state.
    pub fn reset(&self) {
        *self.state.write() = PageState::default();
        *self.filters.write() = LogFilters::default();
        self.records.write().clear();
        self.renderers.write().clear();
    }

    fn render_now(&self) {
        let records = self.records.read().clone();
        let links = self.page_links();
        for renderer in self.renderers.read().iter() {
            renderer.render(&records, &links);
        }
    }

    fn current_query(&self) -> Result<LogQuery> {
        self.filters.read().to_query().map_err(|message| {
            self.notifier.error(&message);
            ConsoleError::Validation(message)
        })
    }
}
