// Single-page router with lazy page initialization

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use aceproxy_client::CredentialStore;
use aceproxy_client::notify::Notifier;

use crate::error::{ConsoleError, Result};
use crate::poller::PollScheduler;
use crate::view::ContentSink;

/// Logical pages of the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    ApiConfig,
    RequestLogs,
    Statistics,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Dashboard,
        Page::ApiConfig,
        Page::RequestLogs,
        Page::Statistics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::ApiConfig => "api-config",
            Page::RequestLogs => "request-logs",
            Page::Statistics => "statistics",
        }
    }

    pub fn from_name(name: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.as_str() == name)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-page initialization routine.
///
/// `init` pulls the page's data through the request client and starts
/// its polling schedule, if any. `teardown` discards the page-owned
/// state; the page is recreated fresh on the next visit.
#[async_trait]
pub trait PageController: Send + Sync + 'static {
    async fn init(&self) -> Result<()>;

    fn teardown(&self) {}
}

/// Shows the loading indicator on creation and guarantees it is hidden
/// again on every exit path, success or error.
struct LoadingGuard {
    sink: Arc<dyn ContentSink>,
}

impl LoadingGuard {
    fn new(sink: Arc<dyn ContentSink>) -> Self {
        sink.show_loading();
        Self { sink }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.sink.hide_loading();
    }
}

/// Maps page names to their content and init routines, gating every
/// navigation on authentication.
pub struct Router {
    credentials: Arc<CredentialStore>,
    notifier: Arc<dyn Notifier>,
    sink: Arc<dyn ContentSink>,
    poller: Arc<PollScheduler>,
    controllers: RwLock<HashMap<Page, Arc<dyn PageController>>>,
    current: RwLock<Option<Page>>,
    generation: AtomicU64,
}

impl Router {
    pub fn new(
        credentials: Arc<CredentialStore>,
        notifier: Arc<dyn Notifier>,
        sink: Arc<dyn ContentSink>,
        poller: Arc<PollScheduler>,
    ) -> Self {
        Self {
            credentials,
            notifier,
            sink,
            poller,
            controllers: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn register(&self, page: Page, controller: Arc<dyn PageController>) {
        self.controllers.write().insert(page, controller);
    }

    /// The polling scheduler owned by the active page context.
    pub fn poller(&self) -> Arc<PollScheduler> {
        self.poller.clone()
    }

    pub fn current(&self) -> Option<Page> {
        *self.current.read()
    }

    /// Active-navigation highlighting is a pure function of the current
    /// page name.
    pub fn is_active(&self, page: Page) -> bool {
        self.current() == Some(page)
    }

    /// Navigate to a page.
    ///
    /// Without a credential nothing is loaded: the login flow is opened
    /// and the navigation aborts. Otherwise, in order: loading on, stop
    /// the active poll schedule, discard the previous page's state,
    /// splice content, run the page's init routine. Failures render an
    /// inline error; the loading indicator is released on every path.
    pub async fn navigate(&self, page: Page) -> Result<()> {
        if !self.credentials.is_authenticated() {
            self.notifier.auth_required();
            return Err(ConsoleError::AuthRequired);
        }

        let controller = self
            .controllers
            .read()
            .get(&page)
            .cloned()
            .ok_or_else(|| ConsoleError::UnknownPage(page.as_str().to_string()))?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _loading = LoadingGuard::new(self.sink.clone());

        self.poller.stop();

        if let Some(previous) = self.current.write().replace(page) {
            let previous_controller = self.controllers.read().get(&previous).cloned();
            if let Some(previous_controller) = previous_controller {
                previous_controller.teardown();
            }
        }

        self.sink.set_active_nav(page);
        self.sink.set_content(page);

        match controller.init().await {
            Ok(()) => Ok(()),
            Err(e) => {
                // A newer navigation may already own the content area;
                // only the current navigation paints its failure.
                if self.generation.load(Ordering::SeqCst) == generation {
                    self.sink.set_error(&format!("failed to load {}: {}", page, e));
                } else {
                    debug!("Discarding stale navigation failure for {}", page);
                }
                Err(e)
            }
        }
    }
}
