// Periodic view refresh scheduling

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Owner of the single periodic-refresh task for the active page.
///
/// `start` aborts any previous schedule before installing the new one,
/// so at most one interval ever runs. A failed tick is logged and the
/// schedule keeps going; only `stop` (or dropping the scheduler) ends
/// it. The router stops the scheduler unconditionally before every
/// navigation.
#[derive(Default)]
pub struct PollScheduler {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl PollScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin polling. The tick closure re-runs the same fetch path as
    /// the page's initial load; its failures were already surfaced by
    /// the request client and never cancel future ticks.
    pub fn start<F, Fut, E>(&self, interval: Duration, tick: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
        E: std::fmt::Display + 'static,
    {
        if self.is_running() {
            debug!("Replacing active poll schedule");
        }
        self.stop();

        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            // The first tick of a tokio interval fires immediately; the
            // page just loaded, so skip it.
            timer.tick().await;
            loop {
                timer.tick().await;
                if let Err(e) = tick().await {
                    warn!("Scheduled refresh failed: {}", e);
                }
            }
        });
        *self.handle.lock() = Some(handle);
    }

    /// Cancel the active schedule, if any.
    pub fn stop(&self) {
        if let Some(handle) = self.handle.lock().take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.lock().is_some()
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
