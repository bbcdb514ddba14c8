// Presentation seams for the console

use crate::router::Page;

/// Surface the router splices page content into.
///
/// The loading indicator is driven through here as well; the router
/// guarantees `hide_loading` runs on every navigation exit path.
pub trait ContentSink: Send + Sync + 'static {
    fn show_loading(&self);
    fn hide_loading(&self);

    /// Splice in the content shell for a page.
    fn set_content(&self, page: Page);

    /// Replace the content area with an inline error.
    fn set_error(&self, message: &str);

    /// Highlight the navigation entry for the active page.
    fn set_active_nav(&self, page: Page);

    /// Clear the content area entirely (logout).
    fn clear_content(&self);
}

/// Explicit user confirmation step for destructive operations.
pub trait ConfirmPrompt: Send + Sync + 'static {
    /// Returns true when the user confirmed the described operation.
    fn confirm(&self, prompt: &str) -> bool;
}

/// A prompt that always confirms. For tests and headless tooling.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// A prompt that always declines.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverConfirm;

impl ConfirmPrompt for NeverConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}
