// User notification seam

/// Receiver for user-visible console notifications.
///
/// The request client calls this exactly once per failed call; higher
/// layers must not re-report a failure they received as an `Err`.
pub trait Notifier: Send + Sync + 'static {
    /// An operation completed and the user should know.
    fn success(&self, message: &str);

    /// An operation failed and the user should know.
    fn error(&self, message: &str);

    /// The session credential is missing or was rejected; the login flow
    /// should be opened.
    fn auth_required(&self);
}

/// Default notifier that routes everything to the tracing subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }

    fn auth_required(&self) {
        tracing::warn!("authentication required");
    }
}
