// Error types for the console orchestration layer

use aceproxy_client::GatewayError;

/// Failures raised by the console layer itself, plus the classified
/// gateway failures passed through from the request client.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Caught client-side before dispatch; the request was never sent.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("no handler registered for action '{0}'")]
    UnknownAction(String),

    #[error("action '{0}' is already registered")]
    DuplicateAction(String),

    #[error("no controller registered for page '{0}'")]
    UnknownPage(String),

    #[error("authentication required")]
    AuthRequired,
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
