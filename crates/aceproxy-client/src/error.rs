// Error types for the gateway admin client

/// Classified failures for gateway admin requests.
///
/// Every variant except `Serialization`/`Other` maps to one branch of the
/// console's failure handling: 401 invalidates the session credential, 403
/// is surfaced without touching it, other non-2xx statuses carry the
/// server's own message, and transport failures never saw a response.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("authentication required: {0}")]
    Unauthorized(String),

    #[error("permission denied: {0}")]
    Forbidden(String),

    #[error("request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    /// True when the failure invalidated the stored credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized(_))
    }
}
