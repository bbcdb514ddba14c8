// aceproxy-client: Admin HTTP client for the aceproxy gateway

pub mod api;
pub mod config;
pub mod constants;
pub mod credential;
pub mod error;
pub mod http;
pub mod model;
pub mod notify;

pub use api::GatewayAdminClient;
pub use config::ConsoleClientConfig;
pub use credential::CredentialStore;
pub use error::{GatewayError, Result};
pub use http::GatewayHttpClient;
pub use notify::{Notifier, TracingNotifier};
