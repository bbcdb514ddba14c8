// Operator session: login and logout flows

use std::sync::Arc;

use tracing::info;

use aceproxy_client::notify::Notifier;
use aceproxy_client::{CredentialStore, GatewayAdminClient, GatewayError};

use crate::error::{ConsoleError, Result};
use crate::router::{Page, Router};
use crate::view::ContentSink;

/// Login/logout orchestration.
///
/// A candidate token is validated against the gateway before it is
/// stored: only a token the gateway accepts becomes the session
/// credential. The probe itself is silent; this flow owns its own
/// messaging.
pub struct Session {
    client: Arc<GatewayAdminClient>,
    credentials: Arc<CredentialStore>,
    notifier: Arc<dyn Notifier>,
    sink: Arc<dyn ContentSink>,
    router: Arc<Router>,
}

impl Session {
    pub fn new(
        client: Arc<GatewayAdminClient>,
        router: Arc<Router>,
        sink: Arc<dyn ContentSink>,
    ) -> Self {
        let credentials = client.credentials();
        let notifier = client.notifier();
        Self {
            client,
            credentials,
            notifier,
            sink,
            router,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated()
    }

    /// Validate and store a token, then enter the console on the API
    /// config page. A rejected token is never stored.
    pub async fn login(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            self.notifier.error("enter an access token");
            return Err(ConsoleError::Validation(
                "access token must not be empty".to_string(),
            ));
        }

        let status = self.client.validate_token(token).await.map_err(|e| {
            self.notifier
                .error("could not reach the gateway to validate the token");
            ConsoleError::from(e)
        })?;

        match status {
            401 => {
                self.notifier
                    .error("access token rejected, check it and retry");
                Err(ConsoleError::AuthRequired)
            }
            200..=299 => {
                self.credentials.set(token);
                info!("Operator signed in");
                self.notifier.success("signed in");
                self.router.navigate(Page::ApiConfig).await
            }
            status => {
                let message = format!("token validation failed with status {}", status);
                self.notifier.error(&message);
                Err(GatewayError::Http { status, message }.into())
            }
        }
    }

    /// Drop the credential, stop polling, clear the content area and
    /// reopen the login prompt.
    pub fn logout(&self) {
        self.router.poller().stop();
        self.credentials.clear();
        self.sink.clear_content();
        info!("Operator signed out");
        self.notifier.auth_required();
    }
}
