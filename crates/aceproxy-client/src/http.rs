//! HTTP client for the gateway admin API
//!
//! Attaches the session credential to every call, classifies failures
//! uniformly, and owns the one-notification-per-failed-call duty. There
//! are no automatic retries: a failed call returns control to the caller,
//! which decides whether to re-issue.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::config::ConsoleClientConfig;
use crate::credential::CredentialStore;
use crate::error::{GatewayError, Result};
use crate::model::Envelope;
use crate::notify::Notifier;

/// HTTP client with credential attachment and failure classification.
pub struct GatewayHttpClient {
    client: Client,
    config: ConsoleClientConfig,
    credentials: Arc<CredentialStore>,
    notifier: Arc<dyn Notifier>,
}

impl GatewayHttpClient {
    pub fn new(
        config: ConsoleClientConfig,
        credentials: Arc<CredentialStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .build()
            .map_err(|e| GatewayError::Other(e.into()))?;

        Ok(Self {
            client,
            config,
            credentials,
            notifier,
        })
    }

    /// The credential store this client attaches from.
    pub fn credentials(&self) -> Arc<CredentialStore> {
        self.credentials.clone()
    }

    /// The notification sink this client reports failures to.
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }

    /// Build full URL with context path.
    fn build_url(&self, path: &str) -> String {
        let base_url = &self.config.server_addr;
        let context_path = &self.config.context_path;

        if context_path.is_empty() {
            format!("{}{}", base_url, path)
        } else {
            format!(
                "{}/{}{}",
                base_url,
                context_path.trim_start_matches('/'),
                path
            )
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.get() {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.client.get(self.build_url(path));
        self.execute(request).await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let request = self.client.get(self.build_url(path)).query(query);
        self.execute(request).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.client.post(self.build_url(path)).json(body);
        self.execute(request).await
    }

    /// Make a POST request with query parameters (no body).
    pub async fn post_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let request = self.client.post(self.build_url(path)).query(query);
        self.execute(request).await
    }

    /// Make a PUT request with a JSON body.
    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.client.put(self.build_url(path)).json(body);
        self.execute(request).await
    }

    /// Make a DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.client.delete(self.build_url(path));
        self.execute(request).await
    }

    /// Make a GET request and return the raw body bytes (file downloads).
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let request = self.client.get(self.build_url(path));
        let response = self.send(request).await?;
        let response = self.ensure_success(response).await?;

        match response.bytes().await {
            Ok(bytes) => Ok(bytes.to_vec()),
            Err(e) => {
                let message = format!("download interrupted: {}", e);
                self.notifier.error(&message);
                Err(GatewayError::Network(message))
            }
        }
    }

    /// Probe a path with an explicit candidate token.
    ///
    /// Used only by the login flow to validate a token before storing it.
    /// Returns the raw status; never notifies and never touches the
    /// credential store.
    pub async fn probe(&self, path: &str, token: &str) -> Result<u16> {
        let response = self
            .client
            .get(self.build_url(path))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(response.status().as_u16())
    }

    /// Unwrap an application envelope whose data must be present.
    pub fn accept<T>(&self, envelope: Envelope<T>) -> Result<T> {
        if !envelope.is_success() {
            let message = envelope.failure_message();
            self.notifier.error(&message);
            return Err(GatewayError::Http {
                status: 200,
                message,
            });
        }

        envelope.into_data().ok_or_else(|| {
            let message = "response envelope missing data".to_string();
            self.notifier.error(&message);
            GatewayError::Http {
                status: 200,
                message,
            }
        })
    }

    /// Unwrap an application envelope whose data may be absent, falling
    /// back to the default value (collections render empty, not broken).
    pub fn accept_or_default<T: Default>(&self, envelope: Envelope<T>) -> Result<T> {
        if !envelope.is_success() {
            let message = envelope.failure_message();
            self.notifier.error(&message);
            return Err(GatewayError::Http {
                status: 200,
                message,
            });
        }

        Ok(envelope.into_data().unwrap_or_default())
    }

    /// Check an application envelope for success only, discarding data.
    pub fn accept_ok<T>(&self, envelope: Envelope<T>) -> Result<()> {
        if !envelope.is_success() {
            let message = envelope.failure_message();
            self.notifier.error(&message);
            return Err(GatewayError::Http {
                status: 200,
                message,
            });
        }
        Ok(())
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let response = self.ensure_success(response).await?;
        let status = response.status();

        match response.json::<T>().await {
            Ok(value) => Ok(value),
            Err(e) => {
                let message = format!("invalid response body: {}", e);
                self.notifier.error(&message);
                Err(GatewayError::Http {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        match self.authorize(request).send().await {
            Ok(response) => {
                debug!("Gateway responded with status {}", response.status());
                Ok(response)
            }
            Err(e) => {
                warn!("Request failed: {}", e);
                self.notifier
                    .error("network request failed, check the gateway connection");
                Err(GatewayError::Network(e.to_string()))
            }
        }
    }

    /// Classify a non-2xx response; 2xx passes through untouched.
    async fn ensure_success(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(status, &body);
            self.credentials.clear();
            self.notifier
                .error("session credential rejected, sign in again");
            self.notifier.auth_required();
            return Err(GatewayError::Unauthorized(message));
        }

        if status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(status, &body);
            self.notifier.error("permission denied for this operation");
            return Err(GatewayError::Forbidden(message));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(status, &body);
            self.notifier.error(&message);
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

/// Best failure message for a non-2xx body: the structured `error` /
/// `message` / `msg` field when the body parses as JSON, else the raw
/// body text, else a generic status message.
fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message", "msg"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str())
                && !message.is_empty()
            {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    format!("request failed with status {}", status.as_u16())
}
