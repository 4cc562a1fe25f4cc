//! REST gateways for the external entity API.
//!
//! One gateway per entity family, all sharing the same transport plumbing:
//! requests are built against a configured origin, non-success statuses are
//! normalized into a detail string with the response body attached, and
//! every outcome that concerns the user is reported on the notification
//! channel before the error is propagated.

use std::sync::Arc;
use std::time::Duration;

use ledgerdesk_application::{Notice, Notifier};
use ledgerdesk_core::{AppError, AppResult};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use url::Url;

mod clients;
mod services;
mod tax_calendar;

pub use clients::RestClientsGateway;
pub use services::RestServicesGateway;
pub use tax_calendar::RestTaxCalendarGateway;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection settings shared by the REST gateways.
#[derive(Debug, Clone)]
pub struct RestGatewayConfig {
    /// Origin of the external entity API.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RestGatewayConfig {
    /// Creates a config with the default timeout.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Shared HTTP plumbing for the family gateways.
#[derive(Clone)]
struct RestTransport {
    http: reqwest::Client,
    base: String,
    notifier: Arc<dyn Notifier>,
}

impl RestTransport {
    fn new(config: &RestGatewayConfig, notifier: Arc<dyn Notifier>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Ok(Self {
            http,
            base: config.base_url.as_str().trim_end_matches('/').to_owned(),
            notifier,
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(format!("{}{path}", self.base))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(format!("{}{path}", self.base))
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(format!("{}{path}", self.base))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(format!("{}{path}", self.base))
    }

    /// Sends the request and normalizes transport failures and non-success
    /// statuses into a detail string.
    async fn expect_success(&self, request: RequestBuilder) -> Result<reqwest::Response, String> {
        let response = request
            .send()
            .await
            .map_err(|error| format!("request failed: {error}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_owned());
            return Err(format!("status {}: {body}", status.as_u16()));
        }

        Ok(response)
    }

    async fn read_json<T>(&self, request: RequestBuilder) -> Result<T, String>
    where
        T: DeserializeOwned,
    {
        let response = self.expect_success(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|error| format!("failed to decode response body: {error}"))
    }

    fn report_success(&self, message: String) {
        self.notifier.notify(Notice::success(message));
    }

    /// Emits the user-facing failure notice, then hands the error back for
    /// propagation.
    fn report_failure(&self, message: String, error: AppError) -> AppError {
        self.notifier.notify(Notice::error(message));
        error
    }
}
