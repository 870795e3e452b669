//! Backend API client implementation.
//!
//! The base URL is injected by the caller; there is no global client.
//! Reads retry transient failures, writes are sent exactly once.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::error::{ApiError, Result};
use super::types::{Activity, ActivityUpdate, PaidUpdate};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of attempts for reads.
const MAX_RETRIES: u32 = 3;

/// Base delay between retries in milliseconds.
const RETRY_DELAY_MS: u64 = 1000;

/// Client for the client-activity endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The HTTP client.
    client: Client,
    /// Base URL without trailing slash.
    base_url: String,
    /// Base retry delay for reads.
    retry_delay: Duration,
}

impl ApiClient {
    /// Create a client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL has no http(s) scheme or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;

        let base_url = normalize_base_url(base_url);
        info!(base_url = %base_url, "API client created");

        Ok(Self {
            client,
            base_url,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
        })
    }

    /// Override the base retry delay.
    #[cfg(test)]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all activities.
    ///
    /// Calls `GET /client-activity`.
    #[instrument(skip(self))]
    pub async fn list_activities(&self) -> Result<Vec<Activity>> {
        let url = format!("{}/client-activity", self.base_url);
        let activities: Vec<Activity> = self.get(&url).await?;
        debug!("Fetched {} activities", activities.len());
        Ok(activities)
    }

    /// Set the paid flag of an activity.
    ///
    /// Calls `PUT /client-activity/update/{id}` with `{"paid": bool}`.
    #[instrument(skip(self), fields(activity_id = %id))]
    pub async fn update_paid(&self, id: &str, paid: bool) -> Result<()> {
        debug!(paid, "Updating paid flag");
        self.put(&self.update_url(id), &PaidUpdate { paid }).await
    }

    /// Persist edited ticket fields.
    ///
    /// Calls `PUT /client-activity/update/{id}` with the touched fields.
    #[instrument(skip(self, update), fields(activity_id = %id))]
    pub async fn update_activity(&self, id: &str, update: &ActivityUpdate) -> Result<()> {
        if update.is_empty() {
            debug!("Nothing to update");
            return Ok(());
        }
        self.put(&self.update_url(id), update).await
    }

    fn update_url(&self, id: &str) -> String {
        format!(
            "{}/client-activity/update/{}",
            self.base_url,
            urlencoding::encode(id)
        )
    }

    /// Perform a GET request, retrying transient failures.
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!("Request attempt {}/{}", attempts, MAX_RETRIES);

            match self.execute_get::<T>(url).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && attempts < MAX_RETRIES => {
                    let delay = self.retry_delay_for(attempts);
                    warn!(
                        "Request failed (attempt {}), retrying in {}ms: {}",
                        attempts,
                        delay.as_millis(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn execute_get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    /// Perform a single PUT request. Any 2xx status is success; the body is
    /// not inspected.
    async fn put<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<()> {
        let response = self
            .client
            .put(url)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Exponential backoff delay for the given attempt (1-based).
    fn retry_delay_for(&self, attempt: u32) -> Duration {
        self.retry_delay * 2u32.pow(attempt - 1)
    }
}

/// Turn a non-success response into an error.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    debug!("Error response body: {}", body);
    Err(error_from_response(status, &url, &body))
}

/// Build an error from a failed response, preferring the backend's message.
fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "error"]
                .iter()
                .find_map(|key| json.get(*key).and_then(|v| v.as_str()).map(String::from))
        });

    match message {
        Some(msg) if !msg.is_empty() => ApiError::from_status(status, &msg),
        _ => ApiError::from_status(status, url),
    }
}

/// Remove trailing slashes and warn about plain HTTP.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}
