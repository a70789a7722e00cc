//! Discovery API HTTP client.
//!
//! Fetches restaurants for a postcode and converts them into summaries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::models::RestaurantSummary;
use crate::validation::NormalizedPostcode;

use super::convert::summarize;
use super::error::UpstreamError;
use super::types::{DiscoveryResponse, ErrorPayload};
use super::RestaurantSource;

/// Default base URL for the discovery API.
pub const DEFAULT_BASE_URL: &str = "https://uk.api.just-eat.io";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the discovery client.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Scheme and host, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DiscoveryConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Discovery API client.
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DiscoveryClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DiscoveryConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// URL of the by-postcode listing for a postcode.
    pub fn url_for(&self, postcode: &NormalizedPostcode) -> String {
        format!(
            "{}/discovery/uk/restaurants/enriched/bypostcode/{}",
            self.base_url,
            postcode.as_str()
        )
    }

    /// Fetch up to ten restaurants delivering to a postcode.
    pub async fn fetch(
        &self,
        postcode: &NormalizedPostcode,
    ) -> Result<Vec<RestaurantSummary>, UpstreamError> {
        let url = self.url_for(postcode);
        debug!(%url, "Requesting restaurants from discovery API");

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!(postcode = %postcode, error = %e, "Discovery request failed");
            UpstreamError::from_transport(&e)
        })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            warn!(postcode = %postcode, status = status.as_u16(), %message, "Discovery API returned an error");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::from_transport(&e))?;

        let parsed: DiscoveryResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(postcode = %postcode, error = %e, "Discovery response did not parse");
            UpstreamError::Decode(e.to_string())
        })?;

        let total = parsed.restaurants.len();
        let summaries = summarize(parsed);
        debug!(postcode = %postcode, total, kept = summaries.len(), "Discovery response converted");

        Ok(summaries)
    }
}

#[async_trait]
impl RestaurantSource for DiscoveryClient {
    async fn fetch_by_postcode(
        &self,
        postcode: &NormalizedPostcode,
    ) -> Result<Vec<RestaurantSummary>, UpstreamError> {
        self.fetch(postcode).await
    }
}

/// Best available message for a failed response.
///
/// Prefers a JSON `{"message": ...}` body, then the raw body text, then the
/// status line.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        return payload.message;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status.to_string()
}
