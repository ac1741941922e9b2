use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use park_availability::AvailabilityEntry;
use reqwest::Client;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://disneyworld.disney.go.com";
const CALENDAR_PATH: &str = "/availability-calendar/api/calendar";

/// Errors raised while talking to the availability calendar API
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// HTTP client could not be built
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Rate limited by the API
    #[error("Rate limited by availability API")]
    RateLimited,

    /// Endpoint not found
    #[error("Availability endpoint not found")]
    NotFound,

    /// Any other unsuccessful status
    #[error("HTTP {0}")]
    Http(reqwest::StatusCode),

    /// Response was a list but its items are not availability entries
    #[error("Data format error: {0}")]
    DataFormat(String),
}

/// Anything that can report availability for a date range
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    /// Fetch availability for `start_date..=end_date` (both `YYYY-MM-DD`).
    ///
    /// Returns `Ok(None)` when the response is not a list of entries.
    async fn fetch(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Option<Vec<AvailabilityEntry>>, ApiError>;
}

/// Client for the availability calendar API
pub struct AvailabilityClient {
    client: Client,
    base_url: String,
}

impl AvailabilityClient {
    /// Create a client for the public calendar API
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against another host, e.g. a local test server
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the decoded JSON body for a date range without checking its shape
    pub async fn fetch_raw(&self, start_date: &str, end_date: &str) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, CALENDAR_PATH);
        let params = [
            ("segment", "tickets"),
            ("startDate", start_date),
            ("endDate", end_date),
        ];

        debug!(
            "Fetching availability from {} to {} ({})",
            start_date, end_date, url
        );

        let response = self.client.get(&url).query(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("Availability request failed with status {}", status);

            return Err(match status.as_u16() {
                429 => ApiError::RateLimited,
                404 => ApiError::NotFound,
                _ => ApiError::Http(status),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl AvailabilitySource for AvailabilityClient {
    async fn fetch(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Option<Vec<AvailabilityEntry>>, ApiError> {
        let body = self.fetch_raw(start_date, end_date).await?;
        parse_entries(body)
    }
}

/// Decode a calendar response body.
///
/// Anything other than a JSON array yields `Ok(None)`.
pub fn parse_entries(body: Value) -> Result<Option<Vec<AvailabilityEntry>>, ApiError> {
    if !body.is_array() {
        warn!("Availability response is not a list, nothing to process");
        return Ok(None);
    }

    let entries: Vec<AvailabilityEntry> = serde_json::from_value(body)
        .map_err(|e| ApiError::DataFormat(format!("Failed to parse availability: {}", e)))?;

    debug!("Received availability for {} dates", entries.len());

    Ok(Some(entries))
}
