//! Fuel-data API HTTP client.
//!
//! Fetches the station and price feeds page by page, authenticating
//! each request with a bearer token.

use serde::de::DeserializeOwned;

use crate::domain::{PriceRecord, Station};

use super::error::FuelApiError;
use super::pages::fetch_all_pages;
use super::types::{PriceDto, StationDto};

/// Default base URL for the fuel-data API.
const DEFAULT_BASE_URL: &str = "https://api.fuel-data.gov.uk/v1";

/// Resource path of the station-metadata feed.
const STATIONS_RESOURCE: &str = "stations";

/// Resource path of the price-snapshot feed.
const PRICES_RESOURCE: &str = "prices";

/// Maximum number of characters of an upstream error body to keep.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Configuration for the fuel-data client.
#[derive(Debug, Clone)]
pub struct FuelApiConfig {
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl FuelApiConfig {
    /// Create a config with the default production base URL.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 20,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FuelApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the fuel-data feeds.
#[derive(Debug, Clone)]
pub struct FuelApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl FuelApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: FuelApiConfig) -> Result<Self, FuelApiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FuelApiError::Http {
                resource: "client".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the full station-metadata feed.
    ///
    /// Records without an identifier or with non-finite coordinates are
    /// dropped here, before anything reaches the cache.
    pub async fn fetch_stations(&self, token: &str) -> Result<Vec<Station>, FuelApiError> {
        let dtos: Vec<StationDto> =
            fetch_all_pages(STATIONS_RESOURCE, |page| {
                self.fetch_page(STATIONS_RESOURCE, token, page)
            })
            .await?;

        Ok(dtos.into_iter().filter_map(StationDto::into_station).collect())
    }

    /// Fetch the full price-snapshot feed.
    pub async fn fetch_prices(&self, token: &str) -> Result<Vec<PriceRecord>, FuelApiError> {
        let dtos: Vec<PriceDto> = fetch_all_pages(PRICES_RESOURCE, |page| {
            self.fetch_page(PRICES_RESOURCE, token, page)
        })
        .await?;

        Ok(dtos.into_iter().filter_map(PriceDto::into_record).collect())
    }

    /// Fetch one page of a feed.
    ///
    /// A page is a JSON array; anything else is a malformed-page error
    /// carrying the truncated raw body for diagnostics.
    async fn fetch_page<T: DeserializeOwned>(
        &self,
        resource: &str,
        token: &str,
        page: u32,
    ) -> Result<Vec<T>, FuelApiError> {
        let url = format!("{}/{}", self.base_url, resource);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[("page", page.to_string())])
            .send()
            .await
            .map_err(|e| classify(resource, e))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FuelApiError::Api {
                resource: resource.to_string(),
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let body = response.text().await.map_err(|e| classify(resource, e))?;

        serde_json::from_str(&body).map_err(|e| FuelApiError::MalformedPage {
            resource: resource.to_string(),
            message: e.to_string(),
            body: truncate_body(&body),
        })
    }
}

fn classify(resource: &str, err: reqwest::Error) -> FuelApiError {
    if err.is_timeout() {
        FuelApiError::Timeout {
            resource: resource.to_string(),
        }
    } else {
        FuelApiError::Http {
            resource: resource.to_string(),
            message: err.to_string(),
        }
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
