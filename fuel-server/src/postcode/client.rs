//! Geocoding service HTTP client.

use serde::Deserialize;

use crate::geo::Coordinate;

use super::error::GeocodeError;

/// Default base URL for the geocoding service.
const DEFAULT_BASE_URL: &str = "https://api.postcodes.io";

/// Response envelope from the geocoding service.
///
/// The service reports its own status code inside the body in addition
/// to the HTTP status; both must say 200 for a usable result.
#[derive(Debug, Clone, Deserialize)]
struct PostcodeResponse {
    status: u16,
    result: Option<PostcodeResult>,
}

#[derive(Debug, Clone, Deserialize)]
struct PostcodeResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct PostcodeClientConfig {
    /// Base URL for the service.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl PostcodeClientConfig {
    /// Create a config with the default public base URL.
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

impl Default for PostcodeClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the geocoding service.
#[derive(Debug, Clone)]
pub struct PostcodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl PostcodeClient {
    /// Create a new geocoding client.
    pub fn new(config: PostcodeClientConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodeError::Http {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Resolve a postcode to a coordinate.
    ///
    /// The input is trimmed; the `url` crate percent-encodes it as a
    /// path segment, so spaces in postcodes are handled.
    pub async fn resolve(&self, postcode: &str) -> Result<Coordinate, GeocodeError> {
        let trimmed = postcode.trim();
        if trimmed.is_empty() {
            return Err(GeocodeError::Empty);
        }

        let mut url =
            reqwest::Url::parse(&self.base_url).map_err(|e| GeocodeError::Http {
                message: e.to_string(),
            })?;
        url.path_segments_mut()
            .map_err(|_| GeocodeError::Http {
                message: format!("cannot build lookup path from {}", self.base_url),
            })?
            .push("postcodes")
            .push(trimmed);

        let response = self.http.get(url).send().await.map_err(classify)?;
        let http_status = response.status();
        let body = response.text().await.map_err(classify)?;

        // Unknown postcodes come back as 404 with a regular envelope;
        // anything else non-2xx is a service failure.
        if !http_status.is_success() && http_status != reqwest::StatusCode::NOT_FOUND {
            return Err(GeocodeError::Http {
                message: format!("geocoder returned HTTP {}", http_status.as_u16()),
            });
        }

        coordinate_from_body(&body, trimmed)
    }
}

/// Extract a validated coordinate from a response body.
fn coordinate_from_body(body: &str, postcode: &str) -> Result<Coordinate, GeocodeError> {
    let parsed: PostcodeResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::BadResult {
            message: e.to_string(),
        })?;

    if parsed.status != 200 {
        return Err(GeocodeError::NotFound {
            postcode: postcode.to_string(),
        });
    }

    let result = parsed.result.ok_or_else(|| GeocodeError::BadResult {
        message: "response missing result".to_string(),
    })?;

    let (Some(latitude), Some(longitude)) = (result.latitude, result.longitude) else {
        return Err(GeocodeError::BadResult {
            message: "result missing latitude/longitude".to_string(),
        });
    };

    Coordinate::new(latitude, longitude).map_err(|e| GeocodeError::BadResult {
        message: e.to_string(),
    })
}

fn classify(err: reqwest::Error) -> GeocodeError {
    if err.is_timeout() {
        GeocodeError::Timeout
    } else {
        GeocodeError::Http {
            message: err.to_string(),
        }
    }
}
