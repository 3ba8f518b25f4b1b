//! Fuel-data client error types.

use std::fmt;

/// Errors from the fuel-data HTTP client.
///
/// Carries only owned strings so that errors can be cloned out of the
/// cache layer, which shares one refresh failure among all waiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FuelApiError {
    /// HTTP transport failed (connection refused, DNS, ...)
    Http { resource: String, message: String },

    /// The request exceeded its timeout
    Timeout { resource: String },

    /// The API returned an error status code
    Api {
        resource: String,
        status: u16,
        body: String,
    },

    /// A page body was not a JSON array of records
    MalformedPage {
        resource: String,
        message: String,
        body: String,
    },
}

impl FuelApiError {
    /// The resource (feed) the failing request was for.
    pub fn resource(&self) -> &str {
        match self {
            FuelApiError::Http { resource, .. }
            | FuelApiError::Timeout { resource }
            | FuelApiError::Api { resource, .. }
            | FuelApiError::MalformedPage { resource, .. } => resource,
        }
    }
}

impl fmt::Display for FuelApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelApiError::Http { resource, message } => {
                write!(f, "HTTP error fetching {resource}: {message}")
            }
            FuelApiError::Timeout { resource } => {
                write!(f, "timed out fetching {resource}")
            }
            FuelApiError::Api {
                resource,
                status,
                body,
            } => {
                write!(f, "API error {status} fetching {resource}: {body}")
            }
            FuelApiError::MalformedPage {
                resource, message, ..
            } => {
                write!(f, "malformed page from {resource}: {message}")
            }
        }
    }
}

impl std::error::Error for FuelApiError {}
