//! Geocoding error types.

/// Errors that can occur when resolving a postcode.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeocodeError {
    /// The postcode was empty after trimming.
    #[error("postcode must not be empty")]
    Empty,

    /// The geocoding service did not recognise the postcode.
    #[error("unknown postcode: {postcode}")]
    NotFound { postcode: String },

    /// The service answered, but without a usable coordinate pair.
    #[error("geocoder returned an unusable result: {message}")]
    BadResult { message: String },

    /// The lookup exceeded its timeout.
    #[error("postcode lookup timed out")]
    Timeout,

    /// HTTP transport failed (connection refused, DNS, ...).
    #[error("postcode lookup failed: {message}")]
    Http { message: String },
}
