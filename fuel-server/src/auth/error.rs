//! Token exchange error types.

/// Errors that can occur when obtaining an upstream access token.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// Client credentials were not configured.
    ///
    /// Fatal at startup: the server refuses to start rather than fail
    /// every request.
    #[error("client credentials not configured: set FUEL_CLIENT_ID and FUEL_CLIENT_SECRET")]
    MissingCredentials,

    /// The token request exceeded its timeout.
    #[error("token request timed out")]
    Timeout,

    /// HTTP transport failed (connection refused, DNS, ...).
    #[error("token request failed: {message}")]
    Http { message: String },

    /// The token endpoint rejected the exchange, or its response did
    /// not carry a usable token. The body is truncated and never
    /// contains our own secret.
    #[error("token endpoint error {status}: {body}")]
    Exchange { status: u16, body: String },
}
