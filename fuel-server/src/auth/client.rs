//! Token endpoint HTTP client.
//!
//! Performs the OAuth2 client-credentials exchange against the
//! provider's token endpoint.

use serde::Deserialize;

use super::error::AuthError;
use super::manager::TokenExchange;

/// Default token endpoint for the fuel-data provider.
const DEFAULT_TOKEN_URL: &str = "https://auth.fuel-data.gov.uk/oauth/token";

/// Maximum number of characters of an upstream error body to keep.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Configuration for the token client.
#[derive(Debug, Clone)]
pub struct TokenClientConfig {
    /// OAuth2 client identifier.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
    /// Token endpoint URL.
    pub token_url: String,
    /// Optional scope to request.
    pub scope: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl TokenClientConfig {
    /// Create a new config with the given credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            scope: None,
            timeout_secs: 20,
        }
    }

    /// Set a custom token endpoint (for testing or staging).
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Request a scope with the grant.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// A token as issued by the endpoint.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Opaque bearer token.
    pub access_token: String,
    /// Lifetime in seconds, as reported by the endpoint.
    pub expires_in: u64,
}

/// Successful token endpoint response body.
///
/// Fields are optional so that a 2xx response missing the token can be
/// reported as an exchange failure rather than a decode failure.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

/// HTTP client for the token endpoint.
#[derive(Debug, Clone)]
pub struct TokenClient {
    http: reqwest::Client,
    config: TokenClientConfig,
}

impl TokenClient {
    /// Create a new token client.
    ///
    /// Fails with [`AuthError::MissingCredentials`] if the client id or
    /// secret is empty; callers should treat that as fatal at startup.
    pub fn new(config: TokenClientConfig) -> Result<Self, AuthError> {
        if config.client_id.trim().is_empty() || config.client_secret.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AuthError::Http {
                message: e.to_string(),
            })?;

        Ok(Self { http, config })
    }
}

impl TokenExchange for TokenClient {
    async fn exchange(&self) -> Result<IssuedToken, AuthError> {
        let mut form: Vec<(&str, &str)> = vec![
            ("grant_type", "client_credentials"),
            ("client_id", &self.config.client_id),
            ("client_secret", &self.config.client_secret),
        ];
        if let Some(scope) = &self.config.scope {
            form.push(("scope", scope));
        }

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.text().await.map_err(classify)?;

        if !status.is_success() {
            return Err(AuthError::Exchange {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        // A 2xx body without a token field is still an exchange failure;
        // carry the truncated body for diagnostics.
        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|_| AuthError::Exchange {
            status: status.as_u16(),
            body: truncate_body(&body),
        })?;

        let access_token = parsed
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::Exchange {
                status: status.as_u16(),
                body: "response missing access_token".to_string(),
            })?;

        Ok(IssuedToken {
            access_token,
            expires_in: parsed.expires_in.unwrap_or(0),
        })
    }
}

fn classify(err: reqwest::Error) -> AuthError {
    if err.is_timeout() {
        AuthError::Timeout
    } else {
        AuthError::Http {
            message: err.to_string(),
        }
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
