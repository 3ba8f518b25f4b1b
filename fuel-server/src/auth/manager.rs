//! Access-token lifecycle.
//!
//! Tokens are short-lived; a safety margin is subtracted from the
//! reported lifetime so a token is refreshed before it can expire
//! mid-request. The credential slot lives behind a mutex held across
//! the exchange, so N racing callers trigger at most one refresh and
//! all observe its result.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use super::client::IssuedToken;
use super::error::AuthError;

/// Refresh this long before the reported expiry.
const DEFAULT_SAFETY_MARGIN: Duration = Duration::from_secs(30);

/// Floor applied to the reported token lifetime.
const DEFAULT_MIN_TTL: Duration = Duration::from_secs(60);

/// Capability to exchange client credentials for a bearer token.
///
/// The `Send` bound on the returned future keeps [`TokenManager`]
/// usable from multi-threaded request handlers.
pub trait TokenExchange: Send + Sync {
    fn exchange(&self) -> impl Future<Output = Result<IssuedToken, AuthError>> + Send;
}

/// A cached credential: the token plus the instant it becomes stale.
#[derive(Debug, Clone)]
struct Credential {
    token: String,
    expires_at: Instant,
}

/// Caches an upstream access token, refreshing it before expiry.
pub struct TokenManager<C> {
    exchanger: C,
    margin: Duration,
    min_ttl: Duration,
    current: Mutex<Option<Credential>>,
}

impl<C: TokenExchange> TokenManager<C> {
    /// Create a manager around the given exchanger.
    pub fn new(exchanger: C) -> Self {
        Self {
            exchanger,
            margin: DEFAULT_SAFETY_MARGIN,
            min_ttl: DEFAULT_MIN_TTL,
            current: Mutex::new(None),
        }
    }

    /// Set the safety margin subtracted from the reported expiry.
    pub fn with_margin(mut self, margin: Duration) -> Self {
        self.margin = margin;
        self
    }

    /// Set the floor applied to the reported token lifetime.
    pub fn with_min_ttl(mut self, min_ttl: Duration) -> Self {
        self.min_ttl = min_ttl;
        self
    }

    /// Return a token valid for at least the safety margin.
    ///
    /// The common path returns the cached token without any network
    /// call. On the refresh path the credential lock is held across the
    /// exchange; concurrent callers wait and then read the fresh token
    /// rather than issuing their own exchanges.
    pub async fn get_token(&self) -> Result<String, AuthError> {
        let mut current = self.current.lock().await;

        if let Some(cred) = current.as_ref()
            && Instant::now() < cred.expires_at
        {
            return Ok(cred.token.clone());
        }

        let issued = self.exchanger.exchange().await?;
        let ttl = Duration::from_secs(issued.expires_in).max(self.min_ttl);
        let expires_at = Instant::now() + ttl.saturating_sub(self.margin);

        tracing::debug!(ttl_secs = ttl.as_secs(), "refreshed upstream access token");

        let token = issued.access_token;
        *current = Some(Credential {
            token: token.clone(),
            expires_at,
        });

        Ok(token)
    }
}
