//! Query orchestration: one cheapest-fuel request end to end.
//!
//! Composes the token manager, the cached feeds, the geocoder, and the
//! ranking engine. All state is injected; nothing here is a global.
//! Any failed step aborts the whole query with that step's error; a
//! query never returns partial results.

use std::sync::Arc;

use futures::future::try_join;

use crate::auth::{AuthError, TokenExchange, TokenManager};
use crate::cache::DataCache;
use crate::fuel::{FuelApiClient, FuelApiError};
use crate::geo::Coordinate;
use crate::postcode::{GeocodeError, PostcodeClient};
use crate::ranking::{Ranking, RankingConfig, rank};

/// Where a query wants results: a postcode, or a direct coordinate
/// pair. Direct coordinates take precedence when both are present.
#[derive(Debug, Clone, Default)]
pub struct LocationInput {
    pub postcode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// One cheapest-fuel request, after the web layer has applied defaults.
#[derive(Debug, Clone)]
pub struct CheapestRequest {
    pub location: LocationInput,
    pub fuel_type: String,
    pub radius_km: f64,
    pub limit: usize,
}

/// The answer to a cheapest-fuel request.
#[derive(Debug, Clone)]
pub struct CheapestOutcome {
    /// The resolved query origin.
    pub origin: Coordinate,

    /// Ranked results plus the untruncated match count.
    pub ranking: Ranking,
}

/// Errors from the orchestration path.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueryError {
    /// Neither a postcode nor a coordinate pair was supplied.
    #[error("no location provided: supply a postcode or a lat/lon pair")]
    MissingLocation,

    /// A coordinate pair was supplied but is not usable.
    #[error("invalid location: {message}")]
    InvalidLocation { message: String },

    /// The requested fuel label is outside the configured set.
    #[error("unknown fuel type: {label}")]
    UnknownFuel { label: String },

    /// Postcode resolution failed.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// Token acquisition failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Fetching a feed failed.
    #[error(transparent)]
    Fetch(#[from] FuelApiError),
}

// Cache waiters share one refresh failure behind an Arc; unwrap it by
// cloning so QueryError stays a plain value.
impl From<Arc<FuelApiError>> for QueryError {
    fn from(err: Arc<FuelApiError>) -> Self {
        QueryError::Fetch((*err).clone())
    }
}

/// Composes the pipeline behind the cheapest-fuel endpoint.
pub struct QueryEngine<C> {
    tokens: TokenManager<C>,
    api: FuelApiClient,
    cache: DataCache,
    geocoder: PostcodeClient,
    config: RankingConfig,
}

impl<C: TokenExchange> QueryEngine<C> {
    /// Create an engine from its collaborators.
    pub fn new(
        tokens: TokenManager<C>,
        api: FuelApiClient,
        cache: DataCache,
        geocoder: PostcodeClient,
        config: RankingConfig,
    ) -> Self {
        Self {
            tokens,
            api,
            cache,
            geocoder,
            config,
        }
    }

    /// The query configuration (defaults and fuel set).
    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Answer one cheapest-fuel request.
    pub async fn cheapest(&self, request: &CheapestRequest) -> Result<CheapestOutcome, QueryError> {
        // Local validation first: a bad request must not cost an
        // upstream call.
        if !self.config.is_known_fuel(&request.fuel_type) {
            return Err(QueryError::UnknownFuel {
                label: request.fuel_type.clone(),
            });
        }

        let origin = self.resolve_origin(&request.location).await?;

        let token = self.tokens.get_token().await?;

        // The two feeds are independent; fetch them concurrently and
        // rank only once both are in.
        let (stations, prices) = try_join(
            self.cache.stations(self.api.fetch_stations(&token)),
            self.cache.prices(self.api.fetch_prices(&token)),
        )
        .await?;

        let ranking = rank(
            &stations,
            &prices,
            &request.fuel_type,
            origin,
            request.radius_km,
            request.limit,
        );

        Ok(CheapestOutcome { origin, ranking })
    }

    /// Resolve the query origin. Direct coordinates win over a
    /// postcode; the geocoder is only consulted when no pair is given.
    async fn resolve_origin(&self, location: &LocationInput) -> Result<Coordinate, QueryError> {
        match (location.latitude, location.longitude) {
            (Some(lat), Some(lon)) => {
                return Coordinate::new(lat, lon).map_err(|e| QueryError::InvalidLocation {
                    message: e.to_string(),
                });
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(QueryError::InvalidLocation {
                    message: "lat and lon must be supplied together".to_string(),
                });
            }
            (None, None) => {}
        }

        match &location.postcode {
            Some(postcode) if !postcode.trim().is_empty() => {
                Ok(self.geocoder.resolve(postcode).await?)
            }
            _ => Err(QueryError::MissingLocation),
        }
    }
}
