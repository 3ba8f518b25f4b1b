//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::auth::AuthError;
use crate::fuel::FuelApiError;
use crate::postcode::GeocodeError;
use crate::query::{CheapestRequest, LocationInput, QueryError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cheapest", get(cheapest_near))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Cheapest stations near a location.
async fn cheapest_near(
    State(state): State<AppState>,
    Query(params): Query<CheapestParams>,
) -> Result<Json<CheapestResponse>, AppError> {
    let config = state.engine.config();

    let request = CheapestRequest {
        location: LocationInput {
            postcode: params.postcode,
            latitude: params.lat,
            longitude: params.lon,
        },
        fuel_type: params.fuel.unwrap_or_else(|| config.default_fuel.clone()),
        radius_km: params.radius_km.unwrap_or(config.default_radius_km),
        limit: config.clamp_limit(params.limit.unwrap_or(config.default_limit)),
    };

    let outcome = state.engine.cheapest(&request).await?;

    Ok(Json(CheapestResponse {
        center: outcome.origin,
        fuel: request.fuel_type,
        radius_km: request.radius_km,
        count: outcome.ranking.total_matches,
        results: outcome
            .ranking
            .results
            .iter()
            .map(RankedResult::from_ranked)
            .collect(),
    }))
}

/// Application error type.
///
/// Carries the failure class so that the response status reflects it:
/// caller mistakes are 400, upstream failures 502/504, everything else
/// 500.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    UpstreamFailed { message: String },
    UpstreamTimeout { message: String },
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::UpstreamFailed { .. } => StatusCode::BAD_GATEWAY,
            AppError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::UpstreamFailed { message }
            | AppError::UpstreamTimeout { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        let message = err.to_string();
        match &err {
            QueryError::MissingLocation
            | QueryError::InvalidLocation { .. }
            | QueryError::UnknownFuel { .. } => AppError::BadRequest { message },

            QueryError::Geocode(e) => match e {
                GeocodeError::Timeout => AppError::UpstreamTimeout { message },
                GeocodeError::Http { .. } => AppError::UpstreamFailed { message },
                _ => AppError::BadRequest { message },
            },

            QueryError::Auth(e) => match e {
                AuthError::Timeout => AppError::UpstreamTimeout { message },
                // Credentials are validated at startup; seeing this on a
                // request path is a server bug, not an upstream fault.
                AuthError::MissingCredentials => AppError::Internal { message },
                _ => AppError::UpstreamFailed { message },
            },

            QueryError::Fetch(e) => match e {
                FuelApiError::Timeout { .. } => AppError::UpstreamTimeout { message },
                _ => AppError::UpstreamFailed { message },
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        tracing::warn!(status = %status, error = self.message(), "request failed");

        let body = Json(ErrorResponse {
            ok: false,
            error: self.message().to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_for(err: QueryError) -> StatusCode {
        AppError::from(err).status()
    }

    #[test]
    fn caller_mistakes_map_to_400() {
        assert_eq!(status_for(QueryError::MissingLocation), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(QueryError::InvalidLocation {
                message: "bad".to_string()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(QueryError::UnknownFuel {
                label: "LPG".to_string()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(QueryError::Geocode(GeocodeError::NotFound {
                postcode: "ZZ99 9ZZ".to_string()
            })),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn upstream_failures_map_to_502() {
        assert_eq!(
            status_for(QueryError::Auth(AuthError::Exchange {
                status: 401,
                body: "invalid_client".to_string()
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(QueryError::Fetch(FuelApiError::Api {
                resource: "prices".to_string(),
                status: 500,
                body: "boom".to_string()
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(QueryError::Fetch(FuelApiError::MalformedPage {
                resource: "prices".to_string(),
                message: "expected an array".to_string(),
                body: "{}".to_string()
            })),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn timeouts_map_to_504() {
        assert_eq!(
            status_for(QueryError::Auth(AuthError::Timeout)),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_for(QueryError::Fetch(FuelApiError::Timeout {
                resource: "stations".to_string()
            })),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_for(QueryError::Geocode(GeocodeError::Timeout)),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn misconfiguration_maps_to_500() {
        assert_eq!(
            status_for(QueryError::Auth(AuthError::MissingCredentials)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
