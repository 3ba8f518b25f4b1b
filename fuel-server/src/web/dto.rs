//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::ranking::RankedStation;

/// Query parameters of the cheapest-fuel endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheapestParams {
    /// Postcode to search around.
    pub postcode: Option<String>,

    /// Direct latitude; takes precedence over the postcode when paired
    /// with `lon`.
    pub lat: Option<f64>,

    /// Direct longitude.
    pub lon: Option<f64>,

    /// Fuel-type label (defaults to E10).
    pub fuel: Option<String>,

    /// Search radius in kilometres (defaults to 10).
    pub radius_km: Option<f64>,

    /// Maximum number of results (defaults to 10).
    pub limit: Option<usize>,
}

/// Successful response of the cheapest-fuel endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheapestResponse {
    /// The resolved query origin.
    pub center: Coordinate,

    /// The fuel the results are priced for.
    pub fuel: String,

    /// The radius that was searched.
    pub radius_km: f64,

    /// Stations that matched, before the limit was applied.
    pub count: usize,

    /// Matching stations, cheapest first.
    pub results: Vec<RankedResult>,
}

/// One station in a response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub id: String,
    pub name: String,
    pub brand: Option<String>,
    pub postcode: String,
    pub location: Coordinate,
    pub distance_km: f64,
    pub price: f64,
}

impl RankedResult {
    /// Create from a ranking-engine result.
    pub fn from_ranked(ranked: &RankedStation) -> Self {
        Self {
            id: ranked.id.clone(),
            name: ranked.name.clone(),
            brand: ranked.brand.clone(),
            postcode: ranked.postcode.clone(),
            location: ranked.location,
            distance_km: ranked.distance_km,
            price: ranked.price,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub ok: bool,

    /// Human-readable error message.
    pub error: String,
}
