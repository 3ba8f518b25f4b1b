//! The join-filter-sort pass behind a cheapest-fuel query.

use std::collections::HashMap;

use crate::domain::{PriceRecord, Station};
use crate::geo::{Coordinate, distance_km};

/// One station in a ranked result set.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStation {
    /// Stable station identifier.
    pub id: String,

    /// Display name of the forecourt.
    pub name: String,

    /// Brand, where known.
    pub brand: Option<String>,

    /// Postal code of the site.
    pub postcode: String,

    /// Location of the site.
    pub location: Coordinate,

    /// Distance from the query origin, rounded to 2 decimal places.
    pub distance_km: f64,

    /// Price per unit for the queried fuel.
    pub price: f64,
}

/// Result of a ranking pass.
#[derive(Debug, Clone)]
pub struct Ranking {
    /// Surviving stations, cheapest first, truncated to the limit.
    pub results: Vec<RankedStation>,

    /// Number of stations that matched before truncation.
    pub total_matches: usize,
}

/// A match before sorting; keeps the unrounded distance so that ties
/// are broken on real values, not display values.
struct Candidate<'a> {
    station: &'a Station,
    location: Coordinate,
    distance: f64,
    price: f64,
}

/// Join stations with prices, filter by fuel and radius, and rank.
///
/// Ordering is the defining guarantee of the endpoint: ascending by
/// price, ties broken by ascending distance. The returned list is
/// truncated to `limit` (floor 1); `total_matches` counts all
/// survivors.
pub fn rank(
    stations: &[Station],
    prices: &[PriceRecord],
    fuel_type: &str,
    origin: Coordinate,
    radius_km: f64,
    limit: usize,
) -> Ranking {
    // Station lookup by id. Records with unusable coordinates never
    // enter the lookup, so no price record can surface them. Duplicate
    // ids keep the last record, matching the feed's own behavior.
    let lookup: HashMap<&str, &Station> = stations
        .iter()
        .filter(|s| s.has_valid_location())
        .map(|s| (s.id.as_str(), s))
        .collect();

    let mut candidates: Vec<Candidate> = Vec::new();

    for record in prices {
        let Some(station) = lookup.get(record.station_id.as_str()) else {
            continue;
        };

        let Some(price) = record.price_for(fuel_type) else {
            continue;
        };

        let Ok(location) = Coordinate::new(station.latitude, station.longitude) else {
            continue;
        };

        let distance = distance_km(origin, location);
        if distance > radius_km {
            continue;
        }

        candidates.push(Candidate {
            station,
            location,
            distance,
            price,
        });
    }

    candidates.sort_by(|a, b| {
        a.price
            .total_cmp(&b.price)
            .then_with(|| a.distance.total_cmp(&b.distance))
    });

    let total_matches = candidates.len();

    let results = candidates
        .into_iter()
        .take(limit.max(1))
        .map(|c| RankedStation {
            id: c.station.id.clone(),
            name: c.station.name.clone(),
            brand: c.station.brand.clone(),
            postcode: c.station.postcode.clone(),
            location: c.location,
            distance_km: round_2dp(c.distance),
            price: c.price,
        })
        .collect();

    Ranking {
        results,
        total_matches,
    }
}

/// Round to 2 decimal places for display.
fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
