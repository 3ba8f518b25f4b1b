//! Per-station fuel price snapshots.

/// A single (fuel type, price) quote.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelPrice {
    /// Fuel-type label as published by the feed (e.g. "E10", "B7").
    pub fuel_type: String,

    /// Price per unit in the provider's currency minor unit.
    pub price: f64,
}

/// The price snapshot for one station.
///
/// `station_id` is a foreign key into the station feed; the two feeds
/// are published independently, so a price record may reference a
/// station that is not (or no longer) present. Such records are ignored
/// when ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    /// Identifier of the station this snapshot belongs to.
    pub station_id: String,

    /// Quotes keyed by fuel-type label.
    pub fuels: Vec<FuelPrice>,
}

impl PriceRecord {
    /// Look up the price for a fuel type, matching labels
    /// case-insensitively. Non-finite prices are treated as absent.
    pub fn price_for(&self, fuel_type: &str) -> Option<f64> {
        self.fuels
            .iter()
            .find(|f| f.fuel_type.eq_ignore_ascii_case(fuel_type))
            .map(|f| f.price)
            .filter(|p| p.is_finite())
    }
}
