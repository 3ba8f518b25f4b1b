//! Domain types for the fuel-price aggregator.
//!
//! These are the records that flow through the cache and the ranking
//! engine: station metadata and per-station price snapshots, already
//! decoded from the upstream feed.

mod price;
mod station;

pub use price::{FuelPrice, PriceRecord};
pub use station::Station;
