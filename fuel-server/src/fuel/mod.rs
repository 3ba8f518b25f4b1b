//! Fuel-data provider client.
//!
//! The provider publishes two paginated feeds: station metadata and
//! price snapshots. Both are plain JSON arrays, one page per request,
//! fetched with a bearer token from the [`crate::auth`] module.
//!
//! Key characteristics of the feeds:
//! - Pages are 1-indexed; an empty array signals the end of the feed
//! - The two feeds are published independently, so price records may
//!   reference stations that are not present in the station feed
//! - Field coverage is patchy; DTOs use `Option` liberally

mod client;
mod error;
mod pages;
mod types;

pub use client::{FuelApiClient, FuelApiConfig};
pub use error::FuelApiError;
pub use pages::fetch_all_pages;
pub use types::{FuelPriceDto, PriceDto, StationDto};
