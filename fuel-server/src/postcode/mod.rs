//! Postcode geocoding adapter.
//!
//! Resolves a free-text postal code to a coordinate pair via the
//! public geocoding service. Queries that already carry coordinates
//! bypass this module entirely.

mod client;
mod error;

pub use client::{PostcodeClient, PostcodeClientConfig};
pub use error::GeocodeError;
