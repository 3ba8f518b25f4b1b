//! Web layer for the fuel-price API.
//!
//! Provides the HTTP endpoint answering cheapest-fuel queries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
