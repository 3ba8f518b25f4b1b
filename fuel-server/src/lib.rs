//! Cheapest-fuel query server.
//!
//! A web service that aggregates station and price feeds from the
//! government fuel-data provider and answers: "where is the cheapest
//! fuel near this location?"

pub mod auth;
pub mod cache;
pub mod domain;
pub mod fuel;
pub mod geo;
pub mod postcode;
pub mod query;
pub mod ranking;
pub mod web;
