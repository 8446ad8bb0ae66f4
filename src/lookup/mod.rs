//! Geolocation lookup over HTTP.
//!
//! This module talks to two external services:
//! - the geolocation API, queried by IP address or domain
//! - the self-IP service, used once at startup to find the caller's public IP

mod client;
mod types;

// Re-export public API
pub use client::GeoClient;
pub use types::{LookupResult, Location};
