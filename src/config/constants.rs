//! Configuration constants.
//!
//! This module defines the defaults used throughout the application: service
//! endpoints, map view parameters, and network timeouts.

use std::time::Duration;

/// Environment variable holding the geolocation API base URL.
///
/// The base URL is expected to end right before the API key, e.g.
/// `https://geo.ipify.org/api/v2/country,city?apiKey=`.
pub const API_BASE_URL_ENV: &str = "IPIFY_API_URL";

/// Environment variable holding the geolocation API key.
pub const API_KEY_ENV: &str = "IPIFY_API_KEY";

/// Environment variable overriding the self-IP resolution endpoint.
pub const SELF_IP_URL_ENV: &str = "IPIFY_SELF_IP_URL";

/// Service used once at startup to resolve the caller's public IP.
pub const DEFAULT_SELF_IP_URL: &str = "https://api.ipify.org?format=json";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent sent to the lookup services.
pub const DEFAULT_USER_AGENT: &str = concat!("ip_tracker/", env!("CARGO_PKG_VERSION"));

// Map view
/// Zoom level used both at mount and when re-centering on a lookup result.
pub const DEFAULT_ZOOM: u8 = 13;
/// Duration of the animated pan when re-centering the view.
pub const PAN_DURATION: Duration = Duration::from_secs(1);

// Tile source
/// OpenStreetMap raster tiles.
pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
/// Highest zoom OpenStreetMap serves tiles for.
pub const TILE_MAX_ZOOM: u8 = 19;
/// Attribution required by the OpenStreetMap tile usage policy.
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>";

/// Message shown to the user for every failed submission.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input";

/// Placeholder shown before the first successful lookup.
pub const INPUT_PLACEHOLDER: &str = "Search for any IP address or domain";
