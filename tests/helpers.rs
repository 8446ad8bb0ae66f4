// Shared test helpers for geolocation server setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use httptest::Server;

use ip_tracker::map::RecordingSurface;
use ip_tracker::{Config, LogFormat, LogLevel, MarkerPolicy, Tracker};

/// Geolocation body for 8.8.8.8 (Mountain View, no postal code).
#[allow(dead_code)] // Used by other test files
pub const MOUNTAIN_VIEW: &str = r#"{
    "ip": "8.8.8.8",
    "isp": "Google LLC",
    "location": {
        "country": "US",
        "region": "California",
        "city": "Mountain View",
        "lat": 37.40599,
        "lng": -122.078514,
        "postalCode": "",
        "timezone": "-07:00"
    }
}"#;

/// Geolocation body for 1.1.1.1 (Sydney, with postal code).
#[allow(dead_code)] // Used by other test files
pub const SYDNEY: &str = r#"{
    "ip": "1.1.1.1",
    "isp": "Cloudflare, Inc.",
    "location": {
        "country": "AU",
        "region": "New South Wales",
        "city": "Sydney",
        "lat": -33.8688,
        "lng": 151.2093,
        "postalCode": "2000",
        "timezone": "+10:00"
    }
}"#;

/// Builds a config whose endpoints all point at `server`.
///
/// The geolocation endpoint is `/geo` and the own-IP endpoint is `/self`.
#[allow(dead_code)] // Used by other test files
pub fn config_for(server: &Server) -> Config {
    Config {
        api_base_url: format!("{}?apiKey=", server.url_str("/geo")),
        api_key: "test-key".to_string(),
        self_ip_url: server.url_str("/self?format=json"),
        timeout_seconds: 5,
        user_agent: "ip_tracker-test/1.0".to_string(),
        log_level: LogLevel::Error, // Reduce log noise
        log_format: LogFormat::Plain,
        ..Default::default()
    }
}

/// Builds a tracker against `server` with the given marker policy.
#[allow(dead_code)] // Used by other test files
pub fn tracker_with_policy(server: &Server, policy: MarkerPolicy) -> Tracker<RecordingSurface> {
    let config = Config {
        marker_policy: policy,
        ..config_for(server)
    };
    Tracker::from_config(&config).expect("Failed to create test tracker")
}
