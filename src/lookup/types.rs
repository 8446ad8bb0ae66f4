//! Lookup data structures.
//!
//! Wire formats of the geolocation and self-IP services, and the normalized
//! [`LookupResult`] shown to the user.

use serde::Deserialize;

/// Normalized geolocation record for one IP address or domain.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    /// Address the service resolved the query to
    pub ip: String,
    /// Internet service provider owning the address
    pub isp: String,
    /// Where the address is located
    pub location: Location,
}

/// Location part of a [`LookupResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// State, province or similar subdivision
    pub region: String,
    /// City name
    pub city: String,
    /// `None` when the service omits the field or sends an empty string
    pub postal_code: Option<String>,
    /// UTC offset as sent by the service, e.g. `-08:00`
    pub timezone: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

/// Body of a geolocation service response.
#[derive(Debug, Deserialize)]
pub(crate) struct GeoResponse {
    pub ip: String,
    #[serde(default)]
    pub isp: String,
    pub location: GeoResponseLocation,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeoResponseLocation {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub timezone: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<GeoResponse> for LookupResult {
    fn from(raw: GeoResponse) -> Self {
        let postal_code = raw
            .location
            .postal_code
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty());

        LookupResult {
            ip: raw.ip,
            isp: raw.isp,
            location: Location {
                region: raw.location.region,
                city: raw.location.city,
                postal_code,
                timezone: raw.location.timezone,
                lat: raw.location.lat,
                lng: raw.location.lng,
            },
        }
    }
}

/// Body of the self-IP service response (`?format=json`).
#[derive(Debug, Deserialize)]
pub(crate) struct SelfIpResponse {
    pub ip: String,
}
