//! Geolocation service client.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::types::{GeoResponse, LookupResult, SelfIpResponse};
use crate::config::Config;
use crate::error_handling::{InitializationError, LookupError};
use crate::initialization::init_client;
use crate::query::{classify, QueryKind};

/// Client for the geolocation and self-IP services.
///
/// Cheap to clone; the underlying `reqwest::Client` is shared.
#[derive(Debug, Clone)]
pub struct GeoClient {
    http: Arc<reqwest::Client>,
    api_base_url: String,
    api_key: String,
    self_ip_url: String,
}

impl GeoClient {
    /// Validates the configuration and builds a client from it.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::ConfigError` when the API base URL or key
    /// is missing, or `InitializationError::HttpClientError` when the HTTP
    /// client cannot be built.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        config.validate()?;
        let http = init_client(config)?;
        Ok(Self::with_client(http, config))
    }

    /// Builds a client around an existing HTTP client without validation.
    pub fn with_client(http: Arc<reqwest::Client>, config: &Config) -> Self {
        Self {
            http,
            api_base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
            self_ip_url: config.self_ip_url.clone(),
        }
    }

    /// Builds the lookup URL: `<base><key>&<param>=<value>`.
    ///
    /// The base URL is expected to end with the key parameter's `=`.
    pub fn request_url(&self, input: &str, kind: QueryKind) -> String {
        let value: String = url::form_urlencoded::byte_serialize(input.as_bytes()).collect();
        format!(
            "{}{}&{}={}",
            self.api_base_url,
            self.api_key,
            kind.param_name(),
            value
        )
    }

    /// Looks up geolocation metadata for an IP address or domain.
    ///
    /// # Errors
    ///
    /// - `LookupError::Status` for any non-success response
    /// - `LookupError::Request` when the service cannot be reached
    /// - `LookupError::Decode` when the body is not a geolocation record
    pub async fn lookup(&self, input: &str) -> Result<LookupResult, LookupError> {
        let kind = classify(input);
        log::debug!("Looking up {} '{}'", kind, input);
        let raw: GeoResponse = self.get_json(&self.request_url(input, kind)).await?;
        Ok(raw.into())
    }

    /// Resolves the public IP of the machine running the tracker.
    pub async fn resolve_self_ip(&self) -> Result<String, LookupError> {
        log::debug!("Resolving own public IP via {}", self.self_ip_url);
        let raw: SelfIpResponse = self.get_json(&self.self_ip_url).await?;
        Ok(raw.ip)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LookupError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
