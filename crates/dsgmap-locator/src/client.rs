//! HTTP client for the vendor store-search API.
//!
//! Wraps `reqwest` with API-key handling, fixed search parameters, and typed
//! status errors. A 404 surfaces as [`LocatorError::NotFound`] so the search
//! pipeline can recode it as an empty result set.

use std::time::Duration;

use dsgmap_core::{AppConfig, Coordinates};
use reqwest::{Client, StatusCode, Url};

use crate::error::LocatorError;
use crate::types::StoreSearchResponse;

const SEARCH_PATH: &str = "api/v4/stores/search";
const API_KEY_HEADER: &str = "x-api-key";
const DEFAULT_LOB: &str = "dsg";
const DEFAULT_RADIUS: u32 = 100;

/// Client for the store-search endpoint.
///
/// Use [`StoreLocatorClient::from_config`] in binaries, or
/// [`StoreLocatorClient::new`] to point at a mock server in tests.
pub struct StoreLocatorClient {
    client: Client,
    api_key: String,
    search_endpoint: Url,
    lob: String,
    radius: u32,
}

impl StoreLocatorClient {
    /// Creates a client with the default line of business (`dsg`) and a
    /// 100-unit search radius.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`LocatorError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute URL.
    pub fn new(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, LocatorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joining keeps any path prefix.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let search_endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(SEARCH_PATH))
            .map_err(|e| LocatorError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            search_endpoint,
            lob: DEFAULT_LOB.to_owned(),
            radius: DEFAULT_RADIUS,
        })
    }

    /// Builds a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`StoreLocatorClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, LocatorError> {
        Ok(Self::new(
            &config.api_key,
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_search_params(&config.lob, config.search_radius))
    }

    /// Overrides the line-of-business tag and search radius.
    #[must_use]
    pub fn with_search_params(mut self, lob: &str, radius: u32) -> Self {
        lob.clone_into(&mut self.lob);
        self.radius = radius;
        self
    }

    /// Searches for stores near a ZIP code.
    ///
    /// # Errors
    ///
    /// - [`LocatorError::NotFound`] — HTTP 404.
    /// - [`LocatorError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`LocatorError::Http`] — network or TLS failure.
    /// - [`LocatorError::Deserialize`] — body does not match the expected shape.
    pub async fn fetch_by_zip_code(
        &self,
        zip_code: &str,
    ) -> Result<StoreSearchResponse, LocatorError> {
        self.fetch(zip_code).await
    }

    /// Searches for stores near a coordinate pair, sent as `"lat,lng"`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_by_zip_code`].
    pub async fn fetch_by_location(
        &self,
        coordinates: Coordinates,
    ) -> Result<StoreSearchResponse, LocatorError> {
        self.fetch(&coordinates.to_string()).await
    }

    async fn fetch(&self, addr: &str) -> Result<StoreSearchResponse, LocatorError> {
        let url = self.search_url(addr);
        tracing::debug!(%url, "searching stores");

        let response = self
            .client
            .get(url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(LocatorError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(LocatorError::UnexpectedStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_owned(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<StoreSearchResponse>(&body).map_err(|e| LocatorError::Deserialize {
            context: format!("store search for addr={addr}"),
            source: e,
        })
    }

    /// Builds the search URL; `addr` is percent-encoded by `Url`.
    fn search_url(&self, addr: &str) -> Url {
        let mut url = self.search_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("lob", &self.lob)
            .append_pair("radius", &self.radius.to_string())
            .append_pair("addr", addr);
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
