//! HTTP backend implementation

use crate::error::ClientError;
use crate::wire::{self, WireHazard, WireNearby};
use firewatch_domain::traits::HazardApi;
use firewatch_domain::{HazardPoint, NearbyResult, RadiusKm, UserLocation};
use reqwest::Url;
use std::time::Duration;

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Hazard backend reached over HTTP
///
/// No retries are attempted: a failed call is reported once and the caller
/// waits for its next scheduled cycle.
#[derive(Debug, Clone)]
pub struct HttpHazardApi {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpHazardApi {
    /// Create a client for the backend at `base_url`
    ///
    /// Requests have no deadline beyond the transport defaults; use
    /// [`HttpHazardApi::with_timeout`] to impose one.
    ///
    /// # Examples
    ///
    /// ```
    /// use firewatch_client::HttpHazardApi;
    ///
    /// let api = HttpHazardApi::new("http://127.0.0.1:5000").unwrap();
    /// assert_eq!(api.base_url(), "http://127.0.0.1:5000/");
    /// ```
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Other(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            client,
        })
    }

    /// Create a client whose requests are aborted after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Other(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            client,
        })
    }

    /// The normalized base URL (always ends in `/`)
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    async fn get_bytes(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, ClientError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", raw, e)))
}

impl HazardApi for HttpHazardApi {
    type Error = ClientError;

    async fn fetch_points(&self) -> Result<Vec<HazardPoint>, ClientError> {
        let url = self.endpoint("api/fires")?;
        tracing::debug!(%url, "Fetching hazard points");

        let body = self.get_bytes(self.client.get(url)).await?;
        let wire: Vec<WireHazard> = serde_json::from_slice(&body)?;

        Ok(wire.into_iter().map(Into::into).collect())
    }

    async fn fetch_nearby(
        &self,
        location: UserLocation,
        radius: RadiusKm,
    ) -> Result<Vec<NearbyResult>, ClientError> {
        let url = self.endpoint("api/nearby")?;
        tracing::debug!(%url, %location, radius_km = radius.km(), "Querying nearby hazards");

        let request = self.client.get(url).query(&[
            ("lat", location.latitude),
            ("lon", location.longitude),
            ("radius_km", radius.km()),
        ]);
        let body = self.get_bytes(request).await?;
        let wire: Vec<WireNearby> = serde_json::from_slice(&body)?;

        let mut results: Vec<NearbyResult> = wire.into_iter().map(Into::into).collect();
        wire::sort_by_distance(&mut results);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let api = HttpHazardApi::new("http://localhost:5000").unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000/");

        let api = HttpHazardApi::new("http://localhost:5000/hazards").unwrap();
        assert_eq!(
            api.endpoint("api/fires").unwrap().as_str(),
            "http://localhost:5000/hazards/api/fires"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpHazardApi::new("not a url");
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_connection_error() {
        // Port 9 (discard) is essentially never listening on loopback
        let api =
            HttpHazardApi::with_timeout("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let result = api.fetch_points().await;
        assert!(result.is_err());
    }
}
