//! HTTP client for the external prediction API.
//!
//! Blocking reqwest client (no async runtime required). The UI runs each
//! call on a worker thread, so [`PriceApi`] implementations must be
//! `Send + Sync`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::model::{DiamondAttributes, InsightsData, PredictionResult, ServiceInfo};

/// Default API location when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Error type for API calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, ...
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// 2xx response whose body could not be used.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// The server's `detail` message for rejected requests, if it sent one.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        let Self::Http { body, .. } = self else {
            return None;
        };
        let json: serde_json::Value = serde_json::from_str(body).ok()?;
        json.get("detail")?.as_str().map(String::from)
    }
}

/// The calls the UI makes against the prediction service.
pub trait PriceApi: Send + Sync {
    /// `GET /api/predict` for one diamond.
    fn predict(&self, attributes: &DiamondAttributes) -> Result<PredictionResult, ApiError>;

    /// `GET /api/insights` aggregate statistics.
    fn insights(&self) -> Result<InsightsData, ApiError>;

    /// `GET /` service banner.
    fn service_info(&self) -> Result<ServiceInfo, ApiError>;
}

/// Prediction API client (blocking).
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("diamond-viz/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "GET");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

impl PriceApi for HttpClient {
    fn predict(&self, attributes: &DiamondAttributes) -> Result<PredictionResult, ApiError> {
        let result: PredictionResult = self.get_json("/api/predict", &attributes.query_pairs())?;
        let price = result.predicted_price;
        if !price.is_finite() || price < 0.0 {
            return Err(ApiError::Malformed(format!("predicted_price {price} is not a valid price")));
        }
        Ok(result)
    }

    fn insights(&self) -> Result<InsightsData, ApiError> {
        self.get_json("/api/insights", &[])
    }

    fn service_info(&self) -> Result<ServiceInfo, ApiError> {
        self.get_json("/", &[])
    }
}
