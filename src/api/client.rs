//! HTTP client for the monitoring backend

use chrono::{DateTime, Utc};
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use tracing::debug;

use super::error::{ApiError, Result};
use super::objects_log::LogSeries;
use super::types::Camera;

/// Client for the camera API and the storage hosts serving objects logs
#[derive(Clone)]
pub struct MonitorClient {
    client: Client,
    base_url: String,
}

impl MonitorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `GET /api/cameras`
    pub async fn get_cameras(&self) -> Result<Vec<Camera>> {
        let url = format!("{}/api/cameras", self.base_url);
        debug!("Fetching camera list from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Request { url: url.clone(), source })?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                url,
                status: response.status(),
            });
        }

        response
            .json::<Vec<Camera>>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }

    /// Fetch and parse an objects log, bypassing any cache
    pub async fn get_objects_log(&self, url: &str) -> Result<LogSeries> {
        debug!("Fetching objects log {}", url);

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let body = response.text().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })?;

        LogSeries::parse(&body)
    }
}

/// Objects log URL for the first camera on the UTC day of `now`
pub fn objects_log_url(cameras: &[Camera], now: DateTime<Utc>) -> Option<String> {
    let camera = cameras.first()?;
    Some(camera.objects_log_url(&now.format("%Y-%m-%d").to_string()))
}
