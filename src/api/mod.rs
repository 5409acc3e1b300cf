//! Typed client for the remote monitoring service.
//!
//! The service is split over two base URLs: the monitoring base serves
//! courses, records, images and students (form-encoded writes), the API base
//! serves teachers and authentication (JSON).

mod auth;
mod courses;
mod error;
mod records;
mod students;
mod teachers;

pub use self::error::ApiError;

use std::time::Duration;

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_base: String,
    monitor_base: String,
}

impl ApiClient {
    pub fn new(api_base: &str, monitor_base: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            monitor_base: monitor_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, &config.monitor_base_url, config.request_timeout)
    }

    fn monitor_url(&self, path: &str) -> String {
        format!("{}{}", self.monitor_base, path)
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// API base URL with `segments` appended, each percent-encoded.
    fn api_url_with_segments(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.api_base).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("{} cannot be a base", self.api_base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and fail on any non-2xx status.
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<reqwest::Response, ApiError> {
        log::debug!("Remote call {endpoint}");
        let response = request.send().await.map_err(|e| {
            log::warn!("Remote call {endpoint} failed: {e}");
            ApiError::Transport(e)
        })?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("Remote call {endpoint} returned {status}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, endpoint: &str) -> Result<T, ApiError> {
        let body = self.send(request, endpoint).await?.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }

    /// Like `fetch`, but a JSON `null` body is an empty list.
    async fn fetch_list<T: DeserializeOwned>(&self, request: RequestBuilder, endpoint: &str) -> Result<Vec<T>, ApiError> {
        let list: Option<Vec<T>> = self.fetch(request, endpoint).await?;
        Ok(list.unwrap_or_default())
    }

    /// Send and discard the body; only the status matters.
    async fn execute(&self, request: RequestBuilder, endpoint: &str) -> Result<(), ApiError> {
        self.send(request, endpoint).await.map(|_| ())
    }
}
