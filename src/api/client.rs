//! # API Client
//!
//! HTTP client for the CrispHub analytics backend.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

use super::error::{error_detail, ApiError};
use super::StatsApi;
use crate::config::Config;
use crate::types::{RepositoryDetail, RepositoryListResponse, UserStats};

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// HTTP client for the analytics backend.
///
/// Every call is a plain GET against `{base_url}/{resource}/{ids...}`. The
/// parsed body is handed back as-is; failures are logged and returned to the
/// caller without retrying.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client without a request timeout.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry path segments".to_string(),
            });
        }

        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::with_timeout(&config.api_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base_url}/{segments...}`, encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Fetch the public repositories of `username`.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_user_repos(&self, username: &str) -> Result<RepositoryListResponse, ApiError> {
        let result: Result<RepositoryListResponse, ApiError> =
            self.get_json(self.endpoint(&["user", username])).await;
        if let Ok(ref list) = result {
            tracing::debug!(repo_count = list.repositories.len(), "Repositories fetched");
        }
        result.inspect_err(|e| tracing::error!(error = %e, "Error fetching repositories"))
    }

    /// Fetch the detail of one repository owned by `username`.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_repo_details(
        &self,
        username: &str,
        repo: &str,
    ) -> Result<RepositoryDetail, ApiError> {
        self.get_json(self.endpoint(&["repo", username, repo]))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error fetching repository details"))
    }

    /// Fetch the aggregate statistics of `username`.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_user_stats(&self, username: &str) -> Result<UserStats, ApiError> {
        self.get_json(self.endpoint(&["stats", username]))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error fetching user stats"))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let start = Instant::now();
        tracing::debug!(url = %url, "GET");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;
        let duration_ms = start.elapsed().as_millis();

        if !status.is_success() {
            tracing::warn!(
                url = %url,
                status = status.as_u16(),
                duration_ms,
                "Backend returned an error status"
            );
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
                detail: error_detail(&body),
            });
        }

        tracing::debug!(
            url = %url,
            status = status.as_u16(),
            bytes = body.len(),
            duration_ms,
            "Response received"
        );

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait::async_trait]
impl StatsApi for ApiClient {
    async fn fetch_user_repos(&self, username: &str) -> Result<RepositoryListResponse, ApiError> {
        ApiClient::fetch_user_repos(self, username).await
    }

    async fn fetch_repo_details(
        &self,
        username: &str,
        repo: &str,
    ) -> Result<RepositoryDetail, ApiError> {
        ApiClient::fetch_repo_details(self, username, repo).await
    }

    async fn fetch_user_stats(&self, username: &str) -> Result<UserStats, ApiError> {
        ApiClient::fetch_user_stats(self, username).await
    }
}
