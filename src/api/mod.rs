//! # Backend API
//!
//! Access to the three read-only endpoints of the analytics backend.
//!
//! ```text
//! api/
//! ├── mod.rs     - StatsApi trait and re-exports
//! ├── client.rs  - reqwest-backed ApiClient
//! └── error.rs   - ApiError
//! ```

pub mod client;
pub mod error;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::ApiError;

use crate::types::{RepositoryDetail, RepositoryListResponse, UserStats};

/// The operations the dashboard needs from the backend.
#[async_trait::async_trait]
pub trait StatsApi: Send + Sync {
    async fn fetch_user_repos(&self, username: &str) -> Result<RepositoryListResponse, ApiError>;

    async fn fetch_repo_details(
        &self,
        username: &str,
        repo: &str,
    ) -> Result<RepositoryDetail, ApiError>;

    async fn fetch_user_stats(&self, username: &str) -> Result<UserStats, ApiError>;
}
