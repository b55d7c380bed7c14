//! # CrispHub Analytics
//!
//! `crisphub` is a desktop dashboard for GitHub account statistics. It talks
//! to an analytics backend over HTTP, turns the returned statistics into
//! chart series and renders them in an egui window.
//!
//! ## Features
//!
//! - Search a GitHub user and list their repositories
//! - Language distribution pie and repository creation timeline
//! - Per-repository details: languages, contributors and recent commits
//! - Last request wins when searches or selections overlap
//!
//! ## Example
//!
//! ```no_run
//! use crisphub::api::ApiClient;
//! use crisphub::app::{run_search, Dashboard};
//! use std::sync::Mutex;
//!
//! # async fn demo() -> Result<(), crisphub::api::ApiError> {
//! let client = ApiClient::new("http://localhost:8000/api")?;
//! let state = Mutex::new(Dashboard::new());
//! state.lock().unwrap().username = "octocat".to_string();
//!
//! run_search(&state, &client).await;
//! let dashboard = state.lock().unwrap();
//! println!("{} repositories", dashboard.repositories().len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use api::{ApiClient, ApiError, StatsApi};
pub use app::{Dashboard, DashboardApp};
pub use config::{Args, Config};
pub use types::{RepositoryDetail, RepositoryListResponse, UserStats};
