//! Runtime configuration from defaults, environment variables and CLI flags.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_BASE_URL;

pub const ENV_API_URL: &str = "CRISPHUB_API_URL";
pub const ENV_CHART_DIR: &str = "CRISPHUB_CHART_DIR";
pub const ENV_TIMEOUT_SECS: &str = "CRISPHUB_TIMEOUT_SECS";
pub const ENV_LOG: &str = "RUST_LOG";

pub const DEFAULT_LOG_FILTER: &str = "crisphub=info,warn";

/// Command line flags of the `crisphub` binary.
#[derive(Parser, Debug, Default)]
#[command(name = "crisphub", version, about = "GitHub analytics dashboard")]
pub struct Args {
    /// Base URL of the analytics backend, including the `/api` prefix
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// GitHub username to search for on startup
    #[arg(long, value_name = "NAME")]
    pub user: Option<String>,

    /// Directory the rendered chart images are written to
    #[arg(long, value_name = "DIR")]
    pub chart_dir: Option<PathBuf>,
}

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL (e.g. "http://localhost:8000/api")
    pub api_url: String,
    /// Where chart PNGs are rendered
    pub chart_dir: PathBuf,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// tracing filter directive
    pub log_filter: String,
    /// Username searched as soon as the window opens
    pub initial_user: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            chart_dir: default_chart_dir(),
            request_timeout: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            initial_user: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset, empty or unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_url: get(ENV_API_URL).unwrap_or(defaults.api_url),
            chart_dir: get(ENV_CHART_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.chart_dir),
            request_timeout: get(ENV_TIMEOUT_SECS)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            log_filter: get(ENV_LOG).unwrap_or(defaults.log_filter),
            initial_user: None,
        }
    }

    /// Apply command line flags on top of this configuration.
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(url) = &args.api_url {
            self.api_url = url.clone();
        }
        if let Some(dir) = &args.chart_dir {
            self.chart_dir = dir.clone();
        }
        if let Some(user) = args.user.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            self.initial_user = Some(user.to_string());
        }
        self
    }
}

fn default_chart_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("crisphub")
        .join("charts")
}
