//! CrispHub Analytics
//!
//! A GUI dashboard for exploring GitHub users and their repositories.

use anyhow::{anyhow, Context};
use clap::Parser;
use eframe::egui;
use std::sync::Arc;
use tokio::runtime::Runtime;

use crisphub::api::{ApiClient, StatsApi};
use crisphub::app::DashboardApp;
use crisphub::config::{Args, Config};
use crisphub::logging;
use crisphub::plotting::{ChartRenderer, ChartStyle, ChartTheme};

const APP_TITLE: &str = "CrispHub Analytics";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_env().with_args(&args);
    logging::init(&config.log_filter);

    // Fetch tasks are spawned from the UI thread, so the runtime must be entered
    let rt = Runtime::new().context("Failed to start tokio runtime")?;
    let _guard = rt.enter();

    let api: Arc<dyn StatsApi> = Arc::new(
        ApiClient::from_config(&config)
            .with_context(|| format!("Invalid backend URL {}", config.api_url))?,
    );
    let renderer = ChartRenderer::init(
        &config.chart_dir,
        ChartTheme::default(),
        ChartStyle::default(),
    )
    .with_context(|| format!("Cannot prepare chart directory {}", config.chart_dir.display()))?;

    tracing::info!(api_url = %config.api_url, "Starting dashboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title(APP_TITLE),
        ..Default::default()
    };

    let initial_user = config.initial_user.clone();
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| {
            let app = DashboardApp::new(api, renderer);
            if let Some(user) = initial_user.as_deref() {
                app.search_for(user, &cc.egui_ctx);
            }
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| anyhow!("Error running application: {}", e))
}
