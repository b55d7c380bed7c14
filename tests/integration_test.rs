mod common;

use crisphub::api::{ApiClient, StatsApi};
use crisphub::app::{run_detail, run_search, spawn_search, Dashboard, Phase};
use crisphub::plotting::chart::{LANGUAGE_CHART_FILE, TIMELINE_CHART_FILE};
use crisphub::plotting::{ChartRenderer, ChartStyle, ChartTheme};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

async fn setup(username: &str) -> (ApiClient, Mutex<Dashboard>) {
    let base_url = common::spawn_backend().await;
    let client = ApiClient::new(&base_url).unwrap();
    let mut dashboard = Dashboard::new();
    dashboard.username = username.to_string();
    (client, Mutex::new(dashboard))
}

#[tokio::test]
async fn test_full_search_and_detail_workflow() {
    let (client, state) = setup(common::KNOWN_USER).await;

    assert!(run_search(&state, &client).await);
    {
        let dashboard = state.lock().unwrap();
        assert_eq!(dashboard.search_phase(), Phase::Success);
        assert_eq!(dashboard.repositories().len(), 2);
        assert!(dashboard.charts_stale);

        let pie = dashboard.language_chart().unwrap();
        assert_eq!(pie.labels, vec!["Ruby", "Zig"]);
        assert_eq!(pie.colors[0], "#701516");
        assert!(pie.colors[1].as_str().starts_with("hsl("));

        let line = dashboard.timeline_chart().unwrap();
        assert_eq!(line.labels, vec!["2011-01", "2014-06"]);
        assert_eq!(line.values, vec![1, 2]);
    }

    assert!(run_detail(&state, &client, "hello-world").await);
    let dashboard = state.lock().unwrap();
    assert_eq!(dashboard.detail_phase(), Phase::Success);
    assert_eq!(dashboard.selected_repo(), Some("hello-world"));
    assert_eq!(dashboard.repo_details().unwrap().contributors.len(), 1);
    assert_eq!(
        dashboard.selected_summary().unwrap().url.as_deref(),
        Some("https://github.com/octocat/hello-world")
    );
}

#[tokio::test]
async fn test_unknown_user_shows_error() {
    let (client, state) = setup("ghost").await;

    run_search(&state, &client).await;

    let dashboard = state.lock().unwrap();
    assert_eq!(dashboard.search_phase(), Phase::Error);
    assert!(!dashboard.is_loading());
    assert!(dashboard.stats().is_none());
    assert_eq!(
        dashboard.error(),
        Some("Failed to fetch data: GitHub API error: 404 - ghost not found")
    );
}

#[tokio::test]
async fn test_blank_backend_detail_falls_back_to_error_text() {
    let (client, state) = setup(common::BLANK_DETAIL_USER).await;

    run_search(&state, &client).await;

    let dashboard = state.lock().unwrap();
    let error = dashboard.error().unwrap();
    assert!(error.starts_with("Failed to fetch data: "));
    assert!(error.contains("404"), "{}", error);
}

#[tokio::test]
async fn test_failed_detail_keeps_search_results() {
    let (client, state) = setup(common::KNOWN_USER).await;
    run_search(&state, &client).await;

    run_detail(&state, &client, "spoon-knife").await;

    let dashboard = state.lock().unwrap();
    assert_eq!(dashboard.detail_phase(), Phase::Error);
    assert!(dashboard.repo_details().is_none());
    assert_eq!(dashboard.repositories().len(), 2);
    assert!(dashboard
        .error()
        .unwrap()
        .starts_with("Failed to fetch repository details: "));
}

#[tokio::test]
async fn test_newer_search_wins() {
    let (client, state) = setup(common::KNOWN_USER).await;
    let api: Arc<dyn StatsApi> = Arc::new(client);
    let state = Arc::new(state);

    // The first search is outdated by the second before it can finish.
    let (first_tx, first_rx) = tokio::sync::oneshot::channel();
    spawn_search(Arc::clone(&state), Arc::clone(&api), move || {
        let _ = first_tx.send(());
    });
    state.lock().unwrap().username = "ghost".to_string();
    let (second_tx, second_rx) = tokio::sync::oneshot::channel();
    spawn_search(Arc::clone(&state), api, move || {
        let _ = second_tx.send(());
    });

    first_rx.await.unwrap();
    second_rx.await.unwrap();

    let dashboard = state.lock().unwrap();
    assert_eq!(dashboard.searched_username(), "ghost");
    assert_eq!(dashboard.search_phase(), Phase::Error);
    assert!(dashboard.repositories().is_empty());
}

#[tokio::test]
async fn test_search_results_render_to_charts() {
    let (client, state) = setup(common::KNOWN_USER).await;
    run_search(&state, &client).await;
    let temp_dir = TempDir::new().unwrap();
    let renderer =
        ChartRenderer::init(temp_dir.path(), ChartTheme::default(), ChartStyle::default())
            .unwrap();

    let (pie, line) = {
        let dashboard = state.lock().unwrap();
        (dashboard.language_chart().unwrap(), dashboard.timeline_chart().unwrap())
    };

    let outputs = [
        (renderer.render_language_pie(&pie), LANGUAGE_CHART_FILE),
        (renderer.render_timeline(&line), TIMELINE_CHART_FILE),
    ];
    for (rendered, file) in outputs {
        // Text drawing needs system fonts, which CI images may lack; the
        // background pass is on disk regardless.
        if let Err(e) = rendered {
            assert!(e.to_string().to_lowercase().contains("font"), "{}", e);
            eprintln!("{}: text pass skipped, no system fonts: {}", file, e);
        }
        let bytes = std::fs::read(temp_dir.path().join(file)).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"), "{} is not a PNG", file);
    }
}
