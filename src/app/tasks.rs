//! # Fetch Tasks
//!
//! Async flows that drive [`Dashboard`] through a search or a repository
//! selection. The state lock is only held to begin and to finish a flow,
//! never across a request.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::state::{Dashboard, DetailTicket, SearchResults, SearchTicket};
use crate::api::{ApiError, StatsApi};
use crate::types::RepositoryDetail;

/// Lock the shared state, recovering it if a previous holder panicked.
pub fn lock_state(state: &Mutex<Dashboard>) -> MutexGuard<'_, Dashboard> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fetch repositories and stats concurrently, failing on the first error.
pub async fn fetch_search(
    api: &dyn StatsApi,
    ticket: &SearchTicket,
) -> Result<SearchResults, ApiError> {
    let username = ticket.username();
    futures::try_join!(api.fetch_user_repos(username), api.fetch_user_stats(username))
}

pub async fn fetch_detail(
    api: &dyn StatsApi,
    ticket: &DetailTicket,
) -> Result<RepositoryDetail, ApiError> {
    api.fetch_repo_details(ticket.username(), ticket.repo()).await
}

/// Run a complete search for the username currently in the search box.
///
/// Returns `false` if the username was blank or a newer search finished the
/// flow first.
pub async fn run_search(state: &Mutex<Dashboard>, api: &dyn StatsApi) -> bool {
    let Some(ticket) = lock_state(state).begin_search() else {
        return false;
    };
    let result = fetch_search(api, &ticket).await;
    lock_state(state).finish_search(&ticket, result)
}

/// Run a complete detail fetch for `repo`.
pub async fn run_detail(state: &Mutex<Dashboard>, api: &dyn StatsApi, repo: &str) -> bool {
    let Some(ticket) = lock_state(state).begin_detail(repo) else {
        return false;
    };
    let result = fetch_detail(api, &ticket).await;
    lock_state(state).finish_detail(&ticket, result)
}

/// Begin a search on the calling thread, then finish it on the tokio
/// runtime and call `on_done`.
///
/// Beginning synchronously lets the caller render the loading state right
/// away. Returns `false` when the username was blank and nothing was spawned.
pub fn spawn_search<F>(state: Arc<Mutex<Dashboard>>, api: Arc<dyn StatsApi>, on_done: F) -> bool
where
    F: FnOnce() + Send + 'static,
{
    let Some(ticket) = lock_state(&state).begin_search() else {
        return false;
    };
    tokio::spawn(async move {
        let result = fetch_search(api.as_ref(), &ticket).await;
        lock_state(&state).finish_search(&ticket, result);
        on_done();
    });
    true
}

/// Begin a repository detail fetch on the calling thread, then finish it on
/// the tokio runtime and call `on_done`.
pub fn spawn_detail<F>(
    state: Arc<Mutex<Dashboard>>,
    api: Arc<dyn StatsApi>,
    repo: &str,
    on_done: F,
) -> bool
where
    F: FnOnce() + Send + 'static,
{
    let Some(ticket) = lock_state(&state).begin_detail(repo) else {
        return false;
    };
    tokio::spawn(async move {
        let result = fetch_detail(api.as_ref(), &ticket).await;
        lock_state(&state).finish_detail(&ticket, result);
        on_done();
    });
    true
}
