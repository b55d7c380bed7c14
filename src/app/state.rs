use crate::api::ApiError;
use crate::plotting::{language_chart_data, timeline_chart_data, LineChartData, PieChartData};
use crate::types::{RepositoryDetail, RepositoryListResponse, RepositorySummary, UserStats};

/// Progress of one request flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Issued when a search starts; only the newest ticket may write results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    username: String,
}

impl SearchTicket {
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Issued when a repository is selected. Outdated by a newer selection or
/// by any new search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    search_generation: u64,
    username: String,
    repo: String,
}

impl DetailTicket {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }
}

/// Results of the two fetches a search performs.
pub type SearchResults = (RepositoryListResponse, UserStats);

/// Main application state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    /// Contents of the search box
    pub username: String,
    /// Set whenever `stats` changes; cleared once charts are redrawn
    pub charts_stale: bool,
    searched_username: String,
    /// Owner of `repositories`; only a finished search changes it
    listed_username: String,
    repositories: Vec<RepositorySummary>,
    stats: Option<UserStats>,
    selected_repo: Option<String>,
    repo_details: Option<RepositoryDetail>,
    search_phase: Phase,
    detail_phase: Phase,
    error: Option<String>,
    search_generation: u64,
    detail_generation: u64,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a search for the username in the search box.
    ///
    /// Returns `None` without touching any state when the trimmed username
    /// is empty.
    pub fn begin_search(&mut self) -> Option<SearchTicket> {
        let username = self.username.trim();
        if username.is_empty() {
            return None;
        }
        let username = username.to_string();

        self.search_generation += 1;
        self.searched_username = username.clone();
        self.selected_repo = None;
        self.repo_details = None;
        self.detail_phase = Phase::Idle;
        self.error = None;
        self.search_phase = Phase::Loading;

        tracing::info!(username = %username, generation = self.search_generation, "Search started");
        Some(SearchTicket {
            generation: self.search_generation,
            username,
        })
    }

    /// Apply the outcome of a search. Returns `false` if a newer search has
    /// started since `ticket` was issued, in which case nothing changes.
    pub fn finish_search(
        &mut self,
        ticket: &SearchTicket,
        result: Result<SearchResults, ApiError>,
    ) -> bool {
        if ticket.generation != self.search_generation {
            tracing::debug!(
                username = %ticket.username,
                generation = ticket.generation,
                current = self.search_generation,
                "Discarding stale search result"
            );
            return false;
        }

        match result {
            Ok((list, stats)) => {
                tracing::info!(
                    username = %ticket.username,
                    repo_count = list.repositories.len(),
                    "Search succeeded"
                );
                self.listed_username = ticket.username.clone();
                self.repositories = list.repositories;
                self.stats = Some(stats);
                self.search_phase = Phase::Success;
            }
            Err(e) => {
                tracing::warn!(username = %ticket.username, error = %e, "Search failed");
                self.error = Some(format!("Failed to fetch data: {}", e.user_message()));
                self.listed_username.clear();
                self.repositories.clear();
                self.stats = None;
                self.search_phase = Phase::Error;
            }
        }
        self.charts_stale = true;
        true
    }

    /// Start fetching the detail of `repo` from the owner of the listed
    /// repositories.
    ///
    /// Returns `None` when no list is shown yet or while a search is
    /// loading, since the list on screen is about to be replaced.
    pub fn begin_detail(&mut self, repo: &str) -> Option<DetailTicket> {
        if self.listed_username.is_empty() || repo.is_empty() {
            return None;
        }
        if self.search_phase == Phase::Loading {
            tracing::debug!(repo = %repo, "Ignoring selection while a search is loading");
            return None;
        }

        self.detail_generation += 1;
        self.repo_details = None;
        self.detail_phase = Phase::Loading;

        tracing::info!(
            username = %self.listed_username,
            repo = %repo,
            generation = self.detail_generation,
            "Repository detail requested"
        );
        Some(DetailTicket {
            generation: self.detail_generation,
            search_generation: self.search_generation,
            username: self.listed_username.clone(),
            repo: repo.to_string(),
        })
    }

    /// Apply the outcome of a detail fetch. A failure only sets the error;
    /// the repository list and stats stay as they are.
    pub fn finish_detail(
        &mut self,
        ticket: &DetailTicket,
        result: Result<RepositoryDetail, ApiError>,
    ) -> bool {
        if ticket.generation != self.detail_generation
            || ticket.search_generation != self.search_generation
        {
            tracing::debug!(repo = %ticket.repo, "Discarding stale repository detail");
            return false;
        }

        match result {
            Ok(detail) => {
                self.repo_details = Some(detail);
                self.selected_repo = Some(ticket.repo.clone());
                self.detail_phase = Phase::Success;
            }
            Err(e) => {
                tracing::warn!(repo = %ticket.repo, error = %e, "Repository detail failed");
                self.error = Some(format!(
                    "Failed to fetch repository details: {}",
                    e.user_message()
                ));
                self.detail_phase = Phase::Error;
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.search_phase == Phase::Loading || self.detail_phase == Phase::Loading
    }

    pub fn search_phase(&self) -> Phase {
        self.search_phase
    }

    pub fn detail_phase(&self) -> Phase {
        self.detail_phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn searched_username(&self) -> &str {
        &self.searched_username
    }

    /// Owner of the repositories currently listed.
    pub fn listed_username(&self) -> &str {
        &self.listed_username
    }

    pub fn repositories(&self) -> &[RepositorySummary] {
        &self.repositories
    }

    pub fn stats(&self) -> Option<&UserStats> {
        self.stats.as_ref()
    }

    pub fn selected_repo(&self) -> Option<&str> {
        self.selected_repo.as_deref()
    }

    pub fn repo_details(&self) -> Option<&RepositoryDetail> {
        self.repo_details.as_ref()
    }

    /// Summary of the selected repository, if it is still in the list.
    pub fn selected_summary(&self) -> Option<&RepositorySummary> {
        let selected = self.selected_repo.as_deref()?;
        self.repositories.iter().find(|repo| repo.name == selected)
    }

    pub fn language_chart(&self) -> Option<PieChartData> {
        language_chart_data(self.stats.as_ref()?.language_distribution.as_ref())
    }

    pub fn timeline_chart(&self) -> Option<LineChartData> {
        timeline_chart_data(self.stats.as_ref().map(|stats| stats.timeline.as_slice()))
    }
}
