use egui::{Color32, Context, RichText, TextureHandle};
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::state::{Dashboard, Phase};
use super::tasks::{self, lock_state};
use crate::api::StatsApi;
use crate::plotting::{ChartError, ChartRenderer};
use crate::types::{RepositoryDetail, RepositorySummary, UserStats};
use crate::utils::format_date;

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const MAX_CONTRIBUTORS: usize = 10;
const MAX_COMMITS: usize = 10;

/// Something the user asked for while the state lock was held.
///
/// Actions are collected during drawing and dispatched afterwards so that
/// no request is spawned from inside the lock.
#[derive(Debug, Clone, PartialEq)]
enum UiAction {
    Search,
    SelectRepository(String),
    OpenUrl(String),
}

#[derive(Default)]
struct ChartTextures {
    language: Option<TextureHandle>,
    timeline: Option<TextureHandle>,
}

/// The eframe application: shared dashboard state plus the handles needed to
/// fetch from the backend and draw charts.
pub struct DashboardApp {
    state: Arc<Mutex<Dashboard>>,
    api: Arc<dyn StatsApi>,
    renderer: ChartRenderer,
    textures: ChartTextures,
}

impl DashboardApp {
    pub fn new(api: Arc<dyn StatsApi>, renderer: ChartRenderer) -> Self {
        Self {
            state: Arc::new(Mutex::new(Dashboard::new())),
            api,
            renderer,
            textures: ChartTextures::default(),
        }
    }

    pub fn state(&self) -> Arc<Mutex<Dashboard>> {
        Arc::clone(&self.state)
    }

    /// Fill the search box with `username` and start a search.
    pub fn search_for(&self, username: &str, ctx: &Context) {
        lock_state(&self.state).username = username.to_string();
        self.dispatch(UiAction::Search, ctx);
    }

    fn dispatch(&self, action: UiAction, ctx: &Context) {
        match action {
            UiAction::Search => {
                let repaint = ctx.clone();
                tasks::spawn_search(Arc::clone(&self.state), Arc::clone(&self.api), move || {
                    repaint.request_repaint()
                });
            }
            UiAction::SelectRepository(repo) => {
                let repaint = ctx.clone();
                tasks::spawn_detail(
                    Arc::clone(&self.state),
                    Arc::clone(&self.api),
                    &repo,
                    move || repaint.request_repaint(),
                );
            }
            UiAction::OpenUrl(url) => {
                if let Err(e) = open::that(&url) {
                    tracing::warn!(url = %url, error = %e, "Failed to open browser");
                }
            }
        }
        ctx.request_repaint();
    }

    /// Re-render both charts from the current state and upload them.
    fn refresh_charts(&mut self, state: &Dashboard, ctx: &Context) {
        self.textures.language = state.language_chart().and_then(|data| {
            load_chart_texture(ctx, "language_chart", self.renderer.render_language_pie(&data))
        });
        self.textures.timeline = state.timeline_chart().and_then(|data| {
            load_chart_texture(ctx, "timeline_chart", self.renderer.render_timeline(&data))
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let shared = Arc::clone(&self.state);
        let actions = {
            let mut state = lock_state(&shared);
            if state.charts_stale {
                self.refresh_charts(&state, ctx);
                state.charts_stale = false;
            }
            draw_ui(&mut state, ctx, &self.textures)
        };

        for action in actions {
            self.dispatch(action, ctx);
        }
    }
}

fn load_chart_texture(
    ctx: &Context,
    name: &str,
    rendered: Result<std::path::PathBuf, ChartError>,
) -> Option<TextureHandle> {
    let path = match rendered {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(chart = name, error = %e, "Chart rendering failed");
            return None;
        }
    };
    load_texture(ctx, name, &path)
}

fn load_texture(ctx: &Context, name: &str, path: &Path) -> Option<TextureHandle> {
    match image::open(path) {
        Ok(image) => {
            let size = [image.width() as usize, image.height() as usize];
            let pixels = image.to_rgba8();
            let pixels = pixels.as_flat_samples();
            Some(ctx.load_texture(
                name,
                egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()),
                egui::TextureOptions::LINEAR,
            ))
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to load chart image");
            None
        }
    }
}

fn draw_ui(state: &mut Dashboard, ctx: &Context, textures: &ChartTextures) -> Vec<UiAction> {
    let mut actions = Vec::new();

    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("CrispHub Analytics");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let can_search = search_enabled(state);
                let clicked = ui
                    .add_enabled(can_search, egui::Button::new("Search"))
                    .clicked();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.username)
                        .hint_text("Enter GitHub username")
                        .desired_width(240.0),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if can_search && (clicked || submitted) {
                    actions.push(UiAction::Search);
                }
            });
        });
    });

    if state.selected_repo().is_some() || state.detail_phase() != Phase::Idle {
        egui::SidePanel::right("repository_detail")
            .min_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    draw_detail_panel(ui, state, &mut actions);
                });
            });
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        if state.search_phase() == Phase::Loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading...");
            });
        }
        if let Some(error) = state.error() {
            ui.colored_label(ERROR_COLOR, error);
        }

        let Some(stats) = state.stats() else {
            if state.search_phase() == Phase::Idle {
                ui.label("Search for a GitHub user to see their repositories.");
            }
            return;
        };

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading(state.listed_username());
            draw_summary(ui, stats);
            ui.separator();

            ui.columns(2, |columns| {
                draw_chart(
                    &mut columns[0],
                    "Language Distribution",
                    textures.language.as_ref(),
                    "No language data available",
                );
                draw_chart(
                    &mut columns[1],
                    "Repository Timeline",
                    textures.timeline.as_ref(),
                    "No timeline data available",
                );
            });
            ui.separator();

            ui.heading(format!("Repositories ({})", state.repositories().len()));
            for repo in state.repositories() {
                let selected = state.selected_repo() == Some(repo.name.as_str());
                if draw_repository_row(ui, repo, selected) {
                    actions.push(UiAction::SelectRepository(repo.name.clone()));
                }
            }
        });
    });

    actions
}

/// Button and Enter key share this gate.
fn search_enabled(state: &Dashboard) -> bool {
    !state.is_loading()
}

fn draw_summary(ui: &mut egui::Ui, stats: &UserStats) {
    ui.horizontal_wrapped(|ui| {
        stat_card(ui, "Repositories", stats.repo_count.to_string());
        stat_card(ui, "Stars", stats.total_stars.to_string());
        stat_card(ui, "Forks", stats.total_forks.to_string());
        stat_card(ui, "Avg stars", format!("{:.1}", stats.avg_stars));
        stat_card(ui, "Avg forks", format!("{:.1}", stats.avg_forks));
    });

    if !stats.top_topics.is_empty() {
        let topics: Vec<String> = stats
            .top_topics
            .iter()
            .map(|(topic, count)| format!("{} ({})", topic, count))
            .collect();
        ui.label(format!("Top topics: {}", topics.join(", ")));
    }
    if !stats.repos_by_stars.is_empty() {
        let starred: Vec<String> = stats
            .repos_by_stars
            .iter()
            .map(|repo| format!("{} ★{}", repo.name, repo.stars))
            .collect();
        ui.label(format!("Most starred: {}", starred.join(", ")));
    }
}

fn stat_card(ui: &mut egui::Ui, title: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(value).heading().strong());
            ui.weak(title);
        });
    });
}

fn draw_chart(ui: &mut egui::Ui, title: &str, texture: Option<&TextureHandle>, empty: &str) {
    ui.strong(title);
    match texture {
        Some(texture) => {
            ui.add(egui::Image::from_texture(texture).shrink_to_fit());
        }
        None => {
            ui.weak(empty);
        }
    }
}

/// Returns `true` when the row was clicked.
fn draw_repository_row(ui: &mut egui::Ui, repo: &RepositorySummary, selected: bool) -> bool {
    let clicked = ui.selectable_label(selected, RichText::new(repo.name.as_str()).strong()).clicked();
    if let Some(description) = &repo.description {
        ui.label(description.as_str());
    }
    ui.horizontal(|ui| {
        if let Some(language) = &repo.language {
            ui.weak(language.as_str());
        }
        ui.weak(format!("★ {}", repo.stars));
        ui.weak(format!("Forks {}", repo.forks));
        if let Some(updated) = &repo.updated_at {
            ui.weak(format!("Updated {}", format_date(updated)));
        }
    });
    ui.add_space(4.0);
    clicked
}

fn draw_detail_panel(ui: &mut egui::Ui, state: &Dashboard, actions: &mut Vec<UiAction>) {
    match (state.detail_phase(), state.repo_details()) {
        (Phase::Loading, _) => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading repository...");
            });
        }
        (_, Some(detail)) => draw_detail(ui, detail),
        _ => {
            if let Some(repo) = state.selected_repo() {
                ui.heading(repo);
            }
        }
    }

    if let Some(url) = state.selected_summary().and_then(|repo| repo.url.clone()) {
        ui.separator();
        if ui.button("Open on GitHub").clicked() {
            actions.push(UiAction::OpenUrl(url));
        }
    }
}

fn draw_detail(ui: &mut egui::Ui, detail: &RepositoryDetail) {
    ui.heading(detail.name.as_str());
    if let Some(full_name) = &detail.full_name {
        ui.weak(full_name.as_str());
    }
    if let Some(description) = &detail.description {
        ui.label(description.as_str());
    }
    ui.separator();

    egui::Grid::new("repository_facts")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            let facts = [
                ("Stars", detail.stars.to_string()),
                ("Forks", detail.forks.to_string()),
                ("Open issues", detail.open_issues.to_string()),
                (
                    "Created",
                    detail.created_at.as_deref().map(format_date).unwrap_or_default(),
                ),
                (
                    "Updated",
                    detail.updated_at.as_deref().map(format_date).unwrap_or_default(),
                ),
            ];
            for (name, value) in facts {
                ui.label(name);
                ui.label(value);
                ui.end_row();
            }
        });

    if !detail.languages.is_empty() {
        ui.separator();
        ui.strong("Languages");
        let total = detail.languages.total().max(1) as f64;
        for (language, bytes) in detail.languages.iter() {
            ui.label(format!("{} {:.1}%", language, bytes as f64 * 100.0 / total));
        }
    }

    if !detail.topics.is_empty() {
        ui.separator();
        ui.label(format!("Topics: {}", detail.topics.join(", ")));
    }

    if !detail.contributors.is_empty() {
        ui.separator();
        ui.strong("Contributors");
        for contributor in detail.contributors.iter().take(MAX_CONTRIBUTORS) {
            ui.label(format!(
                "{} ({} contributions)",
                contributor.login, contributor.contributions
            ));
        }
    }

    if !detail.recent_commits.is_empty() {
        ui.separator();
        ui.strong("Recent commits");
        for commit in detail.recent_commits.iter().take(MAX_COMMITS) {
            ui.horizontal_wrapped(|ui| {
                ui.monospace(commit.short_sha());
                ui.label(commit.headline());
            });
            let author = commit.author.as_deref().unwrap_or("unknown");
            match commit.date.as_deref() {
                Some(date) => ui.weak(format!("{} on {}", author, format_date(date))),
                None => ui.weak(author),
            };
        }
    }
}
