//! # Dashboard Application
//!
//! ```text
//! app/
//! ├── state.rs  - Dashboard state machine and request tickets
//! ├── tasks.rs  - async search and detail flows
//! └── ui.rs     - egui rendering and the eframe entry point
//! ```

pub mod state;
pub mod tasks;
pub mod ui;

pub use state::{Dashboard, DetailTicket, Phase, SearchResults, SearchTicket};
pub use tasks::{run_detail, run_search, spawn_detail, spawn_search};
pub use ui::DashboardApp;
