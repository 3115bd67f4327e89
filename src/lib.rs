pub mod app;
pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod goals;
pub mod handlers;
pub mod models;
pub mod state;
pub mod streak;

pub use app::router;
pub use calendar::derive_calendar;
pub use config::Config;
pub use dashboard::{build_dashboard_at, DashboardSnapshot, DashboardView};
pub use goals::derive_goal_progress;
pub use state::AppState;
pub use streak::derive_streak;
