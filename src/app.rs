use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/dashboard", post(handlers::dashboard))
        .route("/api/calendar", post(handlers::calendar))
        .route("/api/streak", post(handlers::streak))
        .route("/api/goals", post(handlers::goals))
        .route("/api/milestones", get(handlers::milestones))
        .with_state(state)
}
