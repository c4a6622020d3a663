use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/select/week", post(handlers::select_week))
        .route("/select/day", post(handlers::select_day))
        .route("/log", post(handlers::log_day))
        .route("/api/state", get(handlers::get_state))
        .route("/api/plan", get(handlers::get_plan))
        .route("/api/select", post(handlers::select))
        .route("/api/log", post(handlers::submit_log))
        .route("/api/oura-readiness", get(handlers::oura_readiness))
        .with_state(state)
}
