use crate::errors::{AppError, ProxyError};
use crate::models::{DaySelection, LogForm, SelectRequest, WeekSelection};
use crate::plan::{self, WeekPlan};
use crate::proxy::{ProxyReply, ReadinessQuery};
use crate::state::AppState;
use crate::tracker::TrackerSnapshot;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.tracker.lock().await.snapshot();
    Html(render_index(&snapshot, plan::weeks()))
}

pub async fn get_state(State(state): State<AppState>) -> Json<TrackerSnapshot> {
    Json(state.tracker.lock().await.snapshot())
}

pub async fn get_plan() -> Json<&'static [WeekPlan]> {
    Json(plan::weeks())
}

pub async fn select(
    State(state): State<AppState>,
    Json(payload): Json<SelectRequest>,
) -> Result<Json<TrackerSnapshot>, AppError> {
    let mut tracker = state.tracker.lock().await;
    if let Some(week) = payload.week {
        tracker.select_week(week)?;
    }
    if let Some(day) = payload.day {
        tracker.select_day(day);
    }
    Ok(Json(tracker.snapshot()))
}

pub async fn submit_log(
    State(state): State<AppState>,
    Json(form): Json<LogForm>,
) -> Result<Json<TrackerSnapshot>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.update_form(form);
    tracker.submit_log().await?;
    Ok(Json(tracker.snapshot()))
}

pub async fn select_week(
    State(state): State<AppState>,
    Form(selection): Form<WeekSelection>,
) -> Result<Redirect, AppError> {
    state.tracker.lock().await.select_week(selection.week)?;
    Ok(Redirect::to("/"))
}

pub async fn select_day(
    State(state): State<AppState>,
    Form(selection): Form<DaySelection>,
) -> Redirect {
    state.tracker.lock().await.select_day(selection.day);
    Redirect::to("/")
}

pub async fn log_day(
    State(state): State<AppState>,
    Form(form): Form<LogForm>,
) -> Result<Redirect, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.update_form(form);
    tracker.submit_log().await?;
    Ok(Redirect::to("/"))
}

pub async fn oura_readiness(
    State(state): State<AppState>,
    Query(query): Query<ReadinessQuery>,
) -> Result<ProxyReply, ProxyError> {
    state.proxy.handle(&query).await
}
