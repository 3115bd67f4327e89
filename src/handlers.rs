use crate::calendar::derive_calendar;
use crate::dashboard::{build_dashboard_at, DashboardSnapshot, DashboardView};
use crate::errors::{AppError, ValidationError};
use crate::goals::derive_goal_progress;
use crate::models::{
    records_from_payload, CalendarEntry, CalendarRequest, GoalProgress, GoalsRequest,
    MonthlyGoalSet, MonthlyProgressSummary, ProgressPayload, SnapshotPayload, Streak,
};
use crate::state::AppState;
use crate::streak::{derive_streak, MILESTONES};
use axum::{body::Bytes, extract::State, Json};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn milestones() -> Json<[u32; 7]> {
    Json(MILESTONES)
}

pub async fn dashboard(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DashboardView>, AppError> {
    let payload: SnapshotPayload = parse_body(&body)?.unwrap_or_default();
    let today = state.today();
    let snapshot = DashboardSnapshot::from_payload(payload, today)?;
    debug!(
        year = snapshot.year,
        month = snapshot.month,
        records = snapshot.records.len(),
        has_summary = snapshot.summary.is_some(),
        "building dashboard"
    );

    Ok(Json(build_dashboard_at(today, &snapshot)?))
}

pub async fn calendar(body: Bytes) -> Result<Json<Vec<CalendarEntry>>, AppError> {
    let request: CalendarRequest =
        parse_body(&body)?.ok_or_else(|| AppError::bad_request("request body is required"))?;
    let year =
        i32::try_from(request.year).map_err(|_| ValidationError::YearOutOfRange(request.year))?;
    let month = u32::try_from(request.month)
        .map_err(|_| ValidationError::MonthOutOfRange(request.month))?;
    let records = records_from_payload(request.activities)?;
    debug!(year, month, records = records.len(), "deriving calendar");

    Ok(Json(derive_calendar(year, month, &records)?))
}

pub async fn streak(body: Bytes) -> Result<Json<Streak>, AppError> {
    let summary = parse_body::<ProgressPayload>(&body)?
        .map(MonthlyProgressSummary::try_from)
        .transpose()?;

    Ok(Json(derive_streak(summary.as_ref())))
}

pub async fn goals(body: Bytes) -> Result<Json<Vec<GoalProgress>>, AppError> {
    let request: GoalsRequest = parse_body(&body)?.unwrap_or_default();
    let goals = match request.goals {
        Some(goals) => MonthlyGoalSet::try_from(goals)?,
        None => MonthlyGoalSet::default(),
    };
    let summary = request
        .progress
        .map(MonthlyProgressSummary::try_from)
        .transpose()?;

    Ok(Json(derive_goal_progress(&goals, summary.as_ref())))
}

/// An empty body or a JSON `null` both mean "nothing supplied".
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(serde_json::from_slice::<Option<T>>(body)?)
}
