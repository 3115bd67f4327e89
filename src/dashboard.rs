use crate::calendar::{derive_calendar, month_start};
use crate::errors::ValidationError;
use crate::goals::derive_goal_progress;
use crate::models::{
    records_from_payload, CalendarEntry, DailyActivityRecord, GoalProgress, MonthlyGoalSet,
    MonthlyProgressSummary, SnapshotPayload, Streak,
};
use crate::streak::derive_streak;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Everything the dashboard shows for one month, gathered by the caller
/// before aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub year: i32,
    pub month: u32,
    pub goals: MonthlyGoalSet,
    pub summary: Option<MonthlyProgressSummary>,
    pub records: Vec<DailyActivityRecord>,
}

impl DashboardSnapshot {
    /// Maps a backend payload, filling a missing year or month from `today`.
    pub fn from_payload(
        payload: SnapshotPayload,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let year = match payload.year {
            Some(year) => i32::try_from(year).map_err(|_| ValidationError::YearOutOfRange(year))?,
            None => today.year(),
        };
        let month = match payload.month {
            Some(month) => {
                u32::try_from(month).map_err(|_| ValidationError::MonthOutOfRange(month))?
            }
            None => today.month(),
        };
        month_start(year, month)?;

        let goals = match payload.goals {
            Some(goals) => MonthlyGoalSet::try_from(goals)?,
            None => MonthlyGoalSet::default(),
        };
        let summary = payload
            .progress
            .map(MonthlyProgressSummary::try_from)
            .transpose()?;

        Ok(Self {
            year,
            month,
            goals,
            summary,
            records: records_from_payload(payload.activities)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthOverview {
    pub active_days: u32,
    pub total_study_hours: u32,
    pub problems_solved: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TodayProgress {
    pub leetcode: u32,
    pub codechef: u32,
    pub codeforces: u32,
    pub total_solved: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub year: i32,
    pub month: u32,
    pub calendar: Vec<CalendarEntry>,
    pub streak: Streak,
    pub goals: Vec<GoalProgress>,
    pub overview: MonthOverview,
    pub today: TodayProgress,
}

pub fn build_dashboard_at(
    today: NaiveDate,
    snapshot: &DashboardSnapshot,
) -> Result<DashboardView, ValidationError> {
    let calendar = derive_calendar(snapshot.year, snapshot.month, &snapshot.records)?;
    let summary = snapshot.summary.as_ref();

    let overview = MonthOverview {
        active_days: calendar.iter().filter(|entry| entry.has_activity).count() as u32,
        total_study_hours: summary.map_or(0, |summary| summary.total_study_minutes / 60),
        problems_solved: summary.map_or(0, |summary| {
            u64::from(summary.total_leetcode_solved)
                + u64::from(summary.total_codechef_solved)
                + u64::from(summary.total_codeforces_solved)
        }),
    };

    let today = snapshot
        .records
        .iter()
        .find(|record| record.date == today)
        .map(|record| TodayProgress {
            leetcode: record.leetcode_solved,
            codechef: record.codechef_solved,
            codeforces: record.codeforces_solved,
            total_solved: record.problems_solved(),
        })
        .unwrap_or_default();

    Ok(DashboardView {
        year: snapshot.year,
        month: snapshot.month,
        calendar,
        streak: derive_streak(summary),
        goals: derive_goal_progress(&snapshot.goals, summary),
        overview,
        today,
    })
}
