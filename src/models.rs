use crate::errors::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of tracked activity. At most one per calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyActivityRecord {
    #[serde(rename = "activity_date")]
    pub date: NaiveDate,
    pub study_minutes: u32,
    pub leetcode_solved: u32,
    pub codechef_solved: u32,
    pub codeforces_solved: u32,
    pub contests_participated: u32,
    pub career_milestones_completed: u32,
}

#[cfg(test)]
impl DailyActivityRecord {
    pub(crate) fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            study_minutes: 0,
            leetcode_solved: 0,
            codechef_solved: 0,
            codeforces_solved: 0,
            contests_participated: 0,
            career_milestones_completed: 0,
        }
    }
}

impl DailyActivityRecord {
    pub fn has_activity(&self) -> bool {
        self.study_minutes > 0
            || self.leetcode_solved > 0
            || self.codechef_solved > 0
            || self.codeforces_solved > 0
            || self.contests_participated > 0
            || self.career_milestones_completed > 0
    }

    /// Minutes-equivalent effort: study minutes plus 30 per problem,
    /// 120 per contest and 60 per career milestone.
    pub fn effort_minutes(&self) -> u64 {
        u64::from(self.study_minutes)
            + 30 * self.problems_solved()
            + 120 * u64::from(self.contests_participated)
            + 60 * u64::from(self.career_milestones_completed)
    }

    pub fn problems_solved(&self) -> u64 {
        u64::from(self.leetcode_solved)
            + u64::from(self.codechef_solved)
            + u64::from(self.codeforces_solved)
    }
}

/// Monthly targets. Zero means no goal was set for that category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyGoalSet {
    pub daily_study_minutes: u32,
    pub leetcode_problems: u32,
    pub codechef_problems: u32,
    pub codeforces_problems: u32,
    pub contest_participation: u32,
    pub career_milestones: u32,
}

/// Backend-computed month totals and streak figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyProgressSummary {
    pub current_streak: u32,
    pub best_streak: Option<u32>,
    pub total_study_minutes: u32,
    pub total_leetcode_solved: u32,
    pub total_codechef_solved: u32,
    pub total_codeforces_solved: u32,
    pub total_contests_participated: u32,
    pub total_career_milestones: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEntry {
    pub day: u32,
    pub has_activity: bool,
    pub intensity: u8,
    pub effort_minutes: u64,
    pub study_hours: u32,
    pub record: Option<DailyActivityRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    pub key: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub target: u32,
    pub current: u32,
    pub progress_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
    pub next_milestone: u32,
    pub milestone_progress_percent: u8,
    pub encouragement: &'static str,
}

// Wire payloads, as the tracker backend sends them. Every count is optional
// and signed so that negatives are reported instead of failing to parse.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GoalsPayload {
    pub daily_study_minutes: Option<i64>,
    pub leetcode_problems: Option<i64>,
    pub codechef_problems: Option<i64>,
    pub codeforces_problems: Option<i64>,
    pub contest_participation: Option<i64>,
    pub career_milestones: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProgressPayload {
    pub current_streak: Option<i64>,
    pub best_streak: Option<i64>,
    pub total_study_minutes: Option<i64>,
    pub total_leetcode_solved: Option<i64>,
    pub total_codechef_solved: Option<i64>,
    pub total_codeforces_solved: Option<i64>,
    pub total_contests_participated: Option<i64>,
    pub total_career_milestones: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivityPayload {
    pub activity_date: String,
    #[serde(default)]
    pub study_minutes: Option<i64>,
    #[serde(default)]
    pub leetcode_solved: Option<i64>,
    #[serde(default)]
    pub codechef_solved: Option<i64>,
    #[serde(default)]
    pub codeforces_solved: Option<i64>,
    #[serde(default)]
    pub contests_participated: Option<i64>,
    #[serde(default)]
    pub career_milestones_completed: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SnapshotPayload {
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub goals: Option<GoalsPayload>,
    pub progress: Option<ProgressPayload>,
    pub activities: Vec<ActivityPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarRequest {
    pub year: i64,
    pub month: i64,
    #[serde(default)]
    pub activities: Vec<ActivityPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GoalsRequest {
    pub goals: Option<GoalsPayload>,
    pub progress: Option<ProgressPayload>,
}

fn count(field: &'static str, value: Option<i64>) -> Result<u32, ValidationError> {
    let value = value.unwrap_or(0);
    if value < 0 {
        return Err(ValidationError::NegativeCount { field });
    }
    u32::try_from(value).map_err(|_| ValidationError::CountOverflow { field })
}

/// Accepts a bare `YYYY-MM-DD` or a timestamp starting with one, separated
/// from the time by `T` or a space.
pub fn parse_activity_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    let day_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        value: value.to_string(),
    })
}

impl TryFrom<GoalsPayload> for MonthlyGoalSet {
    type Error = ValidationError;

    fn try_from(payload: GoalsPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            daily_study_minutes: count("daily_study_minutes", payload.daily_study_minutes)?,
            leetcode_problems: count("leetcode_problems", payload.leetcode_problems)?,
            codechef_problems: count("codechef_problems", payload.codechef_problems)?,
            codeforces_problems: count("codeforces_problems", payload.codeforces_problems)?,
            contest_participation: count("contest_participation", payload.contest_participation)?,
            career_milestones: count("career_milestones", payload.career_milestones)?,
        })
    }
}

impl TryFrom<ProgressPayload> for MonthlyProgressSummary {
    type Error = ValidationError;

    fn try_from(payload: ProgressPayload) -> Result<Self, Self::Error> {
        let best_streak = match payload.best_streak {
            Some(value) => Some(count("best_streak", Some(value))?),
            None => None,
        };

        Ok(Self {
            current_streak: count("current_streak", payload.current_streak)?,
            best_streak,
            total_study_minutes: count("total_study_minutes", payload.total_study_minutes)?,
            total_leetcode_solved: count("total_leetcode_solved", payload.total_leetcode_solved)?,
            total_codechef_solved: count("total_codechef_solved", payload.total_codechef_solved)?,
            total_codeforces_solved: count(
                "total_codeforces_solved",
                payload.total_codeforces_solved,
            )?,
            total_contests_participated: count(
                "total_contests_participated",
                payload.total_contests_participated,
            )?,
            total_career_milestones: count(
                "total_career_milestones",
                payload.total_career_milestones,
            )?,
        })
    }
}

impl TryFrom<ActivityPayload> for DailyActivityRecord {
    type Error = ValidationError;

    fn try_from(payload: ActivityPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_activity_date(&payload.activity_date)?,
            study_minutes: count("study_minutes", payload.study_minutes)?,
            leetcode_solved: count("leetcode_solved", payload.leetcode_solved)?,
            codechef_solved: count("codechef_solved", payload.codechef_solved)?,
            codeforces_solved: count("codeforces_solved", payload.codeforces_solved)?,
            contests_participated: count("contests_participated", payload.contests_participated)?,
            career_milestones_completed: count(
                "career_milestones_completed",
                payload.career_milestones_completed,
            )?,
        })
    }
}

pub fn records_from_payload(
    activities: Vec<ActivityPayload>,
) -> Result<Vec<DailyActivityRecord>, ValidationError> {
    activities
        .into_iter()
        .map(DailyActivityRecord::try_from)
        .collect()
}
