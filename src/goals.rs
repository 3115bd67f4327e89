use crate::models::{GoalProgress, MonthlyGoalSet, MonthlyProgressSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalCategory {
    Study,
    Leetcode,
    Codechef,
    Codeforces,
    Contests,
    CareerMilestones,
}

impl GoalCategory {
    /// Display order.
    pub const ALL: [GoalCategory; 6] = [
        GoalCategory::Study,
        GoalCategory::Leetcode,
        GoalCategory::Codechef,
        GoalCategory::Codeforces,
        GoalCategory::Contests,
        GoalCategory::CareerMilestones,
    ];

    pub fn key(self) -> &'static str {
        match self {
            GoalCategory::Study => "daily_study_minutes",
            GoalCategory::Leetcode => "leetcode_problems",
            GoalCategory::Codechef => "codechef_problems",
            GoalCategory::Codeforces => "codeforces_problems",
            GoalCategory::Contests => "contest_participation",
            GoalCategory::CareerMilestones => "career_milestones",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GoalCategory::Study => "Daily Study",
            GoalCategory::Leetcode => "LeetCode Problems",
            GoalCategory::Codechef => "CodeChef Problems",
            GoalCategory::Codeforces => "Codeforces Problems",
            GoalCategory::Contests => "Contest Participation",
            GoalCategory::CareerMilestones => "Career Milestones",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            GoalCategory::Study => "minutes",
            GoalCategory::Leetcode | GoalCategory::Codechef | GoalCategory::Codeforces => {
                "problems"
            }
            GoalCategory::Contests => "contests",
            GoalCategory::CareerMilestones => "milestones",
        }
    }

    pub fn target(self, goals: &MonthlyGoalSet) -> u32 {
        match self {
            GoalCategory::Study => goals.daily_study_minutes,
            GoalCategory::Leetcode => goals.leetcode_problems,
            GoalCategory::Codechef => goals.codechef_problems,
            GoalCategory::Codeforces => goals.codeforces_problems,
            GoalCategory::Contests => goals.contest_participation,
            GoalCategory::CareerMilestones => goals.career_milestones,
        }
    }

    pub fn current(self, summary: &MonthlyProgressSummary) -> u32 {
        match self {
            GoalCategory::Study => summary.total_study_minutes,
            GoalCategory::Leetcode => summary.total_leetcode_solved,
            GoalCategory::Codechef => summary.total_codechef_solved,
            GoalCategory::Codeforces => summary.total_codeforces_solved,
            GoalCategory::Contests => summary.total_contests_participated,
            GoalCategory::CareerMilestones => summary.total_career_milestones,
        }
    }
}

/// Rounded half up and capped at 100. An unset goal (target 0) is always 0%.
pub fn progress_percent(current: u32, target: u32) -> u8 {
    if target == 0 {
        return 0;
    }
    let current = u64::from(current);
    let target = u64::from(target);
    let rounded = (200 * current + target) / (2 * target);
    rounded.min(100) as u8
}

pub fn derive_goal_progress(
    goals: &MonthlyGoalSet,
    summary: Option<&MonthlyProgressSummary>,
) -> Vec<GoalProgress> {
    GoalCategory::ALL
        .iter()
        .map(|category| {
            let target = category.target(goals);
            let current = summary.map_or(0, |summary| category.current(summary));
            GoalProgress {
                key: category.key(),
                name: category.name(),
                unit: category.unit(),
                target,
                current,
                progress_percent: progress_percent(current, target),
            }
        })
        .collect()
}
