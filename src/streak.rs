use crate::models::{MonthlyProgressSummary, Streak};

pub const MILESTONES: [u32; 7] = [7, 14, 30, 50, 100, 200, 365];

// Past the last fixed milestone, the next one is always this far ahead.
const MILESTONE_STEP: u32 = 50;

pub fn next_milestone(current: u32) -> u32 {
    MILESTONES
        .iter()
        .copied()
        .find(|milestone| *milestone > current)
        .unwrap_or_else(|| current.saturating_add(MILESTONE_STEP))
}

/// Streak counters come from the backend as-is; only the milestone figures
/// are derived here. Without a summary everything starts from zero.
pub fn derive_streak(summary: Option<&MonthlyProgressSummary>) -> Streak {
    let current = summary.map_or(0, |summary| summary.current_streak);
    let best = summary
        .and_then(|summary| summary.best_streak)
        .map_or(current, |best| best.max(current));
    let next = next_milestone(current);
    let milestone_progress_percent = (u64::from(current) * 100 / u64::from(next)).min(100) as u8;

    Streak {
        current,
        best,
        next_milestone: next,
        milestone_progress_percent,
        encouragement: if current == 0 {
            "Start your coding journey today!"
        } else {
            "Keep your momentum going!"
        },
    }
}
