use crate::errors::ValidationError;
use crate::models::{CalendarEntry, DailyActivityRecord};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

const MAX_INTENSITY: u8 = 4;
const EFFORT_PER_LEVEL: u64 = 60;

pub fn month_start(year: i32, month: u32) -> Result<NaiveDate, ValidationError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::MonthOutOfRange(i64::from(month)));
    }
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(ValidationError::YearOutOfRange(i64::from(year)))
}

/// Length of the month, found as its last valid day so the final month of
/// the supported calendar range works too.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, ValidationError> {
    month_start(year, month)?;
    (28..=31)
        .rev()
        .find(|day| NaiveDate::from_ymd_opt(year, month, *day).is_some())
        .ok_or(ValidationError::YearOutOfRange(i64::from(year)))
}

/// 0 for an idle day, otherwise one level per started hour of effort, capped at 4.
pub fn intensity(effort_minutes: u64, has_activity: bool) -> u8 {
    if !has_activity {
        return 0;
    }
    let level = (effort_minutes / EFFORT_PER_LEVEL).saturating_add(1);
    level.min(u64::from(MAX_INTENSITY)) as u8
}

/// Builds one entry per day of the month, in day order. Days without a
/// record are reported as idle. Records must belong to the requested month
/// and must not share a date.
pub fn derive_calendar(
    year: i32,
    month: u32,
    records: &[DailyActivityRecord],
) -> Result<Vec<CalendarEntry>, ValidationError> {
    let days = days_in_month(year, month)?;

    let mut by_day: BTreeMap<u32, &DailyActivityRecord> = BTreeMap::new();
    for record in records {
        if record.date.year() != year || record.date.month() != month {
            return Err(ValidationError::RecordOutsideMonth { date: record.date });
        }
        if by_day.insert(record.date.day(), record).is_some() {
            return Err(ValidationError::DuplicateDate { date: record.date });
        }
    }

    let mut calendar = Vec::with_capacity(days as usize);
    for day in 1..=days {
        let entry = match by_day.get(&day) {
            Some(record) => {
                let has_activity = record.has_activity();
                let effort_minutes = record.effort_minutes();
                CalendarEntry {
                    day,
                    has_activity,
                    intensity: intensity(effort_minutes, has_activity),
                    effort_minutes,
                    study_hours: record.study_minutes / 60,
                    record: Some((*record).clone()),
                }
            }
            None => CalendarEntry {
                day,
                has_activity: false,
                intensity: 0,
                effort_minutes: 0,
                study_hours: 0,
                record: None,
            },
        };
        calendar.push(entry);
    }

    Ok(calendar)
}
