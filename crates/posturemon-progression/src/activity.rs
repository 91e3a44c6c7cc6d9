//! When quests get completed.
//!
//! Feeds the time-of-day and weekend achievements without keeping an
//! unbounded completion log.

use chrono::{DateTime, Datelike, Days, Timelike, Utc, Weekday};
use posturemon_types::{HourWindow, QuestActivity, WeekendCoverage};

/// Record one quest completion at `at`.
pub fn record_quest_activity(activity: &mut QuestActivity, at: DateTime<Utc>) {
    let count = activity.completions_by_hour.entry(at.hour()).or_insert(0);
    *count = count.saturating_add(1);

    let date = at.date_naive();
    let saturday_of = match date.weekday() {
        Weekday::Sat => date,
        Weekday::Sun => match date.checked_sub_days(Days::new(1)) {
            Some(saturday) => saturday,
            None => return,
        },
        _ => return,
    };

    let mut coverage = match activity.weekend {
        Some(existing) if existing.saturday_of == saturday_of => existing,
        _ => WeekendCoverage {
            saturday_of,
            saturday: false,
            sunday: false,
        },
    };
    if date == saturday_of {
        coverage.saturday = true;
    } else {
        coverage.sunday = true;
    }
    activity.weekend = Some(coverage);
    activity.best_weekend_days = activity.best_weekend_days.max(weekend_days(coverage));
}

/// Completions whose UTC hour falls inside `window`.
pub fn completions_in_window(activity: &QuestActivity, window: HourWindow) -> u32 {
    activity
        .completions_by_hour
        .iter()
        .filter(|(hour, _)| window.contains(**hour))
        .fold(0_u32, |acc, (_, count)| acc.saturating_add(*count))
}

/// Most days (0--2) of a single weekend with a completion.
pub const fn weekend_days_covered(activity: &QuestActivity) -> u32 {
    activity.best_weekend_days
}

fn weekend_days(coverage: WeekendCoverage) -> u32 {
    u32::from(coverage.saturday).saturating_add(u32::from(coverage.sunday))
}
