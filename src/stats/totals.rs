use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    movement::entities::MovementRecord,
    utils::time::{day_key, start_of_week},
};

use super::streaks::active_dates;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayTotals {
    pub count: usize,
    pub total_minutes: u64,
}

impl DayTotals {
    fn add(mut self, record: &MovementRecord) -> Self {
        self.count += 1;
        self.total_minutes += record.duration_minutes as u64;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekTotals {
    pub total_minutes: u64,
    pub active_day_count: usize,
}

/// Per active day averages, rounded to whole numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyAverages {
    pub minutes: u64,
    pub activities: u64,
}

/// Movements logged on `reference`'s calendar day, in `reference`'s time zone.
pub fn daily_totals<Tz: TimeZone>(log: &[MovementRecord], reference: &DateTime<Tz>) -> DayTotals {
    let tz = reference.timezone();
    let day = reference.date_naive();
    log.iter()
        .filter(|v| day_key(&v.created_at, &tz) == day)
        .fold(DayTotals::default(), DayTotals::add)
}

/// Movements since the start of the current week (Sunday midnight).
pub fn weekly_totals<Tz: TimeZone>(log: &[MovementRecord], now: &DateTime<Tz>) -> WeekTotals {
    let tz = now.timezone();
    let week_start = start_of_week(now).with_timezone(&Utc);

    let mut days = BTreeSet::new();
    let mut total_minutes = 0u64;
    for record in log.iter().filter(|v| v.created_at >= week_start) {
        total_minutes += record.duration_minutes as u64;
        days.insert(day_key(&record.created_at, &tz));
    }

    WeekTotals {
        total_minutes,
        active_day_count: days.len(),
    }
}

pub fn total_minutes(log: &[MovementRecord]) -> u64 {
    log.iter().map(|v| v.duration_minutes as u64).sum()
}

pub fn active_days<Tz: TimeZone>(log: &[MovementRecord], tz: &Tz) -> usize {
    active_dates(log, tz).len()
}

/// Averages over every active day in the log. Zero when nothing was logged.
pub fn averages_per_active_day<Tz: TimeZone>(log: &[MovementRecord], tz: &Tz) -> DailyAverages {
    let days = active_days(log, tz) as u64;
    if days == 0 {
        return DailyAverages::default();
    }
    DailyAverages {
        minutes: rounded_div(total_minutes(log), days),
        activities: rounded_div(log.len() as u64, days),
    }
}

/// Number of movements logged at or after `since`.
pub fn count_since(log: &[MovementRecord], since: DateTime<Utc>) -> usize {
    log.iter().filter(|v| v.created_at >= since).count()
}

/// The `count` latest movements of a newest first log.
pub fn recent(log: &[MovementRecord], count: usize) -> &[MovementRecord] {
    &log[..count.min(log.len())]
}

/// Integer division rounding halves up. `divisor` must not be 0.
pub(crate) fn rounded_div(value: u64, divisor: u64) -> u64 {
    (value * 2 + divisor) / (divisor * 2)
}
