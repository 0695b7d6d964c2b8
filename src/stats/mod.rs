//! Statistics derived from the movement log.
//!
//! Every function here is pure: it reads a snapshot of the log (newest first) together with
//! the reference time it should be evaluated at, and builds its result from scratch. Calendar
//! days are always taken in the time zone of the reference time (or the zone passed in), through
//! [day_key](crate::utils::time::day_key).

pub mod history;
pub mod patterns;
pub mod streaks;
pub mod totals;

use chrono::{DateTime, Duration, TimeZone, Utc, Weekday};
use tracing::trace;

use crate::movement::entities::MovementRecord;

use patterns::{
    favorite_activity, most_active_weekday, peak_hour, type_aggregates, FavoriteActivity,
    TypeAggregates,
};
use streaks::{current_streak, longest_streak};
use totals::{
    active_days, averages_per_active_day, count_since, daily_totals, total_minutes,
    weekly_totals, DailyAverages, DayTotals, WeekTotals,
};

/// Everything the dashboard and the insights show, computed for one moment.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    pub today: DayTotals,
    pub week: WeekTotals,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_activities: usize,
    pub total_minutes: u64,
    pub active_days: usize,
    pub averages: DailyAverages,
    pub favorite: Option<FavoriteActivity>,
    pub peak_hour: Option<u32>,
    pub most_active_weekday: Option<Weekday>,
    pub type_aggregates: TypeAggregates,
    pub last_7_days: usize,
    pub last_30_days: usize,
}

pub fn derive_view<Tz: TimeZone>(log: &[MovementRecord], now: &DateTime<Tz>) -> DerivedView {
    let tz = now.timezone();
    let now_utc = now.with_timezone(&Utc);
    trace!("Deriving statistics from {} movements", log.len());

    DerivedView {
        today: daily_totals(log, now),
        week: weekly_totals(log, now),
        current_streak: current_streak(log, now),
        longest_streak: longest_streak(log, &tz),
        total_activities: log.len(),
        total_minutes: total_minutes(log),
        active_days: active_days(log, &tz),
        averages: averages_per_active_day(log, &tz),
        favorite: favorite_activity(log),
        peak_hour: peak_hour(log, &tz),
        most_active_weekday: most_active_weekday(log, &tz),
        type_aggregates: type_aggregates(log),
        last_7_days: count_since(log, now_utc - Duration::days(7)),
        last_30_days: count_since(log, now_utc - Duration::days(30)),
    }
}
