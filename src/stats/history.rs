use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use clap::ValueEnum;

use crate::{
    movement::entities::{ActivityType, MovementRecord},
    utils::time::day_key,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DateRange {
    #[default]
    All,
    Today,
    /// Rolling 7 x 24 hours before now.
    Week,
    /// Rolling 30 x 24 hours before now.
    Month,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Case-insensitive text looked up in the activity label and the notes.
    pub search: Option<String>,
    pub activity: Option<ActivityType>,
    pub range: DateRange,
}

impl HistoryFilter {
    pub fn matches<Tz: TimeZone>(
        &self,
        record: &MovementRecord,
        now: &DateTime<Tz>,
        label: impl Fn(ActivityType) -> &'static str,
    ) -> bool {
        if let Some(search) = self.search.as_deref().filter(|v| !v.is_empty()) {
            let search = search.to_lowercase();
            if !label(record.activity).to_lowercase().contains(&search)
                && !record.notes.to_lowercase().contains(&search)
            {
                return false;
            }
        }

        if matches!(self.activity, Some(activity) if activity != record.activity) {
            return false;
        }

        match self.range {
            DateRange::All => true,
            DateRange::Today => day_key(&record.created_at, &now.timezone()) == now.date_naive(),
            DateRange::Week => record.created_at >= rolling_start(now, Duration::days(7)),
            DateRange::Month => record.created_at >= rolling_start(now, Duration::days(30)),
        }
    }
}

fn rolling_start<Tz: TimeZone>(now: &DateTime<Tz>, window: Duration) -> DateTime<Utc> {
    now.with_timezone(&Utc) - window
}

/// Movements of one calendar day, latest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub records: Vec<MovementRecord>,
    pub count: usize,
    pub total_minutes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryPage {
    pub total_count: usize,
    pub total_minutes: u64,
    pub days: Vec<DayGroup>,
}

/// Movements that pass `filter`, latest first.
pub fn filter_history<'a, Tz: TimeZone>(
    log: &'a [MovementRecord],
    filter: &HistoryFilter,
    now: &DateTime<Tz>,
    label: impl Fn(ActivityType) -> &'static str + Copy,
) -> Vec<&'a MovementRecord> {
    let mut filtered = log
        .iter()
        .filter(|v| filter.matches(v, now, label))
        .collect::<Vec<_>>();
    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    filtered
}

/// Groups movements by their calendar day in `tz`, latest day first.
pub fn group_by_day<'a, Tz: TimeZone>(
    records: impl IntoIterator<Item = &'a MovementRecord>,
    tz: &Tz,
) -> Vec<DayGroup> {
    let mut days = BTreeMap::<NaiveDate, Vec<MovementRecord>>::new();
    for record in records {
        days.entry(day_key(&record.created_at, tz))
            .or_default()
            .push(record.clone());
    }

    days.into_iter()
        .rev()
        .map(|(date, mut records)| {
            records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            DayGroup {
                date,
                count: records.len(),
                total_minutes: records.iter().map(|v| v.duration_minutes as u64).sum(),
                records,
            }
        })
        .collect()
}

pub fn history_page<Tz: TimeZone>(
    log: &[MovementRecord],
    filter: &HistoryFilter,
    now: &DateTime<Tz>,
    label: impl Fn(ActivityType) -> &'static str + Copy,
) -> HistoryPage {
    let filtered = filter_history(log, filter, now, label);
    HistoryPage {
        total_count: filtered.len(),
        total_minutes: filtered.iter().map(|v| v.duration_minutes as u64).sum(),
        days: group_by_day(filtered, &now.timezone()),
    }
}
