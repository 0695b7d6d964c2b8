use std::fmt::Display;

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};

use crate::{
    movement::{entities::MovementRecord, recorder::MovementRecorder, store::MovementStore},
    stats::{
        streaks::current_streak,
        totals::{daily_totals, recent, weekly_totals},
    },
    utils::time::day_key,
};

use super::{
    display::{
        activity_name, day_label, encouragement, format_minutes, format_time, heading, plural,
        short_day_label,
    },
    local_now, Args,
};

const DEFAULT_RECENT_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct DashboardCommand {
    #[arg(
        long,
        short,
        help = "Day to summarize instead of today. Examples are \"yesterday\", \"3 days ago\", \"15/03/2025\""
    )]
    date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

#[derive(Debug, Parser)]
pub struct RecentCommand {
    #[arg(short, long, default_value_t = DEFAULT_RECENT_COUNT, help = "Number of movements to show")]
    count: usize,
}

/// Command to process `dashboard` command. The day summary follows `--date`, the week and the
/// streak are always relative to now.
pub async fn process_dashboard_command<S: MovementStore>(
    recorder: &MovementRecorder<S>,
    DashboardCommand { date, date_style }: DashboardCommand,
) -> Result<()> {
    let now = local_now(recorder);
    let reference = match date.map(|s| parse_date_string(&s, now, date_style.into())) {
        Some(Ok(v)) => v.with_timezone(&Local),
        Some(Err(e)) => {
            return Err(Args::command()
                .error(
                    clap::error::ErrorKind::ValueValidation,
                    format!("Failed to validate date {e}"),
                )
                .into());
        }
        None => now,
    };

    let log = recorder.log().await?;
    print!("{}", render_dashboard(&log, &now, &reference));
    Ok(())
}

pub async fn process_recent_command<S: MovementStore>(
    recorder: &MovementRecorder<S>,
    RecentCommand { count }: RecentCommand,
) -> Result<()> {
    let now = local_now(recorder);
    let log = recorder.log().await?;
    print!("{}", render_recent(&log, &now, count));
    Ok(())
}

fn render_dashboard<Tz: TimeZone>(
    log: &[MovementRecord],
    now: &DateTime<Tz>,
    reference: &DateTime<Tz>,
) -> String
where
    Tz::Offset: Display,
{
    let day = daily_totals(log, reference);
    let week = weekly_totals(log, now);
    let streak = current_streak(log, now);

    let mut output = format!("{}\n", heading("Movement summary"));
    output += &format!(
        "  {:<12}{} · {}\n",
        day_label(reference.date_naive(), now),
        plural(day.count as u64, "movement", "movements"),
        plural(day.total_minutes, "minute", "minutes"),
    );
    output += &format!(
        "  {:<12}{} · {} total\n",
        "This week",
        plural(week.active_day_count as u64, "active day", "active days"),
        plural(week.total_minutes, "minute", "minutes"),
    );
    let streak_note = if streak > 0 { "in a row" } else { "start today" };
    output += &format!(
        "  {:<12}{} {}\n",
        "Streak",
        plural(streak as u64, "day", "days"),
        streak_note
    );
    let (title, message) = encouragement(streak);
    output += &format!("  {title} {message}\n\n");

    output += &render_recent(log, now, DEFAULT_RECENT_COUNT);
    output
}

fn render_recent<Tz: TimeZone>(log: &[MovementRecord], now: &DateTime<Tz>, count: usize) -> String
where
    Tz::Offset: Display,
{
    let mut output = format!("{}\n", heading("Recent activities"));
    let latest = recent(log, count);
    if latest.is_empty() {
        output += "  No movements yet. Record one with `lunomove log walking 10`\n";
        return output;
    }

    let tz = now.timezone();
    for record in latest {
        output += &format!(
            "  {:<10}{}  {}  {}\n",
            short_day_label(day_key(&record.created_at, &tz), now),
            format_time(&record.created_at, &tz),
            format_minutes(record.duration_minutes as u64),
            activity_name(record.activity),
        );
        if !record.notes.is_empty() {
            output += &format!("            {}\n", record.notes);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, FixedOffset, TimeZone};

    use crate::movement::entities::{ActivityType, MovementId, MovementRecord};

    use super::{render_dashboard, render_recent};

    fn zone() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn record(id: u64, at: DateTime<FixedOffset>, activity: ActivityType, minutes: u32) -> MovementRecord {
        MovementRecord {
            id: MovementId::new(id),
            activity,
            duration_minutes: minutes,
            notes: format!("note {id}"),
            created_at: at.to_utc(),
        }
    }

    #[test]
    fn test_dashboard_for_empty_log() {
        let now = zone().with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap();

        let output = render_dashboard(&[], &now, &now);

        assert!(output.contains("0 movements · 0 minutes"));
        assert!(output.contains("0 active days · 0 minutes total"));
        assert!(output.contains("0 days start today"));
        assert!(output.contains("No movements yet"));
    }

    #[test]
    fn test_dashboard_summary() {
        // Wednesday.
        let now = zone().with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap();
        let log = vec![
            record(3, now - Duration::hours(1), ActivityType::Walking, 10),
            record(2, now - Duration::days(1), ActivityType::Stretching, 5),
            record(1, now - Duration::days(10), ActivityType::Dancing, 30),
        ];

        let output = render_dashboard(&log, &now, &now);

        assert!(output.contains("Today"));
        assert!(output.contains("1 movement · 10 minutes"));
        assert!(output.contains("2 active days · 15 minutes total"));
        assert!(output.contains("2 days in a row"));

        let yesterday = now - Duration::days(1);
        let output = render_dashboard(&log, &now, &yesterday);
        assert!(output.contains("Yesterday"));
        assert!(output.contains("1 movement · 5 minutes"));
    }

    #[test]
    fn test_recent_limits_and_shows_notes() {
        let now = zone().with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap();
        let log = (0..8)
            .rev()
            .map(|i| record(i, now - Duration::hours(8 - i as i64), ActivityType::Gardening, 5))
            .collect::<Vec<_>>();

        let output = render_recent(&log, &now, 3);

        assert!(output.contains("note 7"));
        assert!(output.contains("note 5"));
        assert!(!output.contains("note 4"));
        assert!(output.contains("11:00"));
    }
}
