use std::fmt::Display;

use anyhow::Result;
use chrono::{DateTime, TimeZone};
use clap::Parser;

use crate::{
    movement::{
        entities::{ActivityType, MovementRecord},
        recorder::MovementRecorder,
        store::MovementStore,
    },
    stats::history::{history_page, DateRange, HistoryFilter},
};

use super::{
    display::{activity_name, day_label, format_minutes, format_time, heading, label, plural},
    local_now,
};

#[derive(Debug, Parser)]
pub struct HistoryCommand {
    #[arg(short, long, help = "Text to look for in activity names and notes")]
    search: Option<String>,
    #[arg(short = 't', long = "type", value_enum, help = "Only show one kind of movement")]
    activity: Option<ActivityType>,
    #[arg(short, long, value_enum, default_value_t = DateRange::All)]
    range: DateRange,
}

impl From<HistoryCommand> for HistoryFilter {
    fn from(HistoryCommand { search, activity, range }: HistoryCommand) -> Self {
        HistoryFilter {
            search,
            activity,
            range,
        }
    }
}

pub async fn process_history_command<S: MovementStore>(
    recorder: &MovementRecorder<S>,
    command: HistoryCommand,
) -> Result<()> {
    let now = local_now(recorder);
    let log = recorder.log().await?;
    print!("{}", render_history(&log, &command.into(), &now));
    Ok(())
}

fn render_history<Tz: TimeZone>(
    log: &[MovementRecord],
    filter: &HistoryFilter,
    now: &DateTime<Tz>,
) -> String
where
    Tz::Offset: Display,
{
    let page = history_page(log, filter, now, label);
    if page.days.is_empty() {
        return "No movements match these filters.\n".into();
    }

    let tz = now.timezone();
    let mut output = format!(
        "{}\n\n",
        heading(&format!(
            "{} · {}",
            plural(page.total_count as u64, "movement", "movements"),
            format_minutes(page.total_minutes)
        ))
    );
    for day in page.days {
        output += &format!(
            "{} ({}, {})\n",
            heading(&day_label(day.date, now)),
            plural(day.count as u64, "movement", "movements"),
            format_minutes(day.total_minutes)
        );
        for record in &day.records {
            output += &format!(
                "  {}  {:>6}  {}\n",
                format_time(&record.created_at, &tz),
                format_minutes(record.duration_minutes as u64),
                activity_name(record.activity)
            );
            if !record.notes.is_empty() {
                output += &format!("                 {}\n", record.notes);
            }
        }
        output += "\n";
    }
    output
}
