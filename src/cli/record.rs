use anyhow::Result;
use chrono::{DateTime, TimeZone};
use clap::{CommandFactory, Parser};

use crate::{
    movement::{
        entities::{ActivityType, MovementRecord, NewMovement},
        recorder::MovementRecorder,
        store::MovementStore,
    },
    stats::totals::daily_totals,
};

use super::{
    display::{activity_name, format_minutes, plural},
    local_now, Args,
};

#[derive(Debug, Parser)]
pub struct RecordCommand {
    #[arg(value_enum, help = "Kind of movement")]
    activity: ActivityType,
    #[arg(
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Duration in minutes. A rough estimate is fine, most movements take 1 to 480 minutes"
    )]
    minutes: u32,
    #[arg(short, long, default_value = "", help = "Optional notes, up to 200 characters")]
    notes: String,
}

/// Command to process `log` command. Stores the movement and shows how today looks now.
pub async fn process_record_command<S: MovementStore>(
    recorder: &MovementRecorder<S>,
    RecordCommand {
        activity,
        minutes,
        notes,
    }: RecordCommand,
) -> Result<()> {
    let movement = match NewMovement::new(activity, minutes, notes).validate() {
        Ok(v) => v,
        Err(e) => {
            return Err(Args::command()
                .error(
                    clap::error::ErrorKind::ValueValidation,
                    format!("Invalid movement: {e}"),
                )
                .into());
        }
    };

    let log = recorder.record(movement).await?;
    let now = local_now(recorder);
    print!("{}", render_recorded(&log, &now));
    Ok(())
}

fn render_recorded<Tz: TimeZone>(log: &[MovementRecord], now: &DateTime<Tz>) -> String {
    let mut output = String::new();
    if let Some(latest) = log.first() {
        output += &format!(
            "Movement logged! 🎉 {} for {}\n",
            activity_name(latest.activity),
            format_minutes(latest.duration_minutes as u64)
        );
    }
    let today = daily_totals(log, now);
    output += &format!(
        "Today: {}, {}\n",
        plural(today.count as u64, "movement", "movements"),
        plural(today.total_minutes, "minute", "minutes")
    );
    output
}
