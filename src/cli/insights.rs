use anyhow::Result;
use chrono::{DateTime, TimeZone};

use crate::{
    movement::{entities::MovementRecord, recorder::MovementRecorder, store::MovementStore},
    stats::{derive_view, patterns::type_distribution},
    utils::percentage::Percentage,
};

use super::{
    display::{activity_name, encouragement, format_minutes, heading, plural, weekday_name},
    local_now,
};

const TOP_TYPES: usize = 5;
const BAR_WIDTH: usize = 20;

pub async fn process_insights_command<S: MovementStore>(
    recorder: &MovementRecorder<S>,
) -> Result<()> {
    let now = local_now(recorder);
    let log = recorder.log().await?;
    print!("{}", render_insights(&log, &now));
    Ok(())
}

fn render_insights<Tz: TimeZone>(log: &[MovementRecord], now: &DateTime<Tz>) -> String {
    if log.is_empty() {
        return "No insights yet. Log a few movements and come back!\n".into();
    }

    let view = derive_view(log, now);
    let (title, message) = encouragement(view.current_streak);

    let mut output = format!("{}\n", heading("Streaks"));
    output += &format!(
        "  Current {} · Longest {}\n",
        plural(view.current_streak as u64, "day", "days"),
        plural(view.longest_streak as u64, "day", "days")
    );
    output += &format!("  {title} {message}\n\n");

    output += &format!("{}\n", heading("Overall"));
    output += &format!(
        "  {} over {} · {}\n",
        plural(view.total_activities as u64, "movement", "movements"),
        plural(view.active_days as u64, "active day", "active days"),
        format_minutes(view.total_minutes)
    );
    output += &format!(
        "  Per active day: {} · {}\n",
        plural(view.averages.activities, "movement", "movements"),
        format_minutes(view.averages.minutes)
    );
    output += &format!(
        "  Last 7 days: {} · Last 30 days: {}\n\n",
        view.last_7_days, view.last_30_days
    );

    output += &format!("{}\n", heading("Patterns"));
    if let Some(favorite) = view.favorite {
        output += &format!(
            "  Favourite: {} ({} times, about {} per session)\n",
            activity_name(favorite.activity),
            favorite.count,
            format_minutes(favorite.average_session_minutes())
        );
    }
    if let Some(hour) = view.peak_hour {
        output += &format!("  Peak hour: {hour:02}:00\n");
    }
    if let Some(weekday) = view.most_active_weekday {
        output += &format!("  Most active day: {}\n", weekday_name(weekday));
    }
    output += "\n";

    output += &format!("{}\n", heading("Activity breakdown"));
    for share in type_distribution(log).into_iter().take(TOP_TYPES) {
        output += &format!(
            "  {:<width$} {:>4}  {}\n",
            bar(share.percentage),
            share.percentage.to_string(),
            activity_name(share.activity),
            width = BAR_WIDTH
        );
    }
    output
}

fn bar(percentage: Percentage) -> String {
    let filled = (*percentage / 100. * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.min(BAR_WIDTH))
}
