//! Presentation of activity types and times. The statistics never look at any of this.

use ansi_term::{Colour, Style};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc, Weekday};

use crate::movement::entities::ActivityType;

pub fn label(activity: ActivityType) -> &'static str {
    match activity {
        ActivityType::Walking => "Walking",
        ActivityType::Stretching => "Stretching",
        ActivityType::Stairs => "Taking the stairs",
        ActivityType::Housework => "Housework",
        ActivityType::Dancing => "Dancing",
        ActivityType::Gardening => "Gardening",
        ActivityType::Playing => "Playing",
        ActivityType::Other => "Other",
    }
}

pub fn icon(activity: ActivityType) -> &'static str {
    match activity {
        ActivityType::Walking => "🚶",
        ActivityType::Stretching => "🤸",
        ActivityType::Stairs => "🪜",
        ActivityType::Housework => "🏠",
        ActivityType::Dancing => "💃",
        ActivityType::Gardening => "🌱",
        ActivityType::Playing => "⚽",
        ActivityType::Other => "✨",
    }
}

pub fn colour(activity: ActivityType) -> Colour {
    match activity {
        ActivityType::Walking => Colour::Blue,
        ActivityType::Stretching => Colour::Purple,
        ActivityType::Stairs => Colour::Fixed(208),
        ActivityType::Housework => Colour::Green,
        ActivityType::Dancing => Colour::Fixed(205),
        ActivityType::Gardening => Colour::Fixed(35),
        ActivityType::Playing => Colour::Red,
        ActivityType::Other => Colour::Fixed(245),
    }
}

/// Icon and coloured label, e.g. "🚶 Walking".
pub fn activity_name(activity: ActivityType) -> String {
    format!(
        "{} {}",
        icon(activity),
        colour(activity).paint(label(activity))
    )
}

pub fn heading(text: &str) -> String {
    Style::new().bold().paint(text).to_string()
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// "Today", "Yesterday" or the full date.
pub fn day_label<Tz: TimeZone>(date: NaiveDate, now: &DateTime<Tz>) -> String {
    let today = now.date_naive();
    if date == today {
        "Today".into()
    } else if Some(date) == today.pred_opt() {
        "Yesterday".into()
    } else {
        date.format("%A, %-d %B %Y").to_string()
    }
}

/// Shorter variant of [day_label] used in lists.
pub fn short_day_label<Tz: TimeZone>(date: NaiveDate, now: &DateTime<Tz>) -> String {
    let today = now.date_naive();
    if date == today {
        "Today".into()
    } else if Some(date) == today.pred_opt() {
        "Yesterday".into()
    } else {
        date.format("%-d %b").to_string()
    }
}

pub fn format_time<Tz: TimeZone>(moment: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    moment.with_timezone(tz).format("%H:%M").to_string()
}

pub fn format_minutes(minutes: u64) -> String {
    let duration = Duration::minutes(minutes as i64);
    if duration.num_hours() > 0 {
        format!("{}h{}m", duration.num_hours(), duration.num_minutes() % 60)
    } else {
        format!("{}m", duration.num_minutes())
    }
}

pub fn plural(count: u64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Title and message shown under the streak.
pub fn encouragement(streak: u32) -> (&'static str, &'static str) {
    if streak > 7 {
        (
            "Outstanding!",
            "Your consistency is inspiring. Keep the momentum going!",
        )
    } else if streak > 3 {
        (
            "Keep it up!",
            "You are building a good habit. Don't stop now!",
        )
    } else {
        (
            "You can do it!",
            "Every small movement is a step towards a big change. Start today!",
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeZone, Weekday};

    use crate::movement::entities::ActivityType;

    use super::{
        day_label, encouragement, format_minutes, format_time, label, plural, short_day_label,
        weekday_name,
    };

    #[test]
    fn test_every_type_has_a_distinct_label() {
        let mut labels = ActivityType::ALL.map(label).to_vec();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), ActivityType::ALL.len());
    }

    #[test]
    fn test_day_labels() {
        let zone = FixedOffset::east_opt(7 * 3600).unwrap();
        let now = zone.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let date = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();

        assert_eq!(day_label(date(10), &now), "Today");
        assert_eq!(day_label(date(9), &now), "Yesterday");
        assert_eq!(day_label(date(5), &now), "Tuesday, 5 March 2024");
        assert_eq!(short_day_label(date(5), &now), "5 Mar");
    }

    #[test]
    fn test_format_time_uses_zone() {
        let zone = FixedOffset::east_opt(7 * 3600).unwrap();
        let moment = zone.with_ymd_and_hms(2024, 3, 10, 7, 5, 0).unwrap().to_utc();
        assert_eq!(format_time(&moment, &zone), "07:05");
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(135), "2h15m");
        assert_eq!(plural(1, "day", "days"), "1 day");
        assert_eq!(plural(0, "day", "days"), "0 days");
        assert_eq!(weekday_name(Weekday::Wed), "Wednesday");
    }

    #[test]
    fn test_encouragement_tiers() {
        assert_eq!(encouragement(0).0, "You can do it!");
        assert_eq!(encouragement(3).0, "You can do it!");
        assert_eq!(encouragement(4).0, "Keep it up!");
        assert_eq!(encouragement(7).0, "Keep it up!");
        assert_eq!(encouragement(8).0, "Outstanding!");
    }
}
