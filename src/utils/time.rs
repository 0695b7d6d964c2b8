use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use now::DateTimeNow;

/// Calendar day of `moment` as seen in `tz`. Every per-day bucket in the application goes
/// through this function, so two instants minutes apart on both sides of midnight always land in
/// different days.
pub fn day_key<Tz: TimeZone>(moment: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    moment.with_timezone(tz).date_naive()
}

/// Weekday index where Sunday is 0 and Saturday is 6.
pub fn weekday_index(weekday: Weekday) -> u32 {
    weekday.num_days_from_sunday()
}

const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Inverse of [weekday_index].
pub fn weekday_from_index(index: u32) -> Option<Weekday> {
    SUNDAY_FIRST.get(index as usize).copied()
}

/// Midnight of the most recent Sunday in `now`'s time zone. On a Sunday it's the start of today.
pub fn start_of_week<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let days_back = weekday_index(now.weekday()) as i64;
    (now.clone() - Duration::days(days_back)).beginning_of_day()
}
