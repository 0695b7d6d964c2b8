use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, TimeZone};

use crate::{movement::entities::MovementRecord, utils::time::day_key};

/// Distinct calendar days in `tz` that have at least one movement.
pub fn active_dates<Tz: TimeZone>(log: &[MovementRecord], tz: &Tz) -> BTreeSet<NaiveDate> {
    log.iter().map(|v| day_key(&v.created_at, tz)).collect()
}

/// Consecutive days with movement, counted backwards from `now`'s day. A day without movement
/// ends the streak, so the result is 0 when nothing was logged today.
pub fn current_streak<Tz: TimeZone>(log: &[MovementRecord], now: &DateTime<Tz>) -> u32 {
    let dates = active_dates(log, &now.timezone());
    let mut day = now.date_naive();
    let mut streak = 0u32;

    // Every step consumes one distinct date, so the walk never outlives the set.
    while (streak as usize) < dates.len() && dates.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

/// Longest run of consecutive active days anywhere in the log.
pub fn longest_streak<Tz: TimeZone>(log: &[MovementRecord], tz: &Tz) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for date in active_dates(log, tz).into_iter().rev() {
        run = match previous {
            Some(later) if later.signed_duration_since(date).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }
    longest
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use crate::{
        movement::entities::ActivityType,
        stats::test_support::{at, movement, newest_first, zone},
    };

    use super::{active_dates, current_streak, longest_streak};

    #[test]
    fn test_empty_log_has_no_streaks() {
        let now = at(2024, 3, 10, 12, 0);
        assert_eq!(current_streak(&[], &now), 0);
        assert_eq!(longest_streak(&[], &zone()), 0);
    }

    #[test]
    fn test_current_streak_counts_consecutive_days() {
        let now = at(2024, 3, 10, 18, 0);
        for days in 1..=10 {
            let log = newest_first(
                (0..days)
                    .map(|back| {
                        movement(
                            back as u64,
                            now - Duration::days(back),
                            ActivityType::Walking,
                            10,
                        )
                    })
                    .collect(),
            );
            assert_eq!(current_streak(&log, &now), days as u32);
            assert_eq!(longest_streak(&log, &zone()), days as u32);
        }
    }

    #[test]
    fn test_current_streak_is_zero_without_movement_today() {
        let now = at(2024, 3, 10, 18, 0);
        let log = newest_first(vec![
            movement(1, at(2024, 3, 9, 8, 0), ActivityType::Walking, 10),
            movement(2, at(2024, 3, 8, 8, 0), ActivityType::Walking, 10),
        ]);

        assert_eq!(current_streak(&log, &now), 0);
        assert_eq!(longest_streak(&log, &zone()), 2);
    }

    #[test]
    fn test_scenario_with_gap() {
        let now = at(2024, 3, 10, 18, 0);
        let log = newest_first(vec![
            movement(3, at(2024, 3, 10, 7, 0), ActivityType::Walking, 10),
            movement(2, at(2024, 3, 9, 7, 0), ActivityType::Walking, 15),
            movement(1, at(2024, 3, 7, 7, 0), ActivityType::Stretching, 5),
        ]);

        assert_eq!(current_streak(&log, &now), 2);
        assert_eq!(longest_streak(&log, &zone()), 2);
    }

    #[test]
    fn test_longest_streak_keeps_clusters_apart() {
        let log = newest_first(vec![
            movement(1, at(2024, 1, 1, 9, 0), ActivityType::Dancing, 5),
            movement(2, at(2024, 1, 2, 9, 0), ActivityType::Dancing, 5),
            movement(3, at(2024, 1, 3, 9, 0), ActivityType::Dancing, 5),
            movement(4, at(2024, 1, 5, 9, 0), ActivityType::Dancing, 5),
            movement(5, at(2024, 1, 6, 9, 0), ActivityType::Dancing, 5),
            // Several movements on one day count once.
            movement(6, at(2024, 1, 6, 21, 0), ActivityType::Stairs, 2),
        ]);

        assert_eq!(longest_streak(&log, &zone()), 3);
        assert_eq!(current_streak(&log, &at(2024, 1, 6, 22, 0)), 2);
    }

    #[test]
    fn test_longest_streak_crosses_month_boundary() {
        let log = newest_first(vec![
            movement(1, at(2024, 2, 28, 9, 0), ActivityType::Walking, 5),
            movement(2, at(2024, 2, 29, 9, 0), ActivityType::Walking, 5),
            movement(3, at(2024, 3, 1, 9, 0), ActivityType::Walking, 5),
        ]);

        assert_eq!(longest_streak(&log, &zone()), 3);
        assert_eq!(current_streak(&log, &at(2024, 3, 1, 10, 0)), 3);
    }

    #[test]
    fn test_longest_is_at_least_current() {
        let now = at(2024, 3, 10, 20, 0);
        let log = newest_first(vec![
            movement(1, at(2024, 3, 1, 9, 0), ActivityType::Walking, 5),
            movement(2, at(2024, 3, 8, 9, 0), ActivityType::Walking, 5),
            movement(3, at(2024, 3, 9, 9, 0), ActivityType::Walking, 5),
            movement(4, at(2024, 3, 10, 9, 0), ActivityType::Walking, 5),
        ]);

        assert!(longest_streak(&log, &zone()) >= current_streak(&log, &now));
    }

    #[test]
    fn test_midnight_splits_days() {
        let log = newest_first(vec![
            movement(1, at(2024, 3, 10, 23, 59), ActivityType::Walking, 5),
            movement(2, at(2024, 3, 11, 0, 1), ActivityType::Walking, 5),
        ]);

        assert_eq!(active_dates(&log, &zone()).len(), 2);
        assert_eq!(current_streak(&log, &at(2024, 3, 11, 8, 0)), 2);
    }

    #[test]
    fn test_days_follow_the_given_zone() {
        // 23:59 and 00:01 at UTC+7 are the same UTC day.
        let log = newest_first(vec![
            movement(1, at(2024, 3, 10, 23, 59), ActivityType::Walking, 5),
            movement(2, at(2024, 3, 11, 0, 1), ActivityType::Walking, 5),
        ]);

        assert_eq!(active_dates(&log, &Utc).len(), 1);
        assert_eq!(longest_streak(&log, &Utc), 1);
    }
}
