use std::collections::BTreeMap;

use chrono::{Datelike, TimeZone, Timelike, Weekday};

use crate::{
    movement::entities::{ActivityType, MovementRecord},
    utils::{
        percentage::{share_percentage, Percentage},
        time::{weekday_from_index, weekday_index},
    },
};

use super::totals::rounded_div;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeTotals {
    pub count: usize,
    pub total_minutes: u64,
}

/// Totals per activity type. Only types that occur in the log are present.
pub type TypeAggregates = BTreeMap<ActivityType, TypeTotals>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteActivity {
    pub activity: ActivityType,
    pub count: usize,
    pub total_minutes: u64,
}

impl FavoriteActivity {
    pub fn average_session_minutes(&self) -> u64 {
        if self.count == 0 {
            return 0;
        }
        rounded_div(self.total_minutes, self.count as u64)
    }
}

/// One line of the activity breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeShare {
    pub activity: ActivityType,
    pub totals: TypeTotals,
    pub percentage: Percentage,
}

pub fn type_aggregates(log: &[MovementRecord]) -> TypeAggregates {
    let mut aggregates = TypeAggregates::new();
    for record in log {
        let totals = aggregates.entry(record.activity).or_default();
        totals.count += 1;
        totals.total_minutes += record.duration_minutes as u64;
    }
    aggregates
}

/// Most logged activity type. On equal counts the type declared first wins.
pub fn favorite_activity(log: &[MovementRecord]) -> Option<FavoriteActivity> {
    let aggregates = type_aggregates(log);
    let activity = most_frequent(aggregates.iter().map(|(k, v)| (*k, v.count)))?;
    let totals = aggregates.get(&activity)?;
    Some(FavoriteActivity {
        activity,
        count: totals.count,
        total_minutes: totals.total_minutes,
    })
}

/// Activity types ordered by how often they were logged, with their share of all movements.
pub fn type_distribution(log: &[MovementRecord]) -> Vec<TypeShare> {
    let whole = log.len() as u32;
    let mut shares = type_aggregates(log)
        .into_iter()
        .map(|(activity, totals)| TypeShare {
            activity,
            totals,
            percentage: share_percentage(totals.count as u32, whole),
        })
        .collect::<Vec<_>>();
    // Stable, so equal counts stay in declaration order.
    shares.sort_by(|a, b| b.totals.count.cmp(&a.totals.count));
    shares
}

/// Hour of the day (0-23 in `tz`) with the most movements. On equal counts the earliest hour
/// wins.
pub fn peak_hour<Tz: TimeZone>(log: &[MovementRecord], tz: &Tz) -> Option<u32> {
    let mut hours = BTreeMap::<u32, usize>::new();
    for record in log {
        *hours
            .entry(record.created_at.with_timezone(tz).hour())
            .or_default() += 1;
    }
    most_frequent(hours)
}

/// Weekday with the most movements. On equal counts the day closest to Sunday wins.
pub fn most_active_weekday<Tz: TimeZone>(log: &[MovementRecord], tz: &Tz) -> Option<Weekday> {
    let mut days = BTreeMap::<u32, usize>::new();
    for record in log {
        *days
            .entry(weekday_index(record.created_at.with_timezone(tz).weekday()))
            .or_default() += 1;
    }
    most_frequent(days).and_then(weekday_from_index)
}

/// Key with the highest count. Ties keep the smallest key.
fn most_frequent<K: Ord + Copy>(counts: impl IntoIterator<Item = (K, usize)>) -> Option<K> {
    counts
        .into_iter()
        .fold(None, |best: Option<(K, usize)>, (key, count)| match best {
            Some((best_key, best_count))
                if best_count > count || (best_count == count && best_key < key) =>
            {
                Some((best_key, best_count))
            }
            _ => Some((key, count)),
        })
        .map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use chrono::{Utc, Weekday};

    use crate::{
        movement::entities::ActivityType,
        stats::test_support::{at, movement, newest_first, zone},
    };

    use super::{
        favorite_activity, most_active_weekday, most_frequent, peak_hour, type_aggregates,
        type_distribution, FavoriteActivity, TypeTotals,
    };

    #[test]
    fn test_empty_log_has_no_patterns() {
        assert!(type_aggregates(&[]).is_empty());
        assert!(type_distribution(&[]).is_empty());
        assert_eq!(favorite_activity(&[]), None);
        assert_eq!(peak_hour(&[], &zone()), None);
        assert_eq!(most_active_weekday(&[], &zone()), None);
    }

    #[test]
    fn test_aggregates_sum_to_log() {
        let log = newest_first(vec![
            movement(1, at(2024, 3, 7, 7, 0), ActivityType::Stretching, 5),
            movement(2, at(2024, 3, 9, 7, 0), ActivityType::Walking, 15),
            movement(3, at(2024, 3, 9, 12, 0), ActivityType::Gardening, 40),
            movement(4, at(2024, 3, 10, 7, 0), ActivityType::Walking, 10),
            movement(5, at(2024, 3, 10, 19, 0), ActivityType::Other, 1),
        ]);

        let aggregates = type_aggregates(&log);

        assert_eq!(aggregates.values().map(|v| v.count).sum::<usize>(), log.len());
        assert_eq!(
            aggregates.values().map(|v| v.total_minutes).sum::<u64>(),
            log.iter().map(|v| v.duration_minutes as u64).sum::<u64>()
        );
        assert_eq!(
            aggregates[&ActivityType::Walking],
            TypeTotals {
                count: 2,
                total_minutes: 25
            }
        );
        assert!(!aggregates.contains_key(&ActivityType::Dancing));
    }

    #[test]
    fn test_favorite_activity_scenario() {
        let log = newest_first(vec![
            movement(3, at(2024, 3, 10, 7, 0), ActivityType::Walking, 10),
            movement(2, at(2024, 3, 9, 7, 0), ActivityType::Walking, 15),
            movement(1, at(2024, 3, 7, 7, 0), ActivityType::Stretching, 5),
        ]);

        let favorite = favorite_activity(&log).unwrap();
        assert_eq!(
            favorite,
            FavoriteActivity {
                activity: ActivityType::Walking,
                count: 2,
                total_minutes: 25
            }
        );
        assert_eq!(favorite.average_session_minutes(), 13);
    }

    #[test]
    fn test_favorite_tie_goes_to_first_declared_type() {
        // Insertion order puts dancing first, declaration order puts stairs first.
        let log = newest_first(vec![
            movement(1, at(2024, 3, 7, 7, 0), ActivityType::Dancing, 50),
            movement(2, at(2024, 3, 8, 7, 0), ActivityType::Stairs, 2),
        ]);

        assert_eq!(
            favorite_activity(&log).map(|v| v.activity),
            Some(ActivityType::Stairs)
        );
    }

    #[test]
    fn test_type_distribution_order_and_share() {
        let log = newest_first(vec![
            movement(1, at(2024, 3, 7, 7, 0), ActivityType::Playing, 5),
            movement(2, at(2024, 3, 7, 8, 0), ActivityType::Housework, 5),
            movement(3, at(2024, 3, 7, 9, 0), ActivityType::Housework, 5),
            movement(4, at(2024, 3, 7, 10, 0), ActivityType::Walking, 5),
        ]);

        let distribution = type_distribution(&log);

        let order = distribution.iter().map(|v| v.activity).collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                ActivityType::Housework,
                ActivityType::Walking,
                ActivityType::Playing
            ]
        );
        assert_eq!(distribution[0].percentage.rounded(), 50);
        assert_eq!(distribution[1].percentage.rounded(), 25);
    }

    #[test]
    fn test_peak_hour_shared_across_days() {
        let log = newest_first(vec![
            movement(1, at(2024, 3, 9, 7, 10), ActivityType::Walking, 5),
            movement(2, at(2024, 3, 10, 7, 50), ActivityType::Walking, 5),
            movement(3, at(2024, 3, 10, 18, 0), ActivityType::Walking, 5),
        ]);

        assert_eq!(peak_hour(&log, &zone()), Some(7));
        // The same instants are at midnight UTC.
        assert_eq!(peak_hour(&log, &Utc), Some(0));
    }

    #[test]
    fn test_peak_hour_tie_takes_earliest_hour() {
        let log = newest_first(vec![
            movement(1, at(2024, 3, 9, 21, 0), ActivityType::Walking, 5),
            movement(2, at(2024, 3, 10, 6, 0), ActivityType::Walking, 5),
        ]);

        assert_eq!(peak_hour(&log, &zone()), Some(6));
    }

    #[test]
    fn test_most_active_weekday() {
        // 10th of March 2024 is a Sunday.
        let log = newest_first(vec![
            movement(1, at(2024, 3, 11, 7, 0), ActivityType::Walking, 5),
            movement(2, at(2024, 3, 18, 7, 0), ActivityType::Walking, 5),
            movement(3, at(2024, 3, 16, 7, 0), ActivityType::Walking, 5),
            movement(4, at(2024, 3, 10, 7, 0), ActivityType::Walking, 5),
        ]);

        assert_eq!(most_active_weekday(&log, &zone()), Some(Weekday::Mon));

        let tied = newest_first(vec![
            movement(1, at(2024, 3, 16, 7, 0), ActivityType::Walking, 5),
            movement(2, at(2024, 3, 10, 7, 0), ActivityType::Walking, 5),
        ]);
        assert_eq!(most_active_weekday(&tied, &zone()), Some(Weekday::Sun));
    }

    #[test]
    fn test_most_frequent_tie_break() {
        assert_eq!(most_frequent([(3, 2), (1, 2), (2, 1)]), Some(1));
        assert_eq!(most_frequent([(3, 5), (1, 2)]), Some(3));
        assert_eq!(most_frequent(Vec::<(u32, usize)>::new()), None);
    }
}
