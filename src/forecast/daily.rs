use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use indexmap::map::Entry;
use indexmap::IndexMap;

use super::models::{DailyOutlook, ForecastEntry};

/// The outlook covers at most this many days
pub const DAILY_OUTLOOK_DAYS: usize = 5;

/// Local-hour window whose reading represents the whole day
const REPRESENTATIVE_HOUR_START: u32 = 11;
const REPRESENTATIVE_HOUR_END: u32 = 14;

/// Group 3-hourly forecast entries into per-day buckets.
///
/// Entries are walked once in input order. The first entry for a local
/// calendar date seeds that day's bucket; later entries widen the high/low
/// and, when their local hour falls in the late-morning window, replace the
/// day's icon and description. Buckets keep first-seen order and only the
/// first five distinct dates are returned.
pub fn aggregate_daily(entries: &[ForecastEntry], utc_offset_secs: i32) -> Vec<DailyOutlook> {
    let mut buckets: IndexMap<NaiveDate, DailyOutlook> = IndexMap::new();

    for entry in entries {
        let Some((date, hour)) = local_parts(entry.timestamp, utc_offset_secs) else {
            tracing::warn!(timestamp = entry.timestamp, "Skipping unrepresentable forecast entry");
            continue;
        };

        match buckets.entry(date) {
            Entry::Vacant(slot) => {
                slot.insert(DailyOutlook {
                    date: date.format("%Y-%m-%d").to_string(),
                    weekday: date.format("%A").to_string(),
                    icon: entry.icon.clone(),
                    description: entry.description.clone(),
                    temp_high: entry.temp_max,
                    temp_low: entry.temp_min,
                });
            }
            Entry::Occupied(mut slot) => {
                let day = slot.get_mut();
                day.temp_high = day.temp_high.max(entry.temp_max);
                day.temp_low = day.temp_low.min(entry.temp_min);
                if (REPRESENTATIVE_HOUR_START..=REPRESENTATIVE_HOUR_END).contains(&hour) {
                    day.icon = entry.icon.clone();
                    day.description = entry.description.clone();
                }
            }
        }
    }

    buckets.into_values().take(DAILY_OUTLOOK_DAYS).collect()
}

/// Local calendar date and hour of a unix timestamp under the given offset
fn local_parts(timestamp: i64, utc_offset_secs: i32) -> Option<(NaiveDate, u32)> {
    let utc = DateTime::from_timestamp(timestamp, 0)?;
    let offset = FixedOffset::east_opt(utc_offset_secs)?;
    let local = utc.with_timezone(&offset);
    Some((local.date_naive(), local.hour()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-01 00:00:00 UTC, a Monday
    const DAY_ONE: i64 = 1_704_067_200;
    const HOUR: i64 = 3600;
    const DAY: i64 = 24 * HOUR;

    fn entry(timestamp: i64, temp_min: f64, temp_max: f64, icon: &str) -> ForecastEntry {
        ForecastEntry {
            timestamp,
            temp_min,
            temp_max,
            description: format!("conditions {}", icon),
            icon: icon.to_string(),
        }
    }

    #[test]
    fn empty_input_yields_empty_outlook() {
        assert!(aggregate_daily(&[], 0).is_empty());
    }

    #[test]
    fn high_is_max_and_low_is_min_per_day() {
        let entries = vec![
            entry(DAY_ONE + 9 * HOUR, 2.0, 10.0, "03d"),
            entry(DAY_ONE + 12 * HOUR, 4.0, 15.0, "01d"),
            entry(DAY_ONE + 18 * HOUR, 3.0, 12.0, "10n"),
        ];

        let days = aggregate_daily(&entries, 0);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].temp_high, 15.0);
        assert_eq!(days[0].temp_low, 2.0);
    }

    #[test]
    fn midday_reading_wins_icon_and_description() {
        let entries = vec![
            entry(DAY_ONE + 9 * HOUR, 2.0, 10.0, "03d"),
            entry(DAY_ONE + 12 * HOUR, 4.0, 15.0, "01d"),
        ];

        let days = aggregate_daily(&entries, 0);
        assert_eq!(days[0].icon, "01d");
        assert_eq!(days[0].description, "conditions 01d");
    }

    #[test]
    fn evening_reading_does_not_replace_icon() {
        let entries = vec![
            entry(DAY_ONE + 9 * HOUR, 2.0, 10.0, "03d"),
            entry(DAY_ONE + 18 * HOUR, 4.0, 15.0, "10n"),
        ];

        let days = aggregate_daily(&entries, 0);
        assert_eq!(days[0].icon, "03d");
    }

    #[test]
    fn first_entry_seeds_the_bucket() {
        let entries = vec![entry(DAY_ONE + 6 * HOUR, 1.0, 5.0, "04d")];

        let days = aggregate_daily(&entries, 0);
        assert_eq!(days[0].icon, "04d");
        assert_eq!(days[0].temp_high, 5.0);
        assert_eq!(days[0].temp_low, 1.0);
        assert_eq!(days[0].date, "2024-01-01");
        assert_eq!(days[0].weekday, "Monday");
    }

    #[test]
    fn truncates_to_five_days_in_first_seen_order() {
        let mut entries = Vec::new();
        for d in 0..7 {
            entries.push(entry(DAY_ONE + d * DAY, 0.0, 10.0, "01d"));
        }

        let days = aggregate_daily(&entries, 0);
        assert_eq!(days.len(), 5);
        assert_eq!(days[0].date, "2024-01-01");
        assert_eq!(days[4].date, "2024-01-05");
    }

    #[test]
    fn bucketing_uses_the_local_date() {
        // 23:00 UTC rolls over to the next local date at UTC+5
        let entries = vec![
            entry(DAY_ONE + 23 * HOUR, 2.0, 8.0, "01n"),
            entry(DAY_ONE + 25 * HOUR, 1.0, 9.0, "02d"),
        ];

        let days = aggregate_daily(&entries, 5 * 3600);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, "2024-01-02");
        assert_eq!(days[0].temp_high, 9.0);
        assert_eq!(days[0].temp_low, 1.0);
    }

    #[test]
    fn out_of_order_dates_keep_first_seen_order() {
        let entries = vec![
            entry(DAY_ONE + DAY, 0.0, 10.0, "01d"),
            entry(DAY_ONE, 0.0, 10.0, "01d"),
        ];

        let days = aggregate_daily(&entries, 0);
        assert_eq!(days[0].date, "2024-01-02");
        assert_eq!(days[1].date, "2024-01-01");
    }
}
