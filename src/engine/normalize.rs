//! Normalization of raw ping/pong pairs into chart samples.

use chrono::{Datelike, NaiveTime, Timelike};

use crate::engine::edition::EditionTable;
use crate::engine::types::{NormalizedRecord, RawRecord, Sample};

/// Rounds to one decimal place, half away from zero.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Floors a time-of-day onto the 5-minute chart grid: seconds zeroed,
/// minutes taken down to the nearest lower multiple of 5.
pub fn bucket_time(t: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(t.hour(), t.minute() - t.minute() % 5, 0).unwrap_or(t)
}

/// Breaks a raw record down into its chart coordinates: day-of-month and
/// edition of the ping, bucketed time-of-day, and the wait duration in
/// minutes rounded to one decimal.
///
/// Never fails; a pong before its ping yields a negative duration.
pub fn normalize(table: &EditionTable, record: &RawRecord) -> NormalizedRecord {
    let day = record.ping.day();
    let year = record.ping.year();
    let edition = table.classify(year);

    let seconds = (record.pong - record.ping).num_seconds();
    let duration_minutes = round1(seconds as f64 / 60.0);

    NormalizedRecord {
        day,
        year,
        edition,
        sample: Sample {
            time_bucket: bucket_time(record.ping.time()),
            duration_minutes,
            merged_count: 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::edition::EditionId;
    use chrono::NaiveDateTime;

    fn dt(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_bucket_floors_to_five_minute_grid() {
        assert_eq!(bucket_time(time(14, 7, 32)), time(14, 5, 0));
        assert_eq!(bucket_time(time(14, 0, 0)), time(14, 0, 0));
        assert_eq!(bucket_time(time(14, 59, 59)), time(14, 55, 0));
    }

    #[test]
    fn test_normalize_fields() {
        let table = EditionTable::default();
        let record = RawRecord {
            ping: dt("2016-12-27T14:07:32"),
            pong: dt("2016-12-27T14:40:02"),
        };

        let norm = normalize(&table, &record);

        assert_eq!(norm.day, 27);
        assert_eq!(norm.year, 2016);
        assert_eq!(norm.edition, EditionId::from("33C3"));
        assert_eq!(norm.sample.time_bucket, time(14, 5, 0));
        // 1950 seconds = 32.5 minutes
        assert_eq!(norm.sample.duration_minutes, 32.5);
        assert_eq!(norm.sample.merged_count, 1);
    }

    #[test]
    fn test_duration_rounds_half_away_from_zero() {
        let table = EditionTable::default();
        // 15 seconds = 0.25 minutes, rounds up to 0.3
        let record = RawRecord {
            ping: dt("2016-12-27T10:00:00"),
            pong: dt("2016-12-27T10:00:15"),
        };
        assert_eq!(normalize(&table, &record).sample.duration_minutes, 0.3);
    }

    #[test]
    fn test_negative_duration_is_tolerated() {
        let table = EditionTable::default();
        let record = RawRecord {
            ping: dt("2016-12-27T14:10:00"),
            pong: dt("2016-12-27T14:00:00"),
        };
        assert_eq!(normalize(&table, &record).sample.duration_minutes, -10.0);
    }

    #[test]
    fn test_zero_duration_is_tolerated() {
        let table = EditionTable::default();
        let record = RawRecord {
            ping: dt("2016-12-27T14:10:00"),
            pong: dt("2016-12-27T14:10:00"),
        };
        assert_eq!(normalize(&table, &record).sample.duration_minutes, 0.0);
    }
}
