use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::attendance::PersonSchedule;

/// Three-letter English abbreviations, Monday first.
pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Monday = 0 through Sunday = 6.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Seconds elapsed since 00:00:00, in `0..=86399`.
pub fn seconds_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 3600 + i64::from(time.minute()) * 60 + i64::from(time.second())
}

/// Signed number of seconds from `start` to `end`; negative when `end` is earlier.
pub fn interval(start: NaiveTime, end: NaiveTime) -> i64 {
    seconds_since_midnight(end) - seconds_since_midnight(start)
}

/// Start and end times of day (seconds since midnight) seen on one weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartEnd {
    pub start: Vec<i64>,
    pub end: Vec<i64>,
}

/// Presence durations per weekday, Monday first. Durations are kept as-is,
/// including negative ones from rows whose end precedes their start.
pub fn group_by_weekday(schedule: &PersonSchedule) -> [Vec<i64>; 7] {
    let mut buckets: [Vec<i64>; 7] = Default::default();
    for (date, presence) in schedule {
        buckets[weekday_index(*date)].push(interval(presence.start, presence.end));
    }
    buckets
}

/// Start and end times per weekday, Monday first. Every weekday is present,
/// with empty lists when nothing was recorded on it.
pub fn group_start_end_by_weekday(schedule: &PersonSchedule) -> [StartEnd; 7] {
    let mut buckets: [StartEnd; 7] = Default::default();
    for (date, presence) in schedule {
        let bucket = &mut buckets[weekday_index(*date)];
        bucket.start.push(seconds_since_midnight(presence.start));
        bucket.end.push(seconds_since_midnight(presence.end));
    }
    buckets
}
