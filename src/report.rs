//! Weekday listings in the exact shapes the presentation layer renders.

use serde::{Serialize, Serializer};

use crate::attendance::{Dataset, PersonId, PersonSchedule};
use crate::statistics::{mean, median, total};
use crate::weekday::{WEEKDAY_ABBREVIATIONS, group_by_weekday, group_start_end_by_weekday};

/// Literal emitted in place of a listing for an unknown person.
pub const NO_DATA: &str = "no_data";

pub const PRESENCE_HEADER: (&str, &str) = ("Weekday", "Presence (s)");

/// Either the rows for a known person or the "no data" sentinel.
///
/// Serializes as a plain JSON array of rows, or as the string `"no_data"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<R> {
    Rows(Vec<R>),
    NoData,
}

impl<R> Listing<R> {
    pub fn rows(&self) -> Option<&[R]> {
        match self {
            Listing::Rows(rows) => Some(rows),
            Listing::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Listing::NoData)
    }
}

impl<R: Serialize> Serialize for Listing<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Listing::Rows(rows) => rows.serialize(serializer),
            Listing::NoData => serializer.serialize_str(NO_DATA),
        }
    }
}

/// Row of the weekday total listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PresenceRow {
    Header(&'static str, &'static str),
    Day(&'static str, i64),
}

/// `(weekday, value)` pair of the mean and median listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayValue(pub &'static str, pub f64);

/// `(weekday, mean start, mean end)` triple, in seconds since midnight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayStartEnd(pub &'static str, pub f64, pub f64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserEntry {
    pub user_id: PersonId,
    pub name: String,
}

fn lookup(dataset: &Dataset, person_id: PersonId) -> Option<&PersonSchedule> {
    let schedule = dataset.person(person_id);
    if schedule.is_none() {
        tracing::debug!(person_id, "user not found");
    }
    schedule
}

/// Every known person, ascending by id, with a generated display name.
pub fn users(dataset: &Dataset) -> Vec<UserEntry> {
    dataset
        .person_ids()
        .map(|user_id| UserEntry {
            user_id,
            name: format!("User {user_id}"),
        })
        .collect()
}

/// Total presence seconds per weekday.
pub fn presence_weekday(schedule: &PersonSchedule, with_header: bool) -> Vec<PresenceRow> {
    let header = with_header.then_some(PresenceRow::Header(PRESENCE_HEADER.0, PRESENCE_HEADER.1));
    header
        .into_iter()
        .chain(
            group_by_weekday(schedule)
                .iter()
                .zip(WEEKDAY_ABBREVIATIONS)
                .map(|(durations, day)| PresenceRow::Day(day, total(durations))),
        )
        .collect()
}

pub fn mean_time_weekday(schedule: &PersonSchedule) -> Vec<WeekdayValue> {
    group_by_weekday(schedule)
        .iter()
        .zip(WEEKDAY_ABBREVIATIONS)
        .map(|(durations, day)| WeekdayValue(day, mean(durations)))
        .collect()
}

pub fn median_weekday(schedule: &PersonSchedule) -> Vec<WeekdayValue> {
    group_by_weekday(schedule)
        .iter()
        .zip(WEEKDAY_ABBREVIATIONS)
        .map(|(durations, day)| WeekdayValue(day, median(durations)))
        .collect()
}

pub fn presence_start_end(schedule: &PersonSchedule) -> Vec<WeekdayStartEnd> {
    group_start_end_by_weekday(schedule)
        .iter()
        .zip(WEEKDAY_ABBREVIATIONS)
        .map(|(times, day)| WeekdayStartEnd(day, mean(&times.start), mean(&times.end)))
        .collect()
}

/// Weekday totals for `person_id`, prefixed with the column header.
pub fn presence_weekday_for(dataset: &Dataset, person_id: PersonId) -> Listing<PresenceRow> {
    lookup(dataset, person_id)
        .map(|schedule| Listing::Rows(presence_weekday(schedule, true)))
        .unwrap_or(Listing::NoData)
}

pub fn mean_time_weekday_for(dataset: &Dataset, person_id: PersonId) -> Listing<WeekdayValue> {
    lookup(dataset, person_id)
        .map(|schedule| Listing::Rows(mean_time_weekday(schedule)))
        .unwrap_or(Listing::NoData)
}

pub fn median_weekday_for(dataset: &Dataset, person_id: PersonId) -> Listing<WeekdayValue> {
    lookup(dataset, person_id)
        .map(|schedule| Listing::Rows(median_weekday(schedule)))
        .unwrap_or(Listing::NoData)
}

pub fn presence_start_end_for(dataset: &Dataset, person_id: PersonId) -> Listing<WeekdayStartEnd> {
    lookup(dataset, person_id)
        .map(|schedule| Listing::Rows(presence_start_end(schedule)))
        .unwrap_or(Listing::NoData)
}
