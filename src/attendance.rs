use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use std::collections::btree_map;

pub type PersonId = i64;

/// Arrival and departure wall-clock times for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presence {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Presence {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

/// One parsed source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub person_id: PersonId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl AttendanceRecord {
    pub fn presence(&self) -> Presence {
        Presence::new(self.start, self.end)
    }
}

/// All presence days of one person, at most one entry per date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonSchedule {
    days: BTreeMap<NaiveDate, Presence>,
}

impl PersonSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `presence` for `date`, replacing whatever was recorded before.
    pub fn insert(&mut self, date: NaiveDate, presence: Presence) -> Option<Presence> {
        self.days.insert(date, presence)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Presence> {
        self.days.get(&date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days in ascending date order.
    pub fn iter(&self) -> btree_map::Iter<'_, NaiveDate, Presence> {
        self.days.iter()
    }
}

impl<'a> IntoIterator for &'a PersonSchedule {
    type Item = (&'a NaiveDate, &'a Presence);
    type IntoIter = btree_map::Iter<'a, NaiveDate, Presence>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

impl FromIterator<(NaiveDate, Presence)> for PersonSchedule {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Presence)>>(iter: I) -> Self {
        let mut schedule = PersonSchedule::new();
        for (date, presence) in iter {
            schedule.insert(date, presence);
        }
        schedule
    }
}

/// Full parsed attendance data, keyed by person.
///
/// A `Dataset` handed out by [`crate::cache::DatasetCache`] is shared between
/// callers behind an `Arc` and is never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    people: BTreeMap<PersonId, PersonSchedule>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins for a repeated (person, date) pair.
    pub fn insert_record(&mut self, record: AttendanceRecord) {
        self.people
            .entry(record.person_id)
            .or_default()
            .insert(record.date, record.presence());
    }

    pub fn person(&self, person_id: PersonId) -> Option<&PersonSchedule> {
        self.people.get(&person_id)
    }

    pub fn contains_person(&self, person_id: PersonId) -> bool {
        self.people.contains_key(&person_id)
    }

    /// Person ids in ascending order.
    pub fn person_ids(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.people.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, PersonId, PersonSchedule> {
        self.people.iter()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Total number of (person, date) entries.
    pub fn record_count(&self) -> usize {
        self.people.values().map(PersonSchedule::len).sum()
    }
}

impl FromIterator<AttendanceRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = AttendanceRecord>>(iter: I) -> Self {
        let mut dataset = Dataset::new();
        for record in iter {
            dataset.insert_record(record);
        }
        dataset
    }
}
