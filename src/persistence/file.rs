use super::{PersistenceError, PersistenceResult};
use crate::attendance::{AttendanceRecord, Dataset, PersonId};
use chrono::{NaiveDate, NaiveTime, Timelike};
use csv::ByteRecord;
use std::fs::File;
use std::io::Read;
use std::ops::RangeInclusive;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const DATA_FIELDS: usize = 4;

/// A four-field row that was dropped because one of its fields did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRow {
    /// 1-based line number in the source.
    pub line: u64,
    pub reason: String,
}

/// Result of a full parse along with everything that was left out of it.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub dataset: Dataset,
    pub malformed: Vec<MalformedRow>,
    /// Rows without exactly four fields (headers, footers).
    pub non_data_rows: usize,
}

/// Parses the attendance CSV at `path`.
///
/// Fails only when the file cannot be opened or read; bad rows are skipped.
pub fn load_dataset_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PersistenceError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    read_dataset(file)
}

pub fn read_dataset<R: Read>(reader: R) -> PersistenceResult<Dataset> {
    read_dataset_with_report(reader).map(|report| report.dataset)
}

pub fn read_dataset_with_report<R: Read>(reader: R) -> PersistenceResult<ParseReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut report = ParseReport::default();
    for (index, row) in reader.byte_records().enumerate() {
        let row = row?;
        if row.len() != DATA_FIELDS {
            report.non_data_rows += 1;
            continue;
        }

        let line = row
            .position()
            .map(|pos| pos.line())
            .unwrap_or(index as u64 + 1);
        match parse_row(&row) {
            Ok(record) => report.dataset.insert_record(record),
            Err(reason) => {
                tracing::debug!(line, %reason, "skipping malformed attendance row");
                report.malformed.push(MalformedRow { line, reason });
            }
        }
    }

    tracing::debug!(
        people = report.dataset.len(),
        records = report.dataset.record_count(),
        malformed = report.malformed.len(),
        "attendance source parsed"
    );
    Ok(report)
}

fn parse_row(row: &ByteRecord) -> Result<AttendanceRecord, String> {
    Ok(AttendanceRecord {
        person_id: parse_person_id(field(row, 0)?)?,
        date: parse_date(field(row, 1)?)?,
        start: parse_time(field(row, 2)?)?,
        end: parse_time(field(row, 3)?)?,
    })
}

fn field(row: &ByteRecord, idx: usize) -> Result<&str, String> {
    let raw = row.get(idx).ok_or_else(|| format!("missing field {idx}"))?;
    std::str::from_utf8(raw).map_err(|e| format!("field {idx} is not valid utf-8: {e}"))
}

fn parse_person_id(input: &str) -> Result<PersonId, String> {
    input
        .trim()
        .parse::<PersonId>()
        .map_err(|e| format!("invalid person id '{input}': {e}"))
}

/// Digits-only components separated by `sep`, each within its width range.
/// chrono alone would also take signed, short-year or space-padded values.
fn has_shape(input: &str, sep: char, widths: &[RangeInclusive<usize>]) -> bool {
    let parts: Vec<&str> = input.split(sep).collect();
    parts.len() == widths.len()
        && parts.iter().zip(widths).all(|(part, width)| {
            width.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
        })
}

fn parse_date(input: &str) -> Result<NaiveDate, String> {
    if !has_shape(input, '-', &[4..=4, 1..=2, 1..=2]) {
        return Err(format!("invalid date '{input}': expected YYYY-MM-DD"));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|e| format!("invalid date '{input}': {e}"))
}

fn parse_time(input: &str) -> Result<NaiveTime, String> {
    if !has_shape(input, ':', &[1..=2, 1..=2, 1..=2]) {
        return Err(format!("invalid time '{input}': expected HH:MM:SS"));
    }
    let time = NaiveTime::parse_from_str(input, TIME_FORMAT)
        .map_err(|e| format!("invalid time '{input}': {e}"))?;
    // chrono accepts ":60" as a leap second; a wall-clock reading never carries one.
    if time.nanosecond() != 0 {
        return Err(format!("invalid time '{input}': second out of range"));
    }
    Ok(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_parser_rejects_leap_second() {
        assert!(parse_time("23:59:60").is_err());
        assert_eq!(
            parse_time("23:59:59").unwrap(),
            NaiveTime::from_hms_opt(23, 59, 59).unwrap()
        );
    }

    #[test]
    fn date_parser_requires_four_digit_unsigned_year() {
        assert!(parse_date("13-09-10").is_err());
        assert!(parse_date("+2013-09-10").is_err());
        assert!(parse_date("02013-09-10").is_err());
        assert!(parse_date(" 2013-09-10").is_err());
        assert!(parse_date("2013-09-10 ").is_err());
        assert_eq!(
            parse_date("2013-9-1").unwrap(),
            NaiveDate::from_ymd_opt(2013, 9, 1).unwrap()
        );
    }

    #[test]
    fn time_parser_rejects_padding_and_short_forms() {
        assert!(parse_time(" 09:00:00").is_err());
        assert!(parse_time("09: 00:00").is_err());
        assert!(parse_time("09:00").is_err());
        assert!(parse_time("+9:00:00").is_err());
        assert!(parse_time("009:00:00").is_err());
        assert_eq!(
            parse_time("9:05:07").unwrap(),
            NaiveTime::from_hms_opt(9, 5, 7).unwrap()
        );
    }

    #[test]
    fn person_id_tolerates_surrounding_whitespace() {
        assert_eq!(parse_person_id(" 10 ").unwrap(), 10);
        assert!(parse_person_id("user_id").is_err());
    }
}
