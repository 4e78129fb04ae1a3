use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use serde_json::{Map, Value};
use snafu::{OptionExt, ResultExt};

use crate::errors::{CustomResult, MissingColumnSnafu, OpenFileSnafu, ReadCsvSnafu, ScheduledTimeSnafu};

pub const SCHEDULED_TIME_COLUMN: &str = "scheduled_time";
pub const PREDICTED_ARRIVAL_COLUMN: &str = "predicted_arrival";
pub const PREDICTED_ARRIVAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// timestamps carrying an offset, converted to UTC
const OFFSET_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const TIMESTAMP_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// A vessel row keyed by the csv header names.
pub type VesselRecord = Map<String, Value>;

/// expected time between the scheduled time and the actual arrival
pub fn arrival_offset() -> Duration {
    Duration::hours(1)
}

/// # load all vessels
/// reads the csv from disk on every call and adds a `predicted_arrival`
/// column to each row.
pub fn load_vessels(path: &Path) -> CustomResult<Vec<VesselRecord>> {
    let file = File::open(path).context(OpenFileSnafu { path })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .context(ReadCsvSnafu { path })?
        .iter()
        .map(String::from)
        .collect();
    let rows = reader
        .records()
        .collect::<Result<Vec<StringRecord>, csv::Error>>()
        .context(ReadCsvSnafu { path })?;

    let scheduled_column = headers
        .iter()
        .position(|header| header == SCHEDULED_TIME_COLUMN)
        .context(MissingColumnSnafu {
            path,
            column: SCHEDULED_TIME_COLUMN,
        })?;

    let kinds: Vec<ColumnKind> = (0..headers.len())
        .map(|column| ColumnKind::infer(rows.iter().map(|row| row.get(column).unwrap_or(""))))
        .collect();

    let mut vessels = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let mut vessel: VesselRecord = headers
            .iter()
            .zip(&kinds)
            .enumerate()
            .map(|(column, (header, kind))| (header.clone(), kind.value(row.get(column).unwrap_or(""))))
            .collect();

        let scheduled = row.get(scheduled_column).unwrap_or("");
        vessel.insert(PREDICTED_ARRIVAL_COLUMN.to_string(), predicted_arrival(index + 1, scheduled)?);
        vessels.push(vessel);
    }

    Ok(vessels)
}

/// empty scheduled times stay empty
fn predicted_arrival(row: usize, scheduled: &str) -> CustomResult<Value> {
    if scheduled.trim().is_empty() {
        return Ok(Value::Null);
    }

    let scheduled_time = parse_timestamp(scheduled).context(ScheduledTimeSnafu {
        row,
        value: scheduled,
    })?;
    let arrival = scheduled_time + arrival_offset();

    Ok(Value::String(arrival.format(PREDICTED_ARRIVAL_FORMAT).to_string()))
}

/// # parse a scheduled time
/// `Z` or an explicit offset is converted to UTC, everything else is taken as written.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .ok()
        .or_else(|| {
            OFFSET_TIMESTAMP_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(text, format).ok())
        })
        .map(|timestamp| timestamp.naive_utc())
        .or_else(|| {
            TIMESTAMP_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// The json type every cell of a column is given.
#[derive(Clone, Copy, PartialEq, Debug)]
enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    /// narrowest kind all non-empty cells fit in
    fn infer<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
        let mut kind = ColumnKind::Integer;
        for cell in cells.filter(|cell| !cell.is_empty()) {
            if kind == ColumnKind::Integer && cell.parse::<i64>().is_err() {
                kind = ColumnKind::Float;
            }
            // words like `inf` or `nan` parse as floats but are text here
            if kind == ColumnKind::Float && !cell.parse::<f64>().map_or(false, f64::is_finite) {
                return ColumnKind::Text;
            }
        }

        kind
    }

    fn value(self, cell: &str) -> Value {
        if cell.is_empty() {
            return Value::Null;
        }

        match self {
            ColumnKind::Integer => cell.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
            ColumnKind::Float => cell.parse::<f64>().map(Value::from).unwrap_or(Value::Null),
            ColumnKind::Text => Value::String(cell.to_string()),
        }
    }
}
