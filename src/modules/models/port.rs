use std::fs::File;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::ResultExt;

use crate::errors::{CustomResult, Error, ReadCsvSnafu, StoredDateSnafu};

/// format of the `departure_date` column
pub const DEPARTURE_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct PortRecord {
    pub id: String,
    pub coords: Vec<Value>,
    pub distance: String,
    pub vessel_id: String,
    pub departure_date: String,
    pub departure_hour: String,
}

/// A row as it is stored in the csv file.
#[derive(Deserialize, Debug)]
struct PortRow {
    port_id: String,
    coords_of_prev_port: String,
    distance: String,
    vessel_id: String,
    departure_date: String,
    departure_hour: String,
}

impl From<PortRow> for PortRecord {
    fn from(row: PortRow) -> Self {
        PortRecord {
            id: row.port_id,
            coords: parse_coords(&row.coords_of_prev_port),
            distance: row.distance,
            vessel_id: row.vessel_id,
            departure_date: row.departure_date,
            departure_hour: row.departure_hour,
        }
    }
}

impl PortRecord {
    pub fn departure(&self) -> CustomResult<NaiveDate> {
        NaiveDate::parse_from_str(&self.departure_date, DEPARTURE_DATE_FORMAT).context(StoredDateSnafu {
            value: self.departure_date.clone(),
        })
    }
}

/// # parse coordinates
/// coordinates are written as tuples, e.g. `(1.0, 2.0)` or `((1, 2), (3, 4))`.
///
/// the parentheses are swapped for brackets and the result is read as a json array.
/// anything that does not decode to an array becomes an empty list.
pub fn parse_coords(text: &str) -> Vec<Value> {
    let bracketed = text.replace('(', "[").replace(')', "]");
    serde_json::from_str::<Vec<Value>>(&bracketed).unwrap_or_default()
}

/// All port records in file order. Built once before the server starts and
/// never changed afterwards.
#[derive(Debug, Default, Clone)]
pub struct PortStore {
    records: Vec<PortRecord>,
}

impl PortStore {
    pub fn from_records(records: Vec<PortRecord>) -> PortStore {
        PortStore { records }
    }

    /// # load the ports csv
    /// a missing file is logged and leaves the store empty.
    pub fn load(path: &Path) -> CustomResult<PortStore> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                error!(target: "models/port:load", "CSV file '{}' not found.", path.display());
                return Ok(PortStore::default());
            }
            Err(source) => {
                return Err(Error::OpenFile {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        // rows with trailing extra fields still load
        let records = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(file)
            .deserialize::<PortRow>()
            .map(|row| row.map(PortRecord::from))
            .collect::<Result<Vec<PortRecord>, csv::Error>>()
            .context(ReadCsvSnafu { path })?;

        info!(target: "models/port:load", "loaded {} ports from {}", records.len(), path.display());
        Ok(PortStore { records })
    }

    pub fn all(&self) -> &[PortRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// every record departing on `date`, in file order.
    ///
    /// fails as soon as any stored departure date does not parse, matching or not.
    pub fn departing_on(&self, date: NaiveDate) -> CustomResult<Vec<&PortRecord>> {
        let mut matching = Vec::new();
        for record in &self.records {
            if record.departure()? == date {
                matching.push(record);
            }
        }

        Ok(matching)
    }
}
