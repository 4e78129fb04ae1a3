use chrono::NaiveDate;
use log::debug;
use rocket::serde::json::Json;
use rocket::{get, State};
use snafu::ResultExt;

use crate::errors::{CustomResult, Error, InvalidDateSnafu};
use crate::modules::models::port::{PortRecord, PortStore};

/// format of the `date` query parameter
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// # ports departing on a date
/// `date` is required and must be `YYYY-MM-DD`.
#[get("/ports?<date>")]
pub fn get_ports(date: Option<&str>, ports: &State<PortStore>) -> CustomResult<Json<Vec<PortRecord>>> {
    let date = match date {
        Some(date) if !date.is_empty() => date,
        _ => return Err(Error::MissingParameter { name: "date" }),
    };
    let selected_date = NaiveDate::parse_from_str(date, QUERY_DATE_FORMAT).context(InvalidDateSnafu)?;

    let filtered_ports: Vec<PortRecord> = ports.departing_on(selected_date)?.into_iter().cloned().collect();

    debug!(target: "routes/api/ports:get_ports", "Filtered ports for date {}: {:?}", date, filtered_ports);
    Ok(Json(filtered_ports))
}
