use std::io::Cursor;
use std::path::PathBuf;

use log::error;
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder, Response};
use rocket::Request;
use snafu::Snafu;

pub type CustomResult<T> = Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Missing required query parameter: {name}"))]
    MissingParameter { name: &'static str },

    #[snafu(display("Invalid date format. Use YYYY-MM-DD."))]
    InvalidDate { source: chrono::ParseError },

    #[snafu(display("failed to open {}: {source}", path.display()))]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to read csv {}: {source}", path.display()))]
    ReadCsv { path: PathBuf, source: csv::Error },

    #[snafu(display("column '{column}' missing from {}", path.display()))]
    MissingColumn { path: PathBuf, column: &'static str },

    #[snafu(display("stored departure date '{value}' is not DD/MM/YYYY: {source}"))]
    StoredDate {
        value: String,
        source: chrono::ParseError,
    },

    #[snafu(display("row {row}: scheduled time '{value}' is not a timestamp"))]
    ScheduledTime { row: usize, value: String },

    #[snafu(display("blocking task failed: {source}"))]
    BlockingTask { source: tokio::task::JoinError },
}

impl Error {
    pub fn status(&self) -> Status {
        match self {
            Error::MissingParameter { .. } | Error::InvalidDate { .. } => Status::BadRequest,
            _ => Status::InternalServerError,
        }
    }
}

/// Client errors carry their message, server errors are logged and answered
/// with a generic body.
impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let message = if status == Status::InternalServerError {
            error!(target: "errors:respond_to", "{}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = serde_json::json!({ "error": message }).to_string();
        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
