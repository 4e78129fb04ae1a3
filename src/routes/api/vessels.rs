use log::debug;
use rocket::serde::json::Json;
use rocket::{get, State};
use snafu::ResultExt;
use tokio::task;

use crate::errors::{BlockingTaskSnafu, CustomResult};
use crate::modules::models::vessel::{load_vessels, VesselRecord};
use crate::settings::Settings;

/// # all vessels
/// the csv is read from disk again for every request, off the async workers.
#[get("/vessels")]
pub async fn get_vessels(settings: &State<Settings>) -> CustomResult<Json<Vec<VesselRecord>>> {
    let path = settings.vessels_csv.clone();
    let vessels = task::spawn_blocking(move || load_vessels(&path))
        .await
        .context(BlockingTaskSnafu)??;

    debug!(target: "routes/api/vessels:get_vessels", "loaded {} vessels", vessels.len());
    Ok(Json(vessels))
}
