use std::path::PathBuf;

use rocket::fs::NamedFile;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{get, Request, State};
use rocket_dyn_templates::{context, Template};

use crate::settings::Settings;

pub const ASSIGNMENT_JS: &str = "assignment.js";
pub const MAP_PAGE: &str = "map.html";

#[get("/")]
pub fn index() -> Template {
    Template::render("index", context! {
        title: "Port Operations",
    })
}

/// # Vessel-to-Port data exchange
#[get("/vessel-to-port")]
pub fn vessel_to_port() -> Template {
    Template::render("vessel_to_port", context! {
        title: "Vessel-to-Port Data Exchange",
    })
}

/// # Port-to-Port data exchange
#[get("/port-to-port")]
pub fn port_to_port() -> Template {
    Template::render("port_to_port", context! {
        title: "Port-to-Port Data Exchange",
    })
}

#[get("/berth-allocation")]
pub fn berth_allocation() -> Template {
    Template::render("berth_allocation", context! {
        title: "Berth Allocation",
    })
}

/// the map lives in the public directory, not in the static one
#[get("/map")]
pub async fn map(settings: &State<Settings>) -> Option<NamedFile> {
    NamedFile::open(settings.public_dir.join(MAP_PAGE)).await.ok()
}

/// `assignment.js` as found in the static directory.
///
/// Forwards when the file is not there, so the asset root gets a chance.
pub struct StaticAssignmentJs(PathBuf);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for StaticAssignmentJs {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let path = match request.rocket().state::<Settings>() {
            Some(settings) => settings.static_dir.join(ASSIGNMENT_JS),
            None => return Outcome::Forward(Status::InternalServerError),
        };

        let is_file = rocket::tokio::fs::metadata(&path)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false);

        if is_file {
            Outcome::Success(StaticAssignmentJs(path))
        } else {
            Outcome::Forward(Status::NotFound)
        }
    }
}

#[get("/static/assignment.js", rank = 1)]
pub async fn static_assignment_js(asset: StaticAssignmentJs) -> Option<NamedFile> {
    NamedFile::open(asset.0).await.ok()
}

#[get("/static/assignment.js", rank = 2)]
pub async fn assignment_js(settings: &State<Settings>) -> Option<NamedFile> {
    NamedFile::open(settings.asset_root.join(ASSIGNMENT_JS)).await.ok()
}
