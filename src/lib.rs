use rocket::{routes, Build, Rocket};
use rocket_dyn_templates::Template;

use crate::modules::helpers::fairings::cors::CORS;
use crate::modules::models::port::PortStore;
use crate::modules::relay::Registry;
use crate::routes::{api, pages, realtime};
use crate::settings::Settings;

pub mod errors;
pub mod modules;
pub mod settings;
pub mod routes {
    pub mod pages;
    pub mod realtime;

    pub mod api {
        pub mod ports;
        pub mod vessels;
    }
}

/// # wire up the server
/// `ports` is loaded before the server starts and is only ever read by the handlers.
pub fn build(settings: Settings, ports: PortStore) -> Rocket<Build> {
    rocket::build()
        .attach(CORS)
        .attach(Template::fairing())
        .manage(settings)
        .manage(ports)
        .manage(Registry::new())
        .mount(
            "/",
            routes![
                // pages
                pages::index,
                pages::vessel_to_port,
                pages::port_to_port,
                pages::berth_allocation,
                pages::map,
                // static files
                pages::static_assignment_js,
                pages::assignment_js,
                // realtime
                realtime::relay,
            ],
        )
        .mount("/api", routes![api::vessels::get_vessels])
        .mount("/data", routes![api::ports::get_ports])
}
