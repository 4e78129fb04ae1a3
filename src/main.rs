use rocket::{launch, Build, Rocket};

use port_schedule::modules::helpers::logging::setup_logging;
use port_schedule::modules::models::port::PortStore;
use port_schedule::settings::Settings;

#[launch]
fn rocket() -> Rocket<Build> {
    setup_logging().expect("Failed to setup logging");

    let settings = Settings::from_env();

    // ports are read once, vessels on every request
    let ports = PortStore::load(&settings.ports_csv).expect("Failed to load ports");

    port_schedule::build(settings, ports)
}
