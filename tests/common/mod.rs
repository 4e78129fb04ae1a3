#![allow(dead_code)]

use std::fs;

use port_schedule::modules::models::port::PortStore;
use port_schedule::settings::Settings;
use rocket::local::blocking::Client;
use tempfile::TempDir;

pub const PORTS_CSV: &str = "\
port_id,coords_of_prev_port,distance,vessel_id,departure_date,departure_hour
P1,\"(51.9, 4.4)\",120,V1,01/02/2024,07:00
P2,unknown,80,V2,02/02/2024,09:30
P1,\"(53.5, 9.9)\",300,V3,01/02/2024,18:15
P3,\"(59.3, 18.0)\",45,V4,15/03/2024,12:00
";

pub const VESSELS_CSV: &str = "\
id,scheduled_time,actual_time,teus,cargo_type,departure_time,distance
V1,2024-01-01T00:00:00,2024-01-01T00:20:00,1200,Reefer,2023-12-31T18:00:00,120
V2,2024-01-01 22:30:00,2024-01-01 23:00:00,800,Standard,2024-01-01 10:00:00,80.5
";

/// Data files and asset directories in a temporary directory.
pub struct Fixture {
    pub dir: TempDir,
    pub settings: Settings,
}

impl Fixture {
    pub fn new() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            ports_csv: dir.path().join("ports.csv"),
            vessels_csv: dir.path().join("vessels.csv"),
            static_dir: dir.path().join("static"),
            public_dir: dir.path().join("public"),
            asset_root: dir.path().join("root"),
        };

        Fixture { dir, settings }
    }

    /// fixture with both csv files present
    pub fn with_data() -> Fixture {
        let fixture = Fixture::new();
        fixture.write("ports.csv", PORTS_CSV);
        fixture.write("vessels.csv", VESSELS_CSV);
        fixture
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    pub fn ports(&self) -> PortStore {
        PortStore::load(&self.settings.ports_csv).unwrap()
    }

    pub fn client(&self) -> Client {
        Client::tracked(port_schedule::build(self.settings.clone(), self.ports())).expect("valid rocket instance")
    }
}
