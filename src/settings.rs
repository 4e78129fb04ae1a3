use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use log::info;

/// Locations of the data files and asset directories.
///
/// Every field can be overridden through the environment (or a `.env` file).
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub ports_csv: PathBuf,
    pub vessels_csv: PathBuf,
    pub static_dir: PathBuf,
    pub public_dir: PathBuf,
    pub asset_root: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ports_csv: PathBuf::from("Updated_Port_Data_with_Split_Departure_Time.csv"),
            vessels_csv: PathBuf::from("Port_Data.csv"),
            static_dir: PathBuf::from("static"),
            public_dir: PathBuf::from("public"),
            asset_root: PathBuf::from("."),
        }
    }
}

impl Settings {
    pub fn from_env() -> Settings {
        dotenv().ok();

        let defaults = Settings::default();
        Settings {
            ports_csv: path_var("PORTS_CSV", defaults.ports_csv),
            vessels_csv: path_var("VESSELS_CSV", defaults.vessels_csv),
            static_dir: path_var("STATIC_DIR", defaults.static_dir),
            public_dir: path_var("PUBLIC_DIR", defaults.public_dir),
            asset_root: path_var("ASSET_ROOT", defaults.asset_root),
        }
    }
}

fn path_var(key: &str, default: PathBuf) -> PathBuf {
    match env::var(key) {
        Ok(value) if !value.is_empty() => PathBuf::from(value),
        _ => {
            info!(target: "settings", "{} not set, using default: {}", key, default.display());
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_falls_back_to_default() {
        let path = path_var("PORT_SCHEDULE_TEST_UNSET_VARIABLE", PathBuf::from("fallback.csv"));
        assert_eq!(path, PathBuf::from("fallback.csv"));
    }

    #[test]
    fn set_variable_overrides_default() {
        env::set_var("PORT_SCHEDULE_TEST_SET_VARIABLE", "elsewhere.csv");
        let path = path_var("PORT_SCHEDULE_TEST_SET_VARIABLE", PathBuf::from("fallback.csv"));
        assert_eq!(path, PathBuf::from("elsewhere.csv"));
    }
}
