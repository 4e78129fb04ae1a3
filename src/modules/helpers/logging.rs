use std::env;
use dotenvy::dotenv;
use fern::Dispatch;
use log::LevelFilter;

pub fn setup_logging() -> Result<(), fern::InitError> {
    dotenv().ok();

    let verbosity = env::var("LOGGING_LEVEL").unwrap_or_else(|_| "INFO".to_string());
    let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "program.log".to_string());

    let file_logger_config = Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .chain(std::io::stdout())
        .chain(fern::log_file(log_file)?);

    Dispatch::new()
        .level(level_from_str(&verbosity))
        .chain(file_logger_config)
        .apply()?;

    Ok(())
}

fn level_from_str(verbosity: &str) -> LevelFilter {
    match verbosity.to_uppercase().as_str() {
        "OFF" => LevelFilter::Off,
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        // default to info
        _ => LevelFilter::Info,
    }
}
