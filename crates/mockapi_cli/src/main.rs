//! CLI smoke entry point.
//!
//! Opens (or creates) a store file and prints its full contents as JSON.
//!
//! Usage: `mockapi_cli <db-path>`; `MOCKAPI_LOG_LEVEL` overrides the log level.

use mockapi_core::{core_version, default_log_level, init_logging, EndpointStore};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const LOG_LEVEL_ENV: &str = "MOCKAPI_LOG_LEVEL";

fn main() -> ExitCode {
    let Some(db_path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: mockapi_cli <db-path>");
        return ExitCode::from(2);
    };

    match run(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mockapi_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(db_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = std::path::absolute(db_path)?;
    let log_dir = db_path
        .parent()
        .map_or_else(|| PathBuf::from("logs"), |dir| dir.join("logs"));
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    init_logging(&level, &log_dir.to_string_lossy())?;
    log::info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let store = EndpointStore::open(&db_path)?;
    let snapshot = store.snapshot()?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
