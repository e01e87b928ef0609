// src/logging.rs

use crate::models::ApiCallLog;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use std::fs::OpenOptions;
use std::io::Write;

/// Starts the file logger. The TUI owns stdout, so everything goes to
/// `gito.log` in the working directory. The handle must stay alive for the
/// lifetime of the process.
pub fn init_logging(log_level: &str) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_str(log_level)?
        .log_to_file(FileSpec::default().basename("gito").suppress_timestamp())
        .append()
        .start()?;
    Ok(handle)
}

/// Appends one line per external API call to `api_calls.log`.
pub fn log_api_call(log: &ApiCallLog) {
    let log_entry = format!(
        "[{}] {} - {} - Status: {} - Time: {}ms\n",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    );

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open("api_calls.log");

    match file {
        Ok(mut file) => {
            if let Err(e) = file.write_all(log_entry.as_bytes()) {
                log::warn!("failed to write api call log: {}", e);
            }
        }
        Err(e) => log::warn!("failed to open api call log: {}", e),
    }
}
