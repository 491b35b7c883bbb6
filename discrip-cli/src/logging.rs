// ============================================================================
// discrip-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and Debug File Output
//
// The core library only talks to the `log` facade. This module installs a
// `fern` dispatcher with two outputs:
// - the console (stdout) at info level, message text only
// - `<log_dir>/debug-<timestamp>.log` at debug level, with timestamps and
//   levels, and with terminal styling stripped
//
// KEY COMPONENTS:
// - get_timestamp: Timestamp used in the debug log filename
// - init_logging: Installs the global logger

use crate::error::{CliResult, path_error};
use console::style;
use discrip_core::CoreError;
use log::{Level, LevelFilter};
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYY-MM-DDTHH-MM-SS".
///
/// Colons are avoided so the value is safe in filenames everywhere.
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H-%M-%S").to_string()
}

/// Path of the debug log for a run starting now.
pub fn debug_log_path(log_dir: &Path) -> PathBuf {
    log_dir.join(format!("debug-{}.log", get_timestamp()))
}

fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Installs the console and file loggers. Returns the debug log path.
pub fn init_logging(log_dir: &Path) -> CliResult<PathBuf> {
    let log_path = debug_log_path(log_dir);
    let log_file =
        fern::log_file(&log_path).map_err(|e| path_error("create log file", &log_path, e))?;

    let color = use_color();
    let console = fern::Dispatch::new()
        .level(LevelFilter::Info)
        .format(move |out, message, record| match record.level() {
            Level::Error if color => out.finish(format_args!(
                "{} {}",
                style("Error:").red().bold(),
                message
            )),
            Level::Error => out.finish(format_args!("Error: {message}")),
            _ => out.finish(format_args!("{message}")),
        })
        .chain(std::io::stdout());

    let file = fern::Dispatch::new()
        .level(LevelFilter::Debug)
        .format(|out, message, record| {
            let text = message.to_string();
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                console::strip_ansi_codes(&text)
            ))
        })
        .chain(log_file);

    fern::Dispatch::new()
        .level(LevelFilter::Debug)
        .chain(console)
        .chain(file)
        .apply()
        .map_err(|e| CoreError::Config(format!("Failed to initialise logging: {e}")))?;

    Ok(log_path)
}
