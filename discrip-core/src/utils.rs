//! Utility functions for duration formatting and path handling.
//!
//! Durations from the scanner are whole seconds, so everything here works on
//! `u64` rather than floating point.

use std::path::Path;

/// Formats seconds as HH:MM:SS (e.g., 3725 -> "01:02:05").
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Formats seconds as right-aligned total minutes and seconds
/// (e.g., 2530 -> " 42m 10s").
#[must_use]
pub fn humanize_duration(seconds: u64) -> String {
    format!("{:>3}m {:>2}s", seconds / 60, seconds % 60)
}

/// Returns the final path component, or the whole path when there is none
/// (e.g. `/` or `..`).
#[must_use]
pub fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
