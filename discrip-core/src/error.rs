// ============================================================================
// discrip-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for discrip-core
//
// This module defines the error type used throughout the discrip-core
// library. Only fatal conditions are errors: a failed scan, a failed encode,
// an operator quit, or bad configuration. Per-title skips (duplicates,
// missing subtitles, existing output) are reported as exclusions by the
// selection filter and never surface here.
//
// KEY COMPONENTS:
// - CoreError: Enum of all fatal error conditions
// - CoreResult: Type alias for Result with CoreError
// - Helper functions for creating command-related errors

use std::io;
use std::path::Path;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while scanning, selecting, or encoding titles.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Must pass paths to discs as arguments")]
    NoDiscPaths,

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, io::Error),

    #[error("Failed to wait for {0}: {1}")]
    CommandWait(String, io::Error),

    /// The scanner exited with a non-zero status.
    #[error("Scan failed for {disc}: {status}\n{output}")]
    ScanFailure {
        disc: String,
        status: ExitStatus,
        output: String,
    },

    /// The scanner succeeded but its output could not be understood.
    #[error("Unable to parse scan output: {0}")]
    ScanParse(String),

    #[error("Encoding failed for {output}: {status}")]
    EncodeFailure { output: String, status: ExitStatus },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// The operator chose to quit during review.
    #[error("Aborted by operator")]
    Aborted,
}

pub type CoreResult<T> = Result<T, CoreError>;

// ---- Helper functions ----

pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

/// Builds a [`CoreError::ScanFailure`] keeping both output streams so the
/// operator can see what the scanner complained about.
pub fn scan_failed_error(disc: &Path, status: ExitStatus, stdout: &str, stderr: &str) -> CoreError {
    CoreError::ScanFailure {
        disc: disc.display().to_string(),
        status,
        output: format!("{}\n{}", stdout.trim_end(), stderr.trim_end()),
    }
}
