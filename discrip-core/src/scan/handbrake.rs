//! HandBrakeCLI scanner adapter.

use super::{DiscScanner, ScanMode, ScanOutput};
use crate::config::DiscripConfig;
use crate::error::{CoreResult, command_start_error, scan_failed_error};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Runs `HandBrakeCLI --scan` against a disc and captures its output.
#[derive(Debug, Clone)]
pub struct HandBrakeScanner {
    handbrake_path: PathBuf,
    min_duration_secs: u64,
    mode: ScanMode,
}

impl HandBrakeScanner {
    pub fn new(handbrake_path: impl Into<PathBuf>, min_duration_secs: u64, mode: ScanMode) -> Self {
        Self {
            handbrake_path: handbrake_path.into(),
            min_duration_secs,
            mode,
        }
    }

    pub fn from_config(config: &DiscripConfig) -> Self {
        Self::new(
            config.scanner.handbrake_path.clone(),
            config.min_scan_duration_secs(),
            config.scanner.mode,
        )
    }

    /// Arguments for scanning every title of `disc_path`.
    pub fn build_args(&self, disc_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--input".into(),
            disc_path.as_os_str().to_os_string(),
            "--title".into(),
            "0".into(),
            "--min-duration".into(),
            self.min_duration_secs.to_string().into(),
            "--scan".into(),
        ];
        if self.mode == ScanMode::Json {
            args.push("--json".into());
        }
        args
    }
}

impl DiscScanner for HandBrakeScanner {
    fn scan(&self, disc_path: &Path) -> CoreResult<ScanOutput> {
        let args = self.build_args(disc_path);
        log::debug!(
            "Running scan: {} {}",
            self.handbrake_path.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(&self.handbrake_path)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| command_start_error(self.handbrake_path.display().to_string(), e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            log::error!("Scan of {} exited with {}", disc_path.display(), output.status);
            return Err(scan_failed_error(disc_path, output.status, &stdout, &stderr));
        }

        Ok(ScanOutput { stdout, stderr })
    }
}
