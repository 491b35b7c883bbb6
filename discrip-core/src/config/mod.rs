//! Configuration structures and loading for discrip.
//!
//! Settings are layered in three steps: built-in defaults, an optional TOML
//! file, then `DISCRIP_*` environment variables. The command line only ever
//! carries disc paths, so everything else about a run lives here.
//!
//! # Example file
//!
//! ```toml
//! output_dir = "/media/tv/incoming"
//! language = "eng"
//! min_scan_duration_minutes = 5
//!
//! [scanner]
//! handbrake_path = "/usr/local/bin/HandBrakeCLI"
//! mode = "json"
//!
//! [encoder]
//! video_bitrate = 2000
//!
//! [[remap_dirs]]
//! search = "/Volumes/"
//! replace = "/mnt/discs/"
//! ```

mod encoder;
pub mod utils;

use crate::error::{CoreError, CoreResult};
use crate::scan::ScanMode;
use crate::selection::SelectionOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use utils::*;

pub use encoder::EncoderSettings;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "DISCRIP_CONFIG";

/// Default HandBrakeCLI binary, resolved through `PATH`.
pub const DEFAULT_HANDBRAKE_PATH: &str = "HandBrakeCLI";

/// Default spoken/subtitle language (ISO 639-2).
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Titles shorter than this are not reported by the scanner at all.
pub const DEFAULT_MIN_SCAN_DURATION_MINUTES: u32 = 5;

/// Default extension for encoded files.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "mkv";

/// Scanner invocation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Path to the HandBrakeCLI binary (also used for encoding)
    pub handbrake_path: PathBuf,

    /// Which scan output format to request and parse
    pub mode: ScanMode,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            handbrake_path: PathBuf::from(DEFAULT_HANDBRAKE_PATH),
            mode: ScanMode::Json,
        }
    }
}

/// A substring rewrite applied to disc paths before scanning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemapRule {
    pub search: String,
    pub replace: String,
}

/// Main configuration for a discrip run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscripConfig {
    /// Directory where encoded episodes are written
    pub output_dir: PathBuf,

    /// Directory for run and encoder logs (defaults to `output_dir/logs`)
    pub log_dir: Option<PathBuf>,

    /// Directory to change into before resolving disc paths
    pub work_dir: Option<PathBuf>,

    /// Target language for subtitle and audio selection
    pub language: String,

    /// Minimum title length, in minutes, passed to the scanner
    pub min_scan_duration_minutes: u32,

    /// Keep titles that have no matching subtitle track
    pub allow_no_subtitles: bool,

    /// Extension of encoded files, without the dot
    pub output_extension: String,

    pub scanner: ScannerConfig,

    pub encoder: EncoderSettings,

    /// Disc path rewrites, applied in order
    pub remap_dirs: Vec<RemapRule>,
}

impl Default for DiscripConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            log_dir: None,
            work_dir: None,
            language: DEFAULT_LANGUAGE.to_string(),
            min_scan_duration_minutes: DEFAULT_MIN_SCAN_DURATION_MINUTES,
            allow_no_subtitles: false,
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            scanner: ScannerConfig::default(),
            encoder: EncoderSettings::default(),
            remap_dirs: Vec::new(),
        }
    }
}

impl DiscripConfig {
    /// Loads configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Builds the effective configuration: file (if any), then environment
    /// overrides, then validation.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let mut config = match path {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Picks the configuration file for this run: `DISCRIP_CONFIG` when set,
    /// otherwise `<config dir>/discrip/config.toml` if that file exists.
    pub fn resolve_path() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(explicit));
        }
        dirs::config_dir()
            .map(|dir| dir.join("discrip").join("config.toml"))
            .filter(|path| path.is_file())
    }

    /// Applies `DISCRIP_*` environment variables on top of current values.
    pub fn apply_env_overrides(&mut self) -> CoreResult<()> {
        self.output_dir = get_env_path("DISCRIP_OUTPUT_DIR", self.output_dir.clone());
        self.log_dir = get_env_opt_path("DISCRIP_LOG_DIR", self.log_dir.take());
        self.work_dir = get_env_opt_path("DISCRIP_WORK_DIR", self.work_dir.take());
        self.language = get_env_string("DISCRIP_LANGUAGE", self.language.clone());
        self.min_scan_duration_minutes =
            get_env_u32("DISCRIP_MIN_SCAN_DURATION", self.min_scan_duration_minutes);
        self.allow_no_subtitles =
            get_env_bool("DISCRIP_ALLOW_NO_SUBTITLES", self.allow_no_subtitles);
        self.scanner.handbrake_path = get_env_path(
            "DISCRIP_HANDBRAKE_PATH",
            self.scanner.handbrake_path.clone(),
        );
        if let Ok(mode) = std::env::var("DISCRIP_SCAN_MODE") {
            self.scanner.mode = mode.parse()?;
        }
        Ok(())
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.language.trim().is_empty() {
            return Err(CoreError::Config("language must not be empty".to_string()));
        }
        if self.scanner.handbrake_path.as_os_str().is_empty() {
            return Err(CoreError::Config(
                "scanner.handbrake_path must not be empty".to_string(),
            ));
        }
        if self.output_extension.trim().is_empty() {
            return Err(CoreError::Config(
                "output_extension must not be empty".to_string(),
            ));
        }
        if self.remap_dirs.iter().any(|rule| rule.search.is_empty()) {
            return Err(CoreError::Config(
                "remap_dirs entries need a non-empty search string".to_string(),
            ));
        }
        Ok(())
    }

    /// Log directory, falling back to `output_dir/logs`.
    pub fn effective_log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.output_dir.join("logs"))
    }

    pub fn min_scan_duration_secs(&self) -> u64 {
        u64::from(self.min_scan_duration_minutes) * 60
    }

    /// The run-wide part of the selection filter's input.
    pub fn selection_options(&self) -> SelectionOptions {
        SelectionOptions {
            allow_no_subtitles: self.allow_no_subtitles,
            output_dir: self.output_dir.clone(),
            output_extension: self.output_extension.clone(),
        }
    }
}
