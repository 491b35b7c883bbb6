//! Core library for choosing and encoding TV episodes from disc images.
//!
//! A run scans each disc with HandBrakeCLI, groups the titles by series and
//! season inferred from the disc filenames, lets an operator confirm which
//! titles are episodes, and encodes the confirmed set. Duplicate titles are
//! recognised by a structural fingerprint so the same episode exposed twice
//! on one disc is only encoded once.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use discrip_core::{DiscripConfig, HandBrakeEncoder, HandBrakeScanner, StdFs};
//! use discrip_core::{build_jobs, prepare_disc_paths, review_catalog, run_jobs, scan_discs};
//! # use discrip_core::review::{OperatorDecision, Overrides, ReviewPrompter};
//! # use discrip_core::{CoreResult, SeasonGroup, SelectionCriteria};
//! # struct AlwaysYes;
//! # impl ReviewPrompter for AlwaysYes {
//! #     fn criteria(&mut self, _: &SeasonGroup, p: &SelectionCriteria) -> CoreResult<SelectionCriteria> { Ok(p.clone()) }
//! #     fn decision(&mut self) -> CoreResult<OperatorDecision> { Ok(OperatorDecision::Confirm) }
//! #     fn overrides(&mut self) -> CoreResult<Overrides> { Ok(Overrides::default()) }
//! # }
//! use std::path::PathBuf;
//!
//! let config = DiscripConfig::load(None).unwrap();
//! let discs = prepare_disc_paths(vec![PathBuf::from("MyShow-S1-D1")], &config.remap_dirs).unwrap();
//!
//! let scanner = HandBrakeScanner::from_config(&config);
//! let parser = config.scanner.mode.parser();
//! let catalog = scan_discs(&scanner, parser.as_ref(), &discs, &config.language, &mut |_| {}).unwrap();
//!
//! let seasons = review_catalog(&catalog, &config.selection_options(), &StdFs, &mut AlwaysYes).unwrap();
//! let jobs = build_jobs(&seasons, &config.language);
//! run_jobs(&jobs, &HandBrakeEncoder::from_config(&config), &StdFs, &config.effective_log_dir()).unwrap();
//! ```

pub mod config;
pub mod discovery;
pub mod encode;
pub mod error;
pub mod fingerprint;
pub mod jobs;
pub mod metadata;
pub mod review;
pub mod scan;
pub mod season;
pub mod selection;
pub mod terminal;
pub mod utils;

// Re-exports for public API
pub use config::{DiscripConfig, EncoderSettings, RemapRule, ScannerConfig};
pub use discovery::prepare_disc_paths;
pub use encode::{HandBrakeEncoder, RunSummary, TitleEncoder, run_jobs};
pub use error::{CoreError, CoreResult};
pub use jobs::{EncodeJob, build_jobs};
pub use metadata::{DiscMetadata, infer_disc_metadata};
pub use review::{ReviewPrompter, ReviewedSeason, review_catalog, review_season};
pub use scan::{DiscScanner, HandBrakeScanner, ScanMode, ScanParser, ScannedTitle, scan_discs};
pub use season::{DiscTitle, SeasonCatalog, SeasonGroup, SeasonKey};
pub use selection::{
    DurationPreset, DurationWindow, OutputFilesystem, Selection, SelectionCriteria,
    SelectionOptions, StdFs, select_episodes,
};
pub use utils::{format_duration, humanize_duration};
