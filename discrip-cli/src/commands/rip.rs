//! Implementation of a discrip run.
//!
//! Loads configuration, prepares the disc list, scans every disc, walks the
//! operator through each season, and encodes the confirmed episodes. Any
//! fatal error (bad configuration, scan failure, operator quit, encode
//! failure) ends the run.

use crate::cli::Cli;
use crate::error::{CliResult, path_error};
use crate::logging;
use crate::prompt::TerminalPrompter;

use discrip_core::config::DiscripConfig;
use discrip_core::terminal;
use discrip_core::{
    HandBrakeEncoder, HandBrakeScanner, StdFs, build_jobs, prepare_disc_paths, review_catalog,
    run_jobs, scan_discs,
};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, info};
use std::fs;
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

fn scan_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner} {msg}") {
        spinner.set_style(style);
    }
    if std::io::stderr().is_terminal() {
        spinner.enable_steady_tick(Duration::from_millis(100));
    } else {
        spinner.set_draw_target(ProgressDrawTarget::hidden());
    }
    spinner
}

/// Runs scan, review and encode for the disc paths on the command line.
pub fn run_rip(cli: Cli) -> CliResult<()> {
    let config_path = DiscripConfig::resolve_path();
    let config = DiscripConfig::load(config_path.as_deref())?;

    if let Some(work_dir) = &config.work_dir {
        std::env::set_current_dir(work_dir)
            .map_err(|e| path_error("change into work directory", work_dir, e))?;
    }

    let disc_paths = prepare_disc_paths(cli.disc_paths, &config.remap_dirs)?;

    let log_dir = config.effective_log_dir();
    fs::create_dir_all(&config.output_dir)
        .map_err(|e| path_error("create output directory", &config.output_dir, e))?;
    fs::create_dir_all(&log_dir).map_err(|e| path_error("create log directory", &log_dir, e))?;

    let debug_log = logging::init_logging(&log_dir)?;
    debug!("Debug log: {}", debug_log.display());
    match &config_path {
        Some(path) => debug!("Configuration file: {}", path.display()),
        None => debug!("No configuration file; using defaults and environment"),
    }
    debug!("Effective configuration: {config:?}");

    // ---- Scan ----
    terminal::print_section("Scanning discs");
    let scanner = HandBrakeScanner::from_config(&config);
    let parser = config.scanner.mode.parser();
    let spinner = scan_spinner();
    let catalog = scan_discs(
        &scanner,
        parser.as_ref(),
        &disc_paths,
        &config.language,
        &mut |disc: &Path| {
            spinner.set_message(format!("Scanning {}...", disc.display()));
            spinner.suspend(|| info!("Scanning {}...", disc.display()));
        },
    );
    spinner.finish_and_clear();
    let catalog = catalog?;

    terminal::print_status("Discs", &disc_paths.len().to_string());
    terminal::print_status("Titles", &catalog.title_count().to_string());
    terminal::print_status("Seasons", &catalog.groups().len().to_string());
    if catalog.is_empty() {
        terminal::print_warning("No titles found on any disc; nothing to encode");
        return Ok(());
    }

    // ---- Review ----
    terminal::print_section("Episode selection");
    let mut prompter = TerminalPrompter::new();
    let seasons = review_catalog(&catalog, &config.selection_options(), &StdFs, &mut prompter)?;
    let jobs = build_jobs(&seasons, &config.language);

    // ---- Encode ----
    terminal::print_section("Encoding");
    if jobs.is_empty() {
        terminal::print_warning("No episodes selected; nothing to encode");
        return Ok(());
    }
    let encoder = HandBrakeEncoder::from_config(&config);
    let summary = run_jobs(&jobs, &encoder, &StdFs, &log_dir)?;

    info!("");
    terminal::print_success(&format!(
        "Encoded {} episode(s), skipped {}",
        summary.encoded, summary.skipped
    ));
    Ok(())
}
