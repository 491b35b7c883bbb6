//! Environment overrides are layered on top of the configuration file.
//!
//! Everything lives in one test so no other test in this binary observes
//! the variables while they are set.

use discrip_core::config::DiscripConfig;
use discrip_core::error::CoreError;
use discrip_core::scan::ScanMode;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

const VARS: &[&str] = &[
    "DISCRIP_OUTPUT_DIR",
    "DISCRIP_LOG_DIR",
    "DISCRIP_WORK_DIR",
    "DISCRIP_HANDBRAKE_PATH",
    "DISCRIP_SCAN_MODE",
    "DISCRIP_LANGUAGE",
    "DISCRIP_MIN_SCAN_DURATION",
    "DISCRIP_ALLOW_NO_SUBTITLES",
];

fn clear_vars() {
    for var in VARS {
        unsafe { env::remove_var(var) };
    }
}

#[test]
fn test_env_var_overrides() -> Result<(), Box<dyn std::error::Error>> {
    clear_vars();

    let dir = tempdir()?;
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "output_dir = \"/from/file\"\nlanguage = \"fre\"\n\n[scanner]\nmode = \"text\"\n",
    )?;

    unsafe {
        env::set_var("DISCRIP_OUTPUT_DIR", "/from/env");
        env::set_var("DISCRIP_WORK_DIR", "/srv/rips");
        env::set_var("DISCRIP_HANDBRAKE_PATH", "/usr/bin/HandBrakeCLI");
        env::set_var("DISCRIP_SCAN_MODE", "json");
        env::set_var("DISCRIP_MIN_SCAN_DURATION", "3");
        env::set_var("DISCRIP_ALLOW_NO_SUBTITLES", "true");
    }

    let config = DiscripConfig::load(Some(&config_path))?;

    assert_eq!(config.output_dir, PathBuf::from("/from/env"));
    assert_eq!(config.effective_log_dir(), PathBuf::from("/from/env/logs"));
    assert_eq!(config.work_dir, Some(PathBuf::from("/srv/rips")));
    // Not overridden, so the file wins over the default.
    assert_eq!(config.language, "fre");
    assert_eq!(
        config.scanner.handbrake_path,
        PathBuf::from("/usr/bin/HandBrakeCLI")
    );
    assert_eq!(config.scanner.mode, ScanMode::Json);
    assert_eq!(config.min_scan_duration_secs(), 180);
    assert!(config.allow_no_subtitles);

    unsafe { env::set_var("DISCRIP_SCAN_MODE", "xml") };
    let result = DiscripConfig::load(Some(&config_path));
    assert!(matches!(result, Err(CoreError::Config(_))));

    unsafe { env::set_var("DISCRIP_SCAN_MODE", "json") };
    unsafe { env::set_var("DISCRIP_LANGUAGE", "") };
    let result = DiscripConfig::load(Some(&config_path));
    assert!(matches!(result, Err(CoreError::Config(_))));

    clear_vars();
    Ok(())
}
