//! Tests for loading configuration from a TOML file.

use discrip_core::config::{DiscripConfig, RemapRule};
use discrip_core::error::CoreError;
use discrip_core::scan::ScanMode;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_config_file_parsing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
output_dir = "/media/tv/incoming"
log_dir = "/var/log/discrip"
language = "fre"
min_scan_duration_minutes = 10
allow_no_subtitles = true

[scanner]
handbrake_path = "/opt/handbrake/HandBrakeCLI"
mode = "text"

[encoder]
video_bitrate = 2200
two_pass = false

[[remap_dirs]]
search = "/Volumes/"
replace = "/mnt/discs/"

[[remap_dirs]]
search = "_ISO"
replace = ""
"#,
    )?;

    let config = DiscripConfig::from_file(&config_path)?;

    assert_eq!(config.output_dir, PathBuf::from("/media/tv/incoming"));
    assert_eq!(config.effective_log_dir(), PathBuf::from("/var/log/discrip"));
    assert_eq!(config.language, "fre");
    assert_eq!(config.min_scan_duration_secs(), 600);
    assert!(config.allow_no_subtitles);
    assert_eq!(config.scanner.mode, ScanMode::Text);
    assert_eq!(
        config.scanner.handbrake_path,
        PathBuf::from("/opt/handbrake/HandBrakeCLI")
    );
    assert_eq!(config.encoder.video_bitrate, 2200);
    assert!(!config.encoder.two_pass);
    assert_eq!(config.encoder.encoder_preset, "medium");
    assert_eq!(
        config.remap_dirs,
        vec![
            RemapRule {
                search: "/Volumes/".to_string(),
                replace: "/mnt/discs/".to_string()
            },
            RemapRule {
                search: "_ISO".to_string(),
                replace: String::new()
            },
        ]
    );

    let options = config.selection_options();
    assert!(options.allow_no_subtitles);
    assert_eq!(options.output_extension, "mkv");
    Ok(())
}

#[test]
fn test_invalid_toml_is_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "output_dir = [")?;

    let result = DiscripConfig::from_file(&config_path);
    assert!(matches!(result, Err(CoreError::TomlParse(_))));
    Ok(())
}

#[test]
fn test_missing_file_is_config_error() {
    let result = DiscripConfig::from_file(&PathBuf::from("/nonexistent/discrip.toml"));
    assert!(matches!(result, Err(CoreError::Config(_))));
}
