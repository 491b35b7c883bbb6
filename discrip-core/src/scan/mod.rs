// ============================================================================
// discrip-core/src/scan/mod.rs
// ============================================================================
//
// SCANNING: Disc Scan Invocation and Output Parsing
//
// This module turns a disc path into a list of per-title records. The
// scanner subprocess sits behind the `DiscScanner` trait and its output is
// interpreted by a `ScanParser`. HandBrakeCLI can describe a disc either as
// a JSON document or as an indented text summary; each format has its own
// parser and the configured `ScanMode` picks one.
//
// KEY COMPONENTS:
// - ScanMode: Which output format to request and parse
// - ScannedTitle: One title as reported by the scanner, before grouping
// - ScanParser: Trait implemented by JsonScanParser and TextScanParser
// - DiscScanner: Trait for running the scanner (HandBrakeScanner in production)
// - scan_discs: Scans all discs into a SeasonCatalog
// - select_subtitle_tracks: Target-language subtitle selection with fallback

mod handbrake;
mod json;
mod text;

use crate::error::{CoreError, CoreResult};
use crate::season::SeasonCatalog;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use handbrake::HandBrakeScanner;
pub use json::JsonScanParser;
pub use text::TextScanParser;

/// Language tag scanners use when a track's language is unknown.
pub const UNDETERMINED_LANGUAGE: &str = "und";

/// Scanner output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// `--json` output: durations with tick counts and per-chapter ticks
    Json,
    /// Plain text title summary: HH:MM:SS durations and block counts
    Text,
}

impl ScanMode {
    /// Returns the parser that understands this mode's output.
    pub fn parser(self) -> Box<dyn ScanParser> {
        match self {
            ScanMode::Json => Box::new(JsonScanParser),
            ScanMode::Text => Box::new(TextScanParser),
        }
    }
}

impl FromStr for ScanMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ScanMode::Json),
            "text" => Ok(ScanMode::Text),
            other => Err(CoreError::Config(format!(
                "Unknown scan mode '{other}' (expected 'json' or 'text')"
            ))),
        }
    }
}

/// Captured output of one scanner run.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    pub stdout: String,
    pub stderr: String,
}

/// One title from a disc scan, before series/season information is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedTitle {
    /// 1-based title number as reported by the scanner
    pub index: u32,
    pub duration_seconds: u64,
    /// Short description of the structural signal, e.g. "226800000 ticks"
    pub structure: String,
    pub fingerprint: String,
    /// 1-based subtitle track numbers chosen for encoding
    pub subtitle_tracks: Vec<u32>,
}

/// Interprets a scanner's output.
pub trait ScanParser {
    /// Parses every title in `output`, choosing subtitles for `language`.
    fn parse(&self, output: &ScanOutput, language: &str) -> CoreResult<Vec<ScannedTitle>>;
}

/// Runs a disc scan.
pub trait DiscScanner {
    /// Scans `disc_path`, failing with [`CoreError::ScanFailure`] when the
    /// scanner exits unsuccessfully.
    fn scan(&self, disc_path: &Path) -> CoreResult<ScanOutput>;
}

/// Scans one disc and parses the result.
pub fn scan_disc(
    scanner: &dyn DiscScanner,
    parser: &dyn ScanParser,
    disc_path: &Path,
    language: &str,
) -> CoreResult<Vec<ScannedTitle>> {
    let output = scanner.scan(disc_path)?;
    let titles = parser.parse(&output, language)?;
    log::debug!("Found {} titles on {}", titles.len(), disc_path.display());
    Ok(titles)
}

/// Scans every disc in order and files the titles into a season catalog.
///
/// `on_disc` is called before each disc is scanned. The first failed scan
/// stops the whole scan phase.
pub fn scan_discs(
    scanner: &dyn DiscScanner,
    parser: &dyn ScanParser,
    disc_paths: &[PathBuf],
    language: &str,
    on_disc: &mut dyn FnMut(&Path),
) -> CoreResult<SeasonCatalog> {
    let mut catalog = SeasonCatalog::new();
    for disc_path in disc_paths {
        on_disc(disc_path);
        let titles = scan_disc(scanner, parser, disc_path, language)?;
        catalog.add_disc(disc_path, titles);
    }
    Ok(catalog)
}

/// Picks subtitle tracks for `language`.
///
/// `track_languages` holds `(track number, language tag)` pairs in scanner
/// order. Tracks in the target language win; when there are none, tracks
/// with an undetermined language are used instead. The result may be empty.
pub fn select_subtitle_tracks(track_languages: &[(u32, String)], language: &str) -> Vec<u32> {
    let matching = |tag: &str| -> Vec<u32> {
        track_languages
            .iter()
            .filter(|(_, lang)| lang == tag)
            .map(|(number, _)| *number)
            .collect()
    };

    let tracks = matching(language);
    if tracks.is_empty() {
        matching(UNDETERMINED_LANGUAGE)
    } else {
        tracks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(langs: &[&str]) -> Vec<(u32, String)> {
        langs
            .iter()
            .enumerate()
            .map(|(i, lang)| (i as u32 + 1, lang.to_string()))
            .collect()
    }

    #[test]
    fn test_subtitles_prefer_target_language() {
        let selected = select_subtitle_tracks(&tracks(&["fre", "eng", "und", "eng"]), "eng");
        assert_eq!(selected, vec![2, 4]);
    }

    #[test]
    fn test_subtitles_fall_back_to_undetermined() {
        let selected = select_subtitle_tracks(&tracks(&["fre", "und", "spa", "und"]), "eng");
        assert_eq!(selected, vec![2, 4]);
    }

    #[test]
    fn test_subtitles_empty_when_nothing_matches() {
        assert!(select_subtitle_tracks(&tracks(&["fre", "spa"]), "eng").is_empty());
        assert!(select_subtitle_tracks(&[], "eng").is_empty());
    }

    #[test]
    fn test_scan_mode_from_str() {
        assert_eq!("JSON".parse::<ScanMode>().unwrap(), ScanMode::Json);
        assert_eq!(" text ".parse::<ScanMode>().unwrap(), ScanMode::Text);
        assert!("xml".parse::<ScanMode>().is_err());
    }
}
