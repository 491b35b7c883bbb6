//! Parser for HandBrakeCLI `--scan --json` output.
//!
//! The scanner prints progress noise first and then, at the very end of
//! stdout, a line starting with `JSON Title Set:` followed by a JSON
//! document describing every title that passed the minimum duration.

use super::{ScanOutput, ScanParser, ScannedTitle, select_subtitle_tracks};
use crate::error::{CoreError, CoreResult};
use crate::fingerprint::fingerprint_from_ticks;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static TITLE_SET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)JSON Title Set: (\{.*)\z").unwrap());

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TitleSet {
    title_list: Vec<JsonTitle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct JsonTitle {
    index: u32,
    duration: JsonDuration,
    #[serde(default)]
    chapter_list: Vec<JsonChapter>,
    #[serde(default)]
    subtitle_list: Vec<JsonSubtitle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct JsonDuration {
    hours: u64,
    minutes: u64,
    seconds: u64,
    ticks: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct JsonChapter {
    duration: ChapterDuration,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ChapterDuration {
    ticks: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct JsonSubtitle {
    language_code: String,
}

/// Parses the JSON title set emitted by `HandBrakeCLI --scan --json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonScanParser;

impl ScanParser for JsonScanParser {
    fn parse(&self, output: &ScanOutput, language: &str) -> CoreResult<Vec<ScannedTitle>> {
        let document = TITLE_SET
            .captures(&output.stdout)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
            .ok_or_else(|| {
                CoreError::ScanParse("no 'JSON Title Set' found in scanner output".to_string())
            })?;

        let title_set: TitleSet = serde_json::from_str(document)?;

        Ok(title_set
            .title_list
            .into_iter()
            .map(|title| {
                let duration = &title.duration;
                let chapter_ticks: Vec<u64> = title
                    .chapter_list
                    .iter()
                    .map(|chapter| chapter.duration.ticks)
                    .collect();
                let track_languages: Vec<(u32, String)> = title
                    .subtitle_list
                    .into_iter()
                    .enumerate()
                    .map(|(i, sub)| (i as u32 + 1, sub.language_code))
                    .collect();

                ScannedTitle {
                    index: title.index,
                    duration_seconds: duration.hours * 3600
                        + duration.minutes * 60
                        + duration.seconds,
                    structure: format!("{} ticks", duration.ticks),
                    fingerprint: fingerprint_from_ticks(duration.ticks, &chapter_ticks),
                    subtitle_tracks: select_subtitle_tracks(&track_languages, language),
                }
            })
            .collect())
    }
}
