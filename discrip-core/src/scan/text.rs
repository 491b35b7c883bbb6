//! Parser for HandBrakeCLI's plain-text title summary.
//!
//! Without `--json` the scanner ends with an indented summary per title:
//!
//! ```text
//! + title 1:
//!   + vts 1, ttn 1, cells 0->12 (1534236 blocks)
//!   + duration: 00:42:10
//!   + chapters:
//!     + 1: cells 0->0, 102421 blocks, duration 00:05:12
//!   + audio tracks:
//!     + 1, English (AC3) (2.0 ch) (iso639-2: eng), 48000Hz, 192000bps
//!   + subtitle tracks:
//!     + 1, English (iso639-2: eng) (Bitmap)(VOBSUB)
//!     + 2, Francais (iso639-2: fra) (Bitmap)(VOBSUB)
//! ```
//!
//! The block count stands in for chapter timing as the structural signal.

use super::{ScanOutput, ScanParser, ScannedTitle, UNDETERMINED_LANGUAGE, select_subtitle_tracks};
use crate::error::{CoreError, CoreResult};
use crate::fingerprint::fingerprint_from_blocks;
use regex::Regex;
use std::sync::LazyLock;

static TITLE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\+ title (\d+):").unwrap());

static BLOCK_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\+ vts .*\((\d+) blocks\)").unwrap());

static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\+ duration: (\d+):(\d{2}):(\d{2})").unwrap());

static SUBTITLE_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\+ subtitle tracks:").unwrap());

static SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\+ [A-Za-z][A-Za-z ]*:").unwrap());

static SUBTITLE_TRACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\+ (\d+), (.*)$").unwrap());

static ISO_LANGUAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(iso639-2: ([a-z]{3})\)").unwrap());

/// Parses the indented title summary printed by a plain `--scan`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextScanParser;

#[derive(Debug, Default)]
struct TitleBlock {
    index: u32,
    duration_seconds: Option<u64>,
    blocks: Option<u64>,
    subtitles: Vec<(u32, String)>,
    in_subtitles: bool,
}

impl TitleBlock {
    fn new(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    fn finish(self, language: &str) -> CoreResult<ScannedTitle> {
        let duration_seconds = self.duration_seconds.ok_or_else(|| {
            CoreError::ScanParse(format!("title {} has no duration", self.index))
        })?;
        let blocks = self.blocks.ok_or_else(|| {
            CoreError::ScanParse(format!("title {} has no block count", self.index))
        })?;

        Ok(ScannedTitle {
            index: self.index,
            duration_seconds,
            structure: format!("{blocks} blocks"),
            fingerprint: fingerprint_from_blocks(blocks),
            subtitle_tracks: select_subtitle_tracks(&self.subtitles, language),
        })
    }

    fn read_line(&mut self, line: &str) {
        if let Some(caps) = DURATION.captures(line) {
            let part = |i: usize| caps[i].parse::<u64>().unwrap_or(0);
            self.duration_seconds = Some(part(1) * 3600 + part(2) * 60 + part(3));
            self.in_subtitles = false;
        } else if let Some(caps) = BLOCK_COUNT.captures(line) {
            self.blocks = caps[1].parse().ok();
        } else if SUBTITLE_SECTION.is_match(line) {
            self.in_subtitles = true;
        } else if SECTION.is_match(line) {
            self.in_subtitles = false;
        } else if self.in_subtitles {
            if let Some(caps) = SUBTITLE_TRACK.captures(line) {
                if let Ok(number) = caps[1].parse() {
                    let language = ISO_LANGUAGE
                        .captures(&caps[2])
                        .map(|iso| iso[1].to_string())
                        .unwrap_or_else(|| UNDETERMINED_LANGUAGE.to_string());
                    self.subtitles.push((number, language));
                }
            } else {
                self.in_subtitles = false;
            }
        }
    }
}

impl ScanParser for TextScanParser {
    fn parse(&self, output: &ScanOutput, language: &str) -> CoreResult<Vec<ScannedTitle>> {
        let mut titles = Vec::new();
        let mut current: Option<TitleBlock> = None;

        // The summary normally goes to stderr; older builds print it on stdout.
        for line in output.stdout.lines().chain(output.stderr.lines()) {
            if let Some(caps) = TITLE_START.captures(line) {
                if let Some(block) = current.take() {
                    titles.push(block.finish(language)?);
                }
                let index = caps[1]
                    .parse()
                    .map_err(|_| CoreError::ScanParse(format!("bad title line: {line}")))?;
                current = Some(TitleBlock::new(index));
            } else if line.trim_start().starts_with('+') {
                if let Some(block) = current.as_mut() {
                    block.read_line(line);
                }
            } else if let Some(block) = current.take() {
                // Any other log line ends the summary block.
                titles.push(block.finish(language)?);
            }
        }
        if let Some(block) = current.take() {
            titles.push(block.finish(language)?);
        }

        Ok(titles)
    }
}
