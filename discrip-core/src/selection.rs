// ============================================================================
// discrip-core/src/selection.rs
// ============================================================================
//
// EPISODE SELECTION: Choosing Which Titles of a Season Become Episodes
//
// Given every title of one season and the operator's criteria, the filter
// decides which titles are episodes, numbers them, and names their output
// files. Rules are evaluated per title in scan order and the first matching
// rule decides:
//
//   1. key in force-add            -> include
//   2. key in force-remove         -> exclude
//   3. duration outside the window -> exclude (silently)
//   4. no subtitles                -> exclude with a warning, unless allowed
//   5. fingerprint already claimed -> exclude as a duplicate
//   6. otherwise                   -> include and claim the fingerprint
//
// Included titles are numbered consecutively from the starting episode.
// Only after numbering are titles whose output file already exists dropped,
// so an existing file leaves a gap rather than shifting later episodes.
//
// The filter never mutates its input and never prints anything; callers get
// back the selection plus a list of exclusions to report.
//
// KEY COMPONENTS:
// - DurationWindow / DurationPreset: Inclusive duration bounds
// - SelectionCriteria: Operator-supplied, per-season filter input
// - SelectionOptions: Run-wide filter input from configuration
// - OutputFilesystem: Existence checks, swappable in tests
// - select_episodes: The filter itself

use crate::fingerprint::DuplicateTracker;
use crate::season::{DiscTitle, SeasonGroup, SeasonKey};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Inclusive bounds on a title's duration, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationWindow {
    pub min_seconds: u64,
    pub max_seconds: u64,
}

impl DurationWindow {
    pub fn from_minutes(min_minutes: u64, max_minutes: u64) -> Self {
        Self {
            min_seconds: min_minutes * 60,
            max_seconds: max_minutes * 60,
        }
    }

    pub fn contains(&self, seconds: u64) -> bool {
        seconds >= self.min_seconds && seconds <= self.max_seconds
    }
}

/// The duration choices offered to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationPreset {
    /// 36-80 minutes
    HourLong,
    /// 17-40 minutes
    HalfHour,
    Custom { min_minutes: u64, max_minutes: u64 },
}

impl DurationPreset {
    pub fn window(self) -> DurationWindow {
        match self {
            DurationPreset::HourLong => DurationWindow::from_minutes(36, 80),
            DurationPreset::HalfHour => DurationWindow::from_minutes(17, 40),
            DurationPreset::Custom {
                min_minutes,
                max_minutes,
            } => DurationWindow::from_minutes(min_minutes, max_minutes),
        }
    }
}

/// Per-season filter input, re-entered by the operator on every review pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriteria {
    pub window: DurationWindow,
    pub series: String,
    pub season: u32,
    pub starting_episode: u32,
    pub force_add: BTreeSet<String>,
    pub force_remove: BTreeSet<String>,
}

impl SelectionCriteria {
    /// Starting values for a season: hour-long window, the inferred series
    /// and season (season 1 when unknown), episode 1, no overrides.
    pub fn for_season(key: &SeasonKey) -> Self {
        Self {
            window: DurationPreset::HourLong.window(),
            series: key.series.clone(),
            season: key.season.unwrap_or(1),
            starting_episode: 1,
            force_add: BTreeSet::new(),
            force_remove: BTreeSet::new(),
        }
    }

    /// Replaces both override lists.
    pub fn with_overrides<A, R>(mut self, force_add: A, force_remove: R) -> Self
    where
        A: IntoIterator<Item = String>,
        R: IntoIterator<Item = String>,
    {
        self.force_add = force_add.into_iter().collect();
        self.force_remove = force_remove.into_iter().collect();
        self
    }

    pub fn clear_overrides(&mut self) {
        self.force_add.clear();
        self.force_remove.clear();
    }
}

/// Run-wide settings the filter needs but the operator does not edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOptions {
    pub allow_no_subtitles: bool,
    pub output_dir: PathBuf,
    pub output_extension: String,
}

/// Read-only view of the output filesystem.
pub trait OutputFilesystem {
    fn exists(&self, path: &Path) -> bool;
}

/// [`OutputFilesystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl OutputFilesystem for StdFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// A title chosen as an episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedEpisode {
    pub title: DiscTitle,
    pub episode: u32,
    pub output_filename: String,
    pub output_path: PathBuf,
}

/// Why a title was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    ForceRemoved,
    OutsideDuration,
    NoSubtitles,
    /// Same fingerprint as an earlier title on the same disc (its key).
    Duplicate { previous: String },
    /// Numbering from the starting episode ran past the largest episode number.
    EpisodeOutOfRange,
    OutputExists { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub disc_name: String,
    pub key: String,
    pub reason: ExclusionReason,
}

impl Exclusion {
    fn new(title: &DiscTitle, reason: ExclusionReason) -> Self {
        Self {
            disc_name: title.disc_name.clone(),
            key: title.key(),
            reason,
        }
    }

    /// Whether the operator should be warned about this exclusion.
    /// Force-removed and out-of-window titles are expected and stay quiet.
    pub fn is_warning(&self) -> bool {
        matches!(
            self.reason,
            ExclusionReason::NoSubtitles
                | ExclusionReason::Duplicate { .. }
                | ExclusionReason::EpisodeOutOfRange
                | ExclusionReason::OutputExists { .. }
        )
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("{} Title {}", self.disc_name, self.key);
        match &self.reason {
            ExclusionReason::ForceRemoved => write!(f, "Force removed: {title}"),
            ExclusionReason::OutsideDuration => write!(f, "Outside duration window: {title}"),
            ExclusionReason::NoSubtitles => write!(f, "Subtitles empty, skipping: {title}"),
            ExclusionReason::Duplicate { previous } => write!(
                f,
                "Apparent duplicate title (same fingerprint), skipping: {title}, previously seen: Title {previous}"
            ),
            ExclusionReason::EpisodeOutOfRange => {
                write!(f, "Episode number out of range, skipping: {title}")
            }
            ExclusionReason::OutputExists { path } => write!(
                f,
                "Output file already exists, skipping: {}",
                path.display()
            ),
        }
    }
}

/// Result of filtering one season.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub episodes: Vec<SelectedEpisode>,
    pub exclusions: Vec<Exclusion>,
}

impl Selection {
    /// Exclusions worth telling the operator about, in evaluation order.
    pub fn warnings(&self) -> impl Iterator<Item = &Exclusion> {
        self.exclusions.iter().filter(|e| e.is_warning())
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}

/// Output filename for an episode, e.g.
/// `My Show S01E03 - MyShow-Season1-Disc1-01-04.mkv`.
pub fn episode_filename(
    series: &str,
    season: u32,
    episode: u32,
    title: &DiscTitle,
    extension: &str,
) -> String {
    format!(
        "{series} S{season:02}E{episode:02} - {}-{}.{extension}",
        title.disc_name,
        title.key()
    )
}

/// Runs the selection rules over one season.
pub fn select_episodes(
    group: &SeasonGroup,
    criteria: &SelectionCriteria,
    options: &SelectionOptions,
    fs: &dyn OutputFilesystem,
) -> Selection {
    let mut exclusions = Vec::new();
    let mut seen: DuplicateTracker<String> = DuplicateTracker::new();
    let mut matched: Vec<&DiscTitle> = Vec::new();

    for title in group.titles() {
        let key = title.key();

        if criteria.force_add.contains(&key) {
            matched.push(title);
            continue;
        }
        if criteria.force_remove.contains(&key) {
            exclusions.push(Exclusion::new(title, ExclusionReason::ForceRemoved));
            continue;
        }
        if !criteria.window.contains(title.duration_seconds) {
            exclusions.push(Exclusion::new(title, ExclusionReason::OutsideDuration));
            continue;
        }
        if title.subtitle_tracks.is_empty() && !options.allow_no_subtitles {
            exclusions.push(Exclusion::new(title, ExclusionReason::NoSubtitles));
            continue;
        }
        if let Some(previous) = seen.previous(&title.disc_path, &title.fingerprint) {
            let reason = ExclusionReason::Duplicate {
                previous: previous.clone(),
            };
            exclusions.push(Exclusion::new(title, reason));
            continue;
        }

        seen.claim(&title.disc_path, &title.fingerprint, key);
        matched.push(title);
    }

    let mut episodes = Vec::with_capacity(matched.len());
    for (offset, title) in (0u32..).zip(matched) {
        let Some(episode) = criteria.starting_episode.checked_add(offset) else {
            exclusions.push(Exclusion::new(title, ExclusionReason::EpisodeOutOfRange));
            continue;
        };
        let output_filename = episode_filename(
            &criteria.series,
            criteria.season,
            episode,
            title,
            &options.output_extension,
        );
        let output_path = options.output_dir.join(&output_filename);

        if fs.exists(&output_path) {
            exclusions.push(Exclusion::new(
                title,
                ExclusionReason::OutputExists { path: output_path },
            ));
            continue;
        }

        episodes.push(SelectedEpisode {
            title: title.clone(),
            episode,
            output_filename,
            output_path,
        });
    }

    Selection {
        episodes,
        exclusions,
    }
}
