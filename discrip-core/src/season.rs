// ============================================================================
// discrip-core/src/season.rs
// ============================================================================
//
// SEASON GROUPING: Disc Titles Collected by Series and Season
//
// Every scanned title is tagged with the series and season inferred from its
// disc's filename and filed into a SeasonGroup. Discs are scanned one after
// another, so a group usually fills up across several discs
// ("Show-S1-D1", "Show-S1-D2", ...). The SeasonCatalog owns all groups and
// remembers the order in which seasons were first seen; that order is the
// review order.
//
// KEY COMPONENTS:
// - DiscTitle: A scanned title plus its disc and season context
// - SeasonKey: (series, season) pair used for grouping
// - SeasonGroup: All titles sharing a SeasonKey, in scan order
// - SeasonCatalog: Ordered collection of SeasonGroups

use crate::metadata::infer_disc_metadata;
use crate::scan::ScannedTitle;
use crate::utils::{file_name_lossy, format_duration, humanize_duration};
use std::fmt;
use std::path::{Path, PathBuf};

/// One title on one disc, with everything the selection filter needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscTitle {
    pub disc_path: PathBuf,
    pub disc_name: String,
    pub series: String,
    pub season: Option<u32>,
    pub disc_number: u32,
    pub title_index: u32,
    pub duration_seconds: u64,
    pub structure: String,
    pub fingerprint: String,
    pub subtitle_tracks: Vec<u32>,
}

impl DiscTitle {
    /// Composite `disc-title` key used for force-add/force-remove, e.g. `01-03`.
    pub fn key(&self) -> String {
        title_key(self.disc_number, self.title_index)
    }

    pub fn season_key(&self) -> SeasonKey {
        SeasonKey {
            series: self.series.clone(),
            season: self.season,
        }
    }

    /// Duration as `HH:MM:SS   mm ss`, as shown to the operator.
    pub fn display_duration(&self) -> String {
        format!(
            "{} {}",
            format_duration(self.duration_seconds),
            humanize_duration(self.duration_seconds)
        )
    }
}

/// Formats a disc number and title index as a zero-padded composite key.
pub fn title_key(disc_number: u32, title_index: u32) -> String {
    format!("{disc_number:02}-{title_index:02}")
}

/// Grouping key for titles that belong to the same season.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeasonKey {
    pub series: String,
    pub season: Option<u32>,
}

impl fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.season {
            Some(season) => write!(f, "{} S{}", self.series, season),
            None => write!(f, "{} S?", self.series),
        }
    }
}

/// All titles for one season, in the order they were scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonGroup {
    key: SeasonKey,
    titles: Vec<DiscTitle>,
}

impl SeasonGroup {
    pub fn new(key: SeasonKey) -> Self {
        Self {
            key,
            titles: Vec::new(),
        }
    }

    pub fn key(&self) -> &SeasonKey {
        &self.key
    }

    pub fn titles(&self) -> &[DiscTitle] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    fn push(&mut self, title: DiscTitle) {
        self.titles.push(title);
    }
}

/// Every season found during the scan phase.
///
/// Titles keep the order they were added in; the catalog never sorts. Feed
/// discs in the order from `discovery::prepare_disc_paths` and each disc's
/// titles in scanner order to get groups ordered by disc path, then title
/// index.
#[derive(Debug, Default)]
pub struct SeasonCatalog {
    groups: Vec<SeasonGroup>,
}

impl SeasonCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files one disc's scan results under the season inferred from its name.
    ///
    /// Returns the number of titles added.
    pub fn add_disc(&mut self, disc_path: &Path, scanned: Vec<ScannedTitle>) -> usize {
        let disc_name = file_name_lossy(disc_path);
        let metadata = infer_disc_metadata(&disc_name);

        if scanned.is_empty() {
            log::warn!("No titles found on {}", disc_path.display());
        }

        let count = scanned.len();
        for title in scanned {
            self.add_title(DiscTitle {
                disc_path: disc_path.to_path_buf(),
                disc_name: disc_name.clone(),
                series: metadata.series.clone(),
                season: metadata.season,
                disc_number: metadata.disc_number,
                title_index: title.index,
                duration_seconds: title.duration_seconds,
                structure: title.structure,
                fingerprint: title.fingerprint,
                subtitle_tracks: title.subtitle_tracks,
            });
        }
        count
    }

    /// Adds a title to its season's group, creating the group on first use.
    pub fn add_title(&mut self, title: DiscTitle) {
        let key = title.season_key();
        match self.groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.push(title),
            None => {
                let mut group = SeasonGroup::new(key);
                group.push(title);
                self.groups.push(group);
            }
        }
    }

    pub fn get(&self, key: &SeasonKey) -> Option<&SeasonGroup> {
        self.groups.iter().find(|group| &group.key == key)
    }

    /// Groups in the order their seasons were first seen.
    pub fn groups(&self) -> &[SeasonGroup] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<SeasonGroup> {
        self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn title_count(&self) -> usize {
        self.groups.iter().map(SeasonGroup::len).sum()
    }
}
