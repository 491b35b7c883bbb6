// ============================================================================
// discrip-core/src/review.rs
// ============================================================================
//
// SEASON REVIEW: Operator Confirm/Edit Loop
//
// Each season is reviewed on its own, in the order seasons were first seen.
// A review is a small state machine:
//
//   Presenting -> AwaitingConfirmation -> Confirmed
//        ^                |          \-> Aborted
//        |                v
//        +----------- Editing
//
// Presenting lists every title, asks for criteria, runs the selection filter
// and lists the result. The operator then confirms (`y`), edits the
// force-add/force-remove lists (`e`), or quits (`q`). Any other answer starts
// the season over with no overrides. Overrides entered while editing apply
// to the next pass only; they are replaced, never accumulated.
//
// All interaction goes through the `ReviewPrompter` trait so the loop can be
// driven by a script in tests.

use crate::error::{CoreError, CoreResult};
use crate::season::{SeasonCatalog, SeasonGroup, SeasonKey, title_key};
use crate::selection::{
    OutputFilesystem, SelectedEpisode, Selection, SelectionCriteria, SelectionOptions,
    select_episodes,
};
use crate::terminal;
use regex::Regex;
use std::sync::LazyLock;

static NUMERIC_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-(\d+)$").unwrap());

/// Where a season's review currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Presenting,
    AwaitingConfirmation,
    Editing,
    Confirmed,
    Aborted,
}

/// The operator's answer to "do the selected episodes look correct?".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorDecision {
    Confirm,
    Edit,
    Quit,
    Unrecognized(String),
}

impl OperatorDecision {
    /// Interprets a `y/n/e/q` answer, case-insensitively.
    pub fn parse(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "y" => OperatorDecision::Confirm,
            "e" => OperatorDecision::Edit,
            "q" => OperatorDecision::Quit,
            other => OperatorDecision::Unrecognized(other.to_string()),
        }
    }
}

/// Force-add and force-remove lists entered while editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub force_add: Vec<String>,
    pub force_remove: Vec<String>,
}

/// Source of operator input during review.
pub trait ReviewPrompter {
    /// Asks for this pass's duration window, series, season and starting
    /// episode. `previous` holds the values to offer as defaults.
    fn criteria(
        &mut self,
        group: &SeasonGroup,
        previous: &SelectionCriteria,
    ) -> CoreResult<SelectionCriteria>;

    fn decision(&mut self) -> CoreResult<OperatorDecision>;

    fn overrides(&mut self) -> CoreResult<Overrides>;
}

/// A season the operator confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewedSeason {
    pub key: SeasonKey,
    pub criteria: SelectionCriteria,
    pub episodes: Vec<SelectedEpisode>,
}

/// Splits a comma-delimited list of `disc-title` keys.
///
/// Blank entries are dropped and purely numeric keys are zero-padded, so
/// `"1-3, 01-04,"` yields `["01-03", "01-04"]`.
pub fn parse_title_keys(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match NUMERIC_KEY.captures(entry) {
            Some(caps) => match (caps[1].parse(), caps[2].parse()) {
                (Ok(disc), Ok(title)) => title_key(disc, title),
                _ => entry.to_string(),
            },
            None => entry.to_string(),
        })
        .collect()
}

fn list_titles(group: &SeasonGroup) {
    terminal::print_subsection(&format!("{} all titles:", group.key()));
    for title in group.titles() {
        terminal::print_item(&format!(
            "{} Title {}: {} ({}, fingerprint: {})",
            title.disc_name,
            title.key(),
            title.display_duration(),
            title.structure,
            title.fingerprint
        ));
    }
}

fn list_selection(selection: &Selection) {
    for warning in selection.warnings() {
        terminal::print_warning(&warning.to_string());
    }
    for exclusion in selection.exclusions.iter().filter(|e| !e.is_warning()) {
        log::debug!("{exclusion}");
    }

    terminal::print_subsection("Selected titles:");
    if selection.is_empty() {
        terminal::print_item("(none)");
    }
    for (n, episode) in selection.episodes.iter().enumerate() {
        terminal::print_item(&format!(
            "{:>2}: {} ({})",
            n + 1,
            episode.output_filename,
            episode.title.display_duration()
        ));
    }
}

/// Runs the confirm/edit loop for one season.
///
/// Returns the confirmed episodes, or [`CoreError::Aborted`] if the operator
/// quits.
pub fn review_season(
    group: &SeasonGroup,
    options: &SelectionOptions,
    fs: &dyn OutputFilesystem,
    prompter: &mut dyn ReviewPrompter,
) -> CoreResult<ReviewedSeason> {
    let mut state = ReviewState::Presenting;
    let mut criteria = SelectionCriteria::for_season(group.key());
    let mut pending = Overrides::default();
    let mut selection = Selection::default();

    loop {
        log::debug!("Review of {}: {:?}", group.key(), state);
        state = match state {
            ReviewState::Presenting => {
                list_titles(group);
                let answered = prompter.criteria(group, &criteria)?;
                let overrides = std::mem::take(&mut pending);
                criteria = answered.with_overrides(overrides.force_add, overrides.force_remove);
                selection = select_episodes(group, &criteria, options, fs);
                list_selection(&selection);
                ReviewState::AwaitingConfirmation
            }
            ReviewState::AwaitingConfirmation => match prompter.decision()? {
                OperatorDecision::Confirm => ReviewState::Confirmed,
                OperatorDecision::Edit => ReviewState::Editing,
                OperatorDecision::Quit => ReviewState::Aborted,
                OperatorDecision::Unrecognized(answer) => {
                    log::debug!("Unrecognized answer '{answer}', presenting again");
                    criteria.clear_overrides();
                    ReviewState::Presenting
                }
            },
            ReviewState::Editing => {
                pending = prompter.overrides()?;
                ReviewState::Presenting
            }
            ReviewState::Confirmed => {
                return Ok(ReviewedSeason {
                    key: group.key().clone(),
                    criteria,
                    episodes: selection.episodes,
                });
            }
            ReviewState::Aborted => return Err(CoreError::Aborted),
        };
    }
}

/// Reviews every season of the catalog in first-seen order.
pub fn review_catalog(
    catalog: &SeasonCatalog,
    options: &SelectionOptions,
    fs: &dyn OutputFilesystem,
    prompter: &mut dyn ReviewPrompter,
) -> CoreResult<Vec<ReviewedSeason>> {
    let mut reviewed = Vec::with_capacity(catalog.groups().len());
    for group in catalog.groups() {
        let season = review_season(group, options, fs, prompter)?;
        log::info!(
            "Confirmed {} episode(s) for {}",
            season.episodes.len(),
            season.key
        );
        reviewed.push(season);
    }
    Ok(reviewed)
}
