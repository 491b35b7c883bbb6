// discrip-core/tests/review_tests.rs

mod common;

use common::{FakeFs, ScriptedPrompter, disc_title, options};
use discrip_core::error::CoreError;
use discrip_core::review::{review_catalog, review_season};
use discrip_core::season::{DiscTitle, SeasonCatalog};
use discrip_core::selection::DurationPreset;
use std::path::Path;

fn catalog(titles: Vec<DiscTitle>) -> SeasonCatalog {
    let mut catalog = SeasonCatalog::new();
    for title in titles {
        catalog.add_title(title);
    }
    catalog
}

fn season_one() -> SeasonCatalog {
    catalog(vec![
        disc_title(1, 1, 42, "aaaa1111"),
        disc_title(1, 2, 3, "bbbb2222"),
        disc_title(1, 3, 42, "aaaa1111"),
    ])
}

fn episode_indices(episodes: &[discrip_core::selection::SelectedEpisode]) -> Vec<u32> {
    episodes.iter().map(|e| e.title.title_index).collect()
}

#[test]
fn test_confirm_on_first_pass() {
    let catalog = season_one();
    let mut prompter = ScriptedPrompter::new().accept_defaults().answer("y");

    let reviewed = review_season(
        &catalog.groups()[0],
        &options(Path::new("/out")),
        &FakeFs::new(),
        &mut prompter,
    )
    .unwrap();

    assert_eq!(episode_indices(&reviewed.episodes), vec![1]);
    assert_eq!(reviewed.key.series, "My Show");
    assert_eq!(prompter.offered_defaults[0].season, 1);
}

#[test]
fn test_edit_applies_overrides_to_next_pass_only() {
    let catalog = season_one();
    let mut prompter = ScriptedPrompter::new()
        .accept_defaults()
        .answer("e")
        .then_overrides(&["01-03"], &[])
        .accept_defaults()
        .answer("e")
        .then_overrides(&[], &["01-01"])
        .accept_defaults()
        .answer("Y");

    let reviewed = review_season(
        &catalog.groups()[0],
        &options(Path::new("/out")),
        &FakeFs::new(),
        &mut prompter,
    )
    .unwrap();

    // The second edit replaced the force-add list rather than adding to it.
    assert_eq!(episode_indices(&reviewed.episodes), vec![3]);
    assert!(reviewed.criteria.force_add.is_empty());
    assert!(reviewed.criteria.force_remove.contains("01-01"));
    assert_eq!(prompter.offered_defaults.len(), 3);
}

#[test]
fn test_force_add_from_edit_selects_duplicate() {
    let catalog = season_one();
    let mut prompter = ScriptedPrompter::new()
        .accept_defaults()
        .answer("e")
        .then_overrides(&["01-03"], &[])
        .accept_defaults()
        .answer("y");

    let reviewed = review_season(
        &catalog.groups()[0],
        &options(Path::new("/out")),
        &FakeFs::new(),
        &mut prompter,
    )
    .unwrap();

    assert_eq!(episode_indices(&reviewed.episodes), vec![1, 3]);
    let numbers: Vec<u32> = reviewed.episodes.iter().map(|e| e.episode).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[test]
fn test_unrecognized_answer_restarts_without_overrides() {
    let catalog = season_one();
    let mut prompter = ScriptedPrompter::new()
        .accept_defaults()
        .answer("e")
        .then_overrides(&["01-03"], &[])
        .accept_defaults()
        .answer("n")
        .accept_defaults()
        .answer("y");

    let reviewed = review_season(
        &catalog.groups()[0],
        &options(Path::new("/out")),
        &FakeFs::new(),
        &mut prompter,
    )
    .unwrap();

    assert_eq!(episode_indices(&reviewed.episodes), vec![1]);
    assert!(prompter.offered_defaults[2].force_add.is_empty());
}

#[test]
fn test_previous_answers_are_offered_as_defaults() {
    let catalog = season_one();
    let mut prompter = ScriptedPrompter::new()
        .edit_criteria(|c| {
            c.window = DurationPreset::HalfHour.window();
            c.series = "Renamed".to_string();
            c.starting_episode = 5;
        })
        .answer("n")
        .accept_defaults()
        .answer("y");

    let reviewed = review_season(
        &catalog.groups()[0],
        &options(Path::new("/out")),
        &FakeFs::new(),
        &mut prompter,
    )
    .unwrap();

    assert_eq!(prompter.offered_defaults[1].series, "Renamed");
    assert_eq!(prompter.offered_defaults[1].starting_episode, 5);
    // 42 minutes is outside the half-hour window.
    assert!(reviewed.episodes.is_empty());
}

#[test]
fn test_quit_aborts_whole_review() {
    let catalog = catalog(vec![
        disc_title(1, 1, 42, "a"),
        DiscTitle {
            season: Some(2),
            ..disc_title(1, 1, 42, "b")
        },
    ]);
    let mut prompter = ScriptedPrompter::new()
        .accept_defaults()
        .answer("y")
        .accept_defaults()
        .answer("q");

    let result = review_catalog(
        &catalog,
        &options(Path::new("/out")),
        &FakeFs::new(),
        &mut prompter,
    );

    assert!(matches!(result, Err(CoreError::Aborted)));
}

#[test]
fn test_seasons_reviewed_in_first_seen_order() {
    let catalog = catalog(vec![
        DiscTitle {
            season: Some(2),
            ..disc_title(1, 1, 42, "s2")
        },
        disc_title(1, 1, 42, "s1"),
    ]);
    let mut prompter = ScriptedPrompter::new()
        .accept_defaults()
        .answer("y")
        .accept_defaults()
        .answer("y");

    let reviewed = review_catalog(
        &catalog,
        &options(Path::new("/out")),
        &FakeFs::new(),
        &mut prompter,
    )
    .unwrap();

    let seasons: Vec<Option<u32>> = reviewed.iter().map(|s| s.key.season).collect();
    assert_eq!(seasons, vec![Some(2), Some(1)]);
    assert_eq!(prompter.offered_defaults[0].season, 2);
}
