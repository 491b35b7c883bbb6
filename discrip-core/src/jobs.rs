//! Encode job construction.

use crate::review::ReviewedSeason;
use std::path::PathBuf;

/// Everything needed to encode one episode. Jobs are built once, after all
/// seasons are confirmed, and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeJob {
    pub input_disc_path: PathBuf,
    pub title_index: u32,
    pub output_path: PathBuf,
    pub output_filename: String,
    pub subtitle_tracks: Vec<u32>,
    pub language: String,
}

impl EncodeJob {
    /// Subtitle tracks as the comma-separated list HandBrake expects.
    pub fn subtitle_list(&self) -> String {
        self.subtitle_tracks
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Flattens confirmed seasons into jobs, keeping review order and episode
/// order within each season.
pub fn build_jobs(seasons: &[ReviewedSeason], language: &str) -> Vec<EncodeJob> {
    seasons
        .iter()
        .flat_map(|season| season.episodes.iter())
        .map(|episode| EncodeJob {
            input_disc_path: episode.title.disc_path.clone(),
            title_index: episode.title.title_index,
            output_path: episode.output_path.clone(),
            output_filename: episode.output_filename.clone(),
            subtitle_tracks: episode.title.subtitle_tracks.clone(),
            language: language.to_string(),
        })
        .collect()
}
