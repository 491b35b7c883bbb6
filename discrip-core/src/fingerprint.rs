//! Title fingerprints and duplicate tracking.
//!
//! Discs often expose the same episode several times under different title
//! numbers (angles, "play all" variants, menu re-entries). The scanner does
//! not look at the video itself, so duplicates are recognised from structure:
//! two titles on the same disc with identical timing structure are treated as
//! the same content.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Number of hex characters kept from the digest.
const FINGERPRINT_LEN: usize = 8;

/// Fingerprint from a title's total tick count and ordered chapter ticks.
///
/// The digest input is the total ticks immediately followed by the chapter
/// ticks joined with commas, e.g. `"3780000001890000,1890000"`.
pub fn fingerprint_from_ticks(ticks: u64, chapter_ticks: &[u64]) -> String {
    let chapters = chapter_ticks
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let digest = Sha256::digest(format!("{ticks}{chapters}").as_bytes());
    let hex: String = digest.iter().map(|byte| format!("{byte:02x}")).collect();
    hex[..FINGERPRINT_LEN].to_string()
}

/// Fingerprint for scanners that only report a block count.
pub fn fingerprint_from_blocks(blocks: u64) -> String {
    blocks.to_string()
}

/// Remembers which title first claimed each `(disc path, fingerprint)` pair.
///
/// Scoping by disc path means two different discs never mark each other's
/// titles as duplicates, even if they share a fingerprint.
#[derive(Debug, Default)]
pub struct DuplicateTracker<T> {
    seen: HashMap<(PathBuf, String), T>,
}

impl<T> DuplicateTracker<T> {
    pub fn new() -> Self {
        Self {
            seen: HashMap::new(),
        }
    }

    /// Returns the earlier owner if this pair was already claimed.
    pub fn previous(&self, disc_path: &Path, fingerprint: &str) -> Option<&T> {
        self.seen
            .get(&(disc_path.to_path_buf(), fingerprint.to_string()))
    }

    /// Records `owner` as the first title with this pair. An existing claim
    /// is kept.
    pub fn claim(&mut self, disc_path: &Path, fingerprint: &str, owner: T) {
        self.seen
            .entry((disc_path.to_path_buf(), fingerprint.to_string()))
            .or_insert(owner);
    }
}
