//! Disc path preparation.
//!
//! Disc paths arrive as positional arguments in whatever order the shell
//! produced. They are put into natural order (so `Disc2` sorts before
//! `Disc10`) and then rewritten by the configured remap rules before any
//! scanning happens.

use crate::config::RemapRule;
use crate::error::{CoreError, CoreResult};
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Width digit runs are padded to before comparison.
const NATURAL_SORT_WIDTH: usize = 4;

/// Sort key with every digit run zero-padded to four digits.
///
/// Runs are normalised by value, so `007` and `7` produce the same key;
/// runs longer than four digits are kept as they are.
pub fn natural_sort_key(path: &Path) -> String {
    let text = path.to_string_lossy();
    DIGIT_RUN
        .replace_all(&text, |caps: &Captures| {
            let digits = caps[0].trim_start_matches('0');
            format!("{:0>width$}", digits, width = NATURAL_SORT_WIDTH)
        })
        .into_owned()
}

/// Sorts disc paths in natural order. The sort is stable, so paths with
/// equal keys keep their argument order.
pub fn sort_disc_paths(paths: &mut [PathBuf]) {
    paths.sort_by_cached_key(|path| natural_sort_key(path));
}

/// Applies every remap rule, in order, to a disc path. Each rule replaces
/// all occurrences of its search string.
pub fn remap_disc_path(path: &Path, rules: &[RemapRule]) -> PathBuf {
    let Some(text) = path.to_str() else {
        log::warn!(
            "Disc path {} is not valid UTF-8; remap rules skipped",
            path.display()
        );
        return path.to_path_buf();
    };

    let remapped = rules
        .iter()
        .fold(text.to_string(), |acc, rule| acc.replace(&rule.search, &rule.replace));
    if remapped != text {
        log::debug!("Remapped {text} -> {remapped}");
    }
    PathBuf::from(remapped)
}

/// Turns the command line's disc arguments into the ordered list to scan.
pub fn prepare_disc_paths(mut paths: Vec<PathBuf>, rules: &[RemapRule]) -> CoreResult<Vec<PathBuf>> {
    if paths.is_empty() {
        return Err(CoreError::NoDiscPaths);
    }
    sort_disc_paths(&mut paths);
    Ok(paths
        .iter()
        .map(|path| remap_disc_path(path, rules))
        .collect())
}
