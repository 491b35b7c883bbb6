//! Series, season and disc inference from disc filenames.
//!
//! Disc images are usually named along the lines of
//! `MyShow-Season1-Disc2` or `my_show_s03_d1`. The heuristics here pull the
//! three pieces apart. They are best effort: the operator confirms or edits
//! the series name and season during review.

use regex::Regex;
use std::sync::LazyLock;

static SEASON_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[-_ ](?:s|season)[-_ ]?\d+.*").unwrap());

static DISC_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[-_ ](?:d|disc)[-_ ]?\d+.*").unwrap());

static SEASON_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[-_ ](?:s|season)[-_ ]?(\d+)").unwrap());

// Unlike the season marker, a disc marker may follow a digit directly
// ("s01d2").
static DISC_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[-_ \d](?:d|disc)[-_ ]?(\d+)").unwrap());

/// Disc number used when the filename carries no disc marker.
pub const DEFAULT_DISC_NUMBER: u32 = 1;

/// What a disc's filename says about its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscMetadata {
    pub series: String,
    pub season: Option<u32>,
    pub disc_number: u32,
}

/// Infers series, season and disc number from a disc's base filename.
///
/// ```
/// use discrip_core::metadata::infer_disc_metadata;
///
/// let meta = infer_disc_metadata("MyShow-Season1-Disc2");
/// assert_eq!(meta.series, "My Show");
/// assert_eq!(meta.season, Some(1));
/// assert_eq!(meta.disc_number, 2);
/// ```
pub fn infer_disc_metadata(disc_name: &str) -> DiscMetadata {
    // Markers are matched on word boundaries, so camel-case runs such as
    // "MyShowSeason1" are split before any marker is looked for.
    let spaced = split_words(disc_name).join(" ");

    let series = SEASON_SUFFIX.replace(&spaced, "");
    let series = DISC_SUFFIX.replace(&series, "");

    let season = SEASON_NUMBER
        .captures(&spaced)
        .and_then(|caps| caps[1].parse().ok());

    let disc_number = DISC_NUMBER
        .captures(&spaced)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(DEFAULT_DISC_NUMBER);

    DiscMetadata {
        series: humanize_series(&series),
        season,
        disc_number,
    }
}

/// Turns a raw filename fragment into a display name: camel-case and
/// separator boundaries become single spaces and every word is capitalized.
pub fn humanize_series(raw: &str) -> String {
    split_words(raw)
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_words(raw: &str) -> Vec<String> {
    let chars: Vec<char> = raw.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() || matches!(c, '_' | '-' | '.') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // "MyShow" -> My|Show, "BBCNews" -> BBC|News
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_season_and_disc_markers() {
        let meta = infer_disc_metadata("MyShow-Season1-Disc1");
        assert_eq!(meta.series, "My Show");
        assert_eq!(meta.season, Some(1));
        assert_eq!(meta.disc_number, 1);
    }

    #[test]
    fn test_short_markers() {
        let meta = infer_disc_metadata("the_wire_s03_d4");
        assert_eq!(meta.series, "The Wire");
        assert_eq!(meta.season, Some(3));
        assert_eq!(meta.disc_number, 4);
    }

    #[test]
    fn test_disc_marker_directly_after_season_digits() {
        let meta = infer_disc_metadata("Firefly_S1D3");
        assert_eq!(meta.series, "Firefly");
        assert_eq!(meta.season, Some(1));
        assert_eq!(meta.disc_number, 3);
    }

    #[test]
    fn test_no_markers() {
        let meta = infer_disc_metadata("my_show-extras");
        assert_eq!(meta.series, "My Show Extras");
        assert_eq!(meta.season, None);
        assert_eq!(meta.disc_number, DEFAULT_DISC_NUMBER);
    }

    #[test]
    fn test_disc_only() {
        let meta = infer_disc_metadata("Planet Earth Disc 2");
        assert_eq!(meta.series, "Planet Earth");
        assert_eq!(meta.season, None);
        assert_eq!(meta.disc_number, 2);
    }

    #[test]
    fn test_marker_letters_inside_words_are_ignored() {
        // "Sopranos" starts with an "s" but has no digits after it.
        let meta = infer_disc_metadata("The Sopranos Season 2 Disc 1");
        assert_eq!(meta.series, "The Sopranos");
        assert_eq!(meta.season, Some(2));
    }

    #[test]
    fn test_inference_is_idempotent_on_series_name() {
        for name in [
            "MyShow-Season1-Disc1",
            "the_wire_s03_d4",
            "BBCNews_S2",
            "MyShowSeason1",
            "ShowS1",
            "GhostD2_S1",
        ] {
            let first = infer_disc_metadata(name).series;
            let second = infer_disc_metadata(&first).series;
            assert_eq!(first, second, "not idempotent for {name}");
        }
    }

    #[test]
    fn test_markers_without_separators() {
        let meta = infer_disc_metadata("MyShowSeason1");
        assert_eq!(meta.series, "My Show");
        assert_eq!(meta.season, Some(1));

        let meta = infer_disc_metadata("ShowS1");
        assert_eq!(meta.series, "Show");
        assert_eq!(meta.season, Some(1));

        let meta = infer_disc_metadata("GhostD2_S1");
        assert_eq!(meta.series, "Ghost");
        assert_eq!(meta.season, Some(1));
        assert_eq!(meta.disc_number, 2);
    }

    #[test]
    fn test_humanize_acronyms() {
        assert_eq!(humanize_series("BBCNews"), "Bbc News");
        assert_eq!(humanize_series("  spaced   out "), "Spaced Out");
    }
}
