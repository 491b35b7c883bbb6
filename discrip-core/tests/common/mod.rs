// discrip-core/tests/common/mod.rs
//
// Hand-written test doubles for the scanner, encoder, prompter and output
// filesystem seams.

#![allow(dead_code)]

use discrip_core::error::{CoreError, CoreResult};
use discrip_core::jobs::EncodeJob;
use discrip_core::review::{OperatorDecision, Overrides, ReviewPrompter};
use discrip_core::scan::{DiscScanner, ScanOutput, ScannedTitle};
use discrip_core::season::{DiscTitle, SeasonGroup};
use discrip_core::selection::{OutputFilesystem, SelectionCriteria, SelectionOptions};
use discrip_core::encode::TitleEncoder;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

// --- Scanner ---

/// Returns canned scanner output per disc path.
#[derive(Default)]
pub struct MockScanner {
    outputs: HashMap<PathBuf, ScanOutput>,
    pub scanned: RefCell<Vec<PathBuf>>,
}

impl MockScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stdout(mut self, disc: &str, stdout: impl Into<String>) -> Self {
        self.outputs.insert(
            PathBuf::from(disc),
            ScanOutput {
                stdout: stdout.into(),
                stderr: String::new(),
            },
        );
        self
    }
}

impl DiscScanner for MockScanner {
    fn scan(&self, disc_path: &Path) -> CoreResult<ScanOutput> {
        self.scanned.borrow_mut().push(disc_path.to_path_buf());
        self.outputs
            .get(disc_path)
            .cloned()
            .ok_or_else(|| CoreError::ScanParse(format!("no mock output for {}", disc_path.display())))
    }
}

/// Builds a `--json` scan document for titles given as
/// `(index, minutes, ticks, subtitle languages)`.
pub fn json_scan(titles: &[(u32, u64, u64, &[&str])]) -> String {
    let entries: Vec<String> = titles
        .iter()
        .map(|(index, minutes, ticks, languages)| {
            let subtitles: Vec<String> = languages
                .iter()
                .map(|lang| format!(r#"{{"LanguageCode": "{lang}"}}"#))
                .collect();
            format!(
                r#"{{"Index": {index}, "Duration": {{"Hours": {}, "Minutes": {}, "Seconds": 0, "Ticks": {ticks}}}, "ChapterList": [{{"Duration": {{"Ticks": {ticks}}}}}], "SubtitleList": [{}]}}"#,
                minutes / 60,
                minutes % 60,
                subtitles.join(", ")
            )
        })
        .collect();
    format!(
        "[12:00:00] scan: decoding previews\nJSON Title Set: {{\"TitleList\": [{}]}}\n",
        entries.join(", ")
    )
}

// --- Titles ---

/// A scanned title with an English subtitle track.
pub fn scanned(index: u32, minutes: u64, fingerprint: &str) -> ScannedTitle {
    ScannedTitle {
        index,
        duration_seconds: minutes * 60,
        structure: format!("{fingerprint} blocks"),
        fingerprint: fingerprint.to_string(),
        subtitle_tracks: vec![1],
    }
}

/// A title on `MyShow-Season1-Disc{disc}`.
pub fn disc_title(disc: u32, index: u32, minutes: u64, fingerprint: &str) -> DiscTitle {
    let disc_name = format!("MyShow-Season1-Disc{disc}");
    DiscTitle {
        disc_path: PathBuf::from("/discs").join(&disc_name),
        disc_name,
        series: "My Show".to_string(),
        season: Some(1),
        disc_number: disc,
        title_index: index,
        duration_seconds: minutes * 60,
        structure: format!("{fingerprint} blocks"),
        fingerprint: fingerprint.to_string(),
        subtitle_tracks: vec![1],
    }
}

pub fn options(output_dir: &Path) -> SelectionOptions {
    SelectionOptions {
        allow_no_subtitles: false,
        output_dir: output_dir.to_path_buf(),
        output_extension: "mkv".to_string(),
    }
}

// --- Filesystem ---

/// Output filesystem with a fixed set of existing files.
#[derive(Default)]
pub struct FakeFs {
    existing: HashSet<PathBuf>,
}

impl FakeFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.existing.insert(path.into());
        self
    }
}

impl OutputFilesystem for FakeFs {
    fn exists(&self, path: &Path) -> bool {
        self.existing.contains(path)
    }
}

// --- Prompter ---

/// Replays scripted answers. Each `criteria` call pops the next criteria
/// edit (applied on top of the offered defaults); every call is recorded.
#[derive(Default)]
pub struct ScriptedPrompter {
    criteria_edits: VecDeque<Box<dyn Fn(&mut SelectionCriteria)>>,
    decisions: VecDeque<&'static str>,
    overrides: VecDeque<Overrides>,
    pub offered_defaults: Vec<SelectionCriteria>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept the offered defaults for the next criteria prompt.
    pub fn accept_defaults(self) -> Self {
        self.edit_criteria(|_| {})
    }

    pub fn edit_criteria(mut self, edit: impl Fn(&mut SelectionCriteria) + 'static) -> Self {
        self.criteria_edits.push_back(Box::new(edit));
        self
    }

    pub fn answer(mut self, answer: &'static str) -> Self {
        self.decisions.push_back(answer);
        self
    }

    pub fn then_overrides(mut self, force_add: &[&str], force_remove: &[&str]) -> Self {
        self.overrides.push_back(Overrides {
            force_add: force_add.iter().map(|s| s.to_string()).collect(),
            force_remove: force_remove.iter().map(|s| s.to_string()).collect(),
        });
        self
    }
}

impl ReviewPrompter for ScriptedPrompter {
    fn criteria(
        &mut self,
        _group: &SeasonGroup,
        previous: &SelectionCriteria,
    ) -> CoreResult<SelectionCriteria> {
        self.offered_defaults.push(previous.clone());
        let edit = self
            .criteria_edits
            .pop_front()
            .ok_or_else(|| CoreError::Prompt("criteria script exhausted".to_string()))?;
        let mut criteria = previous.clone();
        edit(&mut criteria);
        Ok(criteria)
    }

    fn decision(&mut self) -> CoreResult<OperatorDecision> {
        self.decisions
            .pop_front()
            .map(OperatorDecision::parse)
            .ok_or_else(|| CoreError::Prompt("decision script exhausted".to_string()))
    }

    fn overrides(&mut self) -> CoreResult<Overrides> {
        self.overrides
            .pop_front()
            .ok_or_else(|| CoreError::Prompt("overrides script exhausted".to_string()))
    }
}

// --- Encoder ---

/// Records encode calls and returns a scripted exit status per call
/// (success once the script runs out).
#[derive(Default)]
pub struct MockEncoder {
    statuses: RefCell<VecDeque<ExitStatus>>,
    pub calls: RefCell<Vec<(EncodeJob, PathBuf)>>,
}

impl MockEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(self, status: ExitStatus) -> Self {
        self.statuses.borrow_mut().push_back(status);
        self
    }

    pub fn encoded_files(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(job, _)| job.output_filename.clone())
            .collect()
    }
}

impl TitleEncoder for MockEncoder {
    fn encode(&self, job: &EncodeJob, log_path: &Path) -> CoreResult<ExitStatus> {
        self.calls
            .borrow_mut()
            .push((job.clone(), log_path.to_path_buf()));
        Ok(self
            .statuses
            .borrow_mut()
            .pop_front()
            .unwrap_or_default())
    }
}

#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}
