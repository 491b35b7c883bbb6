// ============================================================================
// discrip-core/src/encode.rs
// ============================================================================
//
// ENCODING: HandBrakeCLI Encode Invocation and Job Runner
//
// Jobs run one at a time. The encoder's stdout is inherited so HandBrake's
// own progress shows on the terminal, while its stderr (the verbose log) is
// written to `<log_dir>/<output_filename>.log`. A failed encode stops the
// run; files finished before it stay where they are.
//
// KEY COMPONENTS:
// - TitleEncoder: Trait for running one encode (HandBrakeEncoder in production)
// - build_encode_args: HandBrakeCLI arguments for a job
// - run_jobs: Sequential job runner with progress and timing

use crate::config::{DiscripConfig, EncoderSettings};
use crate::error::{CoreError, CoreResult, command_start_error, command_wait_error};
use crate::jobs::EncodeJob;
use crate::selection::OutputFilesystem;
use crate::terminal;
use crate::utils::humanize_duration;
use std::ffi::OsString;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::Instant;

/// Runs a single encode.
pub trait TitleEncoder {
    /// Encodes `job`, sending the encoder's diagnostic output to `log_path`.
    /// Returns the encoder's exit status; a non-zero status is not an `Err`.
    fn encode(&self, job: &EncodeJob, log_path: &Path) -> CoreResult<ExitStatus>;
}

/// Builds the HandBrakeCLI argument list for one job.
pub fn build_encode_args(settings: &EncoderSettings, job: &EncodeJob) -> Vec<OsString> {
    let bitrate = settings.video_bitrate.to_string();
    let audio_bitrate = settings.audio_bitrate.to_string();
    let subtitles = format!("scan,{}", job.subtitle_list());

    let mut args: Vec<OsString> = vec![
        "--input".into(),
        job.input_disc_path.clone().into_os_string(),
        "--title".into(),
        job.title_index.to_string().into(),
        "--output".into(),
        job.output_path.clone().into_os_string(),
    ];
    let mut push = |values: &[&str]| args.extend(values.iter().map(|v| OsString::from(*v)));

    push(&["--format", settings.format.as_str()]);
    if settings.markers {
        push(&["--markers"]);
    }
    push(&[if settings.optimize {
        "--optimize"
    } else {
        "--no-optimize"
    }]);

    push(&[
        "--encoder",
        settings.video_encoder.as_str(),
        "--encoder-preset",
        settings.encoder_preset.as_str(),
        "--encoder-profile",
        settings.encoder_profile.as_str(),
        "--encoder-level",
        settings.encoder_level.as_str(),
        "--vb",
        bitrate.as_str(),
    ]);
    if settings.two_pass {
        push(&["--two-pass"]);
        if settings.turbo {
            push(&["--turbo"]);
        }
    }
    if settings.constant_frame_rate {
        push(&["--cfr"]);
    }

    push(&[
        "--audio-lang-list",
        job.language.as_str(),
        "--all-audio",
        "--aencoder",
        settings.audio_encoder.as_str(),
        "--audio-fallback",
        settings.audio_fallback.as_str(),
        "--ab",
        audio_bitrate.as_str(),
        "--mixdown",
        settings.mixdown.as_str(),
    ]);

    push(&["--crop", settings.crop.as_str()]);
    if settings.deinterlace {
        push(&["--comb-detect", "--decomb", "--detelecine"]);
    }
    if settings.disable_cleanup_filters {
        push(&["--no-deblock", "--no-hqdn3d", "--no-nlmeans"]);
    }

    // Matching tracks plus a foreign-audio scan pass; a forced-only track
    // found by the scan becomes the default.
    push(&[
        "--subtitle",
        subtitles.as_str(),
        "--subtitle-default",
        "1",
        "--native-language",
        job.language.as_str(),
    ]);

    args
}

/// Runs HandBrakeCLI for each job.
#[derive(Debug, Clone)]
pub struct HandBrakeEncoder {
    handbrake_path: PathBuf,
    settings: EncoderSettings,
}

impl HandBrakeEncoder {
    pub fn new(handbrake_path: impl Into<PathBuf>, settings: EncoderSettings) -> Self {
        Self {
            handbrake_path: handbrake_path.into(),
            settings,
        }
    }

    pub fn from_config(config: &DiscripConfig) -> Self {
        Self::new(
            config.scanner.handbrake_path.clone(),
            config.encoder.clone(),
        )
    }
}

impl TitleEncoder for HandBrakeEncoder {
    fn encode(&self, job: &EncodeJob, log_path: &Path) -> CoreResult<ExitStatus> {
        let args = build_encode_args(&self.settings, job);
        let cmd_line = std::iter::once(self.handbrake_path.to_string_lossy())
            .chain(args.iter().map(|a| a.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ");
        log::debug!("{cmd_line}");

        let mut log_file = File::create(log_path)?;
        writeln!(
            log_file,
            "[{}] {cmd_line}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;

        let cmd_name = self.handbrake_path.display().to_string();
        let mut child = Command::new(&self.handbrake_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::from(log_file))
            .spawn()
            .map_err(|e| command_start_error(cmd_name.clone(), e))?;

        child.wait().map_err(|e| command_wait_error(cmd_name, e))
    }
}

/// Path of the per-job encoder log.
pub fn job_log_path(log_dir: &Path, job: &EncodeJob) -> PathBuf {
    log_dir.join(format!("{}.log", job.output_filename))
}

/// What happened to a batch of jobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub encoded: usize,
    pub skipped: usize,
}

/// Runs all jobs in order.
///
/// Output existence is checked again right before each job, since an
/// earlier job or another process may have written the file since review.
/// Such jobs are skipped with a warning. The first failed encode stops the
/// run with [`CoreError::EncodeFailure`].
pub fn run_jobs(
    jobs: &[EncodeJob],
    encoder: &dyn TitleEncoder,
    fs: &dyn OutputFilesystem,
    log_dir: &Path,
) -> CoreResult<RunSummary> {
    let mut summary = RunSummary::default();
    let total = jobs.len();

    for (i, job) in jobs.iter().enumerate() {
        if fs.exists(&job.output_path) {
            terminal::print_warning(&format!(
                "Output file already exists, skipping: {}",
                job.output_path.display()
            ));
            summary.skipped += 1;
            continue;
        }

        log::info!("");
        log::info!(
            "{:>3}/{} - Encoding {}...",
            i + 1,
            total,
            job.output_filename
        );

        let started = Instant::now();
        let status = encoder.encode(job, &job_log_path(log_dir, job))?;
        if !status.success() {
            log::error!("Encoding failed for {} ({status})", job.output_filename);
            return Err(CoreError::EncodeFailure {
                output: job.output_path.display().to_string(),
                status,
            });
        }

        log::info!(
            "Completed in {}",
            humanize_duration(started.elapsed().as_secs())
        );
        summary.encoded += 1;
    }

    Ok(summary)
}
