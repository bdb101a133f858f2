//! Pipeline orchestration
//!
//! Drives each file fully through hint -> infer -> tag before starting the
//! next. Processing is deliberately sequential: the fixed inter-call delay is
//! what keeps the inference service happy, so there is nothing to gain from
//! parallel workers.

use crate::config::Settings;
use crate::discovery::{self, SourceFile};
use crate::error::{Result, TagprepError};
use crate::hint;
use crate::inference::{MetadataInferrer, OpenAiInferrer, Pacer};
use crate::runlog::RunLog;
use crate::tagging;
use crate::types::{MetadataRecord, Outcome, ProcessingResult, Stage};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

/// Pipeline result summary
#[derive(Debug)]
pub struct RunSummary {
    pub total_files: usize,
    pub done: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    fn empty() -> Self {
        Self {
            total_files: 0,
            done: 0,
            failed: 0,
            skipped: 0,
        }
    }
}

/// Run the full tagging pipeline with the live inference backend
pub fn run(settings: &Settings) -> Result<RunSummary> {
    // A dry run never calls the service, so it needs no credential or client
    if settings.dry_run {
        return run_with_inferrer(settings, &DryRunInferrer);
    }

    let api_key = settings.api_key.as_deref().ok_or_else(|| {
        TagprepError::Config(
            "API key not set. Pass --api-key or set OPENAI_API_KEY.".to_string(),
        )
    })?;

    let inferrer = OpenAiInferrer::new(&settings.api_base, api_key, &settings.model)?;
    run_with_inferrer(settings, &inferrer)
}

/// Stand-in backend for dry runs; the pipeline never invokes it
struct DryRunInferrer;

impl MetadataInferrer for DryRunInferrer {
    fn infer(&self, hint: &str) -> Result<MetadataRecord> {
        Err(TagprepError::inference(hint, "no service calls in dry run"))
    }

    fn name(&self) -> &'static str {
        "dry-run"
    }
}

/// Run the pipeline with an explicit inference backend.
///
/// Tests substitute a deterministic fake here instead of the live service.
pub fn run_with_inferrer(
    settings: &Settings,
    inferrer: &dyn MetadataInferrer,
) -> Result<RunSummary> {
    use std::time::Instant;

    let run_start = Instant::now();

    // Phase 1: Discovery
    info!("Scanning for MP3 files...");
    let files = discovery::scan(&settings.input, settings.recursive)?;

    if files.is_empty() {
        return Ok(RunSummary::empty());
    }

    // Dry run mode - show files and exit
    if settings.dry_run {
        return run_dry_run(&files, settings);
    }

    std::fs::create_dir_all(&settings.output)
        .map_err(|e| TagprepError::output_error(&settings.output, e))?;

    let mut run_log = RunLog::open(&settings.log_file)?;
    info!("Run log at {}", run_log.path().display());

    info!(
        "Tagging {} files using {} (delay {:.1}s between calls)",
        files.len(),
        inferrer.name(),
        settings.rate_limit_delay.as_secs_f64()
    );

    let progress_bar = if settings.show_progress {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Phase 2: Sequential processing
    let mut pacer = Pacer::new(settings.rate_limit_delay);
    let mut done = 0usize;
    let mut failed = 0usize;
    let mut skipped = 0usize;

    for (index, file) in files.iter().enumerate() {
        let result = match process_file(file, settings, inferrer, &mut pacer) {
            Ok(result) => result,
            Err(e) if e.is_recoverable() => ProcessingResult {
                path: file.path.clone(),
                outcome: Outcome::Failed {
                    at: failure_stage(&e),
                    reason: e.to_string(),
                },
            },
            Err(e) => return Err(e),
        };

        match &result.outcome {
            Outcome::Done => {
                done += 1;
                info!("Tagged {}", result.file_name());
            }
            Outcome::Skipped { reason } => {
                skipped += 1;
                warn!("Skipping {}: {}", result.file_name(), reason);
            }
            Outcome::Failed { at, reason } => {
                failed += 1;
                error!("Failed {} at {}: {}", result.file_name(), at, reason);
            }
        }

        if let Err(e) = run_log.record(&result) {
            warn!("Could not write run log entry: {}", e);
        }

        if let Some(ref pb) = progress_bar {
            pb.inc(1);
            pb.set_message(result.file_name());
        }

        let terminal = index + 1;
        if terminal % settings.batch_size == 0 && terminal < files.len() {
            info!("Progress: {}/{} files processed", terminal, files.len());
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message("Tagging complete");
    }

    // Phase 3: Summary
    if let Err(e) = run_log.record_summary(done, failed, skipped) {
        warn!("Could not write run log summary: {}", e);
    }
    run_log.flush()?;

    info!(
        "Run finished in {:.1}s: {} done, {} failed, {} skipped",
        run_start.elapsed().as_secs_f64(),
        done,
        failed,
        skipped
    );

    Ok(RunSummary {
        total_files: files.len(),
        done,
        failed,
        skipped,
    })
}

/// Drive a single file through the hint -> infer -> tag state machine.
///
/// Errors bubble up to the run loop, which absorbs recoverable ones into a
/// FAILED result and keeps going; anything else aborts the run.
fn process_file(
    file: &SourceFile,
    settings: &Settings,
    inferrer: &dyn MetadataInferrer,
    pacer: &mut Pacer,
) -> Result<ProcessingResult> {
    let file_name = file
        .path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    // PENDING -> HINTED: never fails, but an empty hint has nothing to ask about
    let song_hint = hint::clean(&file_name);
    debug!("{}: stage {} hint '{}'", file_name, Stage::Hinted, song_hint);

    if song_hint.is_empty() {
        return Ok(ProcessingResult {
            path: file.path.clone(),
            outcome: Outcome::Skipped {
                reason: "file name has no usable characters".to_string(),
            },
        });
    }

    // HINTED -> INFERRED: one paced service call, no retry
    pacer.wait();
    let record = inferrer.infer(&song_hint)?;
    debug!("{}: stage {}", file_name, Stage::Inferred);

    // INFERRED -> TAGGED: copy into the output folder, then rewrite tags
    let dest = tagging::write_tags(&file.path, &settings.output, &record, settings.overwrite)?;
    debug!("{}: stage {} -> {}", file_name, Stage::Tagged, dest.display());

    // TAGGED -> DONE
    Ok(ProcessingResult {
        path: file.path.clone(),
        outcome: Outcome::Done,
    })
}

/// Map a recoverable per-file error to the stage transition it interrupted
fn failure_stage(err: &TagprepError) -> Stage {
    match err {
        TagprepError::Inference { .. } => Stage::Inferred,
        _ => Stage::Tagged,
    }
}

/// Dry run mode - show files that would be tagged without processing
fn run_dry_run(files: &[SourceFile], settings: &Settings) -> Result<RunSummary> {
    println!();
    println!("=== DRY RUN MODE ===");
    println!();

    for file in files {
        let file_name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        println!("  {}  (hint: '{}')", file_name, hint::clean(&file_name));
    }

    println!();
    println!("Would tag {} files into {}/", files.len(), settings.output.display());
    println!(
        "Estimated time: at least {:.0}s of pacing delay",
        settings.rate_limit_delay.as_secs_f64() * files.len().saturating_sub(1) as f64
    );
    println!();

    Ok(RunSummary {
        total_files: files.len(),
        done: 0,
        failed: 0,
        skipped: files.len(), // All "skipped" in dry run mode
    })
}
