//! Runtime configuration settings

use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for the tagging pipeline
#[derive(Debug, Clone)]
pub struct Settings {
    /// Input path (folder or single MP3 file)
    pub input: PathBuf,
    /// Output folder for tagged copies
    pub output: PathBuf,
    /// Model identifier for the completion endpoint
    pub model: String,
    /// Service credential; required unless dry-run
    pub api_key: Option<String>,
    /// Base URL of the completion endpoint
    pub api_base: String,
    /// Progress-report interval, in files
    pub batch_size: usize,
    /// Minimum delay between successive service calls
    pub rate_limit_delay: Duration,
    /// Clear existing tag fields when inference returns nothing for them
    pub overwrite: bool,
    /// Scan recursively
    pub recursive: bool,
    /// Run log file path
    pub log_file: PathBuf,
    /// Show progress bar
    pub show_progress: bool,
    /// Dry run mode - show files without processing
    pub dry_run: bool,
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_cli(cli: &super::cli::Cli) -> Self {
        Self {
            input: cli.input.clone(),
            output: cli.output.clone(),
            model: cli.model.clone(),
            api_key: cli.api_key.clone(),
            api_base: cli.api_base.trim_end_matches('/').to_string(),
            batch_size: cli.batch_size.max(1),
            rate_limit_delay: Duration::from_secs_f64(cli.delay.max(0.0)),
            overwrite: cli.overwrite,
            recursive: cli.recursive,
            log_file: cli.log_path(),
            show_progress: !cli.quiet,
            dry_run: cli.dry_run,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input"),
            output: PathBuf::from("output"),
            model: "gpt-4o".to_string(),
            api_key: None,
            api_base: "https://api.openai.com/v1".to_string(),
            batch_size: 10,
            rate_limit_delay: Duration::from_secs(1),
            overwrite: false,
            recursive: false,
            log_file: PathBuf::from("output/tagprep.log"),
            show_progress: true,
            dry_run: false,
        }
    }
}
