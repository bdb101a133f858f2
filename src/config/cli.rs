//! CLI argument parsing and configuration

use clap::Parser;
use std::path::PathBuf;

/// tagprep - AI-assisted batch ID3 tagging
///
/// Scans a folder of MP3 files, infers song metadata from each file name via
/// an OpenAI-compatible completion endpoint, and writes the inferred tags into
/// copies of the files. Source files are never modified.
#[derive(Parser, Debug)]
#[command(name = "tagprep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Input folder (or a single MP3 file)
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// Output folder for tagged copies
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Model identifier sent to the completion endpoint
    #[arg(short, long, default_value = "gpt-4o", value_name = "MODEL")]
    pub model: String,

    /// API credential for the completion endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Base URL of the completion endpoint
    #[arg(long, default_value = "https://api.openai.com/v1", value_name = "URL")]
    pub api_base: String,

    /// Report progress after this many files reach a terminal state
    #[arg(short, long, default_value_t = 10, value_name = "N")]
    pub batch_size: usize,

    /// Minimum delay between service calls, in seconds
    #[arg(long, default_value_t = 1.0, value_name = "SECONDS")]
    pub delay: f64,

    /// Clear existing tag fields when inference returns nothing for them
    #[arg(long, default_value = "false")]
    pub overwrite: bool,

    /// Scan subdirectories recursively
    #[arg(short, long, default_value = "false")]
    pub recursive: bool,

    /// Run log file (defaults to <output>/tagprep.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress progress bar and non-error logs)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Dry run - show files that would be tagged without calling the service
    #[arg(long, default_value = "false")]
    pub dry_run: bool,
}

impl Cli {
    /// Get the effective run log path
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.output.join("tagprep.log"))
    }
}
