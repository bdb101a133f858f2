//! tagprep - Batch AI-Assisted ID3 Tagging for MP3 Libraries
//!
//! A command-line utility that infers song metadata (title, artist, album,
//! year, composer, genre, language) from file names via an OpenAI-compatible
//! completion endpoint and writes it into copies of the files.
//!
//! # Architecture
//!
//! The library is organized into several key modules:
//!
//! - `config`: CLI argument parsing and runtime settings
//! - `discovery`: MP3 file scanning
//! - `hint`: Song-hint extraction from file names
//! - `inference`: Metadata inference (with swappable backends) and call pacing
//! - `tagging`: ID3 tag writing via lofty, always on a copy
//! - `pipeline`: Sequential per-file orchestration
//! - `runlog`: Append-only run log file
//!
//! # Example
//!
//! ```no_run
//! use tagprep::{config::Settings, pipeline};
//!
//! let settings = Settings::default();
//! let summary = pipeline::run(&settings).expect("Run failed");
//! println!("Tagged {} files", summary.done);
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod hint;
pub mod inference;
pub mod pipeline;
pub mod runlog;
pub mod tagging;
pub mod types;

// Re-export key types at crate root
pub use error::{Result, TagprepError};
pub use types::{MetadataRecord, Outcome, ProcessingResult, Stage};
