//! Core data types for tagprep
//!
//! These types represent the domain model and flow through the pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// =============================================================================
// Inferred metadata
// =============================================================================

/// Structured metadata inferred for a song, prior to being written into tags.
///
/// Every field is optional: the inference service may omit any of them, and an
/// absent field means "no update" rather than "clear". Year is kept as text
/// because it arrives as free-form JSON; the tag writer validates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub composer: Option<String>,
    pub genre: Option<String>,
    pub language: Option<String>,
}

impl MetadataRecord {
    /// True if inference produced no usable field at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.year.is_none()
            && self.composer.is_none()
            && self.genre.is_none()
            && self.language.is_none()
    }
}

// =============================================================================
// Per-file processing state
// =============================================================================

/// How far a file has progressed through the pipeline.
///
/// Files move `Pending -> Hinted -> Inferred -> Tagged -> Done`; a failure at
/// any step is recorded with the stage that was being entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Pending,
    Hinted,
    Inferred,
    Tagged,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Pending => "PENDING",
            Stage::Hinted => "HINTED",
            Stage::Inferred => "INFERRED",
            Stage::Tagged => "TAGGED",
            Stage::Done => "DONE",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome for a single file
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Output file written with updated tags
    Done,
    /// File was not sent to the service (e.g. empty hint)
    Skipped { reason: String },
    /// Failed while entering `at`; no output file remains
    Failed { at: Stage, reason: String },
}

/// Per-file processing result, appended to the run log and summary.
///
/// Exactly one is produced per discovered file and it is never mutated
/// after creation.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub path: PathBuf,
    pub outcome: Outcome,
}

impl ProcessingResult {
    pub fn is_done(&self) -> bool {
        matches!(self.outcome, Outcome::Done)
    }

    /// File name for log lines; falls back to the full path display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
