//! Unified error types for tagprep
//!
//! Error strategy:
//! - Per-file errors (inference, tag write): Recoverable, mark file FAILED and continue
//! - System errors (config, output directory, run log): Fatal, abort the run
//!
//! All errors include actionable suggestions where possible.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for tagprep operations
#[derive(Debug, Error)]
pub enum TagprepError {
    // =========================================================================
    // Recoverable errors - mark file FAILED, continue batch
    // =========================================================================
    #[error("Inference failed for '{hint}': {reason}")]
    Inference { hint: String, reason: String },

    #[error("Failed to write tags to '{path}': {reason}\n  Tip: If the file plays in other apps, it may be corrupted or not a real MP3 container")]
    TagWrite { path: PathBuf, reason: String },

    // =========================================================================
    // Fatal errors - abort entire run
    // =========================================================================
    #[error("File not found: '{0}'\n  Tip: Check the path exists and is accessible")]
    FileNotFound(PathBuf),

    #[error("Unsupported input file: '{path}' ({format})\n  Tip: Only .mp3 files can be tagged")]
    UnsupportedInput { path: PathBuf, format: String },

    #[error("Cannot write output to '{path}': {reason}\n  Tip: Check write permissions for the output directory")]
    Output { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tagprep operations
pub type Result<T> = std::result::Result<T, TagprepError>;

impl TagprepError {
    /// Returns true if this error is recoverable (mark file FAILED, continue batch)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TagprepError::Inference { .. } | TagprepError::TagWrite { .. }
        )
    }

    /// Create an inference error with the hint that was being resolved
    pub fn inference(hint: impl Into<String>, reason: impl Into<String>) -> Self {
        TagprepError::Inference {
            hint: hint.into(),
            reason: reason.into(),
        }
    }

    /// Create a tag write error for a given output file
    pub fn tag_write(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        TagprepError::TagWrite {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an output error, checking for common issues
    pub fn output_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        let reason = match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                format!(
                    "Permission denied. Check that you have write access to {}",
                    path.display()
                )
            }
            std::io::ErrorKind::NotFound => {
                format!(
                    "Directory does not exist: {}",
                    path.parent()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default()
                )
            }
            _ => err.to_string(),
        };
        TagprepError::Output { path, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_file_errors_are_recoverable() {
        assert!(TagprepError::inference("some song", "timeout").is_recoverable());
        assert!(TagprepError::tag_write("/out/x.mp3", "truncated").is_recoverable());
    }

    #[test]
    fn system_errors_are_fatal() {
        assert!(!TagprepError::Config("missing API key".into()).is_recoverable());
        assert!(!TagprepError::FileNotFound(PathBuf::from("/missing")).is_recoverable());
        assert!(!TagprepError::UnsupportedInput {
            path: PathBuf::from("/in/notes.txt"),
            format: "txt".into()
        }
        .is_recoverable());
        assert!(!TagprepError::Output {
            path: PathBuf::from("/out"),
            reason: "read-only".into()
        }
        .is_recoverable());
    }
}
