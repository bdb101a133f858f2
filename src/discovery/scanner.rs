//! File discovery and scanning

use crate::error::{Result, TagprepError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Discovered MP3 file with basic metadata
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Scan a path (file or directory) for MP3 files
///
/// Results are sorted by path so every run processes files in the same order.
pub fn scan(input: &Path, recursive: bool) -> Result<Vec<SourceFile>> {
    if !input.exists() {
        return Err(TagprepError::FileNotFound(input.to_path_buf()));
    }

    let mut files = Vec::new();

    if input.is_file() {
        // Single file mode
        if let Some(file) = try_discover_file(input) {
            files.push(file);
        } else {
            return Err(TagprepError::UnsupportedInput {
                path: input.to_path_buf(),
                format: input
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("no extension")
                    .to_string(),
            });
        }
    } else if input.is_dir() {
        let walker = if recursive {
            WalkDir::new(input)
        } else {
            WalkDir::new(input).max_depth(1)
        };

        for entry in walker.into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_file() {
                if let Some(file) = try_discover_file(path) {
                    debug!("Discovered: {}", file.path.display());
                    files.push(file);
                }
            }
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));

    info!("Discovered {} MP3 files", files.len());

    if files.is_empty() {
        warn!("No MP3 files found in {}", input.display());
    }

    Ok(files)
}

/// Try to create a SourceFile if the path is an MP3
fn try_discover_file(path: &Path) -> Option<SourceFile> {
    if !is_mp3(path) {
        return None;
    }

    let metadata = std::fs::metadata(path).ok()?;

    Some(SourceFile {
        path: path.to_path_buf(),
        size_bytes: metadata.len(),
    })
}

fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_mp3(Path::new("track.mp3")));
        assert!(is_mp3(Path::new("track.MP3")));
        assert!(!is_mp3(Path::new("track.flac")));
        assert!(!is_mp3(Path::new("track")));
    }

    #[test]
    fn scan_is_non_recursive_by_default() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("a.mp3"), b"x").expect("write");
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).expect("mkdir");
        fs::write(sub.join("b.mp3"), b"x").expect("write");

        let flat = scan(dir.path(), false).expect("scan");
        assert_eq!(flat.len(), 1);

        let deep = scan(dir.path(), true).expect("scan");
        assert_eq!(deep.len(), 2);
    }

    #[test]
    fn scan_skips_non_mp3_files() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("notes.txt"), b"x").expect("write");
        fs::write(dir.path().join("song.mp3"), b"x").expect("write");

        let files = scan(dir.path(), false).expect("scan");
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("song.mp3"));
    }

    #[test]
    fn scan_results_are_sorted() {
        let dir = TempDir::new().expect("temp dir");
        for name in ["c.mp3", "a.mp3", "b.mp3"] {
            fs::write(dir.path().join(name), b"x").expect("write");
        }

        let files = scan(dir.path(), false).expect("scan");
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.mp3", "b.mp3", "c.mp3"]);
    }

    #[test]
    fn single_file_input_must_be_mp3() {
        let dir = TempDir::new().expect("temp dir");
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, b"x").expect("write");

        let result = scan(&notes, false);
        assert!(matches!(
            result,
            Err(TagprepError::UnsupportedInput { .. })
        ));

        let song = dir.path().join("song.mp3");
        fs::write(&song, b"x").expect("write");
        let files = scan(&song, false).expect("scan");
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn missing_input_is_an_error() {
        let result = scan(Path::new("/nonexistent/tagprep/input"), false);
        assert!(matches!(result, Err(TagprepError::FileNotFound(_))));
    }
}
