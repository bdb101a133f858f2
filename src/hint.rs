//! Song-hint extraction from file names
//!
//! Turns a raw file name into a cleaned text prompt for metadata inference:
//! drops the extension, strips leading track numbers and bracketed prefixes,
//! and normalizes separators to single spaces.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static LEADING_TRACK_NO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[\s_\-.]+").unwrap());
static LEADING_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[^\]]*\][\s_\-.]*").unwrap());
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[_\-.]+").unwrap());
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Clean a file name into a song hint.
///
/// Always returns a string; it is empty when the name has no usable
/// characters. Path components and the extension never survive.
pub fn clean(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    let name = LEADING_TRACK_NO.replace(stem, "");
    let name = LEADING_BRACKET.replace(&name, "");
    let name = SEPARATORS.replace_all(&name, " ");
    let name = MULTI_SPACE.replace_all(&name, " ");

    name.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_extension_and_separators() {
        assert_eq!(clean("Bohemian_Rhapsody-Queen.mp3"), "Bohemian Rhapsody Queen");
    }

    #[test]
    fn strips_leading_track_number() {
        assert_eq!(clean("01 - Yesterday.mp3"), "Yesterday");
        assert_eq!(clean("12_Tum_Hi_Ho.mp3"), "Tum Hi Ho");
    }

    #[test]
    fn keeps_bare_numeric_names() {
        // A number with no trailing separator is the whole name, not a prefix
        assert_eq!(clean("01.mp3"), "01");
    }

    #[test]
    fn strips_bracketed_prefix() {
        assert_eq!(clean("[320kbps] Hotel California.mp3"), "Hotel California");
    }

    #[test]
    fn drops_path_components() {
        let hint = clean("music/albums/Take_Five.mp3");
        assert_eq!(hint, "Take Five");
        assert!(!hint.contains('/'));
        assert!(!hint.contains('\\'));
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(clean("So   What  .mp3"), "So What");
    }

    #[test]
    fn unusable_name_yields_empty_hint() {
        assert_eq!(clean("___.mp3"), "");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn dotted_names_lose_only_the_extension() {
        assert_eq!(clean("Mr. Blue Sky.mp3"), "Mr Blue Sky");
    }
}
