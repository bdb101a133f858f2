//! ID3 tag writing via lofty
//!
//! Always operates on a copy: the source file is copied into the output
//! folder first and only the copy's tag region is rewritten, so the audio
//! payload stays byte-identical to the source.
//!
//! Overwrite policy: a field present in the record is always written; a field
//! the inference left empty is preserved when `overwrite` is false and
//! cleared when `overwrite` is true.

use crate::error::{Result, TagprepError};
use crate::types::MetadataRecord;
use lofty::{Accessor, ItemKey, Probe, Tag, TagExt, TaggedFileExt};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Copy `source` into `output_dir` and write the record into the copy's tags.
///
/// Returns the path of the tagged copy. On any tag failure the partial copy
/// is removed, so a failed file leaves no output behind.
pub fn write_tags(
    source: &Path,
    output_dir: &Path,
    record: &MetadataRecord,
    overwrite: bool,
) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| TagprepError::tag_write(source, "source has no file name"))?;
    let dest = output_dir.join(file_name);

    debug!("Copying {} -> {}", source.display(), dest.display());
    fs::copy(source, &dest).map_err(|e| TagprepError::tag_write(&dest, e.to_string()))?;

    if let Err(e) = apply_tags(&dest, record, overwrite) {
        let _ = fs::remove_file(&dest);
        return Err(e);
    }

    Ok(dest)
}

fn apply_tags(path: &Path, record: &MetadataRecord, overwrite: bool) -> Result<()> {
    let mut tagged_file = Probe::open(path)
        .map_err(|e| TagprepError::tag_write(path, e.to_string()))?
        .read()
        .map_err(|e| TagprepError::tag_write(path, e.to_string()))?;

    if tagged_file.primary_tag().is_none() {
        let tag_type = tagged_file.primary_tag_type();
        debug!("No existing tag in {}, creating {:?}", path.display(), tag_type);
        tagged_file.insert_tag(Tag::new(tag_type));
    }

    let tag = tagged_file
        .primary_tag_mut()
        .ok_or_else(|| TagprepError::tag_write(path, "file format has no writable tag"))?;

    match &record.title {
        Some(title) => tag.set_title(title.clone()),
        None if overwrite => tag.remove_title(),
        None => {}
    }
    match &record.artist {
        Some(artist) => tag.set_artist(artist.clone()),
        None if overwrite => tag.remove_artist(),
        None => {}
    }
    match &record.album {
        Some(album) => tag.set_album(album.clone()),
        None if overwrite => tag.remove_album(),
        None => {}
    }
    match &record.genre {
        Some(genre) => tag.set_genre(genre.clone()),
        None if overwrite => tag.remove_genre(),
        None => {}
    }
    match &record.year {
        Some(year) => match year.parse::<u32>() {
            Ok(value) => tag.set_year(value),
            Err(_) => warn!("Invalid year value '{}' for {}", year, path.display()),
        },
        None if overwrite => tag.remove_year(),
        None => {}
    }
    match &record.composer {
        Some(composer) => {
            tag.insert_text(ItemKey::Composer, composer.clone());
        }
        None if overwrite => {
            tag.remove_key(&ItemKey::Composer);
        }
        None => {}
    }
    match &record.language {
        Some(language) => {
            tag.insert_text(ItemKey::Language, language.clone());
        }
        None if overwrite => {
            tag.remove_key(&ItemKey::Language);
        }
        None => {}
    }

    tag.save_to_path(path)
        .map_err(|e| TagprepError::tag_write(path, e.to_string()))?;

    debug!("Updated tags for {}", path.display());

    Ok(())
}
