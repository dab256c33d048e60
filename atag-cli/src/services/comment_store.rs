//! Comment field read/write through lofty
//!
//! Each container gets the tag type DJ software reads the comment from:
//! ID3v2 COMM for MP3/AIFF, Vorbis `COMMENT=` for FLAC, `©cmt` for MP4,
//! and both RIFF INFO `ICMT` and ID3v2 for WAV.

use atag_common::{CommentStore, Error, Result};
use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFile, TaggedFileExt};
use lofty::tag::{ItemKey, Tag, TagType};
use std::path::Path;
use tracing::debug;

/// Tag types to use for a file, most preferred first; empty means "primary tag type"
pub fn preferred_tag_types(path: &Path) -> &'static [TagType] {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "mp3" | "aif" | "aiff" => &[TagType::Id3v2],
        "flac" => &[TagType::VorbisComments],
        "m4a" | "mp4" | "alac" => &[TagType::Mp4Ilst],
        "wav" => &[TagType::RiffInfo, TagType::Id3v2],
        _ => &[],
    }
}

/// Comment from the preferred tag types, falling back to the primary tag
pub fn comment_of(tagged_file: &TaggedFile, path: &Path) -> Option<String> {
    preferred_tag_types(path)
        .iter()
        .filter_map(|tt| tagged_file.tag(*tt))
        .chain(tagged_file.primary_tag())
        .find_map(|tag| tag.get_string(&ItemKey::Comment))
        .map(str::to_string)
}

/// [`CommentStore`] over real audio files
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyCommentStore;

impl LoftyCommentStore {
    pub fn new() -> Self {
        Self
    }
}

fn store_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Store(format!("{}: {}", path.display(), err))
}

impl CommentStore for LoftyCommentStore {
    fn read_comment(&self, path: &Path) -> Result<String> {
        let tagged_file = lofty::read_from_path(path).map_err(|e| store_error(path, e))?;
        Ok(comment_of(&tagged_file, path).unwrap_or_default())
    }

    fn write_comment(&self, path: &Path, comment: &str) -> Result<()> {
        let mut tagged_file = lofty::read_from_path(path).map_err(|e| store_error(path, e))?;

        let mut targets: Vec<TagType> = preferred_tag_types(path).to_vec();
        if targets.is_empty() {
            targets.push(tagged_file.primary_tag_type());
        }

        let mut wrote_any = false;
        for tt in targets {
            if tagged_file.tag(tt).is_none() {
                tagged_file.insert_tag(Tag::new(tt));
            }
            if let Some(tag) = tagged_file.tag_mut(tt) {
                wrote_any |= tag.insert_text(ItemKey::Comment, comment.to_string());
            }
        }

        if !wrote_any {
            return Err(store_error(path, "no writable tag for comment"));
        }

        tagged_file
            .save_to_path(path, WriteOptions::default())
            .map_err(|e| store_error(path, e))?;
        debug!(path = %path.display(), bytes = comment.len(), "Saved comment");
        Ok(())
    }
}
