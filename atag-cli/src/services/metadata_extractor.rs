//! Track metadata extraction
//!
//! Reads the display fields shown next to a file's tags (title, artists,
//! genre) together with its comment, using lofty.

use super::comment_store::comment_of;
use lofty::file::FileType;
use lofty::prelude::*;
use lofty::probe::Probe;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Metadata extraction errors
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },
}

/// Display metadata for one track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackMeta {
    pub path: String,
    pub file_name: String,
    pub title: Option<String>,
    pub artists: Vec<String>,
    pub genre: Option<String>,
    /// Raw comment field; empty when the file has none
    pub comment: String,
    pub format: String,
}

/// Metadata reader service
#[derive(Debug, Default)]
pub struct MetadataReader {}

impl MetadataReader {
    pub fn new() -> Self {
        Self {}
    }

    /// Read metadata from an audio file
    pub fn read(&self, file_path: &Path) -> Result<TrackMeta, MetadataError> {
        let read_error = |message: String| MetadataError::ReadError {
            path: file_path.display().to_string(),
            message,
        };

        let tagged_file = Probe::open(file_path)
            .map_err(|e| read_error(e.to_string()))?
            .read()
            .map_err(|e| read_error(e.to_string()))?;

        let format = match tagged_file.file_type() {
            FileType::Mpeg => "MP3",
            FileType::Flac => "FLAC",
            FileType::Aiff => "AIFF",
            FileType::Wav => "WAV",
            FileType::Mp4 => "MP4",
            _ => "Unknown",
        }
        .to_string();

        let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());

        let (title, artists, genre) = match tag {
            Some(tag) => {
                let mut artists: Vec<String> = tag
                    .get_strings(&ItemKey::TrackArtist)
                    .map(str::to_string)
                    .collect();
                if artists.is_empty() {
                    artists.extend(tag.artist().map(|s| s.to_string()));
                }
                (
                    tag.title().map(|s| s.to_string()),
                    artists,
                    tag.genre().map(|s| s.to_string()),
                )
            }
            None => (None, Vec::new(), None),
        };

        let comment = comment_of(&tagged_file, file_path).unwrap_or_default();

        tracing::debug!(
            file = %file_path.display(),
            title = ?title,
            format = %format,
            "Extracted metadata"
        );

        Ok(TrackMeta {
            path: file_path.to_string_lossy().to_string(),
            file_name: file_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            title,
            artists,
            genre,
            comment,
            format,
        })
    }
}
