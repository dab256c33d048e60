//! Folder listing of taggable audio files
//!
//! Non-recursive unless asked, since tagging works one folder at a time.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Extensions the comment store knows how to tag
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "flac", "wav", "aiff", "aif", "m4a"];

/// Entry names skipped during a walk (substring match)
const IGNORED_NAMES: &[&str] = &[".DS_Store", "Thumbs.db", ".git", ".svn"];

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Folder not found: {0}")]
    FolderNotFound(PathBuf),

    #[error("Not a folder: {0}")]
    NotAFolder(PathBuf),
}

/// Lists supported audio files under a folder
#[derive(Debug, Default, Clone)]
pub struct FileScanner {
    recursive: bool,
}

impl FileScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Supported files under `folder`, ordered by case-insensitive file name
    pub fn scan(&self, folder: &Path) -> Result<Vec<PathBuf>, ScanError> {
        if !folder.exists() {
            return Err(ScanError::FolderNotFound(folder.to_path_buf()));
        }
        if !folder.is_dir() {
            return Err(ScanError::NotAFolder(folder.to_path_buf()));
        }

        let depth = if self.recursive { usize::MAX } else { 1 };
        let mut files: Vec<PathBuf> = WalkDir::new(folder)
            .min_depth(1)
            .max_depth(depth)
            .into_iter()
            .filter_entry(|e| !is_ignored(e))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    // Unreadable entries are skipped, the rest of the folder still lists
                    tracing::warn!(error = %e, "Skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && is_supported(entry.path()))
            .map(DirEntry::into_path)
            .collect();

        files.sort_by_cached_key(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default()
        });

        tracing::debug!(
            folder = %folder.display(),
            recursive = self.recursive,
            count = files.len(),
            "Listed audio files"
        );
        Ok(files)
    }
}

/// macOS `._` resource forks and system clutter
fn is_ignored(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with("._") || IGNORED_NAMES.iter().any(|ignored| name.contains(ignored))
}

/// True when the path has a supported audio extension (case-insensitive)
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}
