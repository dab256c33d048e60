//! Services over real audio files
//!
//! - `comment_store`: comment read/write per container format
//! - `metadata_extractor`: display metadata for listings
//! - `file_scanner`: folder listing of taggable files

pub mod comment_store;
pub mod file_scanner;
pub mod metadata_extractor;

pub use comment_store::{preferred_tag_types, LoftyCommentStore};
pub use file_scanner::{is_supported, FileScanner, ScanError, SUPPORTED_EXTENSIONS};
pub use metadata_extractor::{MetadataError, MetadataReader, TrackMeta};
