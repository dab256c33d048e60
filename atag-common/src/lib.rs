//! # AudioTagger Common Library
//!
//! Shared code for the AudioTagger tools including:
//! - Tag engine (vocabulary, token codec, enforcement, bank reconciliation)
//! - Tagging session over pluggable comment and vocabulary stores
//! - Bank storage, preferences and configuration loading
//! - Error types

pub mod banks;
pub mod config;
pub mod error;
pub mod prefs;
pub mod session;
pub mod tags;

pub use error::{Error, Result};
pub use session::{CommentStore, FileTags, TaggingSession};
