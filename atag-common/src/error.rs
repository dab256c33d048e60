//! Common error types for AudioTagger

use thiserror::Error;

/// Common result type for AudioTagger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the tag engine and its collaborators
#[derive(Error, Debug)]
pub enum Error {
    /// Tag name is empty, contains whitespace, or contains the token delimiter
    #[error("Invalid tag name '{0}': names must be non-empty and contain no whitespace or ';'")]
    InvalidName(String),

    /// Amount range with min greater than max
    #[error("Invalid amount range: min {min} is greater than max {max}")]
    InvalidAmountRange { min: u32, max: u32 },

    /// No tag definition with the given id in the active vocabulary
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    /// Token does not match any definition in the active vocabulary
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    /// Vocabulary has main tags but the selection contains none of them
    #[error("At least one main tag must be selected")]
    MissingMainTag,

    /// Attempt to remove a tag classified as mandatory
    #[error("Tag '{0}' is mandatory and cannot be removed")]
    MandatoryTagRemovalRejected(String),

    /// Parent links loop back on themselves
    #[error("Cyclic parent graph detected at tag '{id}'")]
    CyclicParentGraph { id: String },

    /// Comment belongs to another bank; caller must choose keep or discard
    #[error("File was tagged with bank '{file_bank}'; choose whether to keep or discard its unknown tokens")]
    PolicyRequired { file_bank: String },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// External store (comment or vocabulary) failure
    #[error("Store error: {0}")]
    Store(String),
}
