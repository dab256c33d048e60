//! Error types for the atag CLI

use crate::services::{MetadataError, ScanError};
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Tag engine or store error
    #[error(transparent)]
    Common(#[from] atag_common::Error),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Invalid command-line input
    #[error("Invalid argument: {0}")]
    BadArgument(String),

    /// One or more files of a batch failed
    #[error("{failed} of {total} files failed")]
    Batch { failed: usize, total: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
