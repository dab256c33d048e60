//! atag - command-line front end for the AudioTagger tag engine
//!
//! Library half of the `atag` binary, exposed for integration tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod services;

pub use crate::error::{CliError, CliResult};

/// Build identification embedded by build.rs
pub mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const GIT_HASH: &str = env!("GIT_HASH");
    pub const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");
    pub const BUILD_PROFILE: &str = env!("BUILD_PROFILE");
}
