//! Command-line arguments

use atag_common::tags::{Classification, ReconcilePolicy};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for atag
#[derive(Parser, Debug)]
#[command(name = "atag")]
#[command(about = "Consistent tag tokens in audio file comments")]
#[command(version)]
pub struct Cli {
    /// Root folder for banks, logs and preferences
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Tag bank for this run (does not change the remembered bank)
    #[arg(long, global = true)]
    pub bank: Option<String>,

    /// Config file (default: <config dir>/atag/config.toml)
    #[arg(long, global = true, env = "ATAG_CONFIG")]
    pub config: Option<PathBuf>,

    /// More console output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List audio files in a folder with their decoded tags
    Scan {
        dir: PathBuf,
        /// Descend into subfolders
        #[arg(short, long)]
        recursive: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show one file's metadata and tags (normalizes the comment if needed)
    Show {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// Add a tag to files, or change its amount
    Add {
        /// Tag id or name
        tag: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Amount for ranged tags
        #[arg(short, long)]
        amount: Option<u32>,
        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Remove a tag (and its selected children) from files
    Remove {
        tag: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Replace a file's tags with a token list, e.g. "lead;energy7"
    Set {
        file: PathBuf,
        #[arg(required = true)]
        tokens: Vec<String>,
        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Manage tag definitions of the active bank
    #[command(subcommand)]
    Tag(TagCommand),

    /// Manage tag banks
    #[command(subcommand)]
    Bank(BankCommand),

    /// Display settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Configuration file
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// What to do with tokens of another bank when retagging a file
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct PolicyArgs {
    /// Keep tokens this bank does not recognize
    #[arg(long, conflicts_with = "discard_unknowns")]
    pub keep_unknowns: bool,

    /// Drop tokens this bank does not recognize
    #[arg(long)]
    pub discard_unknowns: bool,
}

impl PolicyArgs {
    pub fn policy(&self) -> Option<ReconcilePolicy> {
        if self.keep_unknowns {
            Some(ReconcilePolicy::KeepUnknowns)
        } else if self.discard_unknowns {
            Some(ReconcilePolicy::DiscardUnknowns)
        } else {
            None
        }
    }
}

/// Definition fields shared by `tag add` and `tag edit`
#[derive(Args, Debug, Clone)]
pub struct TagFields {
    /// main, mandatory or optional
    #[arg(long = "class")]
    pub classification: Option<Classification>,

    /// Parent tag id or name
    #[arg(long)]
    pub parent: Option<String>,

    /// Lower bound of the amount range
    #[arg(long, requires = "max")]
    pub min: Option<u32>,

    /// Upper bound of the amount range
    #[arg(long, requires = "min")]
    pub max: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// List definitions
    List {
        #[arg(long)]
        json: bool,
    },
    /// Create a definition
    Add {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: TagFields,
    },
    /// Change a definition's fields, keeping its id; omitted fields stay as they are
    Edit {
        /// Tag id or name
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: TagFields,
        /// Make the tag a root tag
        #[arg(long, conflicts_with = "parent")]
        clear_parent: bool,
        /// Remove the amount range
        #[arg(long, conflicts_with_all = ["min", "max"])]
        clear_range: bool,
    },
    /// Delete a definition (children keep a dangling parent)
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum BankCommand {
    /// List known banks
    List,
    /// Switch the remembered bank
    Use { name: String },
    /// Print the active bank
    Current,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    Show,
    Set {
        #[arg(long)]
        show_title: Option<bool>,
        #[arg(long)]
        show_authors: Option<bool>,
        #[arg(long)]
        show_genre: Option<bool>,
        /// Start playback on selection (read by the desktop app)
        #[arg(long)]
        instant_playback: Option<bool>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file path and effective values
    Show,
}
