//! Command handlers
//!
//! Every handler works on an [`App`]: the resolved root folder, loaded
//! configuration and preferences, and the stores the tagging session uses.

mod banks;
mod files;
mod settings;
mod tags;

use crate::cli::{Command, ConfigCommand};
use crate::services::LoftyCommentStore;
use crate::{CliError, CliResult};
use atag_common::banks::{sanitize_bank, FsBankStore, DEFAULT_BANK};
use atag_common::config::{write_toml_config, RootFolderInitializer, TomlConfig};
use atag_common::prefs::Prefs;
use atag_common::tags::{TagDefinition, TagsFile};
use atag_common::{Error, TaggingSession};
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub use files::{checked_amount, choose_policy, parse_policy_answer, FileReport, PolicyChoice};

/// Everything a command needs, resolved once at startup
pub struct App {
    pub initializer: RootFolderInitializer,
    pub config: TomlConfig,
    pub config_path: Option<PathBuf>,
    pub prefs: Prefs,
    /// `--bank` for this run only
    pub bank_override: Option<String>,
    pub comments: LoftyCommentStore,
}

impl App {
    pub fn new(
        initializer: RootFolderInitializer,
        config: TomlConfig,
        config_path: Option<PathBuf>,
        bank_override: Option<String>,
    ) -> Self {
        let prefs = Prefs::load(&initializer.prefs_path());
        Self {
            initializer,
            config,
            config_path,
            prefs,
            bank_override,
            comments: LoftyCommentStore::new(),
        }
    }

    /// Active bank: `--bank`, then the remembered bank, then the configured default
    pub fn active_bank(&self) -> String {
        let chosen = self
            .bank_override
            .as_deref()
            .or(self.prefs.last_used_bank.as_deref())
            .or(self.config.default_bank.as_deref())
            .unwrap_or(DEFAULT_BANK);
        sanitize_bank(chosen)
    }

    pub fn bank_store(&self) -> FsBankStore {
        FsBankStore::new(self.initializer.banks_dir())
    }

    pub fn open_session(&self) -> CliResult<TaggingSession<FsBankStore>> {
        Ok(TaggingSession::open(self.bank_store(), &self.active_bank())?)
    }

    pub fn save_prefs(&self) -> CliResult<()> {
        self.prefs.save(&self.initializer.prefs_path())?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        self.initializer.root()
    }
}

/// Look a tag up by id, then by name
pub fn resolve_tag(vocabulary: &TagsFile, key: &str) -> CliResult<TagDefinition> {
    vocabulary
        .get(key)
        .or_else(|| vocabulary.find_by_name(key))
        .cloned()
        .ok_or_else(|| Error::TagNotFound(key.to_string()).into())
}

/// Run `op` on every path, logging failures and carrying on
///
/// Fails with [`CliError::Batch`] at the end if any path failed.
pub fn run_batch<F>(paths: &[PathBuf], mut op: F) -> CliResult<()>
where
    F: FnMut(&Path) -> CliResult<()>,
{
    let mut failed = 0;
    for path in paths {
        if let Err(e) = op(path) {
            error!(path = %path.display(), error = %e, "File failed");
            eprintln!("{}: {}", path.display(), e);
            failed += 1;
        }
    }
    if failed > 0 {
        return Err(CliError::Batch {
            failed,
            total: paths.len(),
        });
    }
    Ok(())
}

/// Dispatch a parsed command
pub fn run(app: &mut App, command: Command) -> CliResult<()> {
    match command {
        Command::Scan {
            dir,
            recursive,
            json,
        } => files::scan(app, &dir, recursive, json),
        Command::Show { file, json } => files::show(app, &file, json),
        Command::Add {
            tag,
            files,
            amount,
            policy,
        } => files::add(app, &tag, &files, amount, policy.policy()),
        Command::Remove { tag, files, policy } => {
            files::remove(app, &tag, &files, policy.policy())
        }
        Command::Set {
            file,
            tokens,
            policy,
        } => files::set(app, &file, &tokens.join(" "), policy.policy()),
        Command::Tag(command) => tags::run(app, command),
        Command::Bank(command) => banks::run(app, command),
        Command::Settings(command) => settings::run(app, command),
        Command::Config(command) => config(app, command),
    }
}

fn config(app: &App, command: ConfigCommand) -> CliResult<()> {
    let path = app.config_path.clone().ok_or_else(|| {
        CliError::BadArgument("No config directory on this system; pass --config".to_string())
    })?;

    match command {
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::BadArgument(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            let config = TomlConfig {
                root_folder: Some(app.root().to_path_buf()),
                ..Default::default()
            };
            write_toml_config(&config, &path)?;
            info!(path = %path.display(), "Wrote config file");
            println!("Wrote {}", path.display());
        }
        ConfigCommand::Show => {
            let rendered = toml::to_string_pretty(&app.config)
                .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))?;
            println!("# {}", path.display());
            println!("# root folder: {}", app.root().display());
            print!("{}", rendered);
        }
    }
    Ok(())
}
