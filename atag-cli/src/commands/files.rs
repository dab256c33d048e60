//! File commands: scan, show, add, remove, set

use super::{resolve_tag, run_batch, App};
use crate::services::{FileScanner, MetadataReader, TrackMeta};
use crate::{CliError, CliResult};
use atag_common::prefs::Settings;
use atag_common::tags::{parse_token_list, ReconcilePolicy, TagDefinition};
use atag_common::{Error, FileTags};
use serde::Serialize;
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// One file as listed by `scan` and `show`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    #[serde(flatten)]
    pub meta: TrackMeta,
    pub tags: Vec<String>,
    pub unknown_tokens: Vec<String>,
    pub bank: Option<String>,
    pub normalized: bool,
}

impl FileReport {
    fn new(mut meta: TrackMeta, tags: FileTags) -> Self {
        meta.comment = tags.comment;
        Self {
            meta,
            tags: tags.selection.iter().map(|s| s.token()).collect(),
            unknown_tokens: tags.unknown_tokens,
            bank: tags.file_bank,
            normalized: tags.normalized,
        }
    }

    fn print(&self, settings: &Settings) {
        println!("{}", self.meta.file_name);
        if settings.show_title {
            if let Some(title) = &self.meta.title {
                println!("  title:   {}", title);
            }
        }
        if settings.show_authors && !self.meta.artists.is_empty() {
            println!("  authors: {}", self.meta.artists.join(", "));
        }
        if settings.show_genre {
            if let Some(genre) = &self.meta.genre {
                println!("  genre:   {}", genre);
            }
        }
        println!("  tags:    {}", self.tags.join(" "));
        if !self.unknown_tokens.is_empty() {
            println!("  unknown: {}", self.unknown_tokens.join(" "));
        }
        if let Some(bank) = &self.bank {
            println!("  bank:    {}", bank);
        }
        if self.normalized {
            println!("  (comment normalized)");
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(Error::from)?;
    println!("{}", json);
    Ok(())
}

pub fn scan(app: &App, dir: &Path, recursive: bool, json: bool) -> CliResult<()> {
    let session = app.open_session()?;
    let files = FileScanner::new().recursive(recursive).scan(dir)?;
    let reader = MetadataReader::new();

    let mut reports = Vec::with_capacity(files.len());
    let outcome = run_batch(&files, |path| {
        let meta = reader.read(path)?;
        let tags = session.inspect(path, &meta.comment);
        reports.push(FileReport::new(meta, tags));
        Ok(())
    });

    info!(
        dir = %dir.display(),
        bank = %session.bank(),
        files = reports.len(),
        "Scanned folder"
    );

    if json {
        print_json(&reports)?;
    } else {
        let settings = app.prefs.settings();
        for report in &reports {
            report.print(&settings);
        }
    }
    outcome
}

pub fn show(app: &App, file: &Path, json: bool) -> CliResult<()> {
    let session = app.open_session()?;
    let tags = session.load(&app.comments, file)?;
    let meta = MetadataReader::new().read(file)?;
    let report = FileReport::new(meta, tags);

    if json {
        print_json(&report)
    } else {
        report.print(&app.prefs.settings());
        Ok(())
    }
}

pub fn add(
    app: &App,
    tag: &str,
    files: &[PathBuf],
    amount: Option<u32>,
    policy: Option<ReconcilePolicy>,
) -> CliResult<()> {
    let session = app.open_session()?;
    let def = resolve_tag(session.vocabulary(), tag)?;
    let amount = checked_amount(&def, amount)?;

    run_batch(files, |path| {
        edit_with_prompt(path, policy, |policy| {
            session.add_tag(&app.comments, path, &def.id, amount, policy)
        })
    })
}

pub fn remove(
    app: &App,
    tag: &str,
    files: &[PathBuf],
    policy: Option<ReconcilePolicy>,
) -> CliResult<()> {
    let session = app.open_session()?;
    let def = resolve_tag(session.vocabulary(), tag)?;

    run_batch(files, |path| {
        edit_with_prompt(path, policy, |policy| {
            session.remove_tag(&app.comments, path, &def.id, policy)
        })
    })
}

pub fn set(
    app: &App,
    file: &Path,
    tokens: &str,
    policy: Option<ReconcilePolicy>,
) -> CliResult<()> {
    let session = app.open_session()?;
    let selection = parse_token_list(tokens, session.vocabulary())?;

    edit_with_prompt(file, policy, |policy| {
        session.set_tags(&app.comments, file, selection.clone(), policy)
    })
}

/// Amount to apply: range minimum when omitted, rejected outside the range
pub fn checked_amount(def: &TagDefinition, amount: Option<u32>) -> CliResult<Option<u32>> {
    match (&def.amount_range, amount) {
        (None, None) => Ok(None),
        (None, Some(_)) => Err(CliError::BadArgument(format!(
            "Tag '{}' does not take an amount",
            def.name
        ))),
        (Some(range), None) => Ok(Some(range.min)),
        (Some(range), Some(n)) if range.contains(n) => Ok(Some(n)),
        (Some(range), Some(n)) => Err(CliError::BadArgument(format!(
            "Amount {} is outside {}..={} for '{}'",
            n, range.min, range.max, def.name
        ))),
    }
}

/// Answer to the keep/discard question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyChoice {
    Apply(ReconcilePolicy),
    Skip,
}

pub fn parse_policy_answer(answer: &str) -> Option<PolicyChoice> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "k" | "keep" => Some(PolicyChoice::Apply(ReconcilePolicy::KeepUnknowns)),
        "d" | "discard" => Some(PolicyChoice::Apply(ReconcilePolicy::DiscardUnknowns)),
        "s" | "skip" => Some(PolicyChoice::Skip),
        _ => None,
    }
}

/// Ask until a valid answer arrives; end of input skips the file
pub fn choose_policy(
    path: &Path,
    file_bank: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> CliResult<PolicyChoice> {
    loop {
        write!(
            output,
            "{} was tagged with bank '{}'. [k]eep or [d]iscard its unknown tokens, or [s]kip? ",
            path.display(),
            file_bank
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(PolicyChoice::Skip);
        }
        if let Some(choice) = parse_policy_answer(&line) {
            return Ok(choice);
        }
    }
}

/// Run an edit, asking for a policy on a terminal when the file needs one
fn edit_with_prompt<F>(path: &Path, policy: Option<ReconcilePolicy>, mut op: F) -> CliResult<()>
where
    F: FnMut(Option<ReconcilePolicy>) -> atag_common::Result<String>,
{
    let result = match op(policy) {
        Err(Error::PolicyRequired { file_bank }) if std::io::stdin().is_terminal() => {
            let stdin = std::io::stdin();
            let choice = choose_policy(path, &file_bank, &mut stdin.lock(), &mut std::io::stderr())?;
            match choice {
                PolicyChoice::Apply(policy) => op(Some(policy)),
                PolicyChoice::Skip => {
                    info!(path = %path.display(), file_bank = %file_bank, "Skipped file");
                    println!("{}: skipped", path.display());
                    return Ok(());
                }
            }
        }
        other => other,
    };

    let comment = result?;
    println!("{}: {}", path.display(), comment);
    Ok(())
}
