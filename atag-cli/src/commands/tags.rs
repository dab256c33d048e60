//! `tag` subcommands: manage the active bank's definitions

use super::{resolve_tag, App};
use crate::cli::{TagCommand, TagFields};
use crate::{CliError, CliResult};
use atag_common::tags::{descendants, TagDefinition, TagForm, TagsFile};
use tracing::{info, warn};

pub fn run(app: &App, command: TagCommand) -> CliResult<()> {
    let mut session = app.open_session()?;

    match command {
        TagCommand::List { json } => {
            if json {
                println!("{}", session.vocabulary().to_json_pretty()?);
            } else {
                print_table(session.vocabulary());
            }
        }
        TagCommand::Add { name, fields } => {
            let form = TagForm {
                id: None,
                name,
                classification: fields.classification.unwrap_or_default(),
                parent: parent_id(session.vocabulary(), fields.parent.as_deref(), None)?,
                amount_range: fields.min.zip(fields.max),
            };
            let def = session.upsert_tag(form)?;
            info!(bank = %session.bank(), id = %def.id, "Added tag");
            println!("Added {}", describe(&def));
        }
        TagCommand::Edit {
            id,
            name,
            fields,
            clear_parent,
            clear_range,
        } => {
            let existing = resolve_tag(session.vocabulary(), &id)?;
            let form = edit_form(
                session.vocabulary(),
                &existing,
                name,
                fields,
                clear_parent,
                clear_range,
            )?;
            let def = session.upsert_tag(form)?;
            if def.name != existing.name {
                warn!(
                    id = %def.id,
                    old = %existing.name,
                    new = %def.name,
                    "Renamed tag; files tagged with the old name keep it as an unknown token"
                );
            }
            info!(bank = %session.bank(), id = %def.id, "Edited tag");
            println!("Updated {}", describe(&def));
        }
        TagCommand::Delete { id } => {
            let existing = resolve_tag(session.vocabulary(), &id)?;
            let orphans: Vec<String> = session
                .vocabulary()
                .iter()
                .filter(|d| d.parent.as_deref() == Some(existing.id.as_str()))
                .map(|d| d.id.clone())
                .collect();
            session.delete_tag(&existing.id)?;
            info!(bank = %session.bank(), id = %existing.id, "Deleted tag");
            println!("Deleted {}", existing.id);
            if !orphans.is_empty() {
                println!("Now without a parent: {}", orphans.join(", "));
            }
        }
    }
    Ok(())
}

/// Build the edit form: given fields replace, omitted fields keep their value
pub fn edit_form(
    vocabulary: &TagsFile,
    existing: &TagDefinition,
    name: Option<String>,
    fields: TagFields,
    clear_parent: bool,
    clear_range: bool,
) -> CliResult<TagForm> {
    let parent = if clear_parent {
        None
    } else if fields.parent.is_some() {
        parent_id(vocabulary, fields.parent.as_deref(), Some(&existing.id))?
    } else {
        existing.parent.clone()
    };

    let amount_range = if clear_range {
        None
    } else {
        fields
            .min
            .zip(fields.max)
            .or_else(|| existing.amount_range.map(|r| (r.min, r.max)))
    };

    Ok(TagForm {
        id: Some(existing.id.clone()),
        name: name.unwrap_or_else(|| existing.name.clone()),
        classification: fields.classification.unwrap_or(existing.classification),
        parent,
        amount_range,
    })
}

/// Resolve a parent reference; a tag cannot become its own ancestor
fn parent_id(
    vocabulary: &TagsFile,
    parent: Option<&str>,
    child: Option<&str>,
) -> CliResult<Option<String>> {
    let Some(key) = parent else {
        return Ok(None);
    };
    let parent = resolve_tag(vocabulary, key)?;
    if let Some(child) = child {
        if parent.id == child || descendants(child, vocabulary).contains(&parent.id) {
            return Err(CliError::BadArgument(format!(
                "'{}' cannot be the parent of '{}': it would create a loop",
                parent.id, child
            )));
        }
    }
    Ok(Some(parent.id))
}

fn describe(def: &TagDefinition) -> String {
    let mut out = format!("{} ({}, {})", def.id, def.name, def.classification);
    if let Some(parent) = &def.parent {
        out.push_str(&format!(", parent {}", parent));
    }
    if let Some(range) = &def.amount_range {
        out.push_str(&format!(", amount {}..={}", range.min, range.max));
    }
    out
}

fn print_table(vocabulary: &TagsFile) {
    if vocabulary.is_empty() {
        println!("(no tags defined)");
        return;
    }
    println!(
        "{:<20} {:<20} {:<10} {:<16} RANGE",
        "ID", "NAME", "CLASS", "PARENT"
    );
    for def in vocabulary.iter() {
        let range = def
            .amount_range
            .map(|r| format!("{}..={}", r.min, r.max))
            .unwrap_or_default();
        println!(
            "{:<20} {:<20} {:<10} {:<16} {}",
            def.id,
            def.name,
            def.classification.as_str(),
            def.parent.as_deref().unwrap_or("-"),
            range
        );
    }
}
