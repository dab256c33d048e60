//! Consistency enforcement over selections
//!
//! [`enforce`] closes a selection under parent implication and mandatory
//! inclusion. [`has_required_main`] and [`check_removal`] are gates the
//! caller runs before writing; they never modify the selection.

use super::codec::{SelectedTag, Selection};
use super::definition::Classification;
use super::vocabulary::TagsFile;
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};

/// Close a selection under parent links and mandatory tags
///
/// Repeated ids keep the amount of their last occurrence at the position of
/// their first. Missing ancestors follow the input entries, then missing
/// mandatory tags in vocabulary order, then any ancestors those mandatory
/// tags still lack; added tags get amount `0` when ranged.
/// A dangling parent id ends that ancestor walk. A parent loop fails with
/// [`Error::CyclicParentGraph`].
pub fn enforce(selection: &Selection, vocabulary: &TagsFile) -> Result<Selection> {
    let mut result = dedup_keep_last(selection);
    push_missing_ancestors(&mut result, 0, vocabulary)?;

    let first_mandatory = result.len();
    let mandatory: Vec<_> = vocabulary
        .with_classification(Classification::Mandatory)
        .filter(|def| !result.contains(&def.id))
        .cloned()
        .collect();
    for def in mandatory {
        let amount = def.implied_amount();
        result.push(SelectedTag::new(def, amount));
    }
    push_missing_ancestors(&mut result, first_mandatory, vocabulary)?;

    Ok(result)
}

/// Append the ancestors of entries from `start` on that are not selected yet
fn push_missing_ancestors(
    result: &mut Selection,
    start: usize,
    vocabulary: &TagsFile,
) -> Result<()> {
    let mut missing: Vec<String> = Vec::new();
    for entry in result.iter().skip(start) {
        for ancestor in ancestors(entry.id(), vocabulary)? {
            if !result.contains(&ancestor) && !missing.contains(&ancestor) {
                missing.push(ancestor);
            }
        }
    }

    for id in missing {
        if let Some(def) = vocabulary.get(&id) {
            result.push(SelectedTag::new(def.clone(), def.implied_amount()));
        }
    }
    Ok(())
}

/// Ancestor ids of `id`, nearest first
///
/// Stops at the first parent id that is not in the vocabulary.
pub fn ancestors(id: &str, vocabulary: &TagsFile) -> Result<Vec<String>> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut chain = Vec::new();
    visited.insert(id);

    let mut current = vocabulary.get(id);
    while let Some(def) = current {
        let Some(parent) = def.parent.as_deref() else {
            break;
        };
        if !visited.insert(parent) {
            return Err(Error::CyclicParentGraph {
                id: parent.to_string(),
            });
        }
        current = vocabulary.get(parent);
        if current.is_some() {
            chain.push(parent.to_string());
        }
    }
    Ok(chain)
}

/// Ids of every definition that has `id` somewhere in its ancestor chain
///
/// Definitions caught in a parent loop are skipped rather than reported.
pub fn descendants(id: &str, vocabulary: &TagsFile) -> Vec<String> {
    vocabulary
        .iter()
        .filter(|def| def.id != id)
        .filter(|def| {
            ancestors(&def.id, vocabulary)
                .map(|chain| chain.iter().any(|a| a == id))
                .unwrap_or(false)
        })
        .map(|def| def.id.clone())
        .collect()
}

/// True when the selection has a main tag or the vocabulary defines none
pub fn has_required_main(selection: &Selection, vocabulary: &TagsFile) -> bool {
    let mut mains = vocabulary.with_classification(Classification::Main).peekable();
    if mains.peek().is_none() {
        return true;
    }
    selection
        .iter()
        .any(|entry| entry.tag.classification == Classification::Main)
}

/// [`has_required_main`] as a write precondition
pub fn require_main(selection: &Selection, vocabulary: &TagsFile) -> Result<()> {
    if has_required_main(selection, vocabulary) {
        Ok(())
    } else {
        Err(Error::MissingMainTag)
    }
}

/// Reject removing a mandatory tag from a selection
pub fn check_removal(id: &str, vocabulary: &TagsFile) -> Result<()> {
    match vocabulary.get(id) {
        Some(def) if def.classification == Classification::Mandatory => {
            Err(Error::MandatoryTagRemovalRejected(def.name.clone()))
        }
        _ => Ok(()),
    }
}

fn dedup_keep_last(selection: &Selection) -> Selection {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<SelectedTag> = Vec::with_capacity(selection.len());
    for entry in selection {
        match positions.get(entry.id()) {
            Some(&index) => entries[index] = entry.clone(),
            None => {
                positions.insert(entry.id(), entries.len());
                entries.push(entry.clone());
            }
        }
    }
    entries.into_iter().collect()
}
