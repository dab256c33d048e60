//! Token codec: comment strings <-> selections
//!
//! Wire format:
//!
//! ```text
//! token    := <name><digits>      ranged definition
//!           | <name>              plain definition
//!           | "BankTag:" <bank>   sentinel
//! sequence := token (";" token)* ";"?
//! ```

use super::definition::TagDefinition;
use super::reconcile::BANK_SENTINEL_PREFIX;
use super::vocabulary::TagsFile;
use crate::{Error, Result};

/// Token delimiter inside the comment field
pub const DELIMITER: char = ';';

/// One selected tag with its amount (`Some` iff the tag is ranged)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedTag {
    pub tag: TagDefinition,
    pub amount: Option<u32>,
}

impl SelectedTag {
    pub fn new(tag: TagDefinition, amount: Option<u32>) -> Self {
        let amount = if tag.has_amount() { Some(amount.unwrap_or(0)) } else { None };
        Self { tag, amount }
    }

    pub fn id(&self) -> &str {
        &self.tag.id
    }

    pub fn token(&self) -> String {
        self.tag.token(self.amount)
    }
}

/// Tags applied to one file, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<SelectedTag>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append without de-duplication; [`super::enforce::enforce`] resolves repeats
    pub fn push(&mut self, entry: SelectedTag) {
        self.entries.push(entry);
    }

    /// Insert or replace the entry for this tag, keeping its position
    pub fn upsert(&mut self, entry: SelectedTag) {
        match self.entries.iter_mut().find(|e| e.tag.id == entry.tag.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Drop every entry whose id is in `ids`
    pub fn remove_ids(&mut self, ids: &[String]) {
        self.entries.retain(|e| !ids.contains(&e.tag.id));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.tag.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&SelectedTag> {
        self.entries.iter().find(|e| e.tag.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectedTag> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(id, amount)` pairs sorted by id, for order-insensitive comparison
    pub fn pairs(&self) -> Vec<(String, Option<u32>)> {
        let mut pairs: Vec<_> = self
            .entries
            .iter()
            .map(|e| (e.tag.id.clone(), e.amount))
            .collect();
        pairs.sort();
        pairs
    }
}

impl FromIterator<SelectedTag> for Selection {
    fn from_iter<I: IntoIterator<Item = SelectedTag>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Selection {
    type Item = SelectedTag;
    type IntoIter = std::vec::IntoIter<SelectedTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a SelectedTag;
    type IntoIter = std::slice::Iter<'a, SelectedTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Resolve one token against the vocabulary
///
/// Definitions are tried in vocabulary order and the first hit wins, so a
/// ranged `energy` listed before `energyBoost` claims `energyBoost3`
/// whenever the remainder is all digits. Suffixes that overflow `u32` do
/// not match.
pub fn match_token(token: &str, vocabulary: &TagsFile) -> Option<SelectedTag> {
    vocabulary.iter().find_map(|def| {
        if def.has_amount() {
            let suffix = token.strip_prefix(def.name.as_str())?;
            if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let amount = suffix.parse::<u32>().ok()?;
            Some(SelectedTag {
                tag: def.clone(),
                amount: Some(amount),
            })
        } else if token == def.name {
            Some(SelectedTag {
                tag: def.clone(),
                amount: None,
            })
        } else {
            None
        }
    })
}

/// Render a selection as `;`-joined tokens (no trailing delimiter)
pub fn encode_selection(selection: &Selection) -> String {
    selection
        .iter()
        .map(SelectedTag::token)
        .collect::<Vec<_>>()
        .join(";")
}

/// Trimmed, non-empty tokens of a comment, in order
pub fn tokens(comment: &str) -> impl Iterator<Item = &str> {
    comment
        .split(DELIMITER)
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Decode the tokens the vocabulary recognizes; everything else is dropped
///
/// A tag seen twice keeps its first position and its last amount.
pub fn decode_comment(comment: &str, vocabulary: &TagsFile) -> Selection {
    let mut selection = Selection::new();
    for entry in tokens(comment).filter_map(|token| match_token(token, vocabulary)) {
        selection.upsert(entry);
    }
    selection
}

/// Strict variant of [`decode_comment`] for user-typed token lists
///
/// Accepts `;`, `,` or whitespace as separators and fails on the first
/// token the vocabulary does not know.
pub fn parse_token_list(input: &str, vocabulary: &TagsFile) -> Result<Selection> {
    input
        .split(|c: char| c == DELIMITER || c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|token| {
            match_token(token, vocabulary).ok_or_else(|| Error::UnknownToken(token.to_string()))
        })
        .collect()
}

/// True when the token is a vocabulary match or a bank sentinel
pub fn is_recognized(token: &str, vocabulary: &TagsFile) -> bool {
    token.starts_with(BANK_SENTINEL_PREFIX) || match_token(token, vocabulary).is_some()
}
