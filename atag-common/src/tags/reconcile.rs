//! Unknown-token and multi-bank reconciliation
//!
//! A comment may carry tokens from a vocabulary other than the active one,
//! plus a `BankTag:<name>` sentinel recording which bank wrote it last.

use super::codec::{encode_selection, is_recognized, tokens, Selection, DELIMITER};
use super::vocabulary::TagsFile;

/// Literal prefix of the bank sentinel token
pub const BANK_SENTINEL_PREFIX: &str = "BankTag:";

/// What to do with tokens the active vocabulary does not recognize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePolicy {
    KeepUnknowns,
    DiscardUnknowns,
}

/// Trimmed, non-empty tokens of a comment
pub fn split_tokens(comment: &str) -> Vec<String> {
    tokens(comment).map(str::to_string).collect()
}

pub fn sentinel_token(bank: &str) -> String {
    format!("{}{}", BANK_SENTINEL_PREFIX, bank)
}

fn is_sentinel(token: &str) -> bool {
    token.starts_with(BANK_SENTINEL_PREFIX)
}

/// Bank name from the first sentinel token, if any
pub fn bank_sentinel_of(comment: &str) -> Option<String> {
    tokens(comment)
        .find_map(|t| t.strip_prefix(BANK_SENTINEL_PREFIX))
        .map(str::to_string)
}

/// Tokens the vocabulary does not recognize, in comment order
pub fn unknown_tokens(comment: &str, vocabulary: &TagsFile) -> Vec<String> {
    tokens(comment)
        .filter(|t| !is_recognized(t, vocabulary))
        .map(str::to_string)
        .collect()
}

/// Whether the user has to pick a [`ReconcilePolicy`] before editing
///
/// True when the comment was written under a different bank and holds at
/// least one token besides the sentinel. Discarding is destructive, so the
/// engine never makes this choice itself.
pub fn requires_policy_choice(comment: &str, active_bank: &str) -> bool {
    match bank_sentinel_of(comment) {
        Some(bank) if bank != active_bank => tokens(comment).any(|t| !is_sentinel(t)),
        _ => false,
    }
}

/// Build the comment to write for `new_selection`
///
/// Encodes the selection, appends the unknown tokens of the pre-edit
/// `comment` when keeping them, replaces any sentinel with one for
/// `active_bank`, and ends with a delimiter.
pub fn reconcile(
    new_selection: &Selection,
    comment: &str,
    vocabulary: &TagsFile,
    active_bank: &str,
    policy: ReconcilePolicy,
) -> String {
    let encoded = encode_selection(new_selection);
    let mut parts: Vec<String> = tokens(&encoded).map(str::to_string).collect();

    if policy == ReconcilePolicy::KeepUnknowns {
        parts.extend(unknown_tokens(comment, vocabulary));
    }

    parts.retain(|t| !is_sentinel(t));
    parts.push(sentinel_token(active_bank));

    let mut out = parts.join(";");
    out.push(DELIMITER);
    out
}
