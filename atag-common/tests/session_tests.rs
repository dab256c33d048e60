//! Tagging session tests
//!
//! Exercises the full read -> decode -> enforce -> reconcile -> write path
//! against in-memory stores.

mod helpers;

use atag_common::tags::{parse_token_list, ReconcilePolicy, TagForm};
use atag_common::{Error, TaggingSession};
use helpers::{rock_vocabulary, MemoryBankStore, MemoryCommentStore};
use std::path::Path;

const TRACK: &str = "/music/track.mp3";

fn rock_session() -> TaggingSession<MemoryBankStore> {
    let banks = MemoryBankStore::new().with_bank("rock", &rock_vocabulary());
    TaggingSession::open(banks, "rock").unwrap()
}

fn track() -> &'static Path {
    Path::new(TRACK)
}

#[test]
fn test_add_main_tag_to_untagged_file() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "");

    let written = session.add_tag(&comments, track(), "lead", None, None).unwrap();

    assert_eq!(written, "lead;vocal;reviewed;BankTag:rock;");
    assert_eq!(comments.comment(TRACK), written);
    assert_eq!(comments.write_count(), 1);
}

#[test]
fn test_add_ranged_tag_and_change_amount() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "lead;vocal;reviewed;BankTag:rock;");

    session.add_tag(&comments, track(), "energy", Some(5), None).unwrap();
    assert_eq!(comments.comment(TRACK), "lead;vocal;reviewed;energy5;BankTag:rock;");

    session.add_tag(&comments, track(), "energy", Some(9), None).unwrap();
    assert_eq!(comments.comment(TRACK), "lead;vocal;reviewed;energy9;BankTag:rock;");
}

#[test]
fn test_add_without_main_is_rejected_and_nothing_written() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "");

    let err = session.add_tag(&comments, track(), "vocal", None, None).unwrap_err();

    assert!(matches!(err, Error::MissingMainTag));
    assert_eq!(comments.comment(TRACK), "");
    assert_eq!(comments.write_count(), 0);
}

#[test]
fn test_add_unknown_tag_id() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "");

    let err = session.add_tag(&comments, track(), "cowbell", None, None).unwrap_err();
    assert!(matches!(err, Error::TagNotFound(id) if id == "cowbell"));
}

#[test]
fn test_remove_mandatory_tag_rejected() {
    let session = rock_session();
    let comments =
        MemoryCommentStore::new().with_file(TRACK, "instrumental;reviewed;BankTag:rock;");

    let err = session.remove_tag(&comments, track(), "reviewed", None).unwrap_err();

    assert!(matches!(err, Error::MandatoryTagRemovalRejected(_)));
    assert_eq!(comments.write_count(), 0);
}

#[test]
fn test_remove_parent_drops_selected_children() {
    let session = rock_session();
    let comments = MemoryCommentStore::new()
        .with_file(TRACK, "lead;vocal;instrumental;reviewed;BankTag:rock;");

    let written = session.remove_tag(&comments, track(), "vocal", None).unwrap();

    assert_eq!(written, "instrumental;reviewed;BankTag:rock;");
}

#[test]
fn test_remove_last_main_tag_rejected() {
    let session = rock_session();
    let original = "lead;vocal;reviewed;BankTag:rock;";
    let comments = MemoryCommentStore::new().with_file(TRACK, original);

    let err = session.remove_tag(&comments, track(), "lead", None).unwrap_err();

    assert!(matches!(err, Error::MissingMainTag));
    assert_eq!(comments.comment(TRACK), original);
}

#[test]
fn test_foreign_bank_requires_policy() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "BankTag:jazz;mood;");

    let err = session
        .add_tag(&comments, track(), "instrumental", None, None)
        .unwrap_err();

    assert!(matches!(err, Error::PolicyRequired { file_bank } if file_bank == "jazz"));
    assert_eq!(comments.write_count(), 0);
}

#[test]
fn test_foreign_bank_discard_unknowns() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "BankTag:jazz;mood;");

    let written = session
        .add_tag(
            &comments,
            track(),
            "instrumental",
            None,
            Some(ReconcilePolicy::DiscardUnknowns),
        )
        .unwrap();

    assert_eq!(written, "instrumental;reviewed;BankTag:rock;");
    assert!(!written.contains("mood"));
}

#[test]
fn test_foreign_bank_keep_unknowns() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "BankTag:jazz;mood;");

    let written = session
        .add_tag(
            &comments,
            track(),
            "instrumental",
            None,
            Some(ReconcilePolicy::KeepUnknowns),
        )
        .unwrap();

    assert_eq!(written, "instrumental;reviewed;mood;BankTag:rock;");
}

#[test]
fn test_same_bank_keeps_unknowns_without_asking() {
    let session = rock_session();
    let comments =
        MemoryCommentStore::new().with_file(TRACK, "lead;vocal;reviewed;groove;BankTag:rock;");

    let written = session
        .add_tag(&comments, track(), "energy", Some(3), None)
        .unwrap();

    assert_eq!(written, "lead;vocal;reviewed;energy3;groove;BankTag:rock;");
}

#[test]
fn test_set_tags_replaces_selection() {
    let session = rock_session();
    let comments =
        MemoryCommentStore::new().with_file(TRACK, "instrumental;reviewed;BankTag:rock;");

    let selection = parse_token_list("lead energy7", session.vocabulary()).unwrap();
    let written = session.set_tags(&comments, track(), selection, None).unwrap();

    assert_eq!(written, "lead;energy7;vocal;reviewed;BankTag:rock;");
}

#[test]
fn test_unchanged_comment_is_not_rewritten() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "lead;vocal;reviewed;BankTag:rock;");

    session.add_tag(&comments, track(), "lead", None, None).unwrap();

    assert_eq!(comments.write_count(), 0);
}

#[test]
fn test_failed_write_leaves_comment_untouched() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "");
    comments.fail_writes(true);

    let err = session.add_tag(&comments, track(), "lead", None, None).unwrap_err();

    assert!(matches!(err, Error::Store(_)));
    assert_eq!(comments.comment(TRACK), "");
}

#[test]
fn test_load_normalizes_own_bank_comment() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "lead;BankTag:rock;");

    let tags = session.load(&comments, track()).unwrap();

    assert!(tags.normalized);
    assert_eq!(tags.comment, "lead;vocal;reviewed;BankTag:rock;");
    assert_eq!(comments.comment(TRACK), tags.comment);
    assert_eq!(tags.selection.len(), 3);
    assert_eq!(tags.file_bank.as_deref(), Some("rock"));
}

#[test]
fn test_load_adopts_legacy_comment_with_known_tokens() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "instrumental;x");

    let tags = session.load(&comments, track()).unwrap();

    assert!(tags.normalized);
    assert_eq!(tags.comment, "instrumental;reviewed;x;BankTag:rock;");
    assert_eq!(tags.unknown_tokens, vec!["x"]);
}

#[test]
fn test_load_leaves_foreign_bank_alone() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "BankTag:jazz;mood;");

    let tags = session.load(&comments, track()).unwrap();

    assert!(!tags.normalized);
    assert_eq!(tags.file_bank.as_deref(), Some("jazz"));
    assert_eq!(tags.unknown_tokens, vec!["mood"]);
    assert!(tags.selection.is_empty());
    assert_eq!(comments.write_count(), 0);
}

#[test]
fn test_load_does_not_touch_unrelated_comments() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "Ripped by someone");

    let tags = session.load(&comments, track()).unwrap();

    assert!(!tags.normalized);
    assert_eq!(tags.comment, "Ripped by someone");
    assert_eq!(comments.write_count(), 0);
}

#[test]
fn test_load_skips_write_back_without_main_tag() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "vocal;BankTag:rock;");

    let tags = session.load(&comments, track()).unwrap();

    assert!(!tags.normalized);
    assert_eq!(comments.write_count(), 0);
    // Enforced view still shows what the file would need
    assert!(tags.selection.contains("reviewed"));
}

#[test]
fn test_load_of_normalized_comment_does_not_write() {
    let session = rock_session();
    let comments = MemoryCommentStore::new().with_file(TRACK, "lead;vocal;reviewed;BankTag:rock;");

    let tags = session.load(&comments, track()).unwrap();

    assert!(!tags.normalized);
    assert_eq!(comments.write_count(), 0);
}

#[test]
fn test_upsert_tag_persists_vocabulary() {
    let banks = MemoryBankStore::new().with_bank("rock", &rock_vocabulary());
    let mut session = TaggingSession::open(banks.clone(), "rock").unwrap();

    let def = session
        .upsert_tag(TagForm {
            name: "Chorus".to_string(),
            parent: Some("vocal".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(def.id, "chorus");
    assert!(session.vocabulary().contains_id("chorus"));
    assert!(banks.raw("rock").unwrap().contains("\"chorus\""));
}

#[test]
fn test_failed_vocabulary_write_keeps_memory_unchanged() {
    let banks = MemoryBankStore::new().with_bank("rock", &rock_vocabulary());
    let mut session = TaggingSession::open(banks.clone(), "rock").unwrap();
    banks.fail_writes(true);

    assert!(session.delete_tag("vocal").is_err());
    assert!(session.vocabulary().contains_id("vocal"));

    let err = session
        .upsert_tag(TagForm {
            name: "bad name".to_string(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, Error::InvalidName(_)));
}

#[test]
fn test_rename_orphans_existing_tokens() {
    let banks = MemoryBankStore::new().with_bank("rock", &rock_vocabulary());
    let mut session = TaggingSession::open(banks, "rock").unwrap();
    let comments = MemoryCommentStore::new().with_file(TRACK, "lead;vocal;reviewed;BankTag:rock;");

    session
        .upsert_tag(TagForm {
            id: Some("vocal".to_string()),
            name: "voice".to_string(),
            ..Default::default()
        })
        .unwrap();

    let tags = session.load(&comments, track()).unwrap();

    assert_eq!(tags.unknown_tokens, vec!["vocal"]);
    assert_eq!(tags.comment, "lead;reviewed;voice;vocal;BankTag:rock;");
}

#[test]
fn test_open_missing_bank_starts_empty() {
    let banks = MemoryBankStore::new();
    let session = TaggingSession::open(banks.clone(), "fresh").unwrap();

    assert!(session.vocabulary().is_empty());
    assert_eq!(session.bank(), "fresh");
    assert!(banks.raw("fresh").is_some());
}
