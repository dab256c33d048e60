//! End-to-end command tests: App + commands over generated WAV files

mod helpers;

use atag_cli::cli::{BankCommand, Command, PolicyArgs, TagCommand, TagFields};
use atag_cli::commands::{self, App};
use atag_cli::services::LoftyCommentStore;
use atag_cli::CliError;
use atag_common::config::{RootFolderInitializer, TomlConfig};
use atag_common::tags::Classification;
use atag_common::{CommentStore, Error};
use helpers::{write_tone_library, rock_vocabulary, seed_bank};
use std::path::PathBuf;
use tempfile::TempDir;

struct Fixture {
    _root: TempDir,
    _music: TempDir,
    app: App,
    files: Vec<PathBuf>,
}

fn fixture() -> Fixture {
    let root = TempDir::new().unwrap();
    let music = TempDir::new().unwrap();
    seed_bank(root.path(), "rock", &rock_vocabulary());
    let files = write_tone_library(music.path(), &["one.wav", "two.wav"]).unwrap();

    let initializer = RootFolderInitializer::new(root.path().to_path_buf());
    initializer.ensure_directory_exists().unwrap();
    let app = App::new(
        initializer,
        TomlConfig::default(),
        Some(root.path().join("config.toml")),
        Some("rock".to_string()),
    );

    Fixture {
        _root: root,
        _music: music,
        app,
        files,
    }
}

fn comment(path: &PathBuf) -> String {
    LoftyCommentStore::new().read_comment(path).unwrap()
}

#[test]
fn test_add_tags_every_file() {
    let mut fx = fixture();

    commands::run(
        &mut fx.app,
        Command::Add {
            tag: "lead".to_string(),
            files: fx.files.clone(),
            amount: None,
            policy: PolicyArgs::default(),
        },
    )
    .unwrap();

    for file in &fx.files {
        assert_eq!(comment(file), "lead;vocal;reviewed;BankTag:rock;");
    }
}

#[test]
fn test_add_ranged_tag_by_amount_then_remove() {
    let mut fx = fixture();
    let file = fx.files[0].clone();

    commands::run(
        &mut fx.app,
        Command::Set {
            file: file.clone(),
            tokens: vec!["instrumental".to_string(), "energy3".to_string()],
            policy: PolicyArgs::default(),
        },
    )
    .unwrap();
    assert_eq!(comment(&file), "instrumental;energy3;reviewed;BankTag:rock;");

    commands::run(
        &mut fx.app,
        Command::Add {
            tag: "energy".to_string(),
            files: vec![file.clone()],
            amount: Some(8),
            policy: PolicyArgs::default(),
        },
    )
    .unwrap();
    assert_eq!(comment(&file), "instrumental;energy8;reviewed;BankTag:rock;");

    commands::run(
        &mut fx.app,
        Command::Remove {
            tag: "energy".to_string(),
            files: vec![file.clone()],
            policy: PolicyArgs::default(),
        },
    )
    .unwrap();
    assert_eq!(comment(&file), "instrumental;reviewed;BankTag:rock;");
}

#[test]
fn test_batch_failure_does_not_stop_other_files() {
    let mut fx = fixture();
    let mut files = vec![fx.files[0].parent().unwrap().join("missing.wav")];
    files.extend(fx.files.iter().cloned());

    let result = commands::run(
        &mut fx.app,
        Command::Add {
            tag: "instrumental".to_string(),
            files,
            amount: None,
            policy: PolicyArgs::default(),
        },
    );

    assert!(matches!(result, Err(CliError::Batch { failed: 1, total: 3 })));
    for file in &fx.files {
        assert_eq!(comment(file), "instrumental;reviewed;BankTag:rock;");
    }
}

#[test]
fn test_missing_main_tag_leaves_file_untouched() {
    let mut fx = fixture();
    let file = fx.files[0].clone();

    let result = commands::run(
        &mut fx.app,
        Command::Add {
            tag: "vocal".to_string(),
            files: vec![file.clone()],
            amount: None,
            policy: PolicyArgs::default(),
        },
    );

    assert!(result.is_err());
    assert_eq!(comment(&file), "");
}

#[test]
fn test_foreign_bank_with_discard_flag() {
    let mut fx = fixture();
    let file = fx.files[0].clone();
    LoftyCommentStore::new()
        .write_comment(&file, "BankTag:jazz;mood;")
        .unwrap();

    commands::run(
        &mut fx.app,
        Command::Add {
            tag: "instrumental".to_string(),
            files: vec![file.clone()],
            amount: None,
            policy: PolicyArgs {
                keep_unknowns: false,
                discard_unknowns: true,
            },
        },
    )
    .unwrap();

    assert_eq!(comment(&file), "instrumental;reviewed;BankTag:rock;");
}

#[test]
fn test_unknown_tag_name_is_reported() {
    let mut fx = fixture();

    let result = commands::run(
        &mut fx.app,
        Command::Add {
            tag: "cowbell".to_string(),
            files: fx.files.clone(),
            amount: None,
            policy: PolicyArgs::default(),
        },
    );

    assert!(matches!(
        result,
        Err(CliError::Common(Error::TagNotFound(name))) if name == "cowbell"
    ));
}

#[test]
fn test_tag_definitions_persist_across_sessions() {
    let mut fx = fixture();

    commands::run(
        &mut fx.app,
        Command::Tag(TagCommand::Add {
            name: "Chorus".to_string(),
            fields: TagFields {
                classification: Some(Classification::Optional),
                parent: Some("vocal".to_string()),
                min: None,
                max: None,
            },
        }),
    )
    .unwrap();

    let session = fx.app.open_session().unwrap();
    let chorus = session.vocabulary().get("chorus").unwrap();
    assert_eq!(chorus.name, "Chorus");
    assert_eq!(chorus.parent.as_deref(), Some("vocal"));
}

#[test]
fn test_show_normalizes_own_bank_comment() {
    let mut fx = fixture();
    let file = fx.files[0].clone();
    LoftyCommentStore::new()
        .write_comment(&file, "lead;BankTag:rock;")
        .unwrap();

    commands::run(
        &mut fx.app,
        Command::Show {
            file: file.clone(),
            json: true,
        },
    )
    .unwrap();

    assert_eq!(comment(&file), "lead;vocal;reviewed;BankTag:rock;");
}

#[test]
fn test_scan_does_not_write() {
    let mut fx = fixture();
    let file = fx.files[0].clone();
    LoftyCommentStore::new()
        .write_comment(&file, "lead;BankTag:rock;")
        .unwrap();

    commands::run(
        &mut fx.app,
        Command::Scan {
            dir: file.parent().unwrap().to_path_buf(),
            recursive: false,
            json: true,
        },
    )
    .unwrap();

    assert_eq!(comment(&file), "lead;BankTag:rock;");
}

#[test]
fn test_bank_use_switches_remembered_bank() {
    let mut fx = fixture();
    fx.app.bank_override = None;

    commands::run(
        &mut fx.app,
        Command::Bank(BankCommand::Use {
            name: "rock".to_string(),
        }),
    )
    .unwrap();

    assert_eq!(fx.app.active_bank(), "rock");
    assert!(fx.app.open_session().unwrap().vocabulary().contains_id("lead"));
}
