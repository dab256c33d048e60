//! Test helper utilities for atag-cli

#![allow(dead_code)]

pub mod audio_generator;

pub use audio_generator::{write_tone_library, write_tone_wav};

use atag_common::banks::{BankStore, FsBankStore};
use atag_common::tags::{AmountRange, Classification, TagDefinition, TagsFile};
use std::path::Path;

pub fn plain(name: &str, classification: Classification, parent: Option<&str>) -> TagDefinition {
    TagDefinition {
        id: name.to_string(),
        name: name.to_string(),
        classification,
        parent: parent.map(str::to_string),
        amount_range: None,
    }
}

pub fn ranged(name: &str, min: u32, max: u32) -> TagDefinition {
    TagDefinition {
        amount_range: Some(AmountRange { min, max }),
        ..plain(name, Classification::Optional, None)
    }
}

/// vocal (optional) > lead (main), instrumental (main), energy 0..=10, reviewed (mandatory)
pub fn rock_vocabulary() -> TagsFile {
    TagsFile::new(vec![
        plain("vocal", Classification::Optional, None),
        plain("lead", Classification::Main, Some("vocal")),
        plain("instrumental", Classification::Main, None),
        ranged("energy", 0, 10),
        plain("reviewed", Classification::Mandatory, None),
    ])
}

/// Write `vocabulary` as bank `bank` under `root/banks`
pub fn seed_bank(root: &Path, bank: &str, vocabulary: &TagsFile) {
    FsBankStore::new(root.join("Banks"))
        .write_vocabulary(bank, &vocabulary.to_json_pretty().unwrap())
        .unwrap();
}
