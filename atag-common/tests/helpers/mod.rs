//! Test Helper Utilities
//!
//! In-memory comment and vocabulary stores plus vocabulary builders

#![allow(dead_code)]

use atag_common::banks::{BankStore, DEFAULT_BANK};
use atag_common::tags::{AmountRange, Classification, TagDefinition, TagsFile};
use atag_common::{CommentStore, Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Comment store backed by a map; counts writes and can be told to fail
#[derive(Clone, Default)]
pub struct MemoryCommentStore {
    comments: Arc<Mutex<HashMap<PathBuf, String>>>,
    writes: Arc<Mutex<usize>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, comment: &str) -> Self {
        self.comments
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), comment.to_string());
        self
    }

    pub fn comment(&self, path: &str) -> String {
        self.comments
            .lock()
            .unwrap()
            .get(Path::new(path))
            .cloned()
            .unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }
}

impl CommentStore for MemoryCommentStore {
    fn read_comment(&self, path: &Path) -> Result<String> {
        self.comments
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::Store(format!("No such file: {}", path.display())))
    }

    fn write_comment(&self, path: &Path, comment: &str) -> Result<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(Error::Store("disk full".to_string()));
        }
        *self.writes.lock().unwrap() += 1;
        self.comments
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), comment.to_string());
        Ok(())
    }
}

/// Bank store backed by a map of bank name to JSON
#[derive(Clone, Default)]
pub struct MemoryBankStore {
    banks: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MemoryBankStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bank(self, bank: &str, vocabulary: &TagsFile) -> Self {
        self.banks
            .lock()
            .unwrap()
            .insert(bank.to_string(), vocabulary.to_json_pretty().unwrap());
        self
    }

    pub fn raw(&self, bank: &str) -> Option<String> {
        self.banks.lock().unwrap().get(bank).cloned()
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }
}

impl BankStore for MemoryBankStore {
    fn read_vocabulary(&self, bank: &str) -> Result<String> {
        let mut banks = self.banks.lock().unwrap();
        let json = banks
            .entry(bank.to_string())
            .or_insert_with(|| TagsFile::default().to_json_pretty().unwrap());
        Ok(json.clone())
    }

    fn write_vocabulary(&self, bank: &str, json: &str) -> Result<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(Error::Store("read-only bank".to_string()));
        }
        self.banks
            .lock()
            .unwrap()
            .insert(bank.to_string(), json.to_string());
        Ok(())
    }

    fn list_banks(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.banks.lock().unwrap().keys().cloned().collect();
        if !names.iter().any(|n| n == DEFAULT_BANK) {
            names.push(DEFAULT_BANK.to_string());
        }
        names.sort();
        Ok(names)
    }
}

pub fn plain(name: &str, classification: Classification, parent: Option<&str>) -> TagDefinition {
    TagDefinition {
        id: name.to_lowercase(),
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

/// Vocabulary used by most session tests:
/// - `lead` (main, parent `vocal`), `instrumental` (main)
/// - `vocal` (optional) and ranged `energy`
/// - `reviewed` (mandatory)
pub fn rock_vocabulary() -> TagsFile {
    TagsFile::new(vec![
        plain("vocal", Classification::Optional, None),
        plain("lead", Classification::Main, Some("vocal")),
        plain("instrumental", Classification::Main, None),
        ranged("energy", 0, 10),
        plain("reviewed", Classification::Mandatory, None),
    ])
}
