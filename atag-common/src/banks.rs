//! Vocabulary banks: independently persisted, named vocabularies
//!
//! One JSON file per bank, `tags.<name>.json`, inside the banks folder.

use crate::tags::TagsFile;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Bank used when nothing else is configured
pub const DEFAULT_BANK: &str = "default";

/// Persistence for vocabularies, keyed by bank name
pub trait BankStore {
    /// Raw JSON of the bank's vocabulary
    fn read_vocabulary(&self, bank: &str) -> Result<String>;

    fn write_vocabulary(&self, bank: &str, json: &str) -> Result<()>;

    /// Known bank names, sorted
    fn list_banks(&self) -> Result<Vec<String>>;
}

/// Normalize a user-supplied bank name into a file-safe one
///
/// Lowercases, turns whitespace into `-`, keeps ASCII alphanumerics, `-`
/// and `_`, drops everything else, and trims `-` from both ends. An empty
/// result becomes [`DEFAULT_BANK`].
pub fn sanitize_bank(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            out.push(ch);
        } else if ch.is_whitespace() {
            out.push('-');
        }
    }
    let out = out.trim_matches('-');
    if out.is_empty() {
        DEFAULT_BANK.to_string()
    } else {
        out.to_string()
    }
}

/// Bank store backed by a directory of JSON files
#[derive(Debug, Clone)]
pub struct FsBankStore {
    dir: PathBuf,
}

impl FsBankStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn bank_path(&self, bank: &str) -> PathBuf {
        self.dir.join(format!("tags.{}.json", sanitize_bank(bank)))
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            Error::Store(format!(
                "Failed to create banks folder {}: {}",
                self.dir.display(),
                e
            ))
        })
    }
}

impl BankStore for FsBankStore {
    /// Reads the bank file, creating it with an empty vocabulary when missing
    fn read_vocabulary(&self, bank: &str) -> Result<String> {
        let path = self.bank_path(bank);
        match fs::read_to_string(&path) {
            Ok(json) => {
                debug!(bank, path = %path.display(), "Read vocabulary");
                Ok(json)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = TagsFile::default().to_json_pretty()?;
                self.ensure_dir()?;
                fs::write(&path, &empty)?;
                info!(bank, path = %path.display(), "Created empty vocabulary");
                Ok(empty)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_vocabulary(&self, bank: &str, json: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.bank_path(bank);
        fs::write(&path, json)?;
        debug!(bank, path = %path.display(), bytes = json.len(), "Wrote vocabulary");
        Ok(())
    }

    /// Stems of `tags.*.json` files; `default` is always listed
    fn list_banks(&self) -> Result<Vec<String>> {
        let mut banks = Vec::new();
        if let Ok(entries) = fs::read_dir(&self.dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                let stem = path.file_stem().and_then(|s| s.to_str());
                let ext = path.extension().and_then(|e| e.to_str());
                if let (Some(stem), Some("json")) = (stem, ext) {
                    if let Some(name) = stem.strip_prefix("tags.") {
                        banks.push(name.to_string());
                    }
                }
            }
        }
        if !banks.iter().any(|b| b == DEFAULT_BANK) {
            banks.push(DEFAULT_BANK.to_string());
        }
        banks.sort();
        Ok(banks)
    }
}
