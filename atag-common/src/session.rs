//! Tagging session: the active bank wired to comment and vocabulary stores
//!
//! Every edit runs read -> decode -> edit -> enforce -> main-tag gate ->
//! reconcile -> write. Checks run before the write, so a rejected edit
//! leaves the file untouched.

use crate::banks::BankStore;
use crate::tags::{
    bank_sentinel_of, check_removal, decode_comment, descendants, enforce, reconcile,
    require_main, requires_policy_choice, unknown_tokens, ReconcilePolicy, SelectedTag, Selection,
    TagDefinition, TagForm, TagStore, TagsFile,
};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Comment-field access for audio files
pub trait CommentStore {
    /// Comment text of the file; empty when it has none
    fn read_comment(&self, path: &Path) -> Result<String>;

    fn write_comment(&self, path: &Path, comment: &str) -> Result<()>;
}

/// Decoded view of one file's comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTags {
    pub path: PathBuf,
    /// Comment as stored after load (normalized if a write-back happened)
    pub comment: String,
    pub selection: Selection,
    pub unknown_tokens: Vec<String>,
    /// Bank named by the sentinel token, if any
    pub file_bank: Option<String>,
    /// True when load rewrote the comment
    pub normalized: bool,
}

/// One active bank with its in-memory vocabulary
pub struct TaggingSession<B: BankStore> {
    banks: B,
    bank: String,
    store: TagStore,
}

impl<B: BankStore> TaggingSession<B> {
    /// Load the bank's vocabulary (created empty if missing)
    pub fn open(banks: B, bank: &str) -> Result<Self> {
        let json = banks.read_vocabulary(bank)?;
        let store = TagStore::new(TagsFile::parse_lenient(&json));
        info!(bank, tags = store.list().len(), "Opened tag bank");
        Ok(Self {
            banks,
            bank: bank.to_string(),
            store,
        })
    }

    pub fn bank(&self) -> &str {
        &self.bank
    }

    pub fn vocabulary(&self) -> &TagsFile {
        self.store.vocabulary()
    }

    pub fn bank_store(&self) -> &B {
        &self.banks
    }

    /// Create or edit a definition and persist the vocabulary
    ///
    /// The in-memory vocabulary only changes once the write succeeded.
    pub fn upsert_tag(&mut self, form: TagForm) -> Result<TagDefinition> {
        let mut next = self.store.clone();
        let def = next.create_or_update(form)?;
        self.persist(next)?;
        Ok(def)
    }

    /// Delete a definition and persist the vocabulary
    pub fn delete_tag(&mut self, id: &str) -> Result<TagDefinition> {
        let mut next = self.store.clone();
        let removed = next.delete(id)?;
        self.persist(next)?;
        Ok(removed)
    }

    fn persist(&mut self, next: TagStore) -> Result<()> {
        let json = next.vocabulary().to_json_pretty()?;
        self.banks.write_vocabulary(&self.bank, &json)?;
        self.store = next;
        debug!(bank = %self.bank, "Persisted vocabulary");
        Ok(())
    }

    /// Decode an already-read comment without enforcing or writing anything
    pub fn inspect(&self, path: &Path, comment: &str) -> FileTags {
        let vocabulary = self.vocabulary();
        FileTags {
            path: path.to_path_buf(),
            comment: comment.to_string(),
            selection: decode_comment(comment, vocabulary),
            unknown_tokens: unknown_tokens(comment, vocabulary),
            file_bank: bank_sentinel_of(comment),
            normalized: false,
        }
    }

    /// Read and decode a file's tags, normalizing the comment when needed
    ///
    /// Write-back happens only for comments that belong to the active bank
    /// (matching sentinel, or no sentinel but recognized tokens), whose
    /// enforced selection passes the main-tag gate, and whose reconciled
    /// form differs from what is stored.
    pub fn load(&self, comments: &impl CommentStore, path: &Path) -> Result<FileTags> {
        let comment = comments.read_comment(path)?;
        let vocabulary = self.vocabulary();
        let file_bank = bank_sentinel_of(&comment);
        let decoded = decode_comment(&comment, vocabulary);
        let unknown = unknown_tokens(&comment, vocabulary);

        let belongs_here = match &file_bank {
            Some(bank) => bank == &self.bank,
            None => !decoded.is_empty(),
        };
        if !belongs_here {
            return Ok(FileTags {
                path: path.to_path_buf(),
                comment,
                selection: decoded,
                unknown_tokens: unknown,
                file_bank,
                normalized: false,
            });
        }

        let selection = enforce(&decoded, vocabulary)?;
        let normalized_comment = reconcile(
            &selection,
            &comment,
            vocabulary,
            &self.bank,
            ReconcilePolicy::KeepUnknowns,
        );
        let should_write =
            normalized_comment != comment && require_main(&selection, vocabulary).is_ok();

        let comment = if should_write {
            comments.write_comment(path, &normalized_comment)?;
            info!(
                path = %path.display(),
                before = %comment,
                after = %normalized_comment,
                "Normalized comment"
            );
            normalized_comment
        } else {
            comment
        };

        Ok(FileTags {
            path: path.to_path_buf(),
            comment,
            selection,
            unknown_tokens: unknown,
            file_bank: if should_write {
                Some(self.bank.clone())
            } else {
                file_bank
            },
            normalized: should_write,
        })
    }

    /// Add a tag (or change its amount) and write the result
    pub fn add_tag(
        &self,
        comments: &impl CommentStore,
        path: &Path,
        id: &str,
        amount: Option<u32>,
        policy: Option<ReconcilePolicy>,
    ) -> Result<String> {
        let def = self
            .vocabulary()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::TagNotFound(id.to_string()))?;
        self.edit(comments, path, policy, |selection| {
            selection.upsert(SelectedTag::new(def, amount));
            Ok(())
        })
    }

    /// Remove a tag and any selected descendants, then write the result
    pub fn remove_tag(
        &self,
        comments: &impl CommentStore,
        path: &Path,
        id: &str,
        policy: Option<ReconcilePolicy>,
    ) -> Result<String> {
        let vocabulary = self.vocabulary();
        if !vocabulary.contains_id(id) {
            return Err(Error::TagNotFound(id.to_string()));
        }
        check_removal(id, vocabulary)?;

        let mut doomed = descendants(id, vocabulary);
        for child in &doomed {
            check_removal(child, vocabulary)?;
        }
        doomed.push(id.to_string());

        self.edit(comments, path, policy, |selection| {
            selection.remove_ids(&doomed);
            Ok(())
        })
    }

    /// Replace the file's whole selection and write the result
    pub fn set_tags(
        &self,
        comments: &impl CommentStore,
        path: &Path,
        selection: Selection,
        policy: Option<ReconcilePolicy>,
    ) -> Result<String> {
        self.edit(comments, path, policy, move |current| {
            *current = selection;
            Ok(())
        })
    }

    fn edit<F>(
        &self,
        comments: &impl CommentStore,
        path: &Path,
        policy: Option<ReconcilePolicy>,
        apply: F,
    ) -> Result<String>
    where
        F: FnOnce(&mut Selection) -> Result<()>,
    {
        let comment = comments.read_comment(path)?;
        let policy = match policy {
            Some(policy) => policy,
            None if requires_policy_choice(&comment, &self.bank) => {
                return Err(Error::PolicyRequired {
                    file_bank: bank_sentinel_of(&comment).unwrap_or_default(),
                });
            }
            None => ReconcilePolicy::KeepUnknowns,
        };

        let vocabulary = self.vocabulary();
        let mut selection = decode_comment(&comment, vocabulary);
        apply(&mut selection)?;
        let selection = enforce(&selection, vocabulary)?;
        require_main(&selection, vocabulary)?;

        let updated = reconcile(&selection, &comment, vocabulary, &self.bank, policy);
        if updated != comment {
            comments.write_comment(path, &updated)?;
            info!(
                path = %path.display(),
                bank = %self.bank,
                comment = %updated,
                "Wrote tags"
            );
        } else {
            debug!(path = %path.display(), "Comment unchanged, skipping write");
        }
        Ok(updated)
    }
}
