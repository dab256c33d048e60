//! Tag definition store: add, edit and delete vocabulary entries

use super::definition::{slugify, validate_name, AmountRange, Classification, TagDefinition};
use super::vocabulary::TagsFile;
use crate::{Error, Result};
use tracing::debug;

/// Input for creating or editing a definition
///
/// `id = None` creates a new definition; `id = Some(..)` edits that one.
#[derive(Debug, Clone, Default)]
pub struct TagForm {
    pub id: Option<String>,
    pub name: String,
    pub classification: Classification,
    pub parent: Option<String>,
    pub amount_range: Option<(u32, u32)>,
}

/// Mutable vocabulary held in memory
///
/// Persistence is the caller's job (see [`crate::session::TaggingSession`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagStore {
    file: TagsFile,
}

impl TagStore {
    pub fn new(file: TagsFile) -> Self {
        Self { file }
    }

    pub fn vocabulary(&self) -> &TagsFile {
        &self.file
    }

    pub fn into_vocabulary(self) -> TagsFile {
        self.file
    }

    /// Definitions in insertion order
    pub fn list(&self) -> &[TagDefinition] {
        &self.file.tags
    }

    pub fn get(&self, id: &str) -> Option<&TagDefinition> {
        self.file.get(id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&TagDefinition> {
        self.file.find_by_name(name)
    }

    /// Validate the form, then create or edit a definition
    ///
    /// Editing keeps the original id and position, even when the name changes.
    /// Nothing is modified when validation fails.
    pub fn create_or_update(&mut self, form: TagForm) -> Result<TagDefinition> {
        validate_name(&form.name)?;
        let amount_range = form
            .amount_range
            .map(|(min, max)| AmountRange::new(min, max))
            .transpose()?;

        match form.id {
            Some(id) => {
                let existing = self
                    .file
                    .tags
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or_else(|| Error::TagNotFound(id.clone()))?;
                existing.name = form.name;
                existing.classification = form.classification;
                existing.parent = form.parent;
                existing.amount_range = amount_range;
                debug!(id = %existing.id, name = %existing.name, "Updated tag definition");
                Ok(existing.clone())
            }
            None => {
                let def = TagDefinition {
                    id: self.unique_id(&form.name),
                    name: form.name,
                    classification: form.classification,
                    parent: form.parent,
                    amount_range,
                };
                debug!(id = %def.id, name = %def.name, "Created tag definition");
                self.file.tags.push(def.clone());
                Ok(def)
            }
        }
    }

    /// Remove a definition; children keep their now-dangling parent reference
    pub fn delete(&mut self, id: &str) -> Result<TagDefinition> {
        let index = self
            .file
            .tags
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::TagNotFound(id.to_string()))?;
        let removed = self.file.tags.remove(index);
        debug!(id = %removed.id, "Deleted tag definition");
        Ok(removed)
    }

    fn unique_id(&self, name: &str) -> String {
        let mut base = slugify(name);
        if base.is_empty() {
            base = "tag".to_string();
        }
        if !self.file.contains_id(&base) {
            return base;
        }
        (2..)
            .map(|n| format!("{}_{}", base, n))
            .find(|candidate| !self.file.contains_id(candidate))
            .unwrap_or(base)
    }
}
