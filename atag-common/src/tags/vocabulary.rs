//! Persisted vocabulary document (`tags.<bank>.json`)
//!
//! Parsing is deliberately forgiving: a damaged or foreign file yields an
//! empty (or partial) vocabulary instead of an error, so the tagger keeps
//! working across format revisions.

use super::definition::{Classification, TagDefinition};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Current vocabulary schema version
pub const TAGS_SCHEMA_VERSION: u32 = 1;

/// An ordered vocabulary of tag definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsFile {
    pub version: u32,
    pub tags: Vec<TagDefinition>,
}

impl Default for TagsFile {
    fn default() -> Self {
        Self {
            version: TAGS_SCHEMA_VERSION,
            tags: Vec::new(),
        }
    }
}

impl TagsFile {
    pub fn new(tags: Vec<TagDefinition>) -> Self {
        Self {
            version: TAGS_SCHEMA_VERSION,
            tags,
        }
    }

    /// Parse a vocabulary document, never failing
    ///
    /// - invalid JSON or a non-object root: empty vocabulary
    /// - missing/malformed `version`: current schema version
    /// - missing/malformed `tags`: empty list
    /// - entries that fail to deserialize, or repeat an earlier id: skipped
    pub fn parse_lenient(json: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(json) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Vocabulary is not valid JSON, using empty vocabulary");
                return Self::default();
            }
        };

        let version = value
            .get("version")
            .and_then(|v| v.as_u64())
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(TAGS_SCHEMA_VERSION);

        let Some(entries) = value.get("tags").and_then(|t| t.as_array()) else {
            warn!("Vocabulary has no tags array, using empty vocabulary");
            return Self {
                version,
                tags: Vec::new(),
            };
        };

        let mut seen = HashSet::new();
        let mut tags = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match serde_json::from_value::<TagDefinition>(entry.clone()) {
                Ok(def) => {
                    if seen.insert(def.id.clone()) {
                        tags.push(def);
                    } else {
                        warn!(index, id = %def.id, "Skipping duplicate tag id in vocabulary");
                    }
                }
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed tag definition");
                }
            }
        }

        Self { version, tags }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn get(&self, id: &str) -> Option<&TagDefinition> {
        self.tags.iter().find(|t| t.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&TagDefinition> {
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagDefinition> {
        self.tags.iter()
    }

    pub fn with_classification(
        &self,
        classification: Classification,
    ) -> impl Iterator<Item = &TagDefinition> {
        self.tags
            .iter()
            .filter(move |t| t.classification == classification)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }
}
