//! Tag definitions: the entries of a vocabulary

use super::reconcile::BANK_SENTINEL_PREFIX;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// How a tag participates in enforcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// At least one main tag must be present when the vocabulary has any
    Main,
    /// Always present on every tagged file
    Mandatory,
    /// No enforcement
    #[default]
    Optional,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Main => "main",
            Classification::Mandatory => "mandatory",
            Classification::Optional => "optional",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Classification {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" => Ok(Classification::Main),
            "mandatory" => Ok(Classification::Mandatory),
            "optional" => Ok(Classification::Optional),
            other => Err(Error::Config(format!("Unknown classification: {}", other))),
        }
    }
}

/// Inclusive bound on a tag's amount
///
/// Advisory for input surfaces only; encoding never checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: u32,
    pub max: u32,
}

impl AmountRange {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidAmountRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, amount: u32) -> bool {
        (self.min..=self.max).contains(&amount)
    }
}

/// One named, classified entry in a vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDefinition {
    /// Slug fixed at creation time
    pub id: String,

    /// Token prefix written into comments
    pub name: String,

    #[serde(default)]
    pub classification: Classification,

    /// Id of the parent definition, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_range: Option<AmountRange>,
}

impl TagDefinition {
    pub fn has_amount(&self) -> bool {
        self.amount_range.is_some()
    }

    /// Amount used when the engine adds this tag on its own (parents, mandatory tags)
    pub fn implied_amount(&self) -> Option<u32> {
        self.amount_range.map(|_| 0)
    }

    /// Token for this tag with the given amount
    pub fn token(&self, amount: Option<u32>) -> String {
        if self.has_amount() {
            format!("{}{}", self.name, amount.unwrap_or(0))
        } else {
            self.name.clone()
        }
    }
}

/// Check a display name against the token grammar
///
/// Names starting with the bank sentinel prefix are refused, since their
/// tokens would be read back as a sentinel.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name.contains(char::is_whitespace)
        || name.contains(';')
        || name.starts_with(BANK_SENTINEL_PREFIX)
    {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Derive a stable id from a display name
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into
/// one `_`, and trims `_` from both ends.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(ch);
        } else {
            pending_sep = true;
        }
    }
    out
}
