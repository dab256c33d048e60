//! User preferences: last used bank and display settings (`prefs.json`)
//!
//! The file is shared with the desktop app, so keys this crate does not
//! model are carried through a load and save unchanged.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Which metadata columns listings show, plus the playback toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub show_title: bool,
    pub show_authors: bool,
    pub show_genre: bool,
    pub instant_playback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_title: true,
            show_authors: true,
            show_genre: true,
            instant_playback: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prefs {
    #[serde(default)]
    pub last_used_bank: Option<String>,
    #[serde(default)]
    pub settings: Option<Settings>,
    /// Top-level keys written by other tools
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Prefs {
    /// Load preferences, falling back to defaults on any problem
    ///
    /// Content that does not start with `{` is the legacy format: a bare
    /// bank name.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(_) => return Self::default(),
        };
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            serde_json::from_str(content).unwrap_or_else(|e| {
                warn!(error = %e, "Unreadable preferences, using defaults");
                Self::default()
            })
        } else {
            let legacy = content.trim();
            Self {
                last_used_bank: (!legacy.is_empty()).then(|| legacy.to_string()),
                ..Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn settings(&self) -> Settings {
        self.settings.clone().unwrap_or_default()
    }
}
