//! Session settings
//!
//! Read from `~/.config/vimkeys/config.yaml`. Every field is optional.

use std::path::Path;

use serde::Deserialize;

use crate::keymap::{Mode, Variables};

/// Settings read at session start
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Read search patterns from keystrokes instead of an input panel
    #[serde(default)]
    pub non_interactive: bool,

    /// Substituted for `<leader>` in mapping keys
    #[serde(default = "default_leader")]
    pub mapleader: String,

    /// Substituted for `<localleader>` in mapping keys
    #[serde(default = "default_leader")]
    pub maplocalleader: String,

    #[serde(default)]
    pub initial_mode: Mode,
}

fn default_leader() -> String {
    "\\".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            non_interactive: false,
            mapleader: default_leader(),
            maplocalleader: default_leader(),
            initial_mode: Mode::Normal,
        }
    }
}

impl Settings {
    /// Load settings from the config directory, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        Self::load_from(&path)
    }

    /// Load settings from `path`, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(settings) => {
                    tracing::info!("Loaded config from {}", path.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Leader values for the mapping store
    pub fn variables(&self) -> Variables {
        Variables {
            mapleader: self.mapleader.clone(),
            maplocalleader: self.maplocalleader.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let settings: Settings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.variables(), Variables::default());
    }

    #[test]
    fn test_partial_document() {
        let settings: Settings =
            serde_yaml::from_str("mapleader: \",\"\ninitial_mode: insert\n").unwrap();
        assert_eq!(settings.mapleader, ",");
        assert_eq!(settings.maplocalleader, "\\");
        assert_eq!(settings.initial_mode, Mode::Insert);
        assert!(!settings.non_interactive);
    }
}
