//! User mapping store: mode-partitioned, user-defined remappings
//!
//! Owned by the session and handed to the resolver by reference. Mutations
//! take effect for the next resolution only.

use std::collections::HashMap;

use super::command::CommandDescriptor;
use super::error::KeymapError;
use super::mode::Mode;
use super::notation::normalize;
use super::sequence::{strip_decorations, KeySequence};

/// Modes emptied by [`MappingStore::clear`]. Insert and Select mappings are
/// scoped separately and survive a clear.
const CLEARED_MODES: [Mode; 5] = [
    Mode::Normal,
    Mode::Visual,
    Mode::VisualLine,
    Mode::VisualBlock,
    Mode::OperatorPending,
];

/// Values substituted for `<leader>` and `<localleader>` in mapping keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variables {
    pub mapleader: String,
    pub maplocalleader: String,
}

impl Default for Variables {
    fn default() -> Self {
        Self {
            mapleader: "\\".to_string(),
            maplocalleader: "\\".to_string(),
        }
    }
}

impl Variables {
    /// Replace `<leader>` and `<localleader>` (any case) with their values
    pub fn expand_keys(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;

        while let Some(start) = rest.find('<') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(n) = match_ignore_case(tail, "<leader>") {
                out.push_str(&self.mapleader);
                rest = &tail[n..];
            } else if let Some(n) = match_ignore_case(tail, "<localleader>") {
                out.push_str(&self.maplocalleader);
                rest = &tail[n..];
            } else {
                out.push('<');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }
}

fn match_ignore_case(text: &str, pattern: &str) -> Option<usize> {
    let candidate = text.get(..pattern.len())?;
    candidate
        .eq_ignore_ascii_case(pattern)
        .then_some(pattern.len())
}

/// A user mapping as stored: canonical keys and the target descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub keys: KeySequence,
    pub target: CommandDescriptor,
}

#[derive(Debug, Clone, Default)]
pub struct MappingStore {
    modes: HashMap<Mode, HashMap<KeySequence, CommandDescriptor>>,
    variables: Variables,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variables(variables: Variables) -> Self {
        Self {
            modes: HashMap::new(),
            variables,
        }
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Replace the leader values used by later `add` calls
    pub fn set_variables(&mut self, variables: Variables) {
        self.variables = variables;
    }

    /// Map `keys` to `target` in `mode`, overwriting any existing mapping
    ///
    /// Leader variables are expanded before the keys are normalized. Invalid
    /// notation leaves the store untouched. In modes that read a count or
    /// register first, keys starting with `1`-`9` or `"` are rejected: they
    /// would be taken as decorations and never reach the mapping.
    pub fn add(&mut self, mode: Mode, keys: &str, target: &str) -> Result<(), KeymapError> {
        let expanded = self.variables.expand_keys(keys);
        let seq = normalize(&expanded)?;
        if seq.is_empty() {
            return Err(KeymapError::InvalidNotation(
                "mapping keys are empty".to_string(),
            ));
        }
        if mode.takes_decorations() && strip_decorations(&seq).1.len() != seq.len() {
            return Err(KeymapError::InvalidNotation(format!(
                "{} starts with a count or register in {} mode",
                seq, mode
            )));
        }

        tracing::debug!("map {} {} -> {}", mode, seq, target);
        self.modes
            .entry(mode)
            .or_default()
            .insert(seq, CommandDescriptor::user(target));
        Ok(())
    }

    /// Remove the mapping for `keys` in `mode`
    pub fn remove(&mut self, mode: Mode, keys: &str) -> Result<(), KeymapError> {
        let expanded = self.variables.expand_keys(keys);
        let seq = normalize(&expanded)?;
        let removed = self
            .modes
            .get_mut(&mode)
            .and_then(|table| table.remove(&seq));

        match removed {
            Some(_) => {
                tracing::debug!("unmap {} {}", mode, seq);
                Ok(())
            }
            None => Err(KeymapError::MappingNotFound {
                mode,
                keys: seq.to_string(),
            }),
        }
    }

    /// Drop every mapping in Normal, the visual modes and OperatorPending
    pub fn clear(&mut self) {
        for mode in CLEARED_MODES {
            self.modes.remove(&mode);
        }
    }

    pub fn find_exact(&self, mode: Mode, keys: &KeySequence) -> Option<MappingEntry> {
        let (keys, target) = self.modes.get(&mode)?.get_key_value(keys)?;
        Some(MappingEntry {
            keys: keys.clone(),
            target: target.clone(),
        })
    }

    /// Mapped sequences in `mode` that start with `keys` (including `keys`
    /// itself), sorted by canonical notation
    pub fn find_prefixed(&self, mode: Mode, keys: &KeySequence) -> Vec<KeySequence> {
        let mut found: Vec<KeySequence> = self
            .modes
            .get(&mode)
            .map(|table| {
                table
                    .keys()
                    .filter(|seq| seq.starts_with(keys))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        found.sort_by_cached_key(|seq| seq.to_string());
        found
    }

    pub fn len(&self, mode: Mode) -> usize {
        self.modes.get(&mode).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.modes.values().all(HashMap::is_empty)
    }

    /// All mappings for a mode, sorted by canonical notation
    pub fn entries(&self, mode: Mode) -> Vec<MappingEntry> {
        let mut entries: Vec<MappingEntry> = self
            .modes
            .get(&mode)
            .map(|table| {
                table
                    .iter()
                    .map(|(keys, target)| MappingEntry {
                        keys: keys.clone(),
                        target: target.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        entries.sort_by_cached_key(|entry| entry.keys.to_string());
        entries
    }
}
