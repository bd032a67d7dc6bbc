//! Static, mode-partitioned table of built-in bindings

use std::collections::HashMap;

use super::command::{CommandDescriptor, CommandKind};
use super::error::KeymapError;
use super::mode::Mode;
use super::sequence::KeySequence;

/// A built-in binding: a key sequence in one or more modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub modes: Vec<Mode>,
    pub keys: KeySequence,
    pub command: CommandDescriptor,
}

impl Binding {
    pub fn new(modes: &[Mode], keys: KeySequence, command: CommandDescriptor) -> Self {
        Self {
            modes: modes.to_vec(),
            keys,
            command,
        }
    }
}

/// Built-in bindings, queryable by exact sequence and by prefix. No mutation
/// after construction.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    modes: HashMap<Mode, HashMap<KeySequence, CommandDescriptor>>,
}

impl CommandTable {
    /// Build the table, rejecting data that would make resolution ambiguous
    ///
    /// Within a mode a sequence may be bound once, and only namespaces and
    /// operators may be strict prefixes of other bindings.
    pub fn from_bindings(bindings: Vec<Binding>) -> Result<Self, KeymapError> {
        let mut modes: HashMap<Mode, HashMap<KeySequence, CommandDescriptor>> = HashMap::new();

        for binding in bindings {
            for mode in &binding.modes {
                let table = modes.entry(*mode).or_default();
                if table.contains_key(&binding.keys) {
                    return Err(KeymapError::AmbiguousBinding {
                        mode: *mode,
                        keys: binding.keys.to_string(),
                    });
                }
                table.insert(binding.keys.clone(), binding.command.clone());
            }
        }

        for (mode, table) in &modes {
            for (keys, command) in table {
                let may_prefix =
                    command.kind == CommandKind::Namespace || command.is_operator();
                if may_prefix {
                    continue;
                }
                if table.keys().any(|other| keys.is_strict_prefix_of(other)) {
                    return Err(KeymapError::AmbiguousBinding {
                        mode: *mode,
                        keys: keys.to_string(),
                    });
                }
            }
        }

        Ok(Self { modes })
    }

    /// The shipped vim bindings
    pub fn builtin() -> Self {
        match Self::from_bindings(super::defaults::default_bindings()) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!("Built-in command table is invalid: {}", e);
                Self::default()
            }
        }
    }

    pub fn find_exact(&self, mode: Mode, keys: &KeySequence) -> Option<&CommandDescriptor> {
        self.modes.get(&mode)?.get(keys)
    }

    /// Whether `keys` is a strict prefix of some binding in `mode`
    pub fn has_prefixed(&self, mode: Mode, keys: &KeySequence) -> bool {
        self.modes
            .get(&mode)
            .is_some_and(|table| table.keys().any(|k| keys.is_strict_prefix_of(k)))
    }

    /// All bindings for a mode, sorted by key notation
    pub fn bindings(&self, mode: Mode) -> Vec<(&KeySequence, &CommandDescriptor)> {
        let mut bindings: Vec<_> = self
            .modes
            .get(&mode)
            .map(|table| table.iter().collect())
            .unwrap_or_default();
        bindings.sort_by_key(|(keys, _)| keys.to_string());
        bindings
    }

    pub fn len(&self, mode: Mode) -> usize {
        self.modes.get(&mode).map_or(0, HashMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(raw: &str) -> KeySequence {
        raw.parse().unwrap()
    }

    #[test]
    fn test_exact_and_prefix_queries() {
        let table = CommandTable::from_bindings(vec![
            Binding::new(&[Mode::Normal], seq("g"), CommandDescriptor::namespace("vi_g")),
            Binding::new(&[Mode::Normal], seq("gg"), CommandDescriptor::motion("vi_gg")),
        ])
        .unwrap();

        assert_eq!(
            table.find_exact(Mode::Normal, &seq("gg")).map(|c| c.name.as_str()),
            Some("vi_gg")
        );
        assert!(table.has_prefixed(Mode::Normal, &seq("g")));
        assert!(!table.has_prefixed(Mode::Normal, &seq("gg")));
        assert!(table.find_exact(Mode::Visual, &seq("gg")).is_none());
    }

    #[test]
    fn test_duplicate_sequence_rejected() {
        let result = CommandTable::from_bindings(vec![
            Binding::new(&[Mode::Normal], seq("x"), CommandDescriptor::action("a")),
            Binding::new(&[Mode::Normal], seq("x"), CommandDescriptor::action("b")),
        ]);
        assert!(matches!(result, Err(KeymapError::AmbiguousBinding { .. })));
    }

    #[test]
    fn test_complete_command_may_not_prefix_another() {
        let result = CommandTable::from_bindings(vec![
            Binding::new(&[Mode::Normal], seq("x"), CommandDescriptor::action("a")),
            Binding::new(&[Mode::Normal], seq("xy"), CommandDescriptor::action("b")),
        ]);
        assert!(matches!(
            result,
            Err(KeymapError::AmbiguousBinding { mode: Mode::Normal, .. })
        ));
    }

    #[test]
    fn test_operator_may_prefix_composite() {
        let result = CommandTable::from_bindings(vec![
            Binding::new(&[Mode::Normal], seq("d"), CommandDescriptor::operator("vi_d")),
            Binding::new(&[Mode::Normal], seq("dd"), CommandDescriptor::action("vi_dd")),
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_same_keys_in_different_modes() {
        let table = CommandTable::from_bindings(vec![
            Binding::new(&[Mode::Normal], seq("d"), CommandDescriptor::operator("vi_d")),
            Binding::new(&[Mode::Visual], seq("d"), CommandDescriptor::action("vi_visual_d")),
        ])
        .unwrap();
        assert!(table.find_exact(Mode::Normal, &seq("d")).unwrap().is_operator());
        assert!(!table.find_exact(Mode::Visual, &seq("d")).unwrap().is_operator());
    }
}
