//! Errors reported by the keymap core

use super::mode::Mode;

/// Errors that can occur while parsing notation, configuring mappings,
/// or looking up input parsers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    /// Malformed key notation such as `<Foo>` or an unterminated `<`
    InvalidNotation(String),
    /// No input parser is registered for this command name
    UnknownParser(String),
    /// `remove` of a sequence that has no mapping in that mode
    MappingNotFound { mode: Mode, keys: String },
    /// Built-in data where a complete command is a prefix of another binding
    AmbiguousBinding { mode: Mode, keys: String },
    /// Unrecognized mode name in configuration
    InvalidMode(String),
    IoError(String),
    ParseError(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::InvalidNotation(n) => write!(f, "Invalid key notation: {}", n),
            KeymapError::UnknownParser(name) => write!(f, "Unknown input parser: {}", name),
            KeymapError::MappingNotFound { mode, keys } => {
                write!(f, "Mapping not found: {} in {} mode", keys, mode)
            }
            KeymapError::AmbiguousBinding { mode, keys } => {
                write!(f, "Ambiguous binding: {} in {} mode", keys, mode)
            }
            KeymapError::InvalidMode(m) => write!(f, "Invalid mode: {}", m),
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for KeymapError {}
