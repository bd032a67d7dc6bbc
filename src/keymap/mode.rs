//! Modal editing contexts
//!
//! Exactly one mode is current at a time. Mode transitions happen when the
//! host executes commands; the keymap core only reads the mode to pick which
//! bindings apply.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::error::KeymapError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Visual,
    VisualLine,
    VisualBlock,
    Select,
    OperatorPending,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Normal,
        Mode::Insert,
        Mode::Visual,
        Mode::VisualLine,
        Mode::VisualBlock,
        Mode::Select,
        Mode::OperatorPending,
    ];

    /// Visual, VisualLine and VisualBlock
    pub fn is_visual(self) -> bool {
        matches!(self, Mode::Visual | Mode::VisualLine | Mode::VisualBlock)
    }

    /// Whether a leading count or `"x` register is read before a command.
    /// Typed digits and quotes are text in Insert and Select.
    pub fn takes_decorations(self) -> bool {
        !matches!(self, Mode::Insert | Mode::Select)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Visual => "VISUAL",
            Mode::VisualLine => "VISUAL LINE",
            Mode::VisualBlock => "VISUAL BLOCK",
            Mode::Select => "SELECT",
            Mode::OperatorPending => "OPERATOR PENDING",
        };
        f.write_str(name)
    }
}

/// Accepts long names and the single-letter prefixes of vim's `:map` family
/// (`n`, `i`, `v`, `x`, `s`, `o`), plus `V` and `b` for the line and block
/// visual modes
impl FromStr for Mode {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "V" => return Ok(Mode::VisualLine),
            "b" => return Ok(Mode::VisualBlock),
            _ => {}
        }
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "n" | "normal" => Ok(Mode::Normal),
            "i" | "insert" => Ok(Mode::Insert),
            "v" | "x" | "visual" => Ok(Mode::Visual),
            "visual_line" | "visualline" => Ok(Mode::VisualLine),
            "visual_block" | "visualblock" => Ok(Mode::VisualBlock),
            "s" | "select" => Ok(Mode::Select),
            "o" | "operator_pending" | "operatorpending" => Ok(Mode::OperatorPending),
            _ => Err(KeymapError::InvalidMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = KeymapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
