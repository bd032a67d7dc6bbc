//! Core key types: KeyToken, Modifiers, KeyCode

use std::fmt;

/// Modifier keys held with a key, as a bitfield
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // D- in notation (Cmd on macOS)

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Vim notation prefix in canonical order, e.g. `C-S-`
    pub fn notation_prefix(self) -> String {
        let mut prefix = String::new();
        if self.ctrl() {
            prefix.push_str("C-");
        }
        if self.shift() {
            prefix.push_str("S-");
        }
        if self.alt() {
            prefix.push_str("M-");
        }
        if self.meta() {
            prefix.push_str("D-");
        }
        prefix
    }

    /// Parse a single modifier letter as written before `-` in a chord
    pub fn from_notation_letter(c: char) -> Option<Modifiers> {
        match c.to_ascii_uppercase() {
            'C' => Some(Modifiers::CTRL),
            'S' => Some(Modifiers::SHIFT),
            'M' | 'A' => Some(Modifiers::ALT),
            'D' => Some(Modifiers::META),
            _ => None,
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// A key code representing a logical key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// A character key, case preserved (`A` and `a` are different keys in vim)
    Char(char),

    // Named keys
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    // Function keys
    F(u8), // F1-F12
}

impl KeyCode {
    /// Canonical vim name for a named key, `None` for characters
    pub fn notation_name(self) -> Option<String> {
        let name = match self {
            KeyCode::Char(_) => return None,
            KeyCode::Enter => "CR",
            KeyCode::Escape => "Esc",
            KeyCode::Tab => "Tab",
            KeyCode::Backspace => "BS",
            KeyCode::Delete => "Del",
            KeyCode::Space => "Space",
            KeyCode::Up => "Up",
            KeyCode::Down => "Down",
            KeyCode::Left => "Left",
            KeyCode::Right => "Right",
            KeyCode::Home => "Home",
            KeyCode::End => "End",
            KeyCode::PageUp => "PageUp",
            KeyCode::PageDown => "PageDown",
            KeyCode::Insert => "Insert",
            KeyCode::F(n) => return Some(format!("F{}", n)),
        };
        Some(name.to_string())
    }

    /// Look up a named key (case-insensitive), including the vim aliases for
    /// characters that cannot be written literally inside a mapping
    pub fn from_notation_name(name: &str) -> Option<KeyCode> {
        let lower = name.to_ascii_lowercase();
        let key = match lower.as_str() {
            "cr" | "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Escape,
            "tab" => KeyCode::Tab,
            "bs" | "backspace" => KeyCode::Backspace,
            "del" | "delete" => KeyCode::Delete,
            "space" => KeyCode::Space,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "insert" => KeyCode::Insert,
            "lt" => KeyCode::Char('<'),
            "gt" => KeyCode::Char('>'),
            "bar" => KeyCode::Char('|'),
            "bslash" => KeyCode::Char('\\'),
            _ => {
                let n = lower.strip_prefix('f')?.parse::<u8>().ok()?;
                if (1..=12).contains(&n) {
                    KeyCode::F(n)
                } else {
                    return None;
                }
            }
        };
        Some(key)
    }
}

/// One logical keypress: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyToken {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl KeyToken {
    pub const ESCAPE: KeyToken = KeyToken::key(KeyCode::Escape);
    pub const ENTER: KeyToken = KeyToken::key(KeyCode::Enter);

    /// Create a new key token, folding Control-letter chords to lowercase
    pub fn new(key: KeyCode, mods: Modifiers) -> Self {
        let key = match key {
            KeyCode::Char(c) if mods.ctrl() => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        Self { key, mods }
    }

    /// Create a key token with no modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }

    /// A literal character as typed; a space becomes the Space key
    pub const fn char(c: char) -> Self {
        if c == ' ' {
            Self::key(KeyCode::Space)
        } else {
            Self::key(KeyCode::Char(c))
        }
    }

    /// A Control chord on a character, e.g. `<C-w>`
    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    pub fn is_escape(&self) -> bool {
        *self == Self::ESCAPE
    }

    pub fn is_enter(&self) -> bool {
        *self == Self::ENTER
    }

    /// The plain character of an unmodified character key
    pub fn as_char(&self) -> Option<char> {
        match self.key {
            KeyCode::Char(c) if self.mods.is_empty() => Some(c),
            _ => None,
        }
    }

    /// Text this key inserts when typed, if it types any
    pub fn translate(&self) -> Option<String> {
        if !self.mods.is_empty() {
            return None;
        }
        match self.key {
            KeyCode::Char(c) => Some(c.to_string()),
            KeyCode::Space => Some(" ".to_string()),
            KeyCode::Enter => Some("\n".to_string()),
            KeyCode::Tab => Some("\t".to_string()),
            _ => None,
        }
    }

    /// Canonical vim notation for this key
    pub fn notation(&self) -> String {
        match (self.key, self.mods.is_empty()) {
            (KeyCode::Char('<'), true) => "<lt>".to_string(),
            (KeyCode::Char(c), true) => c.to_string(),
            (KeyCode::Char(c), false) => {
                let name = match c {
                    '<' => "lt".to_string(),
                    '>' => "gt".to_string(),
                    other => other.to_string(),
                };
                format!("<{}{}>", self.mods.notation_prefix(), name)
            }
            (key, _) => format!(
                "<{}{}>",
                self.mods.notation_prefix(),
                key.notation_name().unwrap_or_default()
            ),
        }
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}
