//! Vim key notation: tokenizing `"d<C-w>x"`-style strings into key tokens
//! and rendering them back
//!
//! A `<` always opens a bracketed chord that must close with `>` and name a
//! known key; a literal `<` is written `<lt>`. Everything else is one literal
//! character per key.

use super::error::KeymapError;
use super::sequence::KeySequence;
use super::types::{KeyCode, KeyToken, Modifiers};

/// Lazily splits notation text into key tokens, strictly left to right
///
/// Each step consumes one bracketed chord or one literal character. After an
/// error the tokenizer is exhausted; `restart` rewinds it to the beginning.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    source: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            failed: false,
        }
    }

    /// Rewind to the start of the source text
    pub fn restart(&mut self) {
        self.pos = 0;
        self.failed = false;
    }

    /// Text not yet consumed
    pub fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn next_token(&mut self) -> Option<Result<KeyToken, KeymapError>> {
        let rest = self.rest();
        let c = rest.chars().next()?;

        if c != '<' {
            self.pos += c.len_utf8();
            return Some(Ok(KeyToken::char(c)));
        }

        let Some(close) = rest[1..].find('>') else {
            return Some(Err(KeymapError::InvalidNotation(format!(
                "unterminated key notation: {}",
                rest
            ))));
        };
        // `<C->>` names the `>` key
        let mut end = close + 1;
        if rest[1..end].ends_with('-') && rest[end + 1..].starts_with('>') {
            end += 1;
        }
        let chord = &rest[1..end];
        let token = parse_chord(chord);
        if token.is_ok() {
            self.pos += end + 1;
        }
        Some(token)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<KeyToken, KeymapError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_token();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

/// Parse the inside of a `<...>` chord, e.g. `C-S-a` or `Esc`
fn parse_chord(chord: &str) -> Result<KeyToken, KeymapError> {
    let invalid = || KeymapError::InvalidNotation(format!("<{}>", chord));

    let mut mods = Modifiers::NONE;
    let mut name = chord;
    // A modifier is `X-` followed by at least one more character
    while name.len() > 2 && name.as_bytes()[1] == b'-' {
        let Some(modifier) = Modifiers::from_notation_letter(name.as_bytes()[0] as char) else {
            break;
        };
        mods = mods | modifier;
        name = &name[2..];
    }

    if name.is_empty() {
        return Err(invalid());
    }

    let mut chars = name.chars();
    let key = match (chars.next(), chars.next()) {
        (Some(c), None) => KeyCode::Char(c),
        _ => KeyCode::from_notation_name(name).ok_or_else(invalid)?,
    };

    if mods.is_empty() {
        if let KeyCode::Char(c) = key {
            return Ok(KeyToken::char(c));
        }
    }
    Ok(KeyToken::new(key, mods))
}

/// Parse notation text into a key sequence
pub fn normalize(raw: &str) -> Result<KeySequence, KeymapError> {
    Tokenizer::new(raw).collect()
}

/// Render key tokens as canonical notation text
pub fn denormalize(tokens: &[KeyToken]) -> String {
    tokens.iter().map(KeyToken::notation).collect()
}
