//! Key sequences and the count/register decorations that may precede them

use std::fmt;
use std::str::FromStr;

use super::error::KeymapError;
use super::notation::{denormalize, normalize};
use super::types::KeyToken;

/// Largest count accepted; longer digit runs saturate here
pub const MAX_COUNT: u32 = 999_999;

/// An ordered list of keystrokes treated as one potential command
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeySequence(Vec<KeyToken>);

impl KeySequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append the newest keystroke
    pub fn push(&mut self, key: KeyToken) {
        self.0.push(key);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> &[KeyToken] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeyToken> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<&KeyToken> {
        self.0.first()
    }

    /// Whether `prefix` is a (possibly equal) prefix of this sequence
    pub fn starts_with(&self, prefix: &KeySequence) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Whether this sequence is shorter than `other` and a prefix of it
    pub fn is_strict_prefix_of(&self, other: &KeySequence) -> bool {
        self.len() < other.len() && other.starts_with(self)
    }

    /// Split into the first `n` keys and the rest
    pub fn split_at(&self, n: usize) -> (KeySequence, KeySequence) {
        let n = n.min(self.len());
        let (head, tail) = self.0.split_at(n);
        (Self(head.to_vec()), Self(tail.to_vec()))
    }

    /// A new sequence with `other` appended
    pub fn concat(&self, other: &KeySequence) -> KeySequence {
        let mut keys = self.0.clone();
        keys.extend_from_slice(&other.0);
        Self(keys)
    }
}

impl From<Vec<KeyToken>> for KeySequence {
    fn from(keys: Vec<KeyToken>) -> Self {
        Self(keys)
    }
}

impl FromIterator<KeyToken> for KeySequence {
    fn from_iter<I: IntoIterator<Item = KeyToken>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for KeySequence {
    type Item = KeyToken;
    type IntoIter = std::vec::IntoIter<KeyToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeySequence {
    type Item = &'a KeyToken;
    type IntoIter = std::slice::Iter<'a, KeyToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromStr for KeySequence {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&denormalize(&self.0))
    }
}

/// Register and count typed ahead of a command, e.g. `"a3` in `"a3dd`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decorations {
    pub register: Option<char>,
    pub count: Option<u32>,
}

impl Decorations {
    /// Combine with decorations typed later in the same command (`2d3w`):
    /// counts multiply, a later register wins
    pub fn merge(self, later: Decorations) -> Decorations {
        let count = match (self.count, later.count) {
            (Some(a), Some(b)) => Some(a.saturating_mul(b).min(MAX_COUNT)),
            (a, b) => a.or(b),
        };
        Decorations {
            register: later.register.or(self.register),
            count,
        }
    }
}

/// Split leading register (`"x`) and count decorations from the bindable part
///
/// Counts start with 1-9, so a leading `0` stays bindable. Decorations may
/// alternate (`2"a3`); counts multiply. A trailing lone `"` is consumed as an
/// unfinished register selection, leaving an empty bare sequence.
pub fn strip_decorations(seq: &KeySequence) -> (Decorations, KeySequence) {
    let keys = seq.tokens();
    let mut decorations = Decorations::default();
    let mut i = 0;

    while i < keys.len() {
        match keys[i].as_char() {
            Some('"') => match keys.get(i + 1) {
                None => i += 1,
                Some(next) => match next.as_char() {
                    Some(register) => {
                        decorations.register = Some(register);
                        i += 2;
                    }
                    None => break,
                },
            },
            Some(c @ '1'..='9') => {
                let mut n = c.to_digit(10).unwrap_or(0);
                i += 1;
                while let Some(d) = keys.get(i).and_then(|k| k.as_char()?.to_digit(10)) {
                    n = n.saturating_mul(10).saturating_add(d).min(MAX_COUNT);
                    i += 1;
                }
                decorations = decorations.merge(Decorations {
                    register: None,
                    count: Some(n),
                });
            }
            _ => break,
        }
    }

    let (_, bare) = seq.split_at(i);
    (decorations, bare)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(raw: &str) -> KeySequence {
        raw.parse().unwrap()
    }

    #[test]
    fn test_prefix_relations() {
        assert!(seq("g").is_strict_prefix_of(&seq("gg")));
        assert!(!seq("gg").is_strict_prefix_of(&seq("gg")));
        assert!(seq("gg").starts_with(&seq("gg")));
        assert!(!seq("gx").starts_with(&seq("gg")));
    }

    #[test]
    fn test_split_and_concat() {
        let (head, tail) = seq("dd<Esc>").split_at(2);
        assert_eq!(head, seq("dd"));
        assert_eq!(tail, seq("<Esc>"));
        assert_eq!(head.concat(&tail), seq("dd<Esc>"));
        assert_eq!(seq("d").split_at(5), (seq("d"), KeySequence::new()));
    }

    #[test]
    fn test_display_is_canonical_notation() {
        assert_eq!(seq("<c-w>J").to_string(), "<C-w>J");
    }

    #[test]
    fn test_strip_count_and_register() {
        let (deco, bare) = strip_decorations(&seq("\"a3dd"));
        assert_eq!(deco.register, Some('a'));
        assert_eq!(deco.count, Some(3));
        assert_eq!(bare, seq("dd"));
    }

    #[test]
    fn test_strip_multiplies_alternating_counts() {
        let (deco, bare) = strip_decorations(&seq("2\"b12yy"));
        assert_eq!(deco.register, Some('b'));
        assert_eq!(deco.count, Some(24));
        assert_eq!(bare, seq("yy"));
    }

    #[test]
    fn test_leading_zero_is_not_a_count() {
        let (deco, bare) = strip_decorations(&seq("0"));
        assert_eq!(deco, Decorations::default());
        assert_eq!(bare, seq("0"));

        let (deco, bare) = strip_decorations(&seq("10j"));
        assert_eq!(deco.count, Some(10));
        assert_eq!(bare, seq("j"));
    }

    #[test]
    fn test_only_decorations_leave_empty_bare() {
        assert!(strip_decorations(&seq("\"")).1.is_empty());
        assert!(strip_decorations(&seq("\"a")).1.is_empty());
        assert!(strip_decorations(&seq("42")).1.is_empty());
    }

    #[test]
    fn test_register_needs_plain_character() {
        let (deco, bare) = strip_decorations(&seq("\"<Esc>"));
        assert_eq!(deco.register, None);
        assert_eq!(bare, seq("\"<Esc>"));
    }

    #[test]
    fn test_count_saturates() {
        let (deco, _) = strip_decorations(&seq("99999999999j"));
        assert_eq!(deco.count, Some(MAX_COUNT));
    }

    #[test]
    fn test_merge_decorations() {
        let outer = Decorations {
            register: Some('a'),
            count: Some(2),
        };
        let inner = Decorations {
            register: None,
            count: Some(3),
        };
        assert_eq!(
            outer.merge(inner),
            Decorations {
                register: Some('a'),
                count: Some(6)
            }
        );
        assert_eq!(Decorations::default().merge(inner).count, Some(3));
    }
}
