//! Input parsers for commands that take extra input after their keys
//!
//! `f`, `t`, `r`, `m`, `q` and friends read one more character. Search reads
//! a whole pattern, either from following keystrokes or from an input panel
//! the host shows.

use super::error::KeymapError;
use super::types::{KeyCode, KeyToken};

/// Which keys satisfy an immediate parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    /// Any key that types exactly one character
    AnyChar,
    /// One character from the given set
    OneOf(&'static str),
    /// Keys typed until `<CR>`; Backspace deletes
    UntilEnter,
}

/// How a parser collects its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// The driver reads the following keystrokes itself
    Immediate(Accept),
    /// The host collects a string through an input panel
    ViaPanel { prompt: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputParserDescriptor {
    pub collection: Collection,
    /// Command the host runs to show the panel
    pub interactive_command: Option<&'static str>,
    /// Argument name the captured value is stored under
    pub input_param: Option<&'static str>,
    /// Command run after the parser is satisfied
    pub on_done: Option<&'static str>,
}

impl InputParserDescriptor {
    const fn immediate(accept: Accept, input_param: Option<&'static str>) -> Self {
        Self {
            collection: Collection::Immediate(accept),
            interactive_command: None,
            input_param,
            on_done: None,
        }
    }

    /// Argument name for the captured value
    pub fn param_name(&self) -> &'static str {
        self.input_param.unwrap_or("char")
    }
}

/// Result of feeding one key to a [`Capture`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    /// Keep reading keys
    Pending,
    /// Input is complete
    Satisfied(String),
    /// The key cannot satisfy this parser
    Rejected,
}

/// In-progress collection for an immediate parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    accept: Accept,
    text: String,
}

impl Capture {
    pub fn new(accept: Accept) -> Self {
        Self {
            accept,
            text: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn feed(&mut self, key: KeyToken) -> Feed {
        match self.accept {
            Accept::AnyChar => match single_char(&key) {
                Some(c) => Feed::Satisfied(c.to_string()),
                None => Feed::Rejected,
            },
            Accept::OneOf(set) => match single_char(&key) {
                Some(c) if set.contains(c) => Feed::Satisfied(c.to_string()),
                _ => Feed::Rejected,
            },
            Accept::UntilEnter => {
                if key.is_enter() {
                    return Feed::Satisfied(std::mem::take(&mut self.text));
                }
                if key == KeyToken::key(KeyCode::Backspace) {
                    self.text.pop();
                    return Feed::Pending;
                }
                match key.translate() {
                    Some(text) => {
                        self.text.push_str(&text);
                        Feed::Pending
                    }
                    None => Feed::Rejected,
                }
            }
        }
    }
}

fn single_char(key: &KeyToken) -> Option<char> {
    let text = key.translate()?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

const ONE_CHAR: InputParserDescriptor = InputParserDescriptor::immediate(Accept::AnyChar, None);
const REGISTER: InputParserDescriptor =
    InputParserDescriptor::immediate(Accept::AnyChar, Some("register"));
const MARK: InputParserDescriptor = InputParserDescriptor::immediate(Accept::AnyChar, Some("mark"));
const BRACKET: InputParserDescriptor =
    InputParserDescriptor::immediate(Accept::OneOf("(){}"), None);

/// Command names with a registered parser
const PARSER_NAMES: &[&str] = &[
    "vi_f",
    "vi_big_f",
    "vi_t",
    "vi_big_t",
    "vi_a_text_object",
    "vi_i_text_object",
    "vi_r",
    "vi_m",
    "vi_q",
    "vi_at",
    "vi_quote",
    "vi_backtick",
    "vi_insert_ctrl_r",
    "vi_left_square_bracket",
    "vi_right_square_bracket",
    "vi_slash",
    "vi_question_mark",
];

/// Lookup of input parsers by command name
///
/// Descriptors are static apart from search, whose collection depends on
/// whether the session is non-interactive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserRegistry {
    non_interactive: bool,
}

impl ParserRegistry {
    pub fn new(non_interactive: bool) -> Self {
        Self { non_interactive }
    }

    pub fn non_interactive(&self) -> bool {
        self.non_interactive
    }

    pub fn set_non_interactive(&mut self, non_interactive: bool) {
        self.non_interactive = non_interactive;
    }

    pub fn lookup(&self, command: &str) -> Result<InputParserDescriptor, KeymapError> {
        let descriptor = match command {
            "vi_f" | "vi_big_f" | "vi_t" | "vi_big_t" => ONE_CHAR,
            "vi_a_text_object" | "vi_i_text_object" => ONE_CHAR,
            "vi_r" => InputParserDescriptor {
                on_done: Some("vi_r_on_parser_done"),
                ..ONE_CHAR
            },
            "vi_q" | "vi_at" | "vi_insert_ctrl_r" => REGISTER,
            "vi_m" | "vi_quote" | "vi_backtick" => MARK,
            "vi_left_square_bracket" | "vi_right_square_bracket" => BRACKET,
            "vi_slash" => self.search("vi_slash", "/", "vi_slash_on_parser_done"),
            "vi_question_mark" => self.search(
                "vi_question_mark",
                "?",
                "vi_question_mark_on_parser_done",
            ),
            other => return Err(KeymapError::UnknownParser(other.to_string())),
        };
        Ok(descriptor)
    }

    pub fn contains(&self, command: &str) -> bool {
        PARSER_NAMES.contains(&command)
    }

    pub fn names(&self) -> &'static [&'static str] {
        PARSER_NAMES
    }

    fn search(
        &self,
        command: &'static str,
        prompt: &'static str,
        on_done: &'static str,
    ) -> InputParserDescriptor {
        if self.non_interactive {
            InputParserDescriptor {
                collection: Collection::Immediate(Accept::UntilEnter),
                interactive_command: None,
                input_param: Some("pattern"),
                on_done: Some(on_done),
            }
        } else {
            InputParserDescriptor {
                collection: Collection::ViaPanel { prompt },
                interactive_command: Some(command),
                input_param: Some("pattern"),
                on_done: None,
            }
        }
    }
}
