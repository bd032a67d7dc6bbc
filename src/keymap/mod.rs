//! Vim key-sequence resolution and command dispatch
//!
//! This module turns a stream of keystrokes into resolved vim commands:
//! - Parses vim key notation (`<C-w>`, `<Esc>`, `<lt>`) into key tokens
//! - Looks sequences up in user mappings, then in the built-in bindings
//! - Handles counts, registers, operators and operator-pending composition
//! - Collects extra input for commands like `f`, `r` and `/`
//!
//! # Architecture
//!
//! ```text
//! KeyToken → Driver::feed() → Resolver::resolve() → MappingStore / CommandTable
//!                          ↘ ParserRegistry (f, t, r, /...)
//!                          → Step::Execute(Dispatch) → host
//! ```
//!
//! # Example
//!
//! ```
//! use vimkeys::keymap::{CommandTable, Driver, MappingStore, Mode, ParserRegistry, Resolver, Step};
//!
//! let mut store = MappingStore::new();
//! store.add(Mode::Normal, "<leader>w", "save").unwrap();
//!
//! let table = CommandTable::builtin();
//! let parsers = ParserRegistry::default();
//! let resolver = Resolver::new(&store, &table);
//! let mut driver = Driver::new();
//!
//! let mut last = Step::AwaitMore;
//! for key in "3j".parse::<vimkeys::keymap::KeySequence>().unwrap() {
//!     last = driver.feed(key, Mode::Normal, &resolver, &parsers);
//! }
//! assert!(matches!(last, Step::Execute(ref d) if d.command.name == "vi_j"));
//! ```

mod command;
mod config;
mod defaults;
mod driver;
mod error;
mod mode;
mod notation;
mod parsers;
mod resolver;
mod sequence;
mod store;
mod table;
mod types;

pub use command::{CommandDescriptor, CommandKind, Origin};
pub use config::{apply_mappings, load_into, load_mapping_file, parse_mapping_yaml, MappingConfig};
pub use defaults::default_bindings;
pub use driver::{
    Arguments, Dispatch, Driver, PanelRequest, PanelResult, ResolvedCommand, State, Step,
};
pub use error::KeymapError;
pub use mode::Mode;
pub use notation::{denormalize, normalize, Tokenizer};
pub use parsers::{Accept, Capture, Collection, Feed, InputParserDescriptor, ParserRegistry};
pub use resolver::{MatchStatus, ResolvedMapping, Resolver};
pub use sequence::{strip_decorations, Decorations, KeySequence, MAX_COUNT};
pub use store::{MappingEntry, MappingStore, Variables};
pub use table::{Binding, CommandTable};
pub use types::{KeyCode, KeyToken, Modifiers};
