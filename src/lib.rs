//! vimkeys - Vim key-sequence resolution and command dispatch
//!
//! This crate turns keystrokes into resolved vim commands for a host editor.
//! The host owns the text, the mode and any input panel; the engine owns the
//! mappings and the pending-key state machine.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod host;
pub mod json_host;
pub mod keymap;
pub mod session;
pub mod tracing;

// Re-export commonly used types
pub use config::Settings;
pub use host::{Handlers, Host};
pub use keymap::{KeySequence, KeyToken, KeymapError, Mode, Step};
pub use session::Session;
