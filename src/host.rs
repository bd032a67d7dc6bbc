//! The editor the engine drives
//!
//! The engine never edits text. It reports resolved commands to a [`Host`],
//! which owns the buffer, the current mode and any input panel.

use std::collections::HashMap;

use crate::keymap::{Arguments, KeySequence, Mode, PanelRequest};

/// Collaborator that performs the effects of resolved commands
pub trait Host {
    /// The mode keys are currently typed in
    fn mode(&self) -> Mode;

    /// Run a resolved command
    fn execute(&mut self, command: &str, args: &Arguments);

    /// Start collecting a string; answer with `Session::panel_done`
    fn show_input_panel(&mut self, request: &PanelRequest);

    fn status_message(&mut self, message: &str);

    /// Keys that formed no command. In Insert mode these are usually text
    /// to insert.
    fn unresolved(&mut self, keys: &KeySequence) {
        if self.mode() != Mode::Insert {
            self.status_message(&format!("Unknown key sequence: {}", keys));
        }
    }
}

/// Handler for one command name
pub type Handler<C> = fn(&mut C, &Arguments);

/// Table from command name to handler, built once when a host registers its
/// commands
pub struct Handlers<C> {
    table: HashMap<String, Handler<C>>,
}

impl<C> Default for Handlers<C> {
    fn default() -> Self {
        Self {
            table: HashMap::new(),
        }
    }
}

impl<C> Handlers<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `name` (builder pattern)
    pub fn with(mut self, name: &str, handler: Handler<C>) -> Self {
        self.register(name, handler);
        self
    }

    pub fn register(&mut self, name: &str, handler: Handler<C>) {
        if self.table.insert(name.to_string(), handler).is_some() {
            tracing::warn!("Handler for {} registered twice", name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Run the handler for `name`; false when none is registered
    pub fn dispatch(&self, context: &mut C, name: &str, args: &Arguments) -> bool {
        match self.table.get(name) {
            Some(handler) => {
                handler(context, args);
                true
            }
            None => {
                tracing::debug!("No handler for {}", name);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        lines: i64,
    }

    fn down(counter: &mut Counter, args: &Arguments) {
        counter.lines += args.get("count").and_then(|c| c.as_i64()).unwrap_or(1);
    }

    fn up(counter: &mut Counter, _args: &Arguments) {
        counter.lines -= 1;
    }

    #[test]
    fn test_dispatch_routes_by_name() {
        let handlers: Handlers<Counter> = Handlers::new().with("vi_j", down).with("vi_k", up);
        let mut counter = Counter::default();

        let mut args = Arguments::new();
        args.insert("count".to_string(), 3.into());
        assert!(handlers.dispatch(&mut counter, "vi_j", &args));
        assert!(handlers.dispatch(&mut counter, "vi_k", &Arguments::new()));
        assert!(!handlers.dispatch(&mut counter, "vi_x", &Arguments::new()));

        assert_eq!(counter.lines, 2);
        assert_eq!(handlers.len(), 2);
        assert!(handlers.contains("vi_j"));
    }
}
