//! Command descriptors: what a key sequence resolves to
//!
//! Descriptors only name commands. The host owns the handlers that give those
//! names an effect.

use std::fmt;

/// What kind of command a binding resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Moves the cursor or selects a region; can complete an operator
    Motion,
    /// Performs an edit or changes state
    Action,
    /// A prefix key (`g`, `z`, `<C-w>`) that only selects further bindings
    Namespace,
    /// Target of a user-defined remapping
    UserMapping,
}

/// Where a binding comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Builtin,
    User,
}

/// A resolved binding target. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandDescriptor {
    pub name: String,
    pub kind: CommandKind,
    pub origin: Origin,
    /// Operators (`d`, `y`, `gU`...) need a motion before they can run
    pub motion_required: bool,
    /// Recognized but not implemented; dispatching it reports `Unsupported`
    pub supported: bool,
}

impl CommandDescriptor {
    fn builtin(name: &str, kind: CommandKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            origin: Origin::Builtin,
            motion_required: false,
            supported: true,
        }
    }

    pub fn motion(name: &str) -> Self {
        Self::builtin(name, CommandKind::Motion)
    }

    pub fn action(name: &str) -> Self {
        Self::builtin(name, CommandKind::Action)
    }

    /// An action that waits for a motion
    pub fn operator(name: &str) -> Self {
        Self {
            motion_required: true,
            ..Self::builtin(name, CommandKind::Action)
        }
    }

    pub fn namespace(name: &str) -> Self {
        Self::builtin(name, CommandKind::Namespace)
    }

    /// A user remapping to `target`
    pub fn user(target: &str) -> Self {
        Self {
            name: target.to_string(),
            kind: CommandKind::UserMapping,
            origin: Origin::User,
            motion_required: false,
            supported: true,
        }
    }

    /// Mark as recognized but not implemented (builder pattern)
    pub fn unsupported(mut self) -> Self {
        self.supported = false;
        self
    }

    pub fn is_operator(&self) -> bool {
        self.kind == CommandKind::Action && self.motion_required
    }
}

impl fmt::Display for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
