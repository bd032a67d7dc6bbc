//! Resolution of pending keys against user mappings and built-in bindings
//!
//! User mappings are checked first. Their head grows one key at a time and
//! the first head that matches wins, so with `dd` and `ddd` both mapped,
//! `ddd` resolves to `dd` with `d` left over. Built-in bindings are only
//! consulted when no user mapping matches or could still match.

use super::command::{CommandDescriptor, CommandKind};
use super::mode::Mode;
use super::sequence::{strip_decorations, Decorations, KeySequence};
use super::store::MappingStore;
use super::table::CommandTable;

/// Whether the pending keys form a whole command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStatus {
    Complete(CommandDescriptor),
    /// A valid prefix; more keys are needed
    Incomplete,
}

/// Outcome of one resolution attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMapping {
    /// Bare keys matched by the command (decorations removed)
    pub consumed: KeySequence,
    /// Keys after the match, to be processed again
    pub remainder: KeySequence,
    pub status: MatchStatus,
    /// Register and count typed ahead of the command
    pub decorations: Decorations,
}

impl ResolvedMapping {
    fn complete(
        seq: &KeySequence,
        head_len: usize,
        command: CommandDescriptor,
        decorations: Decorations,
    ) -> Self {
        let (consumed, remainder) = seq.split_at(head_len);
        Self {
            consumed,
            remainder,
            status: MatchStatus::Complete(command),
            decorations,
        }
    }

    fn incomplete(seq: &KeySequence, decorations: Decorations) -> Self {
        Self {
            consumed: seq.clone(),
            remainder: KeySequence::new(),
            status: MatchStatus::Incomplete,
            decorations,
        }
    }

    pub fn command(&self) -> Option<&CommandDescriptor> {
        match &self.status {
            MatchStatus::Complete(command) => Some(command),
            MatchStatus::Incomplete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status, MatchStatus::Complete(_))
    }
}

/// Read-only view over the two binding sources
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a MappingStore,
    table: &'a CommandTable,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a MappingStore, table: &'a CommandTable) -> Self {
        Self { store, table }
    }

    /// Resolve `pending` in `mode`, or in `override_mode` when given
    ///
    /// Returns `None` when nothing is pending or nothing matches, exactly or
    /// as a prefix. Resolution never changes any state.
    pub fn resolve(
        &self,
        pending: &KeySequence,
        mode: Mode,
        override_mode: Option<Mode>,
    ) -> Option<ResolvedMapping> {
        if pending.is_empty() {
            return None;
        }

        let mode = override_mode.unwrap_or(mode);
        let (decorations, bare) = if mode.takes_decorations() {
            strip_decorations(pending)
        } else {
            (Decorations::default(), pending.clone())
        };
        if bare.is_empty() {
            tracing::trace!("only decorations pending: {}", pending);
            return Some(ResolvedMapping::incomplete(&bare, decorations));
        }

        self.resolve_user(&bare, mode, decorations)
            .or_else(|| self.resolve_builtin(&bare, mode, decorations))
    }

    fn resolve_user(
        &self,
        bare: &KeySequence,
        mode: Mode,
        decorations: Decorations,
    ) -> Option<ResolvedMapping> {
        for n in 1..=bare.len() {
            let (head, _) = bare.split_at(n);
            if let Some(entry) = self.store.find_exact(mode, &head) {
                tracing::debug!("user mapping {} -> {} in {}", head, entry.target, mode);
                return Some(ResolvedMapping::complete(bare, n, entry.target, decorations));
            }
        }

        if !self.store.find_prefixed(mode, bare).is_empty() {
            tracing::debug!("partial user mapping {} in {}", bare, mode);
            return Some(ResolvedMapping::incomplete(bare, decorations));
        }

        None
    }

    fn resolve_builtin(
        &self,
        bare: &KeySequence,
        mode: Mode,
        decorations: Decorations,
    ) -> Option<ResolvedMapping> {
        if let Some(command) = self.table.find_exact(mode, bare) {
            if command.kind != CommandKind::Namespace {
                tracing::debug!("command {} -> {} in {}", bare, command, mode);
                return Some(ResolvedMapping::complete(
                    bare,
                    bare.len(),
                    command.clone(),
                    decorations,
                ));
            }
        }

        if self.table.has_prefixed(mode, bare) {
            tracing::debug!("partial command {} in {}", bare, mode);
            return Some(ResolvedMapping::incomplete(bare, decorations));
        }

        // Keys left over from an abandoned user-mapping prefix, as in `jj`
        // while a user mapping `jk` was pending: the shortest complete head
        // runs and the rest is fed again
        for n in 1..bare.len() {
            let (head, _) = bare.split_at(n);
            if let Some(command) = self.table.find_exact(mode, &head) {
                if command.kind != CommandKind::Namespace {
                    tracing::debug!("command {} with keys after it in {}", head, mode);
                    return Some(ResolvedMapping::complete(
                        bare,
                        n,
                        command.clone(),
                        decorations,
                    ));
                }
            }
        }

        tracing::debug!("no command for {} in {}", bare, mode);
        None
    }
}
