//! Per-keystroke dispatch state machine
//!
//! The driver buffers keys until the resolver reports a complete command,
//! composes operators with the motion that follows them, collects parser
//! input, and hands fully resolved commands back to the caller.

use serde_json::{Map, Value};

use super::command::{CommandDescriptor, CommandKind, Origin};
use super::mode::Mode;
use super::parsers::{Capture, Collection, Feed, InputParserDescriptor, ParserRegistry};
use super::resolver::{MatchStatus, Resolver};
use super::sequence::{strip_decorations, Decorations, KeySequence};
use super::types::KeyToken;

/// Named arguments passed to the host with a command
pub type Arguments = Map<String, Value>;

/// Where the driver is within one pending-command episode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,
    AwaitingMoreKeys,
    AwaitingParserInput,
    AwaitingPanelInput,
}

/// A command ready for the host, with everything typed for it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCommand {
    pub name: String,
    pub kind: CommandKind,
    pub origin: Origin,
    pub count: Option<u32>,
    pub register: Option<char>,
    /// Values captured by input parsers
    pub args: Arguments,
    /// The motion completing an operator
    pub motion: Option<Box<ResolvedCommand>>,
}

impl ResolvedCommand {
    pub fn new(descriptor: &CommandDescriptor, decorations: Decorations) -> Self {
        Self {
            name: descriptor.name.clone(),
            kind: descriptor.kind,
            origin: descriptor.origin,
            count: decorations.count,
            register: decorations.register,
            args: Arguments::new(),
            motion: None,
        }
    }

    pub fn decorations(&self) -> Decorations {
        Decorations {
            register: self.register,
            count: self.count,
        }
    }

    /// The motion if there is one, else this command
    pub fn innermost(&self) -> &ResolvedCommand {
        match self.motion {
            Some(ref motion) => motion.innermost(),
            None => self,
        }
    }

    pub fn innermost_mut(&mut self) -> &mut ResolvedCommand {
        match self.motion {
            Some(ref mut motion) => motion.innermost_mut(),
            None => self,
        }
    }

    /// Flatten into the argument map handed to the host
    pub fn arguments(&self) -> Arguments {
        let mut args = self.args.clone();
        if let Some(count) = self.count {
            args.insert("count".to_string(), Value::from(count));
        }
        if let Some(register) = self.register {
            args.insert("register".to_string(), Value::String(register.to_string()));
        }
        if let Some(motion) = &self.motion {
            let mut nested = motion.arguments();
            nested.insert("name".to_string(), Value::String(motion.name.clone()));
            args.insert("motion".to_string(), Value::Object(nested));
        }
        args
    }
}

/// A resolved command handed back to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub command: ResolvedCommand,
    /// Follow-up command for parsers with a completion callback
    pub on_done: Option<String>,
    /// Keys left over after the command; feed them next
    pub replay: KeySequence,
}

/// Ask the host to collect a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRequest {
    pub command: String,
    pub prompt: String,
    pub default: String,
}

/// How the host's input panel finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelResult {
    Submitted(String),
    Cancelled,
}

/// Result of feeding one key to the driver
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Execute(Dispatch),
    /// The keys so far are a valid prefix
    AwaitMore,
    /// A parser is collecting keys
    AwaitInput,
    /// Show an input panel; the driver waits for `resume_panel`
    ShowPanel(PanelRequest),
    /// The keys typed this episode are not a command
    Unresolved(KeySequence),
    /// Recognized but not implemented
    Unsupported(CommandDescriptor),
    Cancelled,
    /// A key arrived while an input panel owns input
    Suspended,
}

#[derive(Debug, Clone)]
struct PendingOperator {
    command: ResolvedCommand,
    keys: KeySequence,
    mode: Mode,
}

#[derive(Debug, Clone)]
struct PendingInput {
    command: ResolvedCommand,
    parser: InputParserDescriptor,
    capture: Option<Capture>,
    replay: KeySequence,
}

#[derive(Debug, Clone, Default)]
pub struct Driver {
    state: State,
    /// Keys awaiting resolution
    pending: KeySequence,
    /// Every key of the current episode, for reporting
    typed: KeySequence,
    operator: Option<PendingOperator>,
    input: Option<PendingInput>,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    pub fn pending(&self) -> &KeySequence {
        &self.pending
    }

    /// Keys typed since the driver was last idle
    pub fn typed(&self) -> &KeySequence {
        &self.typed
    }

    /// The operator waiting for a motion, if any
    pub fn pending_operator(&self) -> Option<&ResolvedCommand> {
        self.operator.as_ref().map(|op| &op.command)
    }

    /// Drop all buffered input and return to Idle
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.pending.clear();
        self.typed.clear();
        self.operator = None;
        self.input = None;
    }

    /// Process one keystroke typed in `mode`
    pub fn feed(
        &mut self,
        key: KeyToken,
        mode: Mode,
        resolver: &Resolver<'_>,
        parsers: &ParserRegistry,
    ) -> Step {
        tracing::trace!("key {} in {} ({:?})", key, mode, self.state);

        if key.is_escape() && self.state != State::Idle {
            tracing::debug!("cancelled after {}", self.typed);
            self.reset();
            return Step::Cancelled;
        }

        if self.state != State::AwaitingPanelInput {
            self.typed.push(key);
        }
        self.process(key, mode, resolver, parsers)
    }

    /// Finish an input panel opened by [`Step::ShowPanel`]
    pub fn resume_panel(&mut self, result: PanelResult) -> Step {
        if self.state != State::AwaitingPanelInput {
            tracing::warn!("Panel result arrived with no panel pending");
            return Step::Cancelled;
        }

        match result {
            PanelResult::Submitted(text) => self.finish_input(text),
            PanelResult::Cancelled => {
                self.reset();
                Step::Cancelled
            }
        }
    }

    fn process(
        &mut self,
        key: KeyToken,
        mode: Mode,
        resolver: &Resolver<'_>,
        parsers: &ParserRegistry,
    ) -> Step {
        match self.state {
            State::AwaitingPanelInput => Step::Suspended,
            State::AwaitingParserInput => self.feed_parser(key),
            State::Idle | State::AwaitingMoreKeys => {
                self.pending.push(key);
                if self.operator.is_some() {
                    self.resolve_operator_target(resolver, parsers)
                } else {
                    self.resolve_pending(mode, resolver, parsers)
                }
            }
        }
    }

    /// Process keys left over after a resolution, stopping at the first
    /// step that is not waiting for more. After an `Execute` the later keys
    /// become replay keys. Any other step ends the episode and they are
    /// dropped: `Unresolved` already names them since it carries every key
    /// typed in the episode, while `Unsupported` and `Cancelled` discard them.
    fn process_all(
        &mut self,
        keys: KeySequence,
        mode: Mode,
        resolver: &Resolver<'_>,
        parsers: &ParserRegistry,
    ) -> Step {
        let mut step = Step::AwaitMore;
        let mut keys = keys.into_iter();
        for key in keys.by_ref() {
            step = self.process(key, mode, resolver, parsers);
            if !matches!(step, Step::AwaitMore | Step::AwaitInput) {
                break;
            }
        }

        let rest: KeySequence = keys.collect();
        if !rest.is_empty() {
            match &mut step {
                Step::Execute(dispatch) => dispatch.replay = dispatch.replay.concat(&rest),
                other => tracing::debug!("dropping {} after {:?}", rest, other),
            }
        }
        step
    }

    fn resolve_pending(
        &mut self,
        mode: Mode,
        resolver: &Resolver<'_>,
        parsers: &ParserRegistry,
    ) -> Step {
        let Some(resolved) = resolver.resolve(&self.pending, mode, None) else {
            return self.unresolved();
        };

        let command = match resolved.status {
            MatchStatus::Incomplete => {
                self.state = State::AwaitingMoreKeys;
                return Step::AwaitMore;
            }
            MatchStatus::Complete(command) => command,
        };

        if !command.supported {
            return self.unsupported(command);
        }

        // Visual modes bind operators as actions on the selection
        if command.is_operator() && !mode.is_visual() && mode != Mode::OperatorPending {
            tracing::debug!("operator {} waiting for a motion", command);
            self.operator = Some(PendingOperator {
                command: ResolvedCommand::new(&command, resolved.decorations),
                keys: resolved.consumed,
                mode,
            });
            self.pending.clear();
            self.state = State::AwaitingMoreKeys;
            return self.process_all(resolved.remainder, mode, resolver, parsers);
        }

        let command = ResolvedCommand::new(&command, resolved.decorations);
        self.begin_dispatch(command, resolved.remainder, parsers)
    }

    /// Resolve keys typed after an operator: first as a motion in
    /// operator-pending mode, then as a composite with the operator's keys
    fn resolve_operator_target(
        &mut self,
        resolver: &Resolver<'_>,
        parsers: &ParserRegistry,
    ) -> Step {
        if let Some(resolved) = resolver.resolve(&self.pending, Mode::OperatorPending, None) {
            match resolved.status {
                MatchStatus::Incomplete => {
                    self.state = State::AwaitingMoreKeys;
                    return Step::AwaitMore;
                }
                MatchStatus::Complete(target)
                    if matches!(target.kind, CommandKind::Motion | CommandKind::UserMapping) =>
                {
                    return self.complete_operator(
                        target,
                        resolved.decorations,
                        resolved.remainder,
                        parsers,
                    );
                }
                MatchStatus::Complete(_) => {}
            }
        }

        self.resolve_composite(resolver, parsers)
    }

    fn complete_operator(
        &mut self,
        target: CommandDescriptor,
        decorations: Decorations,
        remainder: KeySequence,
        parsers: &ParserRegistry,
    ) -> Step {
        let Some(PendingOperator { mut command, .. }) = self.operator.take() else {
            return self.unresolved();
        };
        if !target.supported {
            return self.unsupported(target);
        }

        // `2d3w` deletes six words: the count belongs to the operator
        let merged = command.decorations().merge(decorations);
        command.count = merged.count;
        command.register = merged.register;
        command.motion = Some(Box::new(ResolvedCommand::new(
            &target,
            Decorations::default(),
        )));
        self.begin_dispatch(command, remainder, parsers)
    }

    /// `dd`, `g~~`, `gUgU`: the operator's keys plus the keys after it,
    /// looked up in the mode the operator was typed in
    fn resolve_composite(&mut self, resolver: &Resolver<'_>, parsers: &ParserRegistry) -> Step {
        let Some(operator) = &self.operator else {
            return self.unresolved();
        };
        let (decorations, bare) = strip_decorations(&self.pending);
        let composite = operator.keys.concat(&bare);
        let operator_mode = operator.mode;

        let Some(resolved) =
            resolver.resolve(&composite, Mode::OperatorPending, Some(operator_mode))
        else {
            return self.unresolved();
        };

        match resolved.status {
            MatchStatus::Incomplete => {
                self.state = State::AwaitingMoreKeys;
                Step::AwaitMore
            }
            MatchStatus::Complete(command) if !command.is_operator() => {
                let Some(operator) = self.operator.take() else {
                    return self.unresolved();
                };
                if !command.supported {
                    return self.unsupported(command);
                }
                tracing::debug!("composite {} -> {}", composite, command);
                let decorations = operator.command.decorations().merge(decorations);
                let command = ResolvedCommand::new(&command, decorations);
                self.begin_dispatch(command, resolved.remainder, parsers)
            }
            MatchStatus::Complete(_) => self.unresolved(),
        }
    }

    /// Emit `command`, or first collect the input its parser asks for
    fn begin_dispatch(
        &mut self,
        command: ResolvedCommand,
        replay: KeySequence,
        parsers: &ParserRegistry,
    ) -> Step {
        let Ok(parser) = parsers.lookup(&command.innermost().name) else {
            self.reset();
            return Step::Execute(Dispatch {
                command,
                on_done: None,
                replay,
            });
        };

        self.pending.clear();
        self.operator = None;

        match parser.collection {
            Collection::Immediate(accept) => {
                tracing::debug!("{} reads input", command.innermost().name);
                self.input = Some(PendingInput {
                    command,
                    parser,
                    capture: Some(Capture::new(accept)),
                    replay,
                });
                self.state = State::AwaitingParserInput;
                Step::AwaitInput
            }
            Collection::ViaPanel { prompt } => {
                let request = PanelRequest {
                    command: parser
                        .interactive_command
                        .unwrap_or(command.innermost().name.as_str())
                        .to_string(),
                    prompt: prompt.to_string(),
                    default: String::new(),
                };
                tracing::debug!("{} reads input from a panel", request.command);
                self.input = Some(PendingInput {
                    command,
                    parser,
                    capture: None,
                    replay,
                });
                self.state = State::AwaitingPanelInput;
                Step::ShowPanel(request)
            }
        }
    }

    fn feed_parser(&mut self, key: KeyToken) -> Step {
        let feed = match self.input.as_mut().and_then(|input| input.capture.as_mut()) {
            Some(capture) => capture.feed(key),
            None => {
                self.reset();
                return Step::Cancelled;
            }
        };

        match feed {
            Feed::Pending => Step::AwaitInput,
            Feed::Satisfied(value) => self.finish_input(value),
            Feed::Rejected => self.unresolved(),
        }
    }

    fn finish_input(&mut self, value: String) -> Step {
        let Some(PendingInput {
            mut command,
            parser,
            replay,
            ..
        }) = self.input.take()
        else {
            self.reset();
            return Step::Cancelled;
        };

        command
            .innermost_mut()
            .args
            .insert(parser.param_name().to_string(), Value::String(value));
        self.reset();
        Step::Execute(Dispatch {
            command,
            on_done: parser.on_done.map(str::to_string),
            replay,
        })
    }

    fn unresolved(&mut self) -> Step {
        let keys = std::mem::take(&mut self.typed);
        tracing::debug!("unresolved sequence {}", keys);
        self.reset();
        Step::Unresolved(keys)
    }

    fn unsupported(&mut self, command: CommandDescriptor) -> Step {
        tracing::debug!("unsupported command {}", command);
        self.reset();
        Step::Unsupported(command)
    }
}
