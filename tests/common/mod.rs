//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use vimkeys::config::Settings;
use vimkeys::host::Host;
use vimkeys::json_host::next_mode;
use vimkeys::keymap::{Arguments, KeySequence, Mode, PanelRequest};
use vimkeys::session::Session;

/// Host that records everything the engine asks of it
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub mode: Mode,
    /// Follow mode-changing commands the way an editor would
    pub track_mode: bool,
    pub executed: Vec<(String, Arguments)>,
    pub panels: Vec<PanelRequest>,
    pub messages: Vec<String>,
    pub inserted: Vec<String>,
}

impl RecordingHost {
    pub fn in_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn tracking() -> Self {
        Self {
            track_mode: true,
            ..Self::default()
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.executed.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn last_args(&self) -> &Arguments {
        &self.executed.last().expect("nothing executed").1
    }
}

impl Host for RecordingHost {
    fn mode(&self) -> Mode {
        self.mode
    }

    fn execute(&mut self, command: &str, args: &Arguments) {
        self.executed.push((command.to_string(), args.clone()));
        if self.track_mode {
            self.mode = next_mode(command, self.mode);
        }
    }

    fn show_input_panel(&mut self, request: &PanelRequest) {
        self.panels.push(request.clone());
    }

    fn status_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn unresolved(&mut self, keys: &KeySequence) {
        if self.mode == Mode::Insert {
            self.inserted.push(keys.to_string());
        } else {
            self.status_message(&format!("Unknown key sequence: {}", keys));
        }
    }
}

/// Session over a recording host in Normal mode with default settings
pub fn session() -> Session<RecordingHost> {
    Session::new(RecordingHost::default(), &Settings::default())
}

pub fn session_in(mode: Mode) -> Session<RecordingHost> {
    Session::new(RecordingHost::in_mode(mode), &Settings::default())
}

/// Press `keys` and return the names of the executed commands
pub fn run(session: &mut Session<RecordingHost>, keys: &str) -> Vec<String> {
    session.press_keys(keys).expect("valid key notation");
    session
        .host()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect()
}
